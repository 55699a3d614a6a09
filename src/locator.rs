//! Symbol location: map a function or class name to the lines it spans.
//!
//! The structural strategy reads declaration bounds from a tree-sitter parse.
//! When the source does not parse cleanly, the indentation strategy scans for
//! the declaration header and follows the block until the indentation drops
//! back to the header's depth.
//!
//! Names are assumed unique within the document: when several declarations of
//! the same kind share a name, the first one encountered wins. The tree walk
//! is breadth-first by statement nesting: a module-level function beats any
//! method or nested function, and among declarations at the same depth the
//! earlier one wins. The scan goes top to bottom.

use std::collections::VecDeque;

use regex::Regex;
use tree_sitter::{Node, Point};

use crate::document::{SourceDocument, indentation_width};
use crate::error::Error;
use crate::grammar;
use crate::types::{Declaration, DeclarationKind, LineRange};

/// Node kinds that nest in the tree but not in Python's statement structure.
const TRANSPARENT_NODE_KINDS: &[&str] =
    &["block", "decorated_definition", "else_clause", "finally_clause"];

/// Which strategy `locate_with` uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocateStrategy {
    /// Structural parse, falling back to the indentation scan on a syntax error.
    #[default]
    Auto,
    /// Indentation scan only.
    Indentation,
    /// Structural parse only; a syntax error means the symbol is not found.
    Structural,
}

/// Find the line range of the named declaration, structurally when possible.
pub fn locate(document: &SourceDocument, name: &str, kind: DeclarationKind) -> Option<LineRange> {
    return locate_with(document, name, kind, LocateStrategy::Auto);
}

/// Find the line range of the named declaration using an explicit strategy.
pub fn locate_with(
    document: &SourceDocument,
    name: &str,
    kind: DeclarationKind,
    strategy: LocateStrategy,
) -> Option<LineRange> {
    return match strategy {
        LocateStrategy::Auto => locate_structural(document, name, kind).unwrap_or_else(|e| {
            log::debug!("{e}; scanning indentation for {kind} `{name}`");
            return locate_by_indentation(document, name, kind);
        }),
        LocateStrategy::Indentation => locate_by_indentation(document, name, kind),
        LocateStrategy::Structural => locate_structural(document, name, kind).unwrap_or_else(|e| {
            log::warn!("{e}; {kind} `{name}` treated as absent");
            return None;
        }),
    };
}

/// Locate a declaration from the tree-sitter parse of the document.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if the document does not parse cleanly.
pub fn locate_structural(
    document: &SourceDocument,
    name: &str,
    kind: DeclarationKind,
) -> Result<Option<LineRange>, Error> {
    let declarations = list_declarations(document)?;
    return Ok(declarations
        .into_iter()
        .find(|d| return d.kind == kind && d.name == name)
        .map(|d| return d.range));
}

/// List every function and class declaration, outer declarations first.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if the document does not parse cleanly.
pub fn list_declarations(document: &SourceDocument) -> Result<Vec<Declaration>, Error> {
    let tree = grammar::parse_python(document.path(), document.content())?;
    let last_line = document.line_count().saturating_sub(1);

    let mut declarations = Vec::new();
    let mut queue = VecDeque::from([tree.root_node()]);
    while let Some(node) = queue.pop_front() {
        if let Some(decl) = declaration_from_node(node, document.content(), last_line) {
            declarations.push(decl);
        }
        enqueue_children(node, &mut queue);
    }

    return Ok(declarations);
}

/// Queue the children of `node` one statement level down.
///
/// Blocks, decorator wrappers and `else`/`finally` clauses add a tree level
/// without adding a level of Python statement nesting, so their children are
/// queued in their place.
fn enqueue_children<'tree>(node: Node<'tree>, queue: &mut VecDeque<Node<'tree>>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if TRANSPARENT_NODE_KINDS.contains(&child.kind()) {
            enqueue_children(child, queue);
        } else {
            queue.push_back(child);
        }
    }
}

/// Extract a declaration from a `function_definition` or `class_definition` node.
fn declaration_from_node(node: Node<'_>, source: &str, last_line: usize) -> Option<Declaration> {
    let kind = DeclarationKind::from_node_kind(node.kind())?;
    let name_node = node.child_by_field_name("name")?;
    let name = name_node.utf8_text(source.as_bytes()).ok()?.to_string();

    let start = node.start_position().row;
    let end_point = last_code_point(node);
    // A token that swallowed the final newline ends at column 0 of the following row.
    let end = if end_point.column == 0 && end_point.row > start {
        end_point.row.saturating_sub(1)
    } else {
        end_point.row
    };

    return Some(Declaration {
        kind,
        name,
        range: LineRange { end: end.min(last_line).max(start), start },
    });
}

/// End of the last token under `node` that is not a comment.
///
/// Tree-sitter attaches comments that trail a body to the body's block; the
/// declaration itself ends at its last statement.
fn last_code_point(node: Node<'_>) -> Point {
    let mut current = node;
    loop {
        let mut cursor = current.walk();
        let last = current
            .children(&mut cursor)
            .filter(|child| return child.kind() != "comment")
            .last();
        let Some(child) = last else {
            return current.end_position();
        };
        current = child;
    }
}

/// Locate a declaration by scanning for its header line and following indentation.
///
/// The block ends on the line before the first following non-blank line that is
/// indented no deeper than the header, or at the end of the document.
pub fn locate_by_indentation(
    document: &SourceDocument,
    name: &str,
    kind: DeclarationKind,
) -> Option<LineRange> {
    let pattern = match header_pattern(name, kind) {
        Ok(pattern) => pattern,
        Err(e) => {
            log::warn!("cannot build header pattern for {kind} `{name}`: {e}");
            return None;
        },
    };

    let lines = document.lines();
    let (start, header) = lines.iter().enumerate().find(|(_, line)| return pattern.is_match(line))?;
    let depth = indentation_width(header);

    let end = lines
        .iter()
        .enumerate()
        .skip(start.saturating_add(1))
        .find(|(_, line)| return !line.trim().is_empty() && indentation_width(line) <= depth)
        .map_or(lines.len().saturating_sub(1), |(next, _)| return next.saturating_sub(1));

    return Some(LineRange { end, start });
}

/// Build the header regex for a declaration. The name is escaped so it only
/// ever matches itself, never a longer identifier.
fn header_pattern(name: &str, kind: DeclarationKind) -> Result<Regex, regex::Error> {
    let name = regex::escape(name);
    let pattern = match kind {
        DeclarationKind::Class => format!(r"^\s*class\s+{name}\s*[:(]"),
        DeclarationKind::Function => format!(r"^\s*(?:async\s+)?def\s+{name}\s*\("),
    };
    return Regex::new(&pattern);
}
