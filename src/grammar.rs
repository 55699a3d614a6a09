/// Tree-sitter Python grammar and the structural parse used by the locator.
use std::path::Path;

use tree_sitter::{Language, Parser, Tree};

use crate::error::Error;

/// The tree-sitter language for Python sources.
pub fn python() -> Language {
    return tree_sitter_python::LANGUAGE.into();
}

/// Parse Python source into a tree-sitter tree that contains no syntax errors.
///
/// Tree-sitter recovers from bad input by inserting ERROR and MISSING nodes;
/// a tree that needed recovery is reported as a failure so the caller never
/// reads declaration bounds out of a guessed structure.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if the language cannot be set, parsing yields no
/// tree, or the tree contains a syntax error.
pub fn parse_python(file_path: &Path, source: &str) -> Result<Tree, Error> {
    let mut parser = Parser::new();
    parser.set_language(&python()).map_err(|e| return Error::ParseFailed {
        file: file_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let tree = parser.parse(source, None).ok_or_else(|| return Error::ParseFailed {
        file: file_path.to_path_buf(),
        reason: "tree-sitter returned None".to_string(),
    })?;

    if tree.root_node().has_error() {
        return Err(Error::ParseFailed {
            file: file_path.to_path_buf(),
            reason: first_error_location(&tree),
        });
    }

    return Ok(tree);
}

/// Describe where the first ERROR or MISSING node sits (1-based line).
fn first_error_location(tree: &Tree) -> String {
    let mut cursor = tree.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            let line = node.start_position().row.saturating_add(1);
            return format!("syntax error at line {line}");
        }
        // Descend only into subtrees that contain the error.
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        if cursor.goto_next_sibling() {
            continue;
        }
        loop {
            if !cursor.goto_parent() {
                return "syntax error".to_string();
            }
            if cursor.goto_next_sibling() {
                break;
            }
        }
    }
}
