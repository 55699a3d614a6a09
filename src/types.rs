/// Core domain types for snipscope: declaration kinds, line ranges, context windows and reports.
use std::fmt;

use serde::Serialize;

/// The two structural categories the locator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// A `class` statement.
    Class,
    /// A `def` statement at any nesting depth, methods included.
    ///
    /// `async def` counts as a function too, for both the tree walk and the
    /// header scan, so `fetch` in `async def fetch():` is found the same way as
    /// a plain `def fetch():`.
    Function,
}

impl DeclarationKind {
    /// Map a tree-sitter-python node kind to a declaration kind.
    pub(crate) fn from_node_kind(node_kind: &str) -> Option<Self> {
        return match node_kind {
            "class_definition" => Some(Self::Class),
            "function_definition" => Some(Self::Function),
            _ => None,
        };
    }

    /// The keyword that opens a declaration of this kind.
    pub const fn keyword(self) -> &'static str {
        return match self {
            Self::Class => "class",
            Self::Function => "def",
        };
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Self::Class => f.write_str("class"),
            Self::Function => f.write_str("function"),
        };
    }
}

/// Inclusive, 0-indexed line span of a declaration.
/// `start <= end < line_count` holds by construction in the locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineRange {
    /// Last line of the declaration (inclusive).
    pub end: usize,
    /// First line of the declaration (the header line).
    pub start: usize,
}

impl LineRange {
    /// Whether `line` falls inside this range.
    pub const fn contains(&self, line: usize) -> bool {
        return self.start <= line && line <= self.end;
    }

    /// Number of lines spanned.
    pub const fn line_count(&self) -> usize {
        return self.end.saturating_sub(self.start).saturating_add(1);
    }
}

/// A named function or class found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// Function or class.
    pub kind: DeclarationKind,
    /// The declared identifier.
    pub name: String,
    /// Where the declaration sits in the document.
    pub range: LineRange,
}

/// Restricts occurrence counting to the lines of one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Only lines inside the named class.
    Class(String),
    /// Only lines inside the named function or method.
    Function(String),
}

impl Scope {
    /// The declaration kind the scope resolves against.
    pub const fn kind(&self) -> DeclarationKind {
        return match self {
            Self::Class(_) => DeclarationKind::Class,
            Self::Function(_) => DeclarationKind::Function,
        };
    }

    /// The symbol name the scope resolves against.
    pub fn name(&self) -> &str {
        return match self {
            Self::Class(name) | Self::Function(name) => name,
        };
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{} `{}`", self.kind(), self.name());
    }
}

/// A clamped slice of document lines around a target line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextWindow {
    /// The lines of the slice, in document order.
    pub lines: Vec<String>,
    /// 0-based index of the first line in the slice.
    pub start: usize,
}

impl ContextWindow {
    /// Whether the slice covers the given 0-based line.
    pub fn covers(&self, line: usize) -> bool {
        return self.start <= line && line < self.end();
    }

    /// Exclusive end index of the slice.
    pub fn end(&self) -> usize {
        return self.start.saturating_add(self.lines.len());
    }

    /// The slice joined with `\n`, ready to paste as edit context.
    pub fn text(&self) -> String {
        return self.lines.join("\n");
    }
}

/// One line that contains the search text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    /// 0-based line index.
    pub line: usize,
    /// The line with surrounding whitespace stripped.
    pub text: String,
}

/// Why a search produced no candidate line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Absence {
    /// The search ran but no candidate line contains the text.
    NoMatch,
    /// The scoping symbol does not exist, so there were no candidate lines.
    ScopeUnresolved(Scope),
}

/// Outcome of looking for one unique occurrence of a snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OccurrenceReport {
    /// More than one candidate line contains the text; narrow the search.
    Ambiguous {
        /// Number of matching lines.
        count: usize,
        /// Every matching line, in document order.
        occurrences: Vec<Occurrence>,
    },
    /// No candidate line contains the text.
    NotFound(Absence),
    /// Exactly one candidate line contains the text.
    Unique {
        /// 0-based index of the matching line.
        line: usize,
        /// Radius-2 context around the match.
        window: ContextWindow,
    },
}

/// Safety assessment of a literal old/new replacement pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditSafetyReport {
    /// Whether the first-line indentation of a multi-line replacement matches the original.
    pub indentation_preserved: bool,
    /// `occurrences == 1`.
    pub is_unique: bool,
    /// Non-overlapping literal count of the old text in the whole document.
    pub occurrences: usize,
    /// Per-occurrence context blocks, only when the old text is ambiguous.
    pub suggestions: Vec<String>,
}
