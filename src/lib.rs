//! Snipscope: scope-aware snippet resolution for Python sources.
//!
//! Before an automated edit replaces a snippet, snipscope answers where that
//! snippet is: it maps a function or class name to the lines it spans, finds
//! the search text inside that scope, and either returns the single match with
//! its surrounding context or reports every candidate so the caller can narrow
//! the search. Nothing here writes to disk.

pub mod config;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod grammar;
pub mod locator;
pub mod resolver;
pub mod types;

pub use document::SourceDocument;
pub use error::Error;
pub use locator::{LocateStrategy, locate, locate_by_indentation, locate_structural};
pub use resolver::{assess_edit_safety, resolve_unique, suggest_disambiguation};
pub use types::{
    Absence, ContextWindow, Declaration, DeclarationKind, EditSafetyReport, LineRange, Occurrence,
    OccurrenceReport, Scope,
};
