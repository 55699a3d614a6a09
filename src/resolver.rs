//! Occurrence resolution: find the one line an edit should target.
//!
//! A line is an occurrence when it contains the search text as a literal,
//! case- and whitespace-sensitive substring. Several hits on the same line
//! count once.

use std::fmt::Write as _;
use std::ops::Range;

use crate::document::{SourceDocument, indentation_width};
use crate::locator::{self, LocateStrategy};
use crate::types::{Absence, EditSafetyReport, Occurrence, OccurrenceReport, Scope};

/// Context radius around a unique match: quick inline context.
pub const UNIQUE_CONTEXT_RADIUS: usize = 2;

/// Context radius around each occurrence in a disambiguation suggestion.
pub const SUGGEST_CONTEXT_RADIUS: usize = 3;

/// Returned by [`suggest_disambiguation`] when there is nothing to disambiguate.
pub const ALREADY_UNIQUE: &str = "Text is already unique or not found";

/// Look for exactly one line containing `search_text`, optionally only inside `scope`.
///
/// An unresolvable scope yields `NotFound` rather than widening the search.
/// Ambiguous and not-found outcomes are also logged as warnings.
pub fn resolve_unique(
    document: &SourceDocument,
    search_text: &str,
    scope: Option<&Scope>,
    strategy: LocateStrategy,
) -> OccurrenceReport {
    let candidates = match scope {
        None => 0..document.line_count(),
        Some(scope) => {
            let Some(range) = locator::locate_with(document, scope.name(), scope.kind(), strategy)
            else {
                log::warn!(
                    "No occurrences of '{search_text}' found: {scope} does not exist in {}",
                    document.path().display()
                );
                return OccurrenceReport::NotFound(Absence::ScopeUnresolved(scope.clone()));
            };
            range.start..range.end.saturating_add(1)
        },
    };

    let lines = matching_lines(document, candidates, search_text);
    return match lines.as_slice() {
        [] => {
            log::warn!("No occurrences of '{search_text}' found");
            OccurrenceReport::NotFound(Absence::NoMatch)
        },
        [line] => OccurrenceReport::Unique {
            line: *line,
            window: document.context_window(*line, UNIQUE_CONTEXT_RADIUS),
        },
        _ => {
            let occurrences: Vec<Occurrence> = lines
                .iter()
                .filter_map(|&line| {
                    let text = document.line(line)?.trim().to_string();
                    return Some(Occurrence { line, text });
                })
                .collect();
            log::warn!("{}", ambiguity_listing(search_text, &occurrences));
            OccurrenceReport::Ambiguous { count: occurrences.len(), occurrences }
        },
    };
}

/// Render a context block for every occurrence of `search_text` in the whole document.
///
/// Scope is deliberately ignored: the blocks show where else the text appears.
/// Returns the single [`ALREADY_UNIQUE`] message when there are fewer than two
/// occurrences.
pub fn suggest_disambiguation(document: &SourceDocument, search_text: &str) -> Vec<String> {
    let lines = matching_lines(document, 0..document.line_count(), search_text);
    if lines.len() <= 1 {
        return vec![ALREADY_UNIQUE.to_string()];
    }

    return lines
        .iter()
        .enumerate()
        .map(|(index, &line)| {
            let window = document.context_window(line, SUGGEST_CONTEXT_RADIUS);
            return format!(
                "Occurrence {} (line {}):\n{}\n",
                index.saturating_add(1),
                line.saturating_add(1),
                window.text()
            );
        })
        .collect();
}

/// Assess whether replacing `old_text` with `new_text` would be safe.
///
/// The occurrence count is a literal, non-overlapping count over the raw
/// content, so multi-line snippets are counted as a whole. Indentation is only
/// compared when both texts span several lines.
pub fn assess_edit_safety(document: &SourceDocument, old_text: &str, new_text: &str) -> EditSafetyReport {
    let occurrences = document.content().matches(old_text).count();

    let indentation_preserved = match (old_text.split_once('\n'), new_text.split_once('\n')) {
        (Some((old_first, _)), Some((new_first, _))) => {
            indentation_width(old_first) == indentation_width(new_first)
        },
        _ => true,
    };

    let suggestions = if occurrences > 1 {
        suggest_disambiguation(document, old_text)
    } else {
        Vec::new()
    };

    return EditSafetyReport {
        indentation_preserved,
        is_unique: occurrences == 1,
        occurrences,
        suggestions,
    };
}

/// 0-based indices of the candidate lines that contain `search_text`.
fn matching_lines(document: &SourceDocument, candidates: Range<usize>, search_text: &str) -> Vec<usize> {
    let offset = candidates.start;
    let Some(lines) = document.lines().get(candidates) else {
        return Vec::new();
    };

    return lines
        .iter()
        .enumerate()
        .filter(|(_, line)| return line.contains(search_text))
        .map(|(index, _)| return offset.saturating_add(index))
        .collect();
}

/// The console listing for an ambiguous search: a count, then one line per occurrence.
fn ambiguity_listing(search_text: &str, occurrences: &[Occurrence]) -> String {
    let mut out = format!("Found {} occurrences of '{search_text}'", occurrences.len());
    for occurrence in occurrences {
        let _ = write!(out, "\n  Line {}: {}", occurrence.line.saturating_add(1), occurrence.text);
    }
    return out;
}
