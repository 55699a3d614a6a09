//! Human-readable rendering of reports and errors.
//!
//! Everything here is a side channel: the functional results live in
//! [`crate::types`], and nothing rendered here feeds back into them.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::Error;
use crate::types::{Absence, ContextWindow, Declaration, EditSafetyReport, OccurrenceReport, Scope};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    print_markdown_to_stderr(&render_error(e));
}

/// Print markdown to stderr, bolding headings.
pub fn print_markdown_to_stderr(md: &str) {
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::ConfigNotFound { path } => format!("\
# Error: Config Not Found

`{}` does not exist.

## Fix

Check the `--config` path, or drop it to use `.snipscope.toml` from the working directory.
", path.display()),

        Error::FileTooLarge { file, size_bytes, max_bytes } => format!("\
# Error: File Too Large

`{}` is {size_bytes} bytes (max {max_bytes}).

## Fix

Raise `max_file_bytes` in `.snipscope.toml`.
", file.display()),

        Error::Io { path, source } => format!("\
# Error: Cannot Read File

`{}`: {source}
", path.display()),

        Error::ParseFailed { file, reason } => format!("\
# Error: Parse Failed

Could not parse `{}`: {reason}
", file.display()),

        Error::TomlDe(e) => format!("\
# Error: Invalid Config

{e}
"),
    };
}

/// Render the outcome of a `find` as markdown.
pub fn render_occurrence_report(file: &Path, search_text: &str, report: &OccurrenceReport) -> String {
    let file = file.display();
    return match report {
        OccurrenceReport::Unique { line, window } => {
            let mut out = format!("\
# Unique Match

`{search_text}` found once in `{file}`, line {}.

## Context

", line.saturating_add(1));
            push_numbered_window(&mut out, window, Some(*line));
            out
        },
        OccurrenceReport::Ambiguous { count, occurrences } => {
            let mut out = format!("\
# Ambiguous Match

`{search_text}` appears on {count} lines in `{file}`.

## Occurrences

");
            for occurrence in occurrences {
                let _ = writeln!(out, "- line {}: `{}`", occurrence.line.saturating_add(1), occurrence.text);
            }
            let _ = write!(out, "\
\n## Fix

Narrow the search with a scope or a longer snippet, or compare the occurrences:

    snipscope find {file} '{search_text}' --function <name>
    snipscope suggest {file} '{search_text}'
");
            out
        },
        OccurrenceReport::NotFound(Absence::NoMatch) => format!("\
# Not Found

No line in the searched region of `{file}` contains `{search_text}`.
"),
        OccurrenceReport::NotFound(Absence::ScopeUnresolved(scope)) => render_unresolved_scope(&file.to_string(), search_text, scope),
    };
}

/// Render the not-found diagnostic for a scope whose symbol does not exist.
fn render_unresolved_scope(file: &str, search_text: &str, scope: &Scope) -> String {
    return format!("\
# Not Found

The {scope} does not exist in `{file}`, so `{search_text}` was not searched.

## Fix

List the declarations in the file:

    snipscope symbols {file}
");
}

/// Render an edit safety report as markdown.
pub fn render_safety_report(file: &Path, report: &EditSafetyReport) -> String {
    let verdict = if report.is_unique { "safe" } else { "unsafe" };
    let mut out = format!("\
# Edit Safety: {verdict}

- file: `{}`
- occurrences: {}
- unique: {}
- indentation preserved: {}
", file.display(), report.occurrences, report.is_unique, report.indentation_preserved);

    if !report.suggestions.is_empty() {
        out.push_str("\n## Disambiguation\n\n");
        for suggestion in &report.suggestions {
            push_indented_block(&mut out, suggestion);
        }
    }
    return out;
}

/// Render disambiguation suggestions, one indented block each.
pub fn render_suggestions(suggestions: &[String]) -> String {
    let mut out = String::new();
    for suggestion in suggestions {
        push_indented_block(&mut out, suggestion);
    }
    return out;
}

/// Render a declaration listing as a markdown list with 1-based line ranges.
pub fn render_declarations(file: &Path, declarations: &[Declaration]) -> String {
    let mut out = format!("# Declarations in `{}`\n\n", file.display());
    if declarations.is_empty() {
        out.push_str("No functions or classes.\n");
    }
    for decl in declarations {
        let _ = writeln!(
            out,
            "- {} `{}`: lines {}-{}",
            decl.kind,
            decl.name,
            decl.range.start.saturating_add(1),
            decl.range.end.saturating_add(1),
        );
    }
    return out;
}

/// Append a window as an indented code block, numbering lines and marking `target`.
fn push_numbered_window(out: &mut String, window: &ContextWindow, target: Option<usize>) {
    for (offset, text) in window.lines.iter().enumerate() {
        let line = window.start.saturating_add(offset);
        let marker = if target == Some(line) { '>' } else { ' ' };
        let _ = writeln!(out, "    {marker}{:>5} | {text}", line.saturating_add(1));
    }
}

/// Append text as an indented code block followed by a blank line.
fn push_indented_block(out: &mut String, text: &str) {
    for line in text.lines() {
        let _ = writeln!(out, "    {line}");
    }
    out.push('\n');
}
