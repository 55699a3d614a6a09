//! CLI commands for snipscope: locate, find, suggest, safety, symbols.

use std::path::Path;
use std::process::ExitCode;

use serde_json::json;

use snipscope::config::Config;
use snipscope::diagnostics;
use snipscope::error::Error;
use snipscope::locator;
use snipscope::resolver;
use snipscope::{Absence, DeclarationKind, OccurrenceReport, Scope, SourceDocument};

/// Exit code for an ambiguous search or an unsafe edit.
const EXIT_AMBIGUOUS: u8 = 1;

/// Exit code for an absent symbol or snippet.
const EXIT_NOT_FOUND: u8 = 2;

/// Where the replacement texts of `safety` come from.
pub struct EditTexts<'a> {
    /// Literal text, when given inline.
    pub new: Option<&'a str>,
    /// File holding the text, when not given inline.
    pub new_file: Option<&'a Path>,
    /// Literal text, when given inline.
    pub old: Option<&'a str>,
    /// File holding the text, when not given inline.
    pub old_file: Option<&'a Path>,
}

/// Print the 1-based line range of a function or class.
///
/// # Errors
///
/// Returns `Error::Io` or `Error::FileTooLarge` if the file cannot be loaded.
pub fn locate(config: &Config, file: &Path, name: &str, kind: DeclarationKind, json: bool) -> Result<ExitCode, Error> {
    let document = SourceDocument::load_with_limit(file, config.max_file_bytes)?;
    let range = locator::locate_with(&document, name, kind, config.strategy);

    if json {
        println!("{:#}", json!({ "kind": kind, "name": name, "range": range }));
    } else if let Some(range) = range {
        println!("{kind} `{name}`: lines {}-{}", range.start.saturating_add(1), range.end.saturating_add(1));
    } else {
        eprintln!("{kind} `{name}` not found in {}", file.display());
    }

    if range.is_none() {
        return Ok(ExitCode::from(EXIT_NOT_FOUND));
    }
    return Ok(ExitCode::SUCCESS);
}

/// Look for one unique occurrence of `text`, optionally inside a scope.
///
/// # Errors
///
/// Returns `Error::Io` or `Error::FileTooLarge` if the file cannot be loaded.
pub fn find(config: &Config, file: &Path, text: &str, scope: Option<&Scope>, json: bool) -> Result<ExitCode, Error> {
    let document = SourceDocument::load_with_limit(file, config.max_file_bytes)?;
    let report = resolver::resolve_unique(&document, text, scope, config.strategy);

    if json {
        println!("{:#}", report_to_json(&report));
    } else {
        let md = diagnostics::render_occurrence_report(file, text, &report);
        match report {
            OccurrenceReport::Unique { .. } => print!("{md}"),
            _ => diagnostics::print_markdown_to_stderr(&md),
        }
    }

    return Ok(match report {
        OccurrenceReport::Ambiguous { .. } => ExitCode::from(EXIT_AMBIGUOUS),
        OccurrenceReport::NotFound(_) => ExitCode::from(EXIT_NOT_FOUND),
        OccurrenceReport::Unique { .. } => ExitCode::SUCCESS,
    });
}

/// Print a context block for every occurrence of `text` in the file.
///
/// # Errors
///
/// Returns `Error::Io` or `Error::FileTooLarge` if the file cannot be loaded.
pub fn suggest(config: &Config, file: &Path, text: &str) -> Result<ExitCode, Error> {
    let document = SourceDocument::load_with_limit(file, config.max_file_bytes)?;
    let suggestions = resolver::suggest_disambiguation(&document, text);
    print!("{}", diagnostics::render_suggestions(&suggestions));
    return Ok(ExitCode::SUCCESS);
}

/// Report whether replacing the old text with the new text would be safe.
///
/// # Errors
///
/// Returns `Error::Io` if the source or a text file cannot be read, or
/// `Error::FileTooLarge` if the source exceeds the limit.
pub fn safety(config: &Config, file: &Path, texts: &EditTexts<'_>, json: bool) -> Result<ExitCode, Error> {
    let document = SourceDocument::load_with_limit(file, config.max_file_bytes)?;
    let old = read_text(texts.old, texts.old_file)?;
    let new = read_text(texts.new, texts.new_file)?;
    let report = resolver::assess_edit_safety(&document, &old, &new);

    if json {
        println!("{:#}", json!(report));
    } else {
        print!("{}", diagnostics::render_safety_report(file, &report));
    }

    if report.is_unique {
        return Ok(ExitCode::SUCCESS);
    }
    return Ok(ExitCode::from(EXIT_AMBIGUOUS));
}

/// List every function and class with its line range.
///
/// # Errors
///
/// Returns `Error::Io` or `Error::FileTooLarge` if the file cannot be loaded,
/// or `Error::ParseFailed` if it does not parse cleanly.
pub fn symbols(config: &Config, file: &Path, json: bool) -> Result<ExitCode, Error> {
    let document = SourceDocument::load_with_limit(file, config.max_file_bytes)?;
    let declarations = locator::list_declarations(&document)?;

    if json {
        println!("{:#}", json!(declarations));
    } else {
        print!("{}", diagnostics::render_declarations(file, &declarations));
    }
    return Ok(ExitCode::SUCCESS);
}

/// Take inline text as-is, or read it from a file.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read.
fn read_text(inline: Option<&str>, file: Option<&Path>) -> Result<String, Error> {
    if let Some(text) = inline {
        return Ok(text.to_string());
    }
    let Some(path) = file else {
        return Ok(String::new());
    };
    return std::fs::read_to_string(path).map_err(|source| return Error::Io { path: path.to_path_buf(), source });
}

/// Machine-readable form of an occurrence report. Line numbers are 0-based.
fn report_to_json(report: &OccurrenceReport) -> serde_json::Value {
    return match report {
        OccurrenceReport::Ambiguous { count, occurrences } => json!({
            "status": "ambiguous",
            "count": count,
            "occurrences": occurrences,
        }),
        OccurrenceReport::NotFound(Absence::NoMatch) => json!({
            "status": "not_found",
            "reason": "no_match",
        }),
        OccurrenceReport::NotFound(Absence::ScopeUnresolved(scope)) => json!({
            "status": "not_found",
            "reason": "scope_unresolved",
            "scope": { "kind": scope.kind(), "name": scope.name() },
        }),
        OccurrenceReport::Unique { line, window } => json!({
            "status": "unique",
            "line": line,
            "window": window,
        }),
    };
}
