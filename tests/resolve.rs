use std::path::{Path, PathBuf};

use snipscope::{
    DeclarationKind, LineRange, LocateStrategy, OccurrenceReport, Scope, SourceDocument, assess_edit_safety,
    locate, locate_by_indentation, locate_structural, resolve_unique, suggest_disambiguation,
};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/user_service.py")
}

fn fixture() -> SourceDocument {
    SourceDocument::load(&fixture_path()).unwrap()
}

/// The fixture with an unparseable line appended, forcing the indentation scan.
fn broken_fixture() -> SourceDocument {
    let mut content = std::fs::read_to_string(fixture_path()).unwrap();
    content.push_str("\ndef broken(:\n    pass\n");
    SourceDocument::from_source("broken.py", content)
}

const DECLARATIONS: &[(&str, DeclarationKind)] = &[
    ("UserService", DeclarationKind::Class),
    ("__init__", DeclarationKind::Function),
    ("authenticate_user", DeclarationKind::Function),
    ("find_user_by_username", DeclarationKind::Function),
    ("verify_password", DeclarationKind::Function),
    ("create_session", DeclarationKind::Function),
];

#[test]
fn located_ranges_start_at_the_header() {
    let doc = fixture();
    for &(name, kind) in DECLARATIONS {
        let range = locate(&doc, name, kind).unwrap_or_else(|| panic!("{name} not found"));
        let header = doc.line(range.start).unwrap().trim();
        let expected = format!("{} {name}", kind.keyword());
        assert!(header.starts_with(&expected), "{name}: header was {header:?}");
        assert!(range.end < doc.line_count());
    }
}

#[test]
fn authenticate_user_spans_its_body() {
    let range = locate(&fixture(), "authenticate_user", DeclarationKind::Function);
    assert_eq!(range, Some(LineRange { end: 16, start: 5 }));
}

#[test]
fn absent_symbols_are_none_under_both_strategies() {
    let clean = fixture();
    let broken = broken_fixture();
    assert!(locate_structural(&broken, "UserService", DeclarationKind::Class).is_err());

    for name in ["logout", "authenticate", "UserServices", "user_service"] {
        assert_eq!(locate(&clean, name, DeclarationKind::Function), None, "{name}");
        assert_eq!(locate(&clean, name, DeclarationKind::Class), None, "{name}");
        assert_eq!(locate(&broken, name, DeclarationKind::Function), None, "{name}");
        assert_eq!(locate(&broken, name, DeclarationKind::Class), None, "{name}");
    }
}

#[test]
fn indentation_scan_matches_structure_for_nested_and_top_level() {
    let doc = fixture();
    for (name, kind) in [("create_session", DeclarationKind::Function), ("UserService", DeclarationKind::Class)] {
        let structural = locate_structural(&doc, name, kind).unwrap();
        assert!(structural.is_some(), "{name}");
        assert_eq!(locate_by_indentation(&doc, name, kind), structural, "{name}");
    }
}

#[test]
fn unique_snippet_returns_clamped_context() {
    let doc = fixture();
    let report = resolve_unique(&doc, "class UserService", None, LocateStrategy::Auto);
    let OccurrenceReport::Unique { line, window } = report else {
        panic!("expected a unique report");
    };
    assert_eq!(line, 0);
    assert_eq!(window.start, 0);
    assert_eq!(window.lines.len(), 3);
    assert_eq!(window.lines[0], "class UserService:");

    let report = resolve_unique(&doc, "self.active_sessions[session_id]", None, LocateStrategy::Auto);
    let OccurrenceReport::Unique { line, window } = report else {
        panic!("expected a unique report");
    };
    assert_eq!(line, 31);
    assert_eq!((window.start, window.end()), (29, 33));
}

#[test]
fn duplicate_snippet_is_ambiguous_with_every_line() {
    let doc = fixture();
    let report = resolve_unique(&doc, "return None", None, LocateStrategy::Auto);
    let OccurrenceReport::Ambiguous { count, occurrences } = report else {
        panic!("expected an ambiguous report");
    };
    assert_eq!(count, 2);
    assert_eq!(occurrences.len(), 2);
    for occurrence in &occurrences {
        assert!(doc.line(occurrence.line).unwrap().contains("return None"));
        assert_eq!(occurrence.text, "return None");
    }
    assert_eq!(occurrences[0].line, 16);
    assert_eq!(occurrences[1].line, 22);
}

#[test]
fn scoped_search_only_counts_lines_in_scope() {
    let doc = fixture();
    let scope = Scope::Function("find_user_by_username".into());
    let report = resolve_unique(&doc, "return None", Some(&scope), LocateStrategy::Auto);
    assert!(matches!(report, OccurrenceReport::Unique { line: 22, .. }), "got {report:?}");

    let class_scope = Scope::Class("UserService".into());
    let report = resolve_unique(&doc, "return None", Some(&class_scope), LocateStrategy::Auto);
    assert!(matches!(report, OccurrenceReport::Ambiguous { count: 2, .. }), "got {report:?}");
}

#[test]
fn return_none_inside_authenticate_user() {
    let doc = fixture();
    let scope = Scope::Function("authenticate_user".into());
    let report = resolve_unique(&doc, "return None", Some(&scope), LocateStrategy::Auto);
    let OccurrenceReport::Unique { line, window } = report else {
        panic!("expected a unique report");
    };
    assert_eq!(line, 16);
    assert_eq!(window.start, 14);
    assert_eq!(window.lines.len(), 5);
    assert_eq!(window.lines[2].trim(), "return None");
    assert_eq!(
        window.text(),
        "            session_id = self.create_session(user)\n            return session_id\n        return None\n    \n    def find_user_by_username(self, username):"
    );
}

#[test]
fn scoped_search_survives_a_syntax_error() {
    let doc = broken_fixture();
    let scope = Scope::Function("authenticate_user".into());
    let report = resolve_unique(&doc, "return None", Some(&scope), LocateStrategy::Auto);
    assert!(matches!(report, OccurrenceReport::Unique { line: 16, .. }), "got {report:?}");
}

#[test]
fn suggestions_cover_the_whole_document() {
    let suggestions = suggest_disambiguation(&fixture(), "return None");
    assert_eq!(suggestions.len(), 2);
    assert!(suggestions[0].starts_with("Occurrence 1 (line 17):\n"));
    assert!(suggestions[1].starts_with("Occurrence 2 (line 23):\n"));
    // Radius 3: seven lines of context plus the header.
    assert_eq!(suggestions[0].lines().count(), 8);
}

#[test]
fn edit_safety_on_the_fixture() {
    let doc = fixture();

    let unique = assess_edit_safety(&doc, "return user.password == password", "return check(user, password)");
    assert!(unique.is_unique);
    assert_eq!(unique.occurrences, 1);
    assert!(unique.suggestions.is_empty());

    let ambiguous = assess_edit_safety(&doc, "return None", "return False");
    assert!(!ambiguous.is_unique);
    assert_eq!(ambiguous.occurrences, 2);
    assert_eq!(ambiguous.suggestions.len(), 2);

    let old = "        if not user:\n            raise AuthenticationError(\"User not found\")";
    let dedented = assess_edit_safety(&doc, old, "    if not user:\n        return None");
    let aligned = assess_edit_safety(&doc, old, "        if user is None:\n            return None");
    assert_eq!(dedented.occurrences, 1);
    assert!(!dedented.indentation_preserved);
    assert!(aligned.indentation_preserved);
}
