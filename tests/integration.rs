use std::path::Path;
use std::process::{Command, Output};

const FIXTURE: &str = "tests/fixtures/user_service.py";

fn snipscope(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_snipscope"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn locate_prints_one_based_range() {
    let out = snipscope(&["locate", FIXTURE, "authenticate_user"]);
    assert!(out.status.success(), "locate failed: {}", stderr(&out));
    assert_eq!(stdout(&out).trim(), "function `authenticate_user`: lines 6-17");
}

#[test]
fn locate_missing_class_exits_two() {
    let out = snipscope(&["locate", FIXTURE, "AdminService", "--class"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn find_scoped_unique_match() {
    let out = snipscope(&["find", FIXTURE, "return None", "--function", "authenticate_user"]);
    assert!(out.status.success(), "find failed: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("line 17."), "got:\n{text}");
    assert!(text.contains(">   17 |         return None"), "got:\n{text}");
}

#[test]
fn find_unscoped_duplicate_is_ambiguous() {
    let out = snipscope(&["find", FIXTURE, "return None"]);
    assert_eq!(out.status.code(), Some(1));
    let text = stderr(&out);
    assert!(text.contains("- line 17: `return None`"), "got:\n{text}");
    assert!(text.contains("- line 23: `return None`"), "got:\n{text}");
}

#[test]
fn find_json_reports_status() {
    let out = snipscope(&["find", FIXTURE, "return None", "--class", "UserService", "--json"]);
    assert_eq!(out.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["status"], "ambiguous");
    assert_eq!(value["count"], 2);
    assert_eq!(value["occurrences"][1]["line"], 22);
}

#[test]
fn find_in_unknown_scope_exits_two() {
    let out = snipscope(&["find", FIXTURE, "return None", "--function", "logout"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("function `logout` does not exist"));
}

#[test]
fn suggest_lists_each_occurrence() {
    let out = snipscope(&["suggest", FIXTURE, "return None"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Occurrence 1 (line 17):"), "got:\n{text}");
    assert!(text.contains("Occurrence 2 (line 23):"), "got:\n{text}");
}

#[test]
fn safety_json_for_unique_edit() {
    let out = snipscope(&[
        "safety",
        FIXTURE,
        "--old",
        "return user.password == password",
        "--new",
        "return self.hasher.verify(user, password)",
        "--json",
    ]);
    assert!(out.status.success(), "safety failed: {}", stderr(&out));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["occurrences"], 1);
    assert_eq!(value["is_unique"], true);
    assert_eq!(value["indentation_preserved"], true);
}

#[test]
fn safety_reads_texts_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old.txt");
    let new = dir.path().join("new.txt");
    std::fs::write(&old, "return None").unwrap();
    std::fs::write(&new, "return False").unwrap();

    let out = snipscope(&[
        "safety",
        FIXTURE,
        "--old-file",
        old.to_str().unwrap(),
        "--new-file",
        new.to_str().unwrap(),
    ]);
    assert_eq!(out.status.code(), Some(1));
    let text = stdout(&out);
    assert!(text.starts_with("# Edit Safety: unsafe"), "got:\n{text}");
    assert!(text.contains("- occurrences: 2"), "got:\n{text}");
}

#[test]
fn symbols_lists_methods() {
    let out = snipscope(&["symbols", FIXTURE]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("- class `UserService`: lines 1-33"), "got:\n{text}");
    assert!(text.contains("- function `create_session`: lines 29-33"), "got:\n{text}");
}

#[test]
fn unreadable_file_is_fatal_and_names_the_path() {
    let out = snipscope(&["find", "tests/fixtures/missing.py", "x"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("tests/fixtures/missing.py"));
}

#[test]
fn config_strategy_is_honoured() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("snipscope.toml");
    std::fs::write(&config, "strategy = \"indentation\"\n").unwrap();
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join(FIXTURE);

    let out = snipscope(&[
        "--config",
        config.to_str().unwrap(),
        "locate",
        fixture.to_str().unwrap(),
        "authenticate_user",
    ]);
    assert!(out.status.success(), "locate failed: {}", stderr(&out));
    // The indentation scan keeps the trailing blank line before the next method.
    assert_eq!(stdout(&out).trim(), "function `authenticate_user`: lines 6-18");
}

#[test]
fn size_limit_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("snipscope.toml");
    std::fs::write(&config, "max_file_bytes = 16\n").unwrap();

    let out = snipscope(&["--config", config.to_str().unwrap(), "symbols", FIXTURE]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("File Too Large"));
}
