use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn db(dir: &TempDir) -> PathBuf {
    dir.path().join("cheatnote.db")
}

fn cheatnote(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cheatnote").unwrap();
    cmd.env_remove("CHEATNOTE_DB").arg("--db").arg(db).arg("--no-color");
    cmd
}

fn add(db: &Path, title: &str, content: &str, tags: &str) {
    cheatnote(db)
        .args(["add", "-t", title, "-c", content, "-g", tags])
        .assert()
        .success();
}

#[test]
fn test_add_then_list() {
    let dir = TempDir::new().unwrap();
    let db = db(&dir);

    cheatnote(&db)
        .args(["add", "Git Status", "git status -s", "git,cli"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Note added successfully with ID: 1"));

    cheatnote(&db)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("╭─ [1] Git Status (git,cli)"))
        .stdout(predicate::str::contains("│  git status -s"))
        .stdout(predicate::str::contains("Found 1 note"));
}

#[test]
fn test_naked_invocation_lists() {
    let dir = TempDir::new().unwrap();
    let db = db(&dir);
    add(&db, "Docker PS", "docker ps -a", "docker");

    cheatnote(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Docker PS"));
}

#[test]
fn test_search_and_tag_filters() {
    let dir = TempDir::new().unwrap();
    let db = db(&dir);
    add(&db, "Git Status", "git status -s", "git,cli");
    add(&db, "Git Log", "git log --oneline", "git");
    add(&db, "Docker PS", "docker ps -a", "docker");

    cheatnote(&db)
        .args(["list", "-g", "git", "-s", "log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Git Log"))
        .stdout(predicate::str::contains("Git Status").not())
        .stdout(predicate::str::contains("Found 1 note"));

    cheatnote(&db)
        .args(["list", "-r", "-i", "^DOCKER"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Docker PS"))
        .stdout(predicate::str::contains("Git").not());

    cheatnote(&db)
        .args(["list", "kubectl"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Info: No notes found matching the criteria",
        ));
}

#[test]
fn test_compact_without_ids() {
    let dir = TempDir::new().unwrap();
    let db = db(&dir);
    add(&db, "Multi", "first line\nsecond line", "x");

    cheatnote(&db)
        .args(["list", "-c", "-n"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Multi (x)\n  first line\n"))
        .stdout(predicate::str::contains("[1]").not())
        .stdout(predicate::str::contains("second line").not());
}

#[test]
fn test_edit_and_delete() {
    let dir = TempDir::new().unwrap();
    let db = db(&dir);
    add(&db, "Old", "body", "a");

    cheatnote(&db)
        .args(["edit", "1", "New"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note updated successfully"));

    cheatnote(&db)
        .args(["list", "-c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] New (a)"));

    cheatnote(&db)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note deleted successfully: New"));

    cheatnote(&db)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes found"));
}

#[test]
fn test_edit_with_empty_title_keeps_note() {
    let dir = TempDir::new().unwrap();
    let db = db(&dir);
    add(&db, "Stays", "body", "a");

    cheatnote(&db)
        .args(["edit", "1", "-t", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note updated successfully"));

    cheatnote(&db)
        .args(["list", "-c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] Stays (a)"));
}

#[test]
fn test_malformed_config_is_reported_and_ignored() {
    let dir = TempDir::new().unwrap();
    let db = db(&dir);
    std::fs::write(dir.path().join("config.json"), "{ not json").unwrap();
    add(&db, "Multi", "first\nsecond", "x");

    cheatnote(&db)
        .env("RUST_LOG", "warn")
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("event=config_load status=fallback"))
        .stdout(predicate::str::contains("╭─ [1] Multi (x)"));
}

#[test]
fn test_missing_note_fails() {
    let dir = TempDir::new().unwrap();
    let db = db(&dir);

    cheatnote(&db)
        .args(["delete", "99"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Note not found: 99"));

    cheatnote(&db)
        .args(["edit", "-i", "99", "-t", "x"])
        .assert()
        .failure()
        .code(1);

    assert!(!db.exists());
}

#[test]
fn test_invalid_input_fails() {
    let dir = TempDir::new().unwrap();
    let db = db(&dir);

    cheatnote(&db)
        .args(["add", "-t", "only title"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Title and content are required"));

    let long_title = "x".repeat(300);
    cheatnote(&db)
        .args(["add", "-t", &long_title, "-c", "body"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_env_var_selects_database() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("from_env.db");

    Command::cargo_bin("cheatnote")
        .unwrap()
        .env("CHEATNOTE_DB", &db)
        .args(["add", "t", "c"])
        .assert()
        .success();

    assert!(db.exists());
}

#[test]
fn test_stats() {
    let dir = TempDir::new().unwrap();
    let db = db(&dir);

    cheatnote(&db)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes in database"));

    add(&db, "a", "one\ntwo", "t");
    add(&db, "b", "three", "t");

    cheatnote(&db)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("CheatNote Statistics"))
        .stdout(predicate::str::contains("Total Notes:      2"))
        .stdout(predicate::str::contains("Total Lines:      3"));
}

#[test]
fn test_export_then_import() {
    let dir = TempDir::new().unwrap();
    let db = db(&dir);
    let csv = dir.path().join("out.csv");
    add(&db, "Quoted \"one\"", "line1\nline2", "a,b");
    add(&db, "Plain", "body", "c");

    cheatnote(&db)
        .args(["export", "-o"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 notes"));

    let text = std::fs::read_to_string(&csv).unwrap();
    assert!(text.starts_with("ID,Title,Content,Tags,Created,Modified\n"));

    let other = dir.path().join("other.db");
    cheatnote(&other)
        .args(["import", "-i"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully imported 2 notes"));

    cheatnote(&other)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quoted \"one\" (a,b)"))
        .stdout(predicate::str::contains("│  line2"));
}

#[test]
fn test_import_merge_keeps_existing() {
    let dir = TempDir::new().unwrap();
    let db = db(&dir);
    let csv = dir.path().join("in.csv");
    std::fs::write(&csv, "ID,Title,Content,Tags\n1,Imported,body,\n").unwrap();
    add(&db, "Existing", "body", "x");

    cheatnote(&db)
        .args(["import", "--merge"])
        .arg(&csv)
        .assert()
        .success();

    cheatnote(&db)
        .args(["list", "-c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Existing"))
        .stdout(predicate::str::contains("[2] Imported"));
}

#[test]
fn test_config_controls_listing() {
    let dir = TempDir::new().unwrap();
    let db = db(&dir);
    add(&db, "Multi", "first\nsecond", "x");

    cheatnote(&db)
        .args(["config", "compact", "on"])
        .assert()
        .success()
        .stdout(predicate::str::contains("compact set to true"));

    cheatnote(&db)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] Multi (x)\n  first\n"))
        .stdout(predicate::str::contains("╭─").not());

    cheatnote(&db)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("compact = true"))
        .stdout(predicate::str::contains("show-ids = true"));
}

#[test]
fn test_corrupted_database_recovers() {
    let dir = TempDir::new().unwrap();
    let db = db(&dir);
    std::fs::write(&db, b"garbage").unwrap();

    cheatnote(&db)
        .args(["add", "fresh", "start"])
        .assert()
        .success()
        .stdout(predicate::str::contains("starting fresh"))
        .stdout(predicate::str::contains("ID: 1"));
}
