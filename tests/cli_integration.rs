//! Integration tests for the `tl` CLI.
//!
//! Each test creates a temp directory, runs `tl` as a subprocess there,
//! and verifies stdout and/or the task file.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

/// Get the path to the built `tl` binary.
fn tl_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tl");
    path
}

fn run_tl_raw(dir: &Path, args: &[&str]) -> Output {
    Command::new(tl_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run tl")
}

/// Run `tl` with the given args in the given directory, returning (stdout, stderr, success).
fn run_tl(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = run_tl_raw(dir, args);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `tl` expecting success, return stdout.
fn run_tl_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tl(dir, args);
    if !success {
        panic!(
            "tl {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

fn read_tasks(dir: &Path) -> String {
    fs::read_to_string(dir.join("tasks.txt")).unwrap()
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_list_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tl_ok(tmp.path(), &["list"]);
    assert!(out.contains("No tasks"));
    assert!(!tmp.path().join("tasks.txt").exists());
}

#[test]
fn test_list_legacy_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("tasks.txt"),
        "Buy milk,False\nWalk the dog,True\nCall mom,False\n",
    )
    .unwrap();

    let out = run_tl_ok(tmp.path(), &["list"]);
    assert_eq!(
        out,
        "0  [ ] Buy milk\n1  [x] Walk the dog\n2  [ ] Call mom\n"
    );

    let out = run_tl_ok(tmp.path(), &["list", "--pending"]);
    assert_eq!(out, "0  [ ] Buy milk\n2  [ ] Call mom\n");

    let out = run_tl_ok(tmp.path(), &["list", "--done"]);
    assert_eq!(out, "1  [x] Walk the dog\n");
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.txt"), "a, b,True\nc,False\n").unwrap();

    let out = run_tl_ok(tmp.path(), &["list", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"index": 0, "text": "a, b", "state": "done", "completed": true},
            {"index": 1, "text": "c", "state": "pending", "completed": false},
        ])
    );
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[test]
fn test_add_done_undo() {
    let tmp = tempfile::TempDir::new().unwrap();

    let out = run_tl_ok(tmp.path(), &["add", "Buy", "milk"]);
    assert_eq!(out, "Added 0  [ ] Buy milk\n");
    assert_eq!(read_tasks(tmp.path()), "Buy milk,False\n");

    let out = run_tl_ok(tmp.path(), &["done", "0"]);
    assert_eq!(out, "Done 0  [x] Buy milk\n");
    assert_eq!(read_tasks(tmp.path()), "Buy milk,True\n");

    let out = run_tl_ok(tmp.path(), &["done", "0"]);
    assert!(out.starts_with("Already done"));

    run_tl_ok(tmp.path(), &["undo", "0"]);
    assert_eq!(read_tasks(tmp.path()), "Buy milk,False\n");
}

#[test]
fn test_add_keeps_commas_and_backslashes() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tl_ok(tmp.path(), &["add", "Pay rent, utilities"]);
    run_tl_ok(tmp.path(), &["add", r"C:\temp"]);
    assert_eq!(
        read_tasks(tmp.path()),
        "Pay rent, utilities,False\nC:\\temp,False\n"
    );

    let out = run_tl_ok(tmp.path(), &["list"]);
    assert_eq!(out, "0  [ ] Pay rent, utilities\n1  [ ] C:\\temp\n");
}

#[test]
fn test_add_duplicates_allowed() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tl_ok(tmp.path(), &["add", "same"]);
    run_tl_ok(tmp.path(), &["add", "same"]);
    assert_eq!(read_tasks(tmp.path()), "same,False\nsame,False\n");
}

#[test]
fn test_add_empty_text_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_tl(tmp.path(), &["add", ""]);
    assert!(!success);
    assert!(stderr.contains("task text is empty"));
    assert!(!tmp.path().join("tasks.txt").exists());
}

#[test]
fn test_rm_renumbers() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.txt"), "a,False\nb,True\nc,False\n").unwrap();

    let out = run_tl_ok(tmp.path(), &["rm", "1"]);
    assert_eq!(out, "Removed 1  [x] b\n");
    assert_eq!(read_tasks(tmp.path()), "a,False\nc,False\n");

    let out = run_tl_ok(tmp.path(), &["list"]);
    assert_eq!(out, "0  [ ] a\n1  [ ] c\n");
}

#[test]
fn test_out_of_range_index() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.txt"), "only,False\n").unwrap();

    for cmd in ["done", "undo", "rm"] {
        let output = run_tl_raw(tmp.path(), &[cmd, "5"]);
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("error: no task at index 5 (list has 1 tasks)"),
            "unexpected stderr for {}: {}",
            cmd,
            stderr
        );
    }
    assert_eq!(read_tasks(tmp.path()), "only,False\n");
}

#[test]
fn test_file_flag() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tl_ok(tmp.path(), &["-f", "other.txt", "add", "x"]);
    assert!(!tmp.path().join("tasks.txt").exists());
    assert_eq!(
        fs::read_to_string(tmp.path().join("other.txt")).unwrap(),
        "x,False\n"
    );

    let out = run_tl_ok(tmp.path(), &["list", "--file", "other.txt"]);
    assert_eq!(out, "0  [ ] x\n");
}

// ---------------------------------------------------------------------------
// Malformed lines and the recovery log
// ---------------------------------------------------------------------------

#[test]
fn test_malformed_lines_skipped_and_logged() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("tasks.txt"),
        "good,True\nno marker here\n\nbad,Maybe\n",
    )
    .unwrap();

    // Read-only commands report the lines but leave file and log alone
    for _ in 0..3 {
        let (stdout, stderr, success) = run_tl(tmp.path(), &["list"]);
        assert!(success);
        assert_eq!(stdout, "0  [x] good\n");
        assert!(stderr.contains("skipped 2 malformed line(s)"));
    }
    let out = run_tl_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("Recovery log is empty"));
    assert!(read_tasks(tmp.path()).contains("no marker here"));

    // The first rewrite moves them to the recovery log, once
    run_tl_ok(tmp.path(), &["add", "next"]);
    assert_eq!(read_tasks(tmp.path()), "good,True\nnext,False\n");
    run_tl_ok(tmp.path(), &["add", "after"]);

    let out = run_tl_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("parser: dropped lines"));
    assert!(out.contains("no marker here"));
    assert!(out.contains("bad,Maybe"));

    let out = run_tl_ok(tmp.path(), &["recovery", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["category"], "parser");
}

#[test]
fn test_legacy_backslash_task_is_kept() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.txt"), "C:\\temp\\notes,False\n").unwrap();

    let out = run_tl_ok(tmp.path(), &["list"]);
    assert_eq!(out, "0  [ ] C:\\temp\\notes\n");

    run_tl_ok(tmp.path(), &["add", "more"]);
    let out = run_tl_ok(tmp.path(), &["list"]);
    assert_eq!(out, "0  [ ] C:\\temp\\notes\n1  [ ] more\n");
    let out = run_tl_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("Recovery log is empty"));
}

#[test]
fn test_recovery_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tl_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("Recovery log is empty"));
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn test_init_writes_config_once() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tl_ok(tmp.path(), &["init"]);
    let config = fs::read_to_string(tmp.path().join("tasklist.toml")).unwrap();
    assert!(config.contains("[store]"));

    let (_, stderr, success) = run_tl(tmp.path(), &["init"]);
    assert!(!success);
    assert!(stderr.contains("already exists"));

    run_tl_ok(tmp.path(), &["init", "--force"]);

    // The generated config still points at tasks.txt
    run_tl_ok(tmp.path(), &["add", "x"]);
    assert_eq!(read_tasks(tmp.path()), "x,False\n");
}

#[test]
fn test_config_store_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("data")).unwrap();
    fs::write(
        tmp.path().join("tasklist.toml"),
        "[store]\nfile = \"data/todo.txt\"\n",
    )
    .unwrap();

    run_tl_ok(tmp.path(), &["add", "x"]);
    assert_eq!(
        fs::read_to_string(tmp.path().join("data/todo.txt")).unwrap(),
        "x,False\n"
    );

    // --file still wins over the config
    run_tl_ok(tmp.path(), &["-f", "cli.txt", "add", "y"]);
    assert!(tmp.path().join("cli.txt").exists());
}

#[test]
fn test_broken_config_is_an_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("tasklist.toml"), "[store\nfile = ").unwrap();

    let (_, stderr, success) = run_tl(tmp.path(), &["list"]);
    assert!(!success);
    assert!(stderr.contains("could not parse"));

    // init can still replace it
    run_tl_ok(tmp.path(), &["init", "--force"]);
    run_tl_ok(tmp.path(), &["list"]);
}
