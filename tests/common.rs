#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn tt() -> Command {
    cargo_bin_cmd!("tasktracker")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tasktracker.db", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh, empty temp directory
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tasktracker_dir", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

pub fn init_db(db_path: &str) {
    tt().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Add a task on a single day
pub fn add_task(db_path: &str, description: &str, date: &str, start: &str, end: &str) {
    tt().args([
        "--db",
        db_path,
        "task",
        "add",
        description,
        "--start-date",
        date,
        "--start-time",
        start,
        "--end-date",
        date,
        "--end-time",
        end,
    ])
    .assert()
    .success();
}

/// Initialize DB and add a small dataset useful for many tests
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    add_task(db_path, "Write quarterly report", "2025-02-27", "09:00", "11:30");
    add_task(db_path, "Client call ACME", "2025-03-03", "14:00", "15:00");
    add_task(db_path, "Code review", "2025-03-03", "16:00", "16:45");
    add_task(db_path, "Planning meeting", "2025-03-31", "10:00", "12:00");
}
