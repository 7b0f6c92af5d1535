use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add_task, init_db, init_db_with_data, setup_test_db, tt};

#[test]
fn test_add_and_list_tasks_grouped_by_month() {
    let db_path = setup_test_db("task_add_list");
    init_db_with_data(&db_path);

    tt().args(["--db", &db_path, "task", "list"])
        .assert()
        .success()
        .stdout(contains("March 2025"))
        .stdout(contains("February 2025"))
        .stdout(contains("Client call ACME"))
        .stdout(contains("02:30"))
        .stdout(contains("4 tasks"));
}

#[test]
fn test_add_rejects_blank_description() {
    let db_path = setup_test_db("task_blank_desc");
    init_db(&db_path);

    tt().args([
        "--db",
        &db_path,
        "task",
        "add",
        "   ",
        "--start-date",
        "2025-03-01",
        "--start-time",
        "09:00",
        "--end-date",
        "2025-03-01",
        "--end-time",
        "10:00",
    ])
    .assert()
    .failure()
    .stderr(contains("Missing description"));
}

#[test]
fn test_add_rejects_end_before_start() {
    let db_path = setup_test_db("task_inverted");
    init_db(&db_path);

    tt().args([
        "--db",
        &db_path,
        "task",
        "add",
        "Backwards",
        "--start-date",
        "2025-03-01",
        "--start-time",
        "10:00",
        "--end-date",
        "2025-03-01",
        "--end-time",
        "09:00",
    ])
    .assert()
    .failure()
    .stderr(contains("end time must be after start time"));

    tt().args(["--db", &db_path, "task", "list"])
        .assert()
        .success()
        .stdout(contains("No tasks found"));
}

#[test]
fn test_add_rejects_invalid_time() {
    let db_path = setup_test_db("task_bad_time");
    init_db(&db_path);

    tt().args([
        "--db",
        &db_path,
        "task",
        "add",
        "Bad time",
        "--start-time",
        "9h",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid time format"));
}

#[test]
fn test_task_spanning_midnight() {
    let db_path = setup_test_db("task_midnight");
    init_db(&db_path);

    tt().args([
        "--db",
        &db_path,
        "task",
        "add",
        "Night deploy",
        "--start-date",
        "2025-03-10",
        "--start-time",
        "23:30",
        "--end-date",
        "2025-03-11",
        "--end-time",
        "01:00",
    ])
    .assert()
    .success()
    .stdout(contains("01:30"));
}

#[test]
fn test_list_search_is_case_insensitive() {
    let db_path = setup_test_db("task_search");
    init_db_with_data(&db_path);

    tt().args(["--db", &db_path, "task", "list", "--search", "acme"])
        .assert()
        .success()
        .stdout(contains("Client call ACME"))
        .stdout(contains("Code review").not())
        .stdout(contains("1 tasks"));
}

#[test]
fn test_list_date_range_is_inclusive() {
    let db_path = setup_test_db("task_range");
    init_db_with_data(&db_path);

    tt().args([
        "--db",
        &db_path,
        "task",
        "list",
        "--from",
        "2025-03-03",
        "--to",
        "2025-03-31",
    ])
    .assert()
    .success()
    .stdout(contains("Client call ACME"))
    .stdout(contains("Planning meeting"))
    .stdout(contains("Write quarterly report").not());
}

#[test]
fn test_list_period_month() {
    let db_path = setup_test_db("task_period");
    init_db_with_data(&db_path);

    tt().args(["--db", &db_path, "task", "list", "--period", "2025-02"])
        .assert()
        .success()
        .stdout(contains("Write quarterly report"))
        .stdout(contains("Planning meeting").not());
}

#[test]
fn test_list_flat() {
    let db_path = setup_test_db("task_flat");
    init_db_with_data(&db_path);

    tt().args(["--db", &db_path, "task", "list", "--flat"])
        .assert()
        .success()
        .stdout(contains("DESCRIPTION"))
        .stdout(contains("Code review"));
}

#[test]
fn test_delete_task_with_confirmation() {
    let db_path = setup_test_db("task_delete");
    init_db(&db_path);
    add_task(&db_path, "Throwaway", "2025-04-01", "08:00", "09:00");

    tt().args(["--db", &db_path, "task", "del", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    tt().args(["--db", &db_path, "task", "list"])
        .assert()
        .success()
        .stdout(contains("No tasks found"));
}

#[test]
fn test_delete_task_cancelled() {
    let db_path = setup_test_db("task_delete_cancel");
    init_db(&db_path);
    add_task(&db_path, "Keep me", "2025-04-01", "08:00", "09:00");

    tt().args(["--db", &db_path, "task", "del", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    tt().args(["--db", &db_path, "task", "list"])
        .assert()
        .success()
        .stdout(contains("Keep me"));
}

#[test]
fn test_delete_missing_task_fails() {
    let db_path = setup_test_db("task_delete_missing");
    init_db(&db_path);

    tt().args(["--db", &db_path, "task", "del", "99", "--force"])
        .assert()
        .failure()
        .stderr(contains("Task #99 not found"));
}

#[test]
fn test_log_records_task_operations() {
    let db_path = setup_test_db("task_log");
    init_db(&db_path);
    add_task(&db_path, "Logged", "2025-04-02", "08:00", "09:00");

    tt().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("task #1"));
}
