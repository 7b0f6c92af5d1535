use chrono::NaiveDateTime;
use rusqlite::Connection;
use tasktracker::db::initialize::init_db;
use tasktracker::db::meters::{add_position, count_meters, load_all_meters, load_meter, upsert_meter};
use tasktracker::db::migrate::run_pending_migrations;
use tasktracker::db::tasks::{count_tasks, delete_task, insert_task, load_all_tasks, load_task};
use tasktracker::errors::AppError;
use tasktracker::models::meter::Meter;
use tasktracker::models::meter_category::MeterCategory;
use tasktracker::models::task_entry::TaskEntry;

fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("valid datetime")
}

fn fresh() -> Connection {
    let conn = Connection::open_in_memory().expect("in-memory db");
    init_db(&conn).expect("schema");
    conn
}

fn columns(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info('{}')", table))
        .expect("pragma");
    stmt.query_map([], |row| row.get::<_, String>(1))
        .expect("rows")
        .map(|c| c.expect("column"))
        .collect()
}

fn migration_markers(conn: &Connection) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
        [],
        |row| row.get(0),
    )
    .expect("count")
}

#[test]
fn migrations_are_idempotent() {
    let conn = fresh();
    run_pending_migrations(&conn).expect("second run");
    run_pending_migrations(&conn).expect("third run");

    assert!(columns(&conn, "tasks").contains(&"duration_minutes".to_string()));
    assert!(columns(&conn, "meters").contains(&"positions".to_string()));
    assert_eq!(migration_markers(&conn), 0);
}

#[test]
fn legacy_meters_table_gains_deactivated_flag() {
    let conn = Connection::open_in_memory().expect("in-memory db");
    conn.execute_batch(
        r#"
        CREATE TABLE meters (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            name      TEXT NOT NULL,
            category  TEXT NOT NULL DEFAULT 'none',
            number    TEXT NOT NULL DEFAULT '',
            note      TEXT NOT NULL DEFAULT '',
            positions TEXT NOT NULL DEFAULT '[]'
        );
        INSERT INTO meters (name, category) VALUES ('Old boiler', 'gas');
        "#,
    )
    .expect("legacy schema");

    init_db(&conn).expect("migrate");
    init_db(&conn).expect("migrate again");

    assert!(columns(&conn, "meters").contains(&"is_deactivated".to_string()));
    assert_eq!(migration_markers(&conn), 1);

    let meters = load_all_meters(&conn).expect("load");
    assert_eq!(meters.len(), 1);
    assert_eq!(meters[0].name, "Old boiler");
    assert_eq!(meters[0].category, MeterCategory::Gas);
    assert!(!meters[0].is_deactivated);
    assert!(meters[0].positions.is_empty());
}

#[test]
fn tasks_round_trip_through_the_table() {
    let conn = fresh();

    let a = TaskEntry::new("Standup", dt("2025-04-01 09:00"), dt("2025-04-01 09:15"));
    let b = TaskEntry::new("Release", dt("2025-04-02 22:00"), dt("2025-04-03 00:30"));
    let id_a = insert_task(&conn, &a).expect("a");
    let id_b = insert_task(&conn, &b).expect("b");
    assert!(id_b > id_a);

    let all = load_all_tasks(&conn).expect("load");
    assert_eq!(all.len(), 2);
    // newest start first
    assert_eq!(all[0].id, id_b);
    assert_eq!(all[0].duration_minutes, 150);
    assert_eq!(all[0].end_time, dt("2025-04-03 00:30"));

    let one = load_task(&conn, id_a).expect("load one").expect("exists");
    assert_eq!(one.description, "Standup");

    assert!(delete_task(&conn, id_a).expect("delete"));
    assert!(!delete_task(&conn, id_a).expect("delete twice"));
    assert!(load_task(&conn, id_a).expect("load gone").is_none());
    assert_eq!(count_tasks(&conn).expect("count"), 1);
}

#[test]
fn meter_upsert_inserts_then_updates() {
    let conn = fresh();

    let mut m = Meter::new("Kitchen water", MeterCategory::Water);
    m.number = "W-0042".to_string();
    upsert_meter(&conn, &mut m).expect("insert");
    assert!(m.id > 0);

    m.note = "behind the sink".to_string();
    m.is_deactivated = true;
    upsert_meter(&conn, &mut m).expect("update");

    let stored = load_meter(&conn, m.id).expect("load").expect("exists");
    assert_eq!(stored, m);
    assert_eq!(count_meters(&conn).expect("count"), 1);
}

#[test]
fn updating_a_missing_meter_fails() {
    let conn = fresh();

    let mut ghost = Meter::new("Ghost", MeterCategory::Other);
    ghost.id = 99;

    assert!(matches!(
        upsert_meter(&conn, &mut ghost),
        Err(AppError::MeterNotFound(99))
    ));
    assert!(matches!(
        add_position(&conn, 99, 1.0, None),
        Err(AppError::MeterNotFound(99))
    ));
}

#[test]
fn positions_are_stored_with_the_meter() {
    let conn = fresh();

    let mut m = Meter::new("Main power", MeterCategory::Electricity);
    upsert_meter(&conn, &mut m).expect("insert");

    add_position(&conn, m.id, 1200.5, Some(dt("2025-01-31 20:00"))).expect("first");
    let second = add_position(&conn, m.id, 1350.25, Some(dt("2025-02-28 20:00"))).expect("second");
    assert_eq!(second.id, 2);

    let stored = load_meter(&conn, m.id).expect("load").expect("exists");
    assert_eq!(stored.positions.len(), 2);
    let latest = stored.latest_position().expect("latest");
    assert_eq!(latest.value, 1350.25);
    assert_eq!(latest.added_at, dt("2025-02-28 20:00"));
}

#[test]
fn meters_are_listed_by_name() {
    let conn = fresh();

    for name in ["water", "Attic heat", "Garage"] {
        let mut m = Meter::new(name, MeterCategory::None);
        upsert_meter(&conn, &mut m).expect("insert");
    }

    let names: Vec<String> = load_all_meters(&conn)
        .expect("load")
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["Attic heat", "Garage", "water"]);
}
