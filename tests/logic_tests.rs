use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::Connection;
use tasktracker::core::backup::backup_file_name;
use tasktracker::core::filter::TaskFilter;
use tasktracker::core::grouping::{group_by_month, monthly_totals};
use tasktracker::core::meter::{parse_reading, readings_with_delta};
use tasktracker::core::range::{parse_period, parse_range};
use tasktracker::core::task::{AddTaskLogic, DeleteTaskLogic, TaskForm};
use tasktracker::db::initialize::init_db;
use tasktracker::db::meters::{add_position, load_meter, upsert_meter};
use tasktracker::db::pool::DbPool;
use tasktracker::db::tasks::{load_all_tasks, load_tasks_between};
use tasktracker::errors::AppError;
use tasktracker::export::build_month_sections;
use tasktracker::models::meter::Meter;
use tasktracker::models::meter_category::MeterCategory;
use tasktracker::models::task_entry::TaskEntry;

fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("valid datetime")
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

fn entry(id: i64, desc: &str, start: &str, end: &str) -> TaskEntry {
    let mut e = TaskEntry::new(desc, dt(start), dt(end));
    e.id = id;
    e
}

fn memory_pool() -> DbPool {
    let conn = Connection::open_in_memory().expect("in-memory db");
    init_db(&conn).expect("schema");
    DbPool { conn }
}

fn form(desc: &str, start: &str, end: &str) -> TaskForm {
    let s = dt(start);
    let e = dt(end);
    TaskForm {
        description: desc.to_string(),
        start_date: s.date(),
        start_time: s.time(),
        end_date: e.date(),
        end_time: e.time(),
    }
}

fn sample() -> Vec<TaskEntry> {
    vec![
        entry(4, "Planning meeting", "2025-03-31 10:00", "2025-03-31 12:00"),
        entry(3, "Code review", "2025-03-03 16:00", "2025-03-03 16:45"),
        entry(2, "Client call ACME", "2025-03-03 14:00", "2025-03-03 15:00"),
        entry(1, "Write quarterly report", "2025-02-27 09:00", "2025-02-27 11:30"),
    ]
}

// ---------------------------------------------------------------
// duration
// ---------------------------------------------------------------

#[test]
fn duration_equals_end_minus_start() {
    let mut pool = memory_pool();

    let saved = AddTaskLogic::apply(
        &mut pool,
        &form("Night deploy", "2025-03-10 23:30", "2025-03-11 01:15"),
    )
    .expect("saved");

    assert_eq!(saved.duration_minutes, 105);

    let stored = load_all_tasks(&pool.conn).expect("load");
    assert_eq!(stored.len(), 1);
    assert_eq!(
        stored[0].duration_minutes,
        (stored[0].end_time - stored[0].start_time).num_minutes()
    );
    assert_eq!(stored[0].duration_text(), "01:45");
}

#[test]
fn zero_length_task_is_allowed() {
    let e = AddTaskLogic::build(&form("Quick note", "2025-03-10 09:00", "2025-03-10 09:00"))
        .expect("equal bounds are valid");
    assert_eq!(e.duration_minutes, 0);
}

#[test]
fn form_validation_errors() {
    let blank = AddTaskLogic::build(&form("  \t", "2025-03-10 09:00", "2025-03-10 10:00"));
    assert!(matches!(blank, Err(AppError::MissingDescription)));

    let inverted = AddTaskLogic::build(&form("Oops", "2025-03-10 10:00", "2025-03-10 09:59"));
    assert!(matches!(inverted, Err(AppError::InvalidTimeRange)));

    let trimmed = AddTaskLogic::build(&form("  padded  ", "2025-03-10 09:00", "2025-03-10 10:00"))
        .expect("valid");
    assert_eq!(trimmed.description, "padded");
}

#[test]
fn delete_removes_only_the_given_task() {
    let mut pool = memory_pool();
    let a = AddTaskLogic::apply(&mut pool, &form("A", "2025-03-10 09:00", "2025-03-10 10:00"))
        .expect("a");
    let b = AddTaskLogic::apply(&mut pool, &form("B", "2025-03-11 09:00", "2025-03-11 10:00"))
        .expect("b");

    DeleteTaskLogic::apply(&mut pool, a.id).expect("deleted");

    let left = load_all_tasks(&pool.conn).expect("load");
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, b.id);

    assert!(matches!(
        DeleteTaskLogic::apply(&mut pool, a.id),
        Err(AppError::TaskNotFound(_))
    ));
}

// ---------------------------------------------------------------
// filtering
// ---------------------------------------------------------------

#[test]
fn text_filter_is_case_insensitive_substring() {
    let entries = sample();

    let hits = TaskFilter::new().with_text("acme").apply(&entries);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].description, "Client call ACME");

    let hits = TaskFilter::new().with_text("REVIEW").apply(&entries);
    assert_eq!(hits.len(), 1);

    let hits = TaskFilter::new().with_text("e").apply(&entries);
    assert_eq!(hits.len(), 4);

    let hits = TaskFilter::new().with_text("   ").apply(&entries);
    assert_eq!(hits.len(), 4);
}

#[test]
fn date_filter_uses_inclusive_day_bounds() {
    let entries = vec![
        entry(1, "before", "2025-03-02 23:59", "2025-03-03 00:10"),
        entry(2, "first minute", "2025-03-03 00:00", "2025-03-03 01:00"),
        entry(3, "last minute", "2025-03-05 23:59", "2025-03-06 00:30"),
        entry(4, "after", "2025-03-06 00:00", "2025-03-06 01:00"),
    ];

    let hits = TaskFilter::new()
        .with_bounds(Some(day("2025-03-03")), Some(day("2025-03-05")))
        .apply(&entries);

    let ids: Vec<i64> = hits.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn open_ended_date_filters() {
    let entries = sample();

    let from_only = TaskFilter::new()
        .with_bounds(Some(day("2025-03-03")), None)
        .apply(&entries);
    assert_eq!(from_only.len(), 3);

    let to_only = TaskFilter::new()
        .with_bounds(None, Some(day("2025-03-03")))
        .apply(&entries);
    assert_eq!(to_only.len(), 3);
}

#[test]
fn combined_filter_keeps_input_order() {
    let hits = TaskFilter::new()
        .with_text("c")
        .with_period("2025-03")
        .expect("period")
        .apply(&sample());

    let ids: Vec<i64> = hits.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 2]);
}

#[test]
fn repository_range_matches_filter() {
    let mut pool = memory_pool();
    for f in [
        form("edge start", "2025-03-03 00:00", "2025-03-03 00:30"),
        form("edge end", "2025-03-05 23:59", "2025-03-06 00:10"),
        form("outside", "2025-03-06 00:00", "2025-03-06 00:10"),
    ] {
        AddTaskLogic::apply(&mut pool, &f).expect("saved");
    }

    let loaded = load_tasks_between(&pool.conn, day("2025-03-03"), day("2025-03-05")).expect("load");
    let names: Vec<&str> = loaded.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(names, vec!["edge start", "edge end"]);
}

// ---------------------------------------------------------------
// periods
// ---------------------------------------------------------------

#[test]
fn period_expressions() {
    assert_eq!(
        parse_range("2024").expect("year"),
        (day("2024-01-01"), day("2024-12-31"))
    );
    assert_eq!(
        parse_range("2024-02").expect("month"),
        (day("2024-02-01"), day("2024-02-29"))
    );
    assert_eq!(
        parse_range("2025-06-01:2025-06-10").expect("days"),
        (day("2025-06-01"), day("2025-06-10"))
    );
    assert_eq!(
        parse_range("2025-01:2025-03").expect("months"),
        (day("2025-01-01"), day("2025-03-31"))
    );
    assert!(parse_period("all").expect("all").is_none());

    assert!(parse_range("2025-13").is_err());
    assert!(parse_range("2025:2025-03").is_err());
    assert!(parse_range("2025-05:2025-01").is_err());
    assert!(parse_range("yesterday").is_err());

    // signs are not part of a year
    assert!(parse_range("+202").is_err());
    assert!(parse_range("-001").is_err());
    assert!(parse_range("+202-03").is_err());
    assert!(parse_range("+202-03-01").is_err());
    assert!(parse_period("-001:2025").is_err());
}

// ---------------------------------------------------------------
// grouping
// ---------------------------------------------------------------

#[test]
fn groups_by_month_then_day_newest_first() {
    let groups = group_by_month(&sample());

    assert_eq!(groups.len(), 2);
    assert_eq!((groups[0].year, groups[0].month), (2025, 3));
    assert_eq!((groups[1].year, groups[1].month), (2025, 2));

    let march = &groups[0];
    assert_eq!(march.days.len(), 2);
    assert_eq!(march.days[0].date, day("2025-03-31"));
    assert_eq!(march.days[1].date, day("2025-03-03"));
    assert_eq!(march.days[1].entries.len(), 2);
    assert_eq!(march.days[1].total_minutes, 105);
    assert_eq!(march.total_minutes, 225);
    assert_eq!(march.entry_count(), 3);
    assert_eq!(march.label(), "2025-03 (March 2025)");
}

#[test]
fn monthly_totals_sum_durations() {
    let totals = monthly_totals(&sample());
    assert_eq!(totals, vec![(2025, 2, 150), (2025, 3, 225)]);
}

// ---------------------------------------------------------------
// spreadsheet sections
// ---------------------------------------------------------------

#[test]
fn month_subtotal_equals_sum_of_rows() {
    let sections = build_month_sections(&sample());

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].title(), "February 2025");
    assert_eq!(sections[1].title(), "March 2025");

    for s in &sections {
        let sum: f64 = s.rows.iter().map(|r| r.hours).sum();
        assert!((s.subtotal_hours - sum).abs() < 1e-9);
    }

    let march = &sections[1];
    assert!((march.subtotal_hours - 3.75).abs() < 1e-9);
    // rows ascending by start time
    let names: Vec<&str> = march.rows.iter().map(|r| r.description.as_str()).collect();
    assert_eq!(names, vec!["Client call ACME", "Code review", "Planning meeting"]);
}

// ---------------------------------------------------------------
// meters
// ---------------------------------------------------------------

#[test]
fn position_ids_increment_per_meter_from_one() {
    let pool = memory_pool();

    let mut water = Meter::new("Water", MeterCategory::Water);
    let mut power = Meter::new("Power", MeterCategory::Electricity);
    upsert_meter(&pool.conn, &mut water).expect("water");
    upsert_meter(&pool.conn, &mut power).expect("power");

    let ids: Vec<i64> = (0..3)
        .map(|i| {
            add_position(&pool.conn, water.id, 10.0 + i as f64, None)
                .expect("reading")
                .id
        })
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let first_power = add_position(&pool.conn, power.id, 5.0, None).expect("reading");
    assert_eq!(first_power.id, 1);

    let stored = load_meter(&pool.conn, water.id).expect("load").expect("exists");
    assert_eq!(stored.positions.len(), 3);
    assert_eq!(stored.next_position_id(), 4);
}

#[test]
fn next_position_id_follows_max_not_count() {
    let mut m = Meter::new("Gas", MeterCategory::Gas);
    m.push_position(1.0, dt("2025-01-01 08:00"));
    m.push_position(2.0, dt("2025-02-01 08:00"));
    m.positions.remove(0);

    assert_eq!(m.next_position_id(), 3);
}

#[test]
fn readings_newest_first_with_delta() {
    let mut m = Meter::new("Heat", MeterCategory::Heating);
    m.push_position(100.0, dt("2025-01-01 08:00"));
    m.push_position(130.0, dt("2025-03-01 08:00"));
    // late entry for February
    m.push_position(110.0, dt("2025-02-01 08:00"));

    let rows = readings_with_delta(&m);
    let ids: Vec<i64> = rows.iter().map(|(p, _)| p.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
    assert_eq!(rows[0].1, Some(20.0));
    assert_eq!(rows[1].1, Some(10.0));
    assert_eq!(rows[2].1, None);
}

#[test]
fn reading_parser_accepts_comma_decimals() {
    assert_eq!(parse_reading("12,5").expect("comma"), 12.5);
    assert_eq!(parse_reading(" 7 ").expect("int"), 7.0);
    assert!(parse_reading("NaN").is_err());
    assert!(parse_reading("").is_err());
}

#[test]
fn categories_parse_case_insensitively() {
    assert_eq!(MeterCategory::from_code("WATER"), Some(MeterCategory::Water));
    assert_eq!(MeterCategory::from_code("none"), Some(MeterCategory::None));
    assert_eq!(MeterCategory::from_code("steam"), None);
    assert_eq!(MeterCategory::all().len(), 6);
}

// ---------------------------------------------------------------
// backup naming
// ---------------------------------------------------------------

#[test]
fn backup_name_has_minute_timestamp() {
    let at = NaiveDate::from_ymd_opt(2025, 7, 4)
        .expect("date")
        .and_time(NaiveTime::from_hms_opt(18, 5, 42).expect("time"));
    assert_eq!(backup_file_name(at), "tasktracker-backup-20250704-1805.db");
}
