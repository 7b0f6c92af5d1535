//! Repository for the `tasks` collection.

use crate::db::DATETIME_FMT;
use crate::errors::{AppError, AppResult};
use crate::models::task_entry::TaskEntry;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_TASKS: &str =
    "SELECT id, description, start_time, end_time, duration_minutes FROM tasks";

/// Insert a new entry and return the assigned id.
pub fn insert_task(conn: &Connection, entry: &TaskEntry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO tasks (description, start_time, end_time, duration_minutes)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            entry.description,
            entry.start_time.format(DATETIME_FMT).to_string(),
            entry.end_time.format(DATETIME_FMT).to_string(),
            entry.duration_minutes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All entries, newest start first.
pub fn load_all_tasks(conn: &Connection) -> AppResult<Vec<TaskEntry>> {
    let mut stmt = conn.prepare(&format!("{SELECT_TASKS} ORDER BY start_time DESC, id DESC"))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Entries whose start lies within `[from 00:00, to 23:59:59]`, oldest first.
pub fn load_tasks_between(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<TaskEntry>> {
    let lower = from.format("%Y-%m-%d 00:00:00").to_string();
    let upper = to.format("%Y-%m-%d 23:59:59").to_string();

    let mut stmt = conn.prepare(&format!(
        "{SELECT_TASKS} WHERE start_time BETWEEN ?1 AND ?2 ORDER BY start_time ASC, id ASC"
    ))?;
    let rows = stmt.query_map(params![lower, upper], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_task(conn: &Connection, id: i64) -> AppResult<Option<TaskEntry>> {
    let mut stmt = conn.prepare(&format!("{SELECT_TASKS} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// Returns `true` when a row was removed.
pub fn delete_task(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
    Ok(n > 0)
}

pub fn count_tasks(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?)
}

pub fn map_row(row: &Row) -> Result<TaskEntry> {
    let start_str: String = row.get("start_time")?;
    let end_str: String = row.get("end_time")?;

    Ok(TaskEntry {
        id: row.get("id")?,
        description: row.get("description")?,
        start_time: parse_db_datetime(&start_str)?,
        end_time: parse_db_datetime(&end_str)?,
        duration_minutes: row.get("duration_minutes")?,
    })
}

pub(crate) fn parse_db_datetime(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATETIME_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(s.to_string())),
        )
    })
}
