//! Repository for the `meters` collection.
//!
//! A meter row is a small document: scalar fields in columns, the owned list
//! of readings as JSON in `positions`. Every write rewrites the whole row.

use crate::errors::{AppError, AppResult};
use crate::models::meter::{Meter, Position};
use crate::models::meter_category::MeterCategory;
use crate::utils::time::now_minute;
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_METERS: &str =
    "SELECT id, name, category, number, note, is_deactivated, positions FROM meters";

/// All meters ordered by name.
pub fn load_all_meters(conn: &Connection) -> AppResult<Vec<Meter>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_METERS} ORDER BY name COLLATE NOCASE ASC, id ASC"
    ))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_meter(conn: &Connection, id: i64) -> AppResult<Option<Meter>> {
    let mut stmt = conn.prepare(&format!("{SELECT_METERS} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// Insert when `meter.id == 0` (the new id is written back), update otherwise.
pub fn upsert_meter(conn: &Connection, meter: &mut Meter) -> AppResult<()> {
    let positions = serde_json::to_string(&meter.positions)?;

    if meter.id == 0 {
        conn.execute(
            "INSERT INTO meters (name, category, number, note, is_deactivated, positions)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                meter.name,
                meter.category.to_db_str(),
                meter.number,
                meter.note,
                meter.is_deactivated,
                positions,
            ],
        )?;
        meter.id = conn.last_insert_rowid();
    } else {
        let n = conn.execute(
            "UPDATE meters
             SET name = ?1, category = ?2, number = ?3, note = ?4,
                 is_deactivated = ?5, positions = ?6
             WHERE id = ?7",
            params![
                meter.name,
                meter.category.to_db_str(),
                meter.number,
                meter.note,
                meter.is_deactivated,
                positions,
                meter.id,
            ],
        )?;
        if n == 0 {
            return Err(AppError::MeterNotFound(meter.id));
        }
    }

    Ok(())
}

/// Append a reading to a stored meter. The position id is the next free id
/// of that meter; the timestamp defaults to now (minute precision).
pub fn add_position(
    conn: &Connection,
    meter_id: i64,
    value: f64,
    added_at: Option<NaiveDateTime>,
) -> AppResult<Position> {
    let mut meter = load_meter(conn, meter_id)?.ok_or(AppError::MeterNotFound(meter_id))?;

    let at = added_at.unwrap_or_else(now_minute);

    let position = meter.push_position(value, at);
    upsert_meter(conn, &mut meter)?;
    Ok(position)
}

pub fn count_meters(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM meters", [], |row| row.get(0))?)
}

pub fn map_row(row: &Row) -> Result<Meter> {
    let category_str: String = row.get("category")?;
    let category = MeterCategory::from_db_str(&category_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidCategory(category_str.clone())),
        )
    })?;

    let positions_json: String = row.get("positions")?;
    let positions: Vec<Position> = serde_json::from_str(&positions_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Meter {
        id: row.get("id")?,
        name: row.get("name")?,
        category,
        number: row.get("number")?,
        note: row.get("note")?,
        is_deactivated: row.get("is_deactivated")?,
        positions,
    })
}

