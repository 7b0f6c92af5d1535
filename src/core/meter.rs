use crate::db::log::ttlog_quiet;
use crate::db::meters::{add_position, load_meter, upsert_meter};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::meter::{Meter, Position};
use crate::models::meter_category::MeterCategory;
use chrono::NaiveDateTime;

/// Fields of the "new meter" form.
#[derive(Debug, Clone, Default)]
pub struct MeterForm {
    pub name: String,
    pub category: MeterCategory,
    pub number: String,
    pub note: String,
    pub is_deactivated: bool,
}

/// Partial edit of an existing meter; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct MeterPatch {
    pub name: Option<String>,
    pub category: Option<MeterCategory>,
    pub number: Option<String>,
    pub note: Option<String>,
    pub is_deactivated: Option<bool>,
}

impl MeterPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.number.is_none()
            && self.note.is_none()
            && self.is_deactivated.is_none()
    }
}

pub fn parse_category(raw: Option<&String>) -> AppResult<MeterCategory> {
    match raw {
        Some(code) => {
            MeterCategory::from_code(code).ok_or_else(|| AppError::InvalidCategory(code.clone()))
        }
        None => Ok(MeterCategory::None),
    }
}

pub struct SaveMeterLogic;

impl SaveMeterLogic {
    pub fn create(pool: &mut DbPool, form: &MeterForm) -> AppResult<Meter> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(AppError::MissingMeterName);
        }

        let mut meter = Meter::new(name, form.category);
        meter.number = form.number.trim().to_string();
        meter.note = form.note.trim().to_string();
        meter.is_deactivated = form.is_deactivated;

        upsert_meter(&pool.conn, &mut meter)?;

        ttlog_quiet(
            &pool.conn,
            "meter",
            &format!("meter #{}", meter.id),
            &format!("Created '{}' ({})", meter.name, meter.category),
        );

        Ok(meter)
    }

    pub fn update(pool: &mut DbPool, id: i64, patch: &MeterPatch) -> AppResult<Meter> {
        let mut meter = load_meter(&pool.conn, id)?.ok_or(AppError::MeterNotFound(id))?;

        if let Some(name) = &patch.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::MissingMeterName);
            }
            meter.name = name.to_string();
        }
        if let Some(category) = patch.category {
            meter.category = category;
        }
        if let Some(number) = &patch.number {
            meter.number = number.trim().to_string();
        }
        if let Some(note) = &patch.note {
            meter.note = note.trim().to_string();
        }
        if let Some(flag) = patch.is_deactivated {
            meter.is_deactivated = flag;
        }

        upsert_meter(&pool.conn, &mut meter)?;

        ttlog_quiet(
            &pool.conn,
            "edit",
            &format!("meter #{}", meter.id),
            &format!("Updated '{}'", meter.name),
        );

        Ok(meter)
    }
}

pub struct AddPositionLogic;

impl AddPositionLogic {
    /// Parse the typed reading and append it to the meter.
    pub fn apply(
        pool: &mut DbPool,
        meter_id: i64,
        raw_value: &str,
        at: Option<NaiveDateTime>,
    ) -> AppResult<Position> {
        let value = parse_reading(raw_value)?;
        let position = add_position(&pool.conn, meter_id, value, at)?;

        ttlog_quiet(
            &pool.conn,
            "reading",
            &format!("meter #{}", meter_id),
            &format!("Position #{} = {}", position.id, value),
        );

        Ok(position)
    }
}

/// Readings accept a decimal comma as well as a point.
pub fn parse_reading(raw: &str) -> AppResult<f64> {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(AppError::InvalidReading(raw.to_string())),
    }
}

/// Readings newest first, each with the difference to the previous one.
pub fn readings_with_delta(meter: &Meter) -> Vec<(&Position, Option<f64>)> {
    let newest_first = meter.positions_newest_first();
    newest_first
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let delta = newest_first.get(i + 1).map(|prev| p.value - prev.value);
            (*p, delta)
        })
        .collect()
}
