//! Period expressions shared by `task list --period` and `export --range`.
//!
//! Supported:
//! - YYYY
//! - YYYY-MM
//! - YYYY-MM-DD
//! - YYYY:YYYY
//! - YYYY-MM:YYYY-MM
//! - YYYY-MM-DD:YYYY-MM-DD
//! - all (no bounds)

use crate::errors::{AppError, AppResult};
use crate::utils::date::month_last_day;
use chrono::NaiveDate;

/// Parse a period into inclusive day bounds. `all` yields `None`.
pub fn parse_period(r: &str) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let r = r.trim();
    if r.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    parse_range(r).map(Some)
}

pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::InvalidRange(format!(
                "start and end must have the same format: {r}"
            )));
        }

        let (d1, _) = bounds_of(start)?;
        let (_, d2) = bounds_of(end)?;

        if d2 < d1 {
            return Err(AppError::InvalidRange(format!("end before start: {r}")));
        }
        Ok((d1, d2))
    } else {
        bounds_of(r)
    }
}

/// First and last day covered by a single year / month / day expression.
fn bounds_of(s: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidRange(s.to_string());

    if !s.is_ascii() {
        return Err(invalid());
    }

    match s.len() {
        // YYYY
        4 => {
            if !all_digits(s) {
                return Err(invalid());
            }
            let y: i32 = s.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            if s.as_bytes()[4] != b'-' || !all_digits(&s[0..4]) || !all_digits(&s[5..7]) {
                return Err(invalid());
            }
            let y: i32 = s[0..4].parse().map_err(|_| invalid())?;
            let m: u32 = s[5..7].parse().map_err(|_| invalid())?;
            let last = month_last_day(y, m).ok_or_else(invalid)?;

            let d1 = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, m, last).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let b = s.as_bytes();
            if b[4] != b'-'
                || b[7] != b'-'
                || !all_digits(&s[0..4])
                || !all_digits(&s[5..7])
                || !all_digits(&s[8..10])
            {
                return Err(invalid());
            }
            let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
