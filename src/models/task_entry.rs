use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// A logged unit of work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskEntry {
    pub id: i64,                   // ⇔ tasks.id (0 until inserted)
    pub description: String,       // ⇔ tasks.description
    pub start_time: NaiveDateTime, // ⇔ tasks.start_time (TEXT "YYYY-MM-DD HH:MM:SS")
    pub end_time: NaiveDateTime,   // ⇔ tasks.end_time
    pub duration_minutes: i64,     // ⇔ tasks.duration_minutes, always end - start
}

impl TaskEntry {
    /// Build a new, not yet persisted entry. The duration is derived from the
    /// two timestamps.
    pub fn new(description: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: 0,
            description: description.into(),
            start_time: start,
            end_time: end,
            duration_minutes: (end - start).num_minutes(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Duration as `HH:MM`.
    pub fn duration_text(&self) -> String {
        crate::utils::time::format_minutes(self.duration_minutes)
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes as f64 / 60.0
    }
}
