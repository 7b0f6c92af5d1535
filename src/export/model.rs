// src/export/model.rs

use crate::models::task_entry::TaskEntry;
use crate::utils::date::month_name;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Flat task row for CSV / JSON.
#[derive(Serialize, Clone, Debug)]
pub struct TaskExport {
    pub id: i64,
    pub date: String,
    pub start: String,
    pub end: String,
    pub description: String,
    pub duration_minutes: i64,
    pub duration_hours: f64,
}

impl From<&TaskEntry> for TaskExport {
    fn from(e: &TaskEntry) -> Self {
        Self {
            id: e.id,
            date: e.date().format("%Y-%m-%d").to_string(),
            start: e.start_time.format("%H:%M").to_string(),
            end: e.end_time.format("%Y-%m-%d %H:%M").to_string(),
            description: e.description.clone(),
            duration_minutes: e.duration_minutes,
            duration_hours: round2(e.duration_hours()),
        }
    }
}

/// One spreadsheet row.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetRow {
    pub date: NaiveDate,
    pub description: String,
    pub hours: f64,
}

/// All rows of one month plus their subtotal.
#[derive(Clone, Debug)]
pub struct MonthSection {
    pub year: i32,
    pub month: u32,
    pub rows: Vec<SheetRow>,
    pub subtotal_hours: f64,
}

impl MonthSection {
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

/// Header for the XLSX sheet
pub(crate) fn sheet_headers() -> [&'static str; 3] {
    ["Date", "Description", "Duration (h)"]
}

/// Group entries into month sections, oldest month first; rows inside a
/// month are ordered by start time. A subtotal is the sum of its rows.
pub fn build_month_sections(entries: &[TaskEntry]) -> Vec<MonthSection> {
    let mut months: BTreeMap<(i32, u32), Vec<&TaskEntry>> = BTreeMap::new();
    for e in entries {
        let d = e.date();
        months.entry((d.year(), d.month())).or_default().push(e);
    }

    months
        .into_iter()
        .map(|((year, month), mut items)| {
            items.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));

            let rows: Vec<SheetRow> = items
                .into_iter()
                .map(|e| SheetRow {
                    date: e.date(),
                    description: e.description.clone(),
                    hours: e.duration_hours(),
                })
                .collect();

            let subtotal_hours = rows.iter().map(|r| r.hours).sum();

            MonthSection {
                year,
                month,
                rows,
                subtotal_hours,
            }
        })
        .collect()
}

pub fn grand_total_hours(sections: &[MonthSection]) -> f64 {
    sections.iter().map(|s| s.subtotal_hours).sum()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
