//! Month / day grouping of task entries for display.

use crate::models::task_entry::TaskEntry;
use crate::utils::date::month_name;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub entries: Vec<TaskEntry>,
    pub total_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct MonthGroup {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayGroup>,
    pub total_minutes: i64,
}

impl MonthGroup {
    /// e.g. `2025-03 (March 2025)`
    pub fn label(&self) -> String {
        format!(
            "{}-{:02} ({} {})",
            self.year,
            self.month,
            month_name(self.month),
            self.year
        )
    }

    pub fn entry_count(&self) -> usize {
        self.days.iter().map(|d| d.entries.len()).sum()
    }
}

/// Group entries by month, then by day. Months and days come newest first;
/// entries inside a day keep their input order.
pub fn group_by_month(entries: &[TaskEntry]) -> Vec<MonthGroup> {
    let mut months: BTreeMap<(i32, u32), BTreeMap<NaiveDate, Vec<TaskEntry>>> = BTreeMap::new();

    for e in entries {
        let d = e.date();
        months
            .entry((d.year(), d.month()))
            .or_default()
            .entry(d)
            .or_default()
            .push(e.clone());
    }

    months
        .into_iter()
        .rev()
        .map(|((year, month), days)| {
            let days: Vec<DayGroup> = days
                .into_iter()
                .rev()
                .map(|(date, entries)| {
                    let total_minutes = entries.iter().map(|e| e.duration_minutes).sum();
                    DayGroup {
                        date,
                        entries,
                        total_minutes,
                    }
                })
                .collect();

            let total_minutes = days.iter().map(|d| d.total_minutes).sum();

            MonthGroup {
                year,
                month,
                days,
                total_minutes,
            }
        })
        .collect()
}

/// Total minutes per month, oldest month first.
pub fn monthly_totals(entries: &[TaskEntry]) -> Vec<(i32, u32, i64)> {
    let mut totals: BTreeMap<(i32, u32), i64> = BTreeMap::new();

    for e in entries {
        let d = e.date();
        *totals.entry((d.year(), d.month())).or_default() += e.duration_minutes;
    }

    totals
        .into_iter()
        .map(|((y, m), minutes)| (y, m, minutes))
        .collect()
}
