//! Free-text and date-range filtering of the task list.

use crate::core::range::parse_period;
use crate::errors::AppResult;
use crate::models::task_entry::TaskEntry;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub text: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_bounds(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Fill both bounds from a period expression (`2025`, `2025-03`, `a:b`, `all`).
    pub fn with_period(mut self, period: &str) -> AppResult<Self> {
        match parse_period(period)? {
            Some((from, to)) => {
                self.from = Some(from);
                self.to = Some(to);
            }
            None => {
                self.from = None;
                self.to = None;
            }
        }
        Ok(self)
    }

    fn lower_bound(&self) -> Option<NaiveDateTime> {
        self.from.map(|d| d.and_time(NaiveTime::MIN))
    }

    /// Exclusive upper bound: midnight after the `to` day.
    fn upper_bound(&self) -> Option<NaiveDateTime> {
        self.to
            .and_then(|d| d.succ_opt())
            .map(|d| d.and_time(NaiveTime::MIN))
    }

    pub fn matches(&self, entry: &TaskEntry) -> bool {
        if let Some(text) = &self.text {
            let needle = text.trim().to_lowercase();
            if !needle.is_empty() && !entry.description.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if let Some(lower) = self.lower_bound()
            && entry.start_time < lower
        {
            return false;
        }

        if let Some(to) = self.to {
            match self.upper_bound() {
                Some(upper) if entry.start_time >= upper => return false,
                // `to` is the last representable day: everything up to it matches
                None if entry.start_time.date() > to => return false,
                _ => {}
            }
        }

        true
    }

    /// Matching entries, in input order.
    pub fn apply(&self, entries: &[TaskEntry]) -> Vec<TaskEntry> {
        entries.iter().filter(|e| self.matches(e)).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.text.as_deref().is_none_or(|t| t.trim().is_empty())
            && self.from.is_none()
            && self.to.is_none()
    }
}
