// src/export/excel_date.rs

use chrono::NaiveDate;

/// Excel serial number of a calendar day (1900 date system).
pub(crate) fn date_to_excel_serial(d: NaiveDate) -> f64 {
    // 1899-12-30 absorbs Excel's phantom 1900-02-29
    match NaiveDate::from_ymd_opt(1899, 12, 30) {
        Some(epoch) => (d - epoch).num_days() as f64,
        None => 0.0,
    }
}

pub(crate) const DATE_NUM_FORMAT: &str = "yyyy-mm-dd";
pub(crate) const HOURS_NUM_FORMAT: &str = "0.00";
