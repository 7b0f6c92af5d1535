// src/export/logic.rs

use crate::core::range::parse_period;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::tasks::{load_all_tasks, load_tasks_between};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{TaskExport, build_month_sections};
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::{info, warning};
use crate::utils::date::month_name;
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;
use std::path::PathBuf;

/// High level export of the task log.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the tasks inside `range` (`None`/`all` for everything).
    ///
    /// Returns the written file, or `None` when nothing was written
    /// (empty selection or overwrite declined).
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let path = expand_tilde(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let bounds = match range {
            None => None,
            Some(r) => parse_period(r)?,
        };

        let mut entries = match bounds {
            Some((from, to)) => load_tasks_between(&pool.conn, from, to)?,
            None => load_all_tasks(&pool.conn)?,
        };
        entries.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));

        if entries.is_empty() {
            warning("No tasks found for the selected range.");
            return Ok(None);
        }

        if !ensure_writable(&path, force) {
            info("Export cancelled: existing file not overwritten.");
            return Ok(None);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        match format {
            ExportFormat::Xlsx => {
                let sections = build_month_sections(&entries);
                export_xlsx(&sections, &path, &build_title(range, bounds))?
            }
            ExportFormat::Csv => {
                let rows: Vec<TaskExport> = entries.iter().map(TaskExport::from).collect();
                export_csv(&rows, &path)?
            }
            ExportFormat::Json => {
                let rows: Vec<TaskExport> = entries.iter().map(TaskExport::from).collect();
                export_json(&rows, &path)?
            }
        }

        ttlog_quiet(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} tasks exported as {}", entries.len(), format.as_str()),
        );

        Ok(Some(path))
    }
}

/// Sheet title from the requested period.
fn build_title(range: Option<&str>, bounds: Option<(NaiveDate, NaiveDate)>) -> String {
    let Some(r) = range.map(str::trim) else {
        return "Tasks".to_string();
    };

    match (r.len(), bounds) {
        // YYYY
        (4, _) => format!("Tasks {}", r),
        // YYYY-MM
        (7, Some((from, _))) => {
            use chrono::Datelike;
            format!("Tasks {} {}", month_name(from.month()), from.year())
        }
        (_, Some((from, to))) if from == to => format!("Tasks {}", from),
        (_, Some((from, to))) => format!("Tasks {} - {}", from, to),
        _ => "Tasks".to_string(),
    }
}
