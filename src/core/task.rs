use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::tasks::{delete_task, insert_task, load_task};
use crate::errors::{AppError, AppResult};
use crate::models::task_entry::TaskEntry;
use chrono::{NaiveDate, NaiveTime};

/// Values of the task form, already parsed.
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub description: String,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
}

/// Validation and storage of a new task.
pub struct AddTaskLogic;

impl AddTaskLogic {
    /// Validate the form into an entry without touching the database.
    pub fn build(form: &TaskForm) -> AppResult<TaskEntry> {
        let description = form.description.trim();
        if description.is_empty() {
            return Err(AppError::MissingDescription);
        }

        let start = form.start_date.and_time(form.start_time);
        let end = form.end_date.and_time(form.end_time);

        if end < start {
            return Err(AppError::InvalidTimeRange);
        }

        Ok(TaskEntry::new(description, start, end))
    }

    pub fn apply(pool: &mut DbPool, form: &TaskForm) -> AppResult<TaskEntry> {
        let mut entry = Self::build(form)?;
        entry.id = insert_task(&pool.conn, &entry)?;

        ttlog_quiet(
            &pool.conn,
            "add",
            &format!("task #{}", entry.id),
            &format!(
                "{} | {} → {} ({})",
                entry.description,
                entry.start_time.format("%Y-%m-%d %H:%M"),
                entry.end_time.format("%Y-%m-%d %H:%M"),
                entry.duration_text()
            ),
        );

        Ok(entry)
    }
}

pub struct DeleteTaskLogic;

impl DeleteTaskLogic {
    /// Remove one task. Returns the deleted entry.
    pub fn apply(pool: &mut DbPool, id: i64) -> AppResult<TaskEntry> {
        let entry = load_task(&pool.conn, id)?.ok_or(AppError::TaskNotFound(id))?;

        if !delete_task(&pool.conn, id)? {
            return Err(AppError::TaskNotFound(id));
        }

        ttlog_quiet(
            &pool.conn,
            "del",
            &format!("task #{}", id),
            &format!("Deleted '{}'", entry.description),
        );

        Ok(entry)
    }
}
