use crate::cli::parser::{Commands, TaskCommands};
use crate::config::Config;
use crate::core::filter::TaskFilter;
use crate::core::grouping::{MonthGroup, group_by_month};
use crate::core::task::{AddTaskLogic, DeleteTaskLogic, TaskForm};
use crate::db::pool::DbPool;
use crate::db::tasks::{load_all_tasks, load_task};
use crate::errors::{AppError, AppResult};
use crate::models::task_entry::TaskEntry;
use crate::ui::messages::{header, info, success};
use crate::ui::prompt::confirmed;
use crate::utils::colors::{GREY, RESET};
use crate::utils::date::{self, weekday_str};
use crate::utils::formatting::{bold, mins2readable, separator};
use crate::utils::table::{Column, Table};
use crate::utils::time::{now_minute, parse_optional_time};
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Task { action } = cmd {
        let mut pool = DbPool::open_initialized(&cfg.database)?;

        match action {
            TaskCommands::Add {
                description,
                start_date,
                start_time,
                end_date,
                end_time,
            } => {
                let now = now_minute();

                let form = TaskForm {
                    description: description.clone(),
                    start_date: parse_optional_date(start_date.as_ref())?.unwrap_or(now.date()),
                    start_time: parse_optional_time(start_time.as_ref())?.unwrap_or(now.time()),
                    end_date: parse_optional_date(end_date.as_ref())?.unwrap_or(now.date()),
                    end_time: parse_optional_time(end_time.as_ref())?.unwrap_or(now.time()),
                };

                let entry = AddTaskLogic::apply(&mut pool, &form)?;
                success(format!(
                    "Task #{} saved: {} ({})",
                    entry.id,
                    entry.description,
                    entry.duration_text()
                ));
            }

            TaskCommands::List {
                search,
                from,
                to,
                period,
                flat,
            } => {
                let mut filter = TaskFilter::new().with_bounds(
                    parse_optional_date(from.as_ref())?,
                    parse_optional_date(to.as_ref())?,
                );
                if let Some(text) = search {
                    filter = filter.with_text(text.clone());
                }
                if let Some(p) = period {
                    filter = filter.with_period(p)?;
                }

                let entries = filter.apply(&load_all_tasks(&pool.conn)?);

                if entries.is_empty() {
                    info("No tasks found.");
                    return Ok(());
                }

                if *flat {
                    print_flat(&entries);
                } else {
                    for month in group_by_month(&entries) {
                        print_month(&month, cfg);
                    }
                }

                let total: i64 = entries.iter().map(|e| e.duration_minutes).sum();
                println!(
                    "{} tasks, total {}",
                    entries.len(),
                    bold(&mins2readable(total, false, false))
                );
            }

            TaskCommands::Del { id, force } => {
                let entry = load_task(&pool.conn, *id)?.ok_or(AppError::TaskNotFound(*id))?;

                let prompt = format!(
                    "Delete task #{} '{}' ({})? This action is irreversible.",
                    entry.id,
                    entry.description,
                    entry.start_time.format("%Y-%m-%d %H:%M")
                );

                if !confirmed(&prompt, *force) {
                    info("Operation cancelled.");
                    return Ok(());
                }

                DeleteTaskLogic::apply(&mut pool, *id)?;
                success(format!("Task #{} has been deleted.", id));
            }
        }
    }

    Ok(())
}

fn parse_optional_date(input: Option<&String>) -> AppResult<Option<NaiveDate>> {
    match input {
        Some(s) => date::parse_date(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(s.to_string())),
        None => Ok(None),
    }
}

/// `09:00 → 12:15`, or with the end date when the task crosses midnight.
fn time_span(e: &TaskEntry) -> String {
    if e.end_time.date() == e.start_time.date() {
        format!(
            "{} → {}",
            e.start_time.format("%H:%M"),
            e.end_time.format("%H:%M")
        )
    } else {
        format!(
            "{} → {}",
            e.start_time.format("%H:%M"),
            e.end_time.format("%Y-%m-%d %H:%M")
        )
    }
}

fn print_month(month: &MonthGroup, cfg: &Config) {
    println!();
    header(month.label());

    for day in &month.days {
        let day_label = if cfg.show_weekday {
            format!("{} {}", day.date, weekday_str(day.date))
        } else {
            day.date.to_string()
        };

        println!(
            "{}  {}{}{}",
            bold(&day_label),
            GREY,
            mins2readable(day.total_minutes, false, true),
            RESET
        );

        for e in &day.entries {
            println!(
                "  #{:<5} {:<24} {:>6}  {}",
                e.id,
                time_span(e),
                e.duration_text(),
                e.description
            );
        }
    }

    println!("{}", separator(&cfg.separator_char, 48));
    println!(
        "{} task(s) in {}, total {}",
        month.entry_count(),
        month.label(),
        bold(&mins2readable(month.total_minutes, false, false))
    );
}

fn print_flat(entries: &[TaskEntry]) {
    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("DATE", 10),
        Column::new("TIME", 24),
        Column::new("DURATION", 8),
        Column::new("DESCRIPTION", 48),
    ]);

    for e in entries {
        table.add_row(vec![
            e.id.to_string(),
            e.date().to_string(),
            time_span(e),
            e.duration_text(),
            e.description.clone(),
        ]);
    }

    print!("{}", table.render());
}
