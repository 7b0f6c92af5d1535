use crate::db::pool::DbPool;
use crate::db::{meters, tasks};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::mins2readable;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) COUNTS
    //
    let task_count = tasks::count_tasks(&pool.conn)?;
    let all_meters = meters::load_all_meters(&pool.conn)?;
    let meter_count = meters::count_meters(&pool.conn)?;
    let reading_count: usize = all_meters.iter().map(|m| m.positions.len()).sum();

    println!("{}• Tasks:{} {}{}{}", CYAN, RESET, GREEN, task_count, RESET);
    println!("{}• Meters:{} {}{}{}", CYAN, RESET, GREEN, meter_count, RESET);
    println!("{}• Readings:{} {}{}{}", CYAN, RESET, GREEN, reading_count, RESET);

    //
    // 3) TASK DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT substr(start_time, 1, 10) FROM tasks ORDER BY start_time ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT substr(start_time, 1, 10) FROM tasks ORDER BY start_time DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    println!("{}• Task range:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    //
    // 4) TOTAL LOGGED TIME
    //
    let total: i64 = pool.conn.query_row(
        "SELECT IFNULL(SUM(duration_minutes), 0) FROM tasks",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Logged time:{} {}",
        CYAN,
        RESET,
        mins2readable(total, false, false)
    );

    println!();
    Ok(())
}
