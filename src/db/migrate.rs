use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// The `tasks` collection. Entries are ordered and range-filtered by start time.
fn create_tasks_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            description      TEXT NOT NULL,
            start_time       TEXT NOT NULL,
            end_time         TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_start_time ON tasks(start_time);
        "#,
    )?;
    Ok(())
}

/// The `meters` collection. Readings live in the `positions` JSON document.
fn create_meters_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS meters (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT NOT NULL,
            category       TEXT NOT NULL DEFAULT 'none',
            number         TEXT NOT NULL DEFAULT '',
            note           TEXT NOT NULL DEFAULT '',
            is_deactivated INTEGER NOT NULL DEFAULT 0,
            positions      TEXT NOT NULL DEFAULT '[]'
        );

        CREATE INDEX IF NOT EXISTS idx_meters_name ON meters(name);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Early databases had no deactivation flag on meters.
fn migrate_add_deactivated_column(conn: &Connection) -> Result<()> {
    let version = "20250301_0002_add_meter_deactivated_flag";

    if migration_applied(conn, version)? || has_column(conn, "meters", "is_deactivated")? {
        return Ok(());
    }

    conn.execute(
        "ALTER TABLE meters ADD COLUMN is_deactivated INTEGER NOT NULL DEFAULT 0;",
        [],
    )?;

    mark_migration(conn, version, "Added is_deactivated flag to meters")?;

    success(format!(
        "Migration applied: {} → added 'is_deactivated' to meters table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "tasks")? {
        create_tasks_table(conn)?;
    } else {
        conn.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_tasks_start_time ON tasks(start_time);",
        )?;
    }

    if !table_exists(conn, "meters")? {
        create_meters_table(conn)?;
    } else {
        migrate_add_deactivated_column(conn)?;
        conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_meters_name ON meters(name);")?;
    }

    Ok(())
}

