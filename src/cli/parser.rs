use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for TaskTracker
/// CLI application to log work tasks and meter readings with SQLite
#[derive(Parser)]
#[command(
    name = "tasktracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal task and utility meter log: track work time, meter readings, export to Excel",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Log work tasks
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },

    /// Manage utility meters and their readings
    Meter {
        #[command(subcommand)]
        action: MeterCommands,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(
            long,
            value_name = "DIR",
            conflicts_with = "file",
            help = "Directory for a timestamped backup (default: backup_dir from config)"
        )]
        dir: Option<String>,

        #[arg(long, value_name = "FILE", help = "Explicit backup file path")]
        file: Option<String>,

        #[arg(long, help = "Compress the backup into a .zip archive")]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite the destination without confirmation")]
        force: bool,
    },

    /// Replace the live database with a backup file
    Restore {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f', help = "Restore without confirmation")]
        force: bool,
    },

    /// Export task summaries
    Export {
        #[arg(long, value_enum, default_value = "xlsx")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Output file (absolute path)")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range (YYYY, YYYY-MM, YYYY-MM-DD, a:b, all)"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Record a finished task
    Add {
        /// What was done
        description: String,

        #[arg(long = "start-date", help = "Start date (YYYY-MM-DD, default today)")]
        start_date: Option<String>,

        #[arg(long = "start-time", help = "Start time (HH:MM, default now)")]
        start_time: Option<String>,

        #[arg(long = "end-date", help = "End date (YYYY-MM-DD, default today)")]
        end_date: Option<String>,

        #[arg(long = "end-time", help = "End time (HH:MM, default now)")]
        end_time: Option<String>,
    },

    /// List tasks grouped by month and day
    List {
        #[arg(long, short, help = "Case-insensitive text filter on the description")]
        search: Option<String>,

        #[arg(long, help = "First day to include (YYYY-MM-DD)")]
        from: Option<String>,

        #[arg(long, help = "Last day to include (YYYY-MM-DD)")]
        to: Option<String>,

        #[arg(
            long,
            short,
            conflicts_with_all = ["from", "to"],
            help = "Filter by year/month/day or a custom range"
        )]
        period: Option<String>,

        #[arg(long, help = "Plain list without month/day grouping")]
        flat: bool,
    },

    /// Delete a task by id
    Del {
        id: i64,

        #[arg(long, short = 'f', help = "Delete without confirmation")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum MeterCommands {
    /// Create a new meter
    Add {
        name: String,

        #[arg(long, help = "none, electricity, water, gas, heating, other")]
        category: Option<String>,

        #[arg(long, help = "Meter serial number")]
        number: Option<String>,

        #[arg(long)]
        note: Option<String>,

        #[arg(long, help = "Create the meter already deactivated")]
        deactivated: bool,
    },

    /// Edit the fields of an existing meter
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        number: Option<String>,

        #[arg(long)]
        note: Option<String>,

        #[arg(long, conflicts_with = "active")]
        deactivated: bool,

        #[arg(long)]
        active: bool,
    },

    /// List meters ordered by name
    List {
        #[arg(long, help = "Hide deactivated meters")]
        active: bool,
    },

    /// Show a meter with its readings, newest first
    Show { id: i64 },

    /// Append a reading to a meter
    Reading {
        id: i64,

        value: String,

        #[arg(long, help = "Reading timestamp (YYYY-MM-DD HH:MM, default now)")]
        at: Option<String>,
    },
}
