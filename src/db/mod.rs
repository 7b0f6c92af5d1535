pub mod initialize;
pub mod log;
pub mod meters;
pub mod migrate;
pub mod pool;
pub mod stats;
pub mod tasks;

/// Storage format of the task timestamp columns. Positions inside the
/// `meters.positions` JSON keep chrono's serde form (`2025-03-01T10:00:00`).
pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";
