pub mod backup;
pub mod filter;
pub mod grouping;
pub mod log;
pub mod meter;
pub mod range;
pub mod task;
