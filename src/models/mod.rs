pub mod meter;
pub mod meter_category;
pub mod task_entry;
