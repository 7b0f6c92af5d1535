/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

use crate::models::meter_category::MeterCategory;

/// One color per meter category, used in `meter list` / `meter show`.
pub fn color_for_category(category: MeterCategory) -> &'static str {
    match category {
        MeterCategory::Electricity => YELLOW,
        MeterCategory::Water => BLUE,
        MeterCategory::Gas => MAGENTA,
        MeterCategory::Heating => RED,
        MeterCategory::None | MeterCategory::Other => RESET,
    }
}

/// Consumption delta color:
/// \>0 → green
/// \<0 → red (meter replaced or typo)
/// 0 → grey
pub fn color_for_delta(value: f64) -> &'static str {
    if value > 0.0 {
        GREEN
    } else if value < 0.0 {
        RED
    } else {
        GREY
    }
}

/// Greys out empty values.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}
