use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeterCategory {
    #[default]
    None,
    Electricity,
    Water,
    Gas,
    Heating,
    Other,
}

impl MeterCategory {
    /// Every category, in picker order.
    pub fn all() -> [MeterCategory; 6] {
        [
            MeterCategory::None,
            MeterCategory::Electricity,
            MeterCategory::Water,
            MeterCategory::Gas,
            MeterCategory::Heating,
            MeterCategory::Other,
        ]
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            MeterCategory::None => "none",
            MeterCategory::Electricity => "electricity",
            MeterCategory::Water => "water",
            MeterCategory::Gas => "gas",
            MeterCategory::Heating => "heating",
            MeterCategory::Other => "other",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.to_db_str() == s)
    }

    /// Helper: convert input from CLI (any case)
    pub fn from_code(code: &str) -> Option<Self> {
        Self::from_db_str(&code.trim().to_lowercase())
    }

    /// Unit shown next to readings.
    pub fn unit(&self) -> &'static str {
        match self {
            MeterCategory::Electricity => "kWh",
            MeterCategory::Water | MeterCategory::Gas => "m³",
            MeterCategory::Heating => "MWh",
            MeterCategory::None | MeterCategory::Other => "",
        }
    }
}

impl fmt::Display for MeterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MeterCategory::None => "None",
            MeterCategory::Electricity => "Electricity",
            MeterCategory::Water => "Water",
            MeterCategory::Gas => "Gas",
            MeterCategory::Heating => "Heating",
            MeterCategory::Other => "Other",
        };
        f.write_str(label)
    }
}
