use super::meter_category::MeterCategory;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single dated reading of a meter.
/// Stored inside the owning meter's `positions` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: i64,
    pub value: f64,
    pub added_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Meter {
    pub id: i64, // 0 until inserted
    pub name: String,
    pub category: MeterCategory,
    pub number: String,
    pub note: String,
    pub is_deactivated: bool,
    pub positions: Vec<Position>,
}

impl Meter {
    pub fn new(name: impl Into<String>, category: MeterCategory) -> Self {
        Self {
            id: 0,
            name: name.into(),
            category,
            number: String::new(),
            note: String::new(),
            is_deactivated: false,
            positions: Vec::new(),
        }
    }

    /// Ids are local to the meter: 1 for the first reading, then max + 1.
    pub fn next_position_id(&self) -> i64 {
        self.positions.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    /// Append a reading with the next free id.
    pub fn push_position(&mut self, value: f64, added_at: NaiveDateTime) -> Position {
        let position = Position {
            id: self.next_position_id(),
            value,
            added_at,
        };
        self.positions.push(position.clone());
        position
    }

    pub fn positions_newest_first(&self) -> Vec<&Position> {
        let mut out: Vec<&Position> = self.positions.iter().collect();
        out.sort_by(|a, b| b.added_at.cmp(&a.added_at).then(b.id.cmp(&a.id)));
        out
    }

    pub fn latest_position(&self) -> Option<&Position> {
        self.positions
            .iter()
            .max_by(|a, b| a.added_at.cmp(&b.added_at).then(a.id.cmp(&b.id)))
    }
}
