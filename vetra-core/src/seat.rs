use serde::{Deserialize, Serialize};
use std::fmt;

/// A seat identifier held by a booking. Buses number seats 1..total;
/// screenings label them row-letter + column (`A1`, `B7`). Identifiers
/// derive from the occupancy count at allocation time and are recycled once
/// released; the entity accounts one held entry per seat sold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum SeatId {
    Number(u32),
    Label(String),
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatId::Number(n) => write!(f, "{}", n),
            SeatId::Label(s) => write!(f, "{}", s),
        }
    }
}

impl From<u32> for SeatId {
    fn from(n: u32) -> Self {
        SeatId::Number(n)
    }
}

impl From<String> for SeatId {
    fn from(s: String) -> Self {
        SeatId::Label(s)
    }
}
