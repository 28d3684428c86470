use crate::customer::Customer;
use crate::seat::SeatId;
use serde::{Deserialize, Serialize};

/// The two kinds of bookable inventory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Bus,
    Movie,
}

/// An active booking as held in the ledger and returned on the wire.
///
/// `service_name` is a display snapshot taken at booking time (the bus
/// route, or "title - showtime" for a screening); it is not re-resolved on
/// later reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: String,
    #[serde(rename = "type")]
    pub kind: ServiceKind,
    pub service_id: String,
    pub service_name: String,
    pub customer: Customer,
    pub seats: Vec<SeatId>,
    pub total_price: u64,
    pub booking_time: String,
}

impl Booking {
    /// Price invariant: total is always unit price times seat count.
    pub fn price_consistent(&self, price_per_seat: u32) -> bool {
        self.total_price == price_per_seat as u64 * self.seats.len() as u64
    }
}
