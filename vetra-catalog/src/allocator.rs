//! The seat-numbering rule. Identifiers derive from the entity's occupancy
//! count at allocation time, not from a monotonic ticket, so seats freed by
//! a cancellation are handed out again by later allocations.

use vetra_core::SeatId;

const SEATS_PER_ROW: u32 = 10;

/// Bus seats are plain 1-based numbers: the n-th occupied seat is seat `n`.
pub fn bus_seat(ordinal: u32) -> SeatId {
    SeatId::Number(ordinal)
}

/// Screening seats are laid out ten to a row: the n-th occupied seat is
/// row `A + (n-1)/10`, column `(n-1)%10 + 1`, e.g. ordinal 11 -> `B1`.
pub fn movie_seat(ordinal: u32) -> SeatId {
    let row = (b'A' + ((ordinal - 1) / SEATS_PER_ROW) as u8) as char;
    let col = (ordinal - 1) % SEATS_PER_ROW + 1;
    SeatId::Label(format!("{}{}", row, col))
}
