pub mod booking;
pub mod customer;
pub mod seat;

pub use booking::{Booking, ServiceKind};
pub use customer::Customer;
pub use seat::SeatId;

/// Request-level error taxonomy. Every failure while handling one request
/// maps onto exactly one of these; the server turns them into error
/// responses without dropping the connection.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("{0}")]
    Protocol(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("only {available} seats left, requested {requested}")]
    Capacity { requested: u32, available: u32 },

    #[error("internal error: {0}")]
    Internal(String),
}

pub type BookingResult<T> = Result<T, BookingError>;
