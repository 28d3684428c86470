//! The JSON wire protocol: one object per request, one per response, UTF-8,
//! no length prefix. Requests carry an `action` tag; responses carry
//! `"status": "success"` or `"status": "error"` plus action-specific fields.

use serde::Deserialize;
use serde_json::{json, Value};
use vetra_core::{BookingError, Customer};

/// A decoded request. Required fields are optional here so the dispatcher
/// can report a missing field as a validation error instead of a decode
/// failure; an unrecognized `action` fails decoding outright.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
    GetBuses,
    GetMovies,
    BookBus {
        bus_id: Option<String>,
        seats: Option<i64>,
        customer: Option<Customer>,
    },
    BookMovie {
        movie_id: Option<String>,
        seats: Option<i64>,
        customer: Option<Customer>,
    },
    GetBookings {
        customer_phone: Option<String>,
    },
    CancelBooking {
        booking_id: Option<String>,
    },
}

impl Request {
    pub fn decode(raw: &[u8]) -> Result<Self, BookingError> {
        serde_json::from_slice(raw).map_err(|err| BookingError::Protocol(format!("invalid request: {}", err)))
    }
}

pub fn error_response(err: &BookingError) -> Value {
    json!({
        "status": "error",
        "message": err.to_string(),
    })
}
