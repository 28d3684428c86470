//! Stateless per-message command routing. Every request is handled in
//! isolation: validation and store/ledger failures become error responses
//! and the connection stays open for the next message.

use crate::protocol::{error_response, Request};
use serde_json::{json, Value};
use vetra_core::{BookingError, BookingResult, Customer, ServiceKind};
use vetra_ledger::BookingService;

/// Decode, route, and encode. Never fails; anything that goes wrong is
/// folded into an error response.
pub fn dispatch(service: &BookingService, raw: &[u8]) -> Value {
    match handle(service, raw) {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(error = %err, "request failed");
            error_response(&err)
        }
    }
}

fn handle(service: &BookingService, raw: &[u8]) -> BookingResult<Value> {
    match Request::decode(raw)? {
        Request::GetBuses => Ok(json!({
            "status": "success",
            "data": service.store().list_buses(),
        })),
        Request::GetMovies => Ok(json!({
            "status": "success",
            "data": service.store().list_movies(),
        })),
        Request::BookBus { bus_id, seats, customer } => {
            book(service, ServiceKind::Bus, "bus_id", bus_id, seats, customer)
        }
        Request::BookMovie { movie_id, seats, customer } => {
            book(service, ServiceKind::Movie, "movie_id", movie_id, seats, customer)
        }
        Request::GetBookings { customer_phone } => {
            let phone = required_string("customer_phone", customer_phone)?;
            let bookings = service.bookings_for(&phone);
            Ok(json!({
                "status": "success",
                "count": bookings.len(),
                "data": bookings,
            }))
        }
        Request::CancelBooking { booking_id } => {
            let booking_id = required_string("booking_id", booking_id)?;
            let booking = service.cancel(&booking_id)?;
            Ok(json!({
                "status": "success",
                "message": "Booking cancelled",
                "refund_amount": booking.total_price,
            }))
        }
    }
}

/// Validation order: the entity must exist (and be of the requested kind),
/// then the seat count must be a positive integer within availability, then
/// the customer must have a name and phone. The availability check here is
/// advisory; `BookingService::book` re-checks under the entity lock.
fn book(
    service: &BookingService,
    expected: ServiceKind,
    id_field: &str,
    service_id: Option<String>,
    seats: Option<i64>,
    customer: Option<Customer>,
) -> BookingResult<Value> {
    let service_id = required_string(id_field, service_id)?;

    if service.store().kind_of(&service_id)? != expected {
        return Err(BookingError::NotFound(format!("service not found: {}", service_id)));
    }
    let available = service.store().availability(&service_id)?;

    let seats = seats.ok_or_else(|| BookingError::Validation("seats is required".to_string()))?;
    if seats <= 0 {
        return Err(BookingError::Validation(
            "seats must be a positive integer".to_string(),
        ));
    }
    if seats as u64 > available as u64 {
        return Err(BookingError::Capacity {
            requested: u32::try_from(seats).unwrap_or(u32::MAX),
            available,
        });
    }

    let customer = customer.ok_or_else(|| BookingError::Validation("customer is required".to_string()))?;
    if customer.name.trim().is_empty() || customer.phone.trim().is_empty() {
        return Err(BookingError::Validation(
            "customer name and phone are required".to_string(),
        ));
    }

    let booking = service.book(&service_id, seats as u32, customer)?;
    let message = match expected {
        ServiceKind::Bus => "Bus booking confirmed",
        ServiceKind::Movie => "Movie booking confirmed",
    };
    Ok(json!({
        "status": "success",
        "message": message,
        "booking_info": booking,
    }))
}

fn required_string(field: &str, value: Option<String>) -> BookingResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(BookingError::Validation(format!("{} is required", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vetra_catalog::{seed, InventoryStore};

    fn service() -> BookingService {
        BookingService::new(Arc::new(InventoryStore::new(seed::catalog())))
    }

    fn dispatch_json(service: &BookingService, body: Value) -> Value {
        dispatch(service, body.to_string().as_bytes())
    }

    #[test]
    fn test_get_buses_lists_catalog() {
        let service = service();
        let response = dispatch_json(&service, json!({"action": "get_buses"}));
        assert_eq!(response["status"], "success");
        assert_eq!(response["data"].as_array().unwrap().len(), 3);
        assert_eq!(response["data"][0]["id"], "XE001");
        assert_eq!(response["data"][0]["available_seats"], 40);
    }

    #[test]
    fn test_book_bus_happy_path() {
        let service = service();
        let response = dispatch_json(
            &service,
            json!({
                "action": "book_bus",
                "bus_id": "XE001",
                "seats": 5,
                "customer": {"name": "Anh", "phone": "0901234567"},
            }),
        );
        assert_eq!(response["status"], "success");
        let info = &response["booking_info"];
        assert_eq!(info["seats"], json!([1, 2, 3, 4, 5]));
        assert_eq!(info["total_price"], 600000);
        assert_eq!(info["type"], "bus");
        assert_eq!(info["service_name"], "Hà Nội - Hải Phòng");
        assert_eq!(info["booking_id"].as_str().unwrap().len(), 8);
    }

    #[test]
    fn test_validation_runs_after_existence_check() {
        let service = service();

        // Unknown entity wins over a bad seat count.
        let response = dispatch_json(
            &service,
            json!({"action": "book_bus", "bus_id": "XE999", "seats": 0}),
        );
        assert_eq!(response["status"], "error");
        assert!(response["message"].as_str().unwrap().contains("not found"));

        // Known entity, non-positive count.
        let response = dispatch_json(
            &service,
            json!({"action": "book_bus", "bus_id": "XE001", "seats": 0,
                   "customer": {"name": "A", "phone": "1"}}),
        );
        assert!(response["message"].as_str().unwrap().contains("positive"));

        // Count ok, empty customer.
        let response = dispatch_json(
            &service,
            json!({"action": "book_bus", "bus_id": "XE001", "seats": 1,
                   "customer": {"name": "", "phone": "1"}}),
        );
        assert!(response["message"].as_str().unwrap().contains("name and phone"));
    }

    #[test]
    fn test_booking_movie_id_on_bus_action_is_not_found() {
        let service = service();
        let response = dispatch_json(
            &service,
            json!({"action": "book_bus", "bus_id": "PHIM001", "seats": 1,
                   "customer": {"name": "A", "phone": "1"}}),
        );
        assert_eq!(response["status"], "error");
        assert!(response["message"].as_str().unwrap().contains("not found"));
    }

    #[test]
    fn test_capacity_error_reports_availability() {
        let service = service();
        dispatch_json(
            &service,
            json!({"action": "book_bus", "bus_id": "XE003", "seats": 27,
                   "customer": {"name": "A", "phone": "1"}}),
        );
        let response = dispatch_json(
            &service,
            json!({"action": "book_bus", "bus_id": "XE003", "seats": 5,
                   "customer": {"name": "A", "phone": "1"}}),
        );
        assert_eq!(response["status"], "error");
        assert!(response["message"].as_str().unwrap().contains("3"));
    }

    #[test]
    fn test_get_bookings_and_cancel_round_trip() {
        let service = service();
        let booked = dispatch_json(
            &service,
            json!({"action": "book_movie", "movie_id": "PHIM002", "seats": 11,
                   "customer": {"name": "Chi", "phone": "0777"}}),
        );
        assert_eq!(booked["booking_info"]["seats"][10], "B1");
        let booking_id = booked["booking_info"]["booking_id"].as_str().unwrap();

        let listed = dispatch_json(&service, json!({"action": "get_bookings", "customer_phone": "0777"}));
        assert_eq!(listed["count"], 1);
        assert_eq!(listed["data"][0]["booking_id"], booking_id);

        let cancelled = dispatch_json(&service, json!({"action": "cancel_booking", "booking_id": booking_id}));
        assert_eq!(cancelled["status"], "success");
        assert_eq!(cancelled["refund_amount"], 75000 * 11);

        let listed = dispatch_json(&service, json!({"action": "get_bookings", "customer_phone": "0777"}));
        assert_eq!(listed["count"], 0);
    }

    #[test]
    fn test_cancel_unknown_booking_is_error() {
        let service = service();
        let response = dispatch_json(&service, json!({"action": "cancel_booking", "booking_id": "NOPE0000"}));
        assert_eq!(response["status"], "error");
    }

    #[test]
    fn test_unknown_action_and_garbage_are_error_responses() {
        let service = service();
        let response = dispatch_json(&service, json!({"action": "teleport"}));
        assert_eq!(response["status"], "error");

        let response = dispatch(&service, b"{{{{");
        assert_eq!(response["status"], "error");
    }
}
