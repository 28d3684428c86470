use crate::ledger::{BookingDraft, BookingLedger};
use std::sync::Arc;
use vetra_catalog::InventoryStore;
use vetra_core::{Booking, BookingError, BookingResult, Customer};

/// Composes the inventory store and the ledger so that each booking or
/// cancellation behaves as one logical transaction: a failed ledger insert
/// hands its seats back, and an unknown booking id releases nothing.
pub struct BookingService {
    store: Arc<InventoryStore>,
    ledger: BookingLedger,
}

impl BookingService {
    pub fn new(store: Arc<InventoryStore>) -> Self {
        Self {
            store,
            ledger: BookingLedger::new(),
        }
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    /// Allocate seats, then insert the booking. Allocation failure leaves
    /// the ledger untouched; an id-generation failure releases the seats
    /// that were just taken before surfacing the error.
    pub fn book(&self, service_id: &str, count: u32, customer: Customer) -> BookingResult<Booking> {
        let allocation = self.store.allocate(service_id, count)?;
        let total_price = allocation.price_per_seat as u64 * count as u64;

        let draft = BookingDraft {
            kind: allocation.kind,
            service_id: service_id.to_string(),
            service_name: allocation.service_name,
            customer,
            seats: allocation.seats.clone(),
            total_price,
        };

        match self.ledger.create(draft) {
            Ok(booking) => {
                tracing::info!(
                    booking_id = %booking.booking_id,
                    service = service_id,
                    seats = count,
                    total_price,
                    "booking created"
                );
                Ok(booking)
            }
            Err(err) => {
                if let Err(release_err) = self.store.release(service_id, &allocation.seats) {
                    tracing::error!(service = service_id, error = %release_err, "rollback release failed");
                }
                Err(err.into())
            }
        }
    }

    /// Remove the booking and return exactly the seats it held. An unknown
    /// id is `NotFound` with no side effects.
    pub fn cancel(&self, booking_id: &str) -> BookingResult<Booking> {
        let booking = self.ledger.cancel(booking_id)?;
        self.store
            .release(&booking.service_id, &booking.seats)
            .map_err(|err| BookingError::Internal(format!("release after cancel failed: {}", err)))?;
        tracing::info!(
            booking_id,
            service = %booking.service_id,
            refund = booking.total_price,
            "booking cancelled"
        );
        Ok(booking)
    }

    pub fn bookings_for(&self, phone: &str) -> Vec<Booking> {
        self.ledger.find_by_phone(phone)
    }
}
