use chrono::Local;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;
use vetra_core::{Booking, BookingError, Customer, SeatId, ServiceKind};

/// Id generation is random over 16^8 tokens; running out of attempts means
/// something is deeply wrong, not that the space is full.
const MAX_ID_ATTEMPTS: u32 = 16;

/// Everything needed to mint a booking except the id and timestamp, which
/// the ledger assigns under its own lock.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub kind: ServiceKind,
    pub service_id: String,
    pub service_name: String,
    pub customer: Customer,
    pub seats: Vec<SeatId>,
    pub total_price: u64,
}

struct Inner {
    bookings: HashMap<String, Booking>,
    // Insertion order, for find_by_phone.
    order: Vec<String>,
    // Every id ever minted, cancelled or not. An id is never reissued for
    // the lifetime of the ledger.
    issued: HashSet<String>,
}

/// The authoritative set of active bookings, indexed by booking id.
/// Cancellation removes the record outright; there is no archive.
pub struct BookingLedger {
    inner: Mutex<Inner>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                bookings: HashMap::new(),
                order: Vec::new(),
                issued: HashSet::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mint an id, stamp the booking, and insert it. Candidates are checked
    /// against every id ever issued, not just live entries, and the check
    /// and insert happen under one guard, so two concurrent creates can
    /// never share an id and a cancelled id never comes back.
    pub fn create(&self, draft: BookingDraft) -> Result<Booking, LedgerError> {
        let mut inner = self.lock();

        let mut booking_id = None;
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = new_token();
            if inner.issued.insert(candidate.clone()) {
                booking_id = Some(candidate);
                break;
            }
        }
        let booking_id = booking_id.ok_or(LedgerError::IdSpaceExhausted)?;

        let booking = Booking {
            booking_id: booking_id.clone(),
            kind: draft.kind,
            service_id: draft.service_id,
            service_name: draft.service_name,
            customer: draft.customer,
            seats: draft.seats,
            total_price: draft.total_price,
            booking_time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        inner.bookings.insert(booking_id.clone(), booking.clone());
        inner.order.push(booking_id);
        Ok(booking)
    }

    /// Active bookings whose customer phone matches exactly, oldest first.
    pub fn find_by_phone(&self, phone: &str) -> Vec<Booking> {
        let inner = self.lock();
        inner
            .order
            .iter()
            .filter_map(|id| inner.bookings.get(id))
            .filter(|booking| booking.customer.phone == phone)
            .cloned()
            .collect()
    }

    /// Remove a booking and return it, or `NotFound` leaving the ledger
    /// untouched.
    pub fn cancel(&self, booking_id: &str) -> Result<Booking, LedgerError> {
        let mut inner = self.lock();
        let booking = inner
            .bookings
            .remove(booking_id)
            .ok_or_else(|| LedgerError::NotFound(booking_id.to_string()))?;
        inner.order.retain(|id| id != booking_id);
        Ok(booking)
    }

    pub fn len(&self) -> usize {
        self.lock().bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BookingLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Random 8-character uppercase booking token.
fn new_token() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("booking not found: {0}")]
    NotFound(String),

    #[error("could not generate a unique booking id")]
    IdSpaceExhausted,
}

impl From<LedgerError> for BookingError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(id) => BookingError::NotFound(format!("booking not found: {}", id)),
            LedgerError::IdSpaceExhausted => {
                BookingError::Internal("could not generate a unique booking id".to_string())
            }
        }
    }
}
