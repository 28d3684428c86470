use crate::entity::{BusSummary, MovieSummary, ServiceEntity};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use vetra_core::{BookingError, SeatId, ServiceKind};

/// In-memory inventory store shared by every connection.
///
/// The catalog itself is fixed at startup, so the map is never locked as a
/// whole; each entity sits behind its own mutex and an allocation holds
/// exactly one guard for the duration of the capacity check plus the
/// held-seat mutation. Guards are never held across I/O.
pub struct InventoryStore {
    entities: HashMap<String, Mutex<ServiceEntity>>,
}

/// What an allocation hands back: the seats plus the pricing/display
/// snapshot the ledger needs, read under the same guard.
#[derive(Debug, Clone)]
pub struct Allocation {
    pub kind: ServiceKind,
    pub service_name: String,
    pub price_per_seat: u32,
    pub seats: Vec<SeatId>,
}

impl InventoryStore {
    pub fn new(entities: Vec<ServiceEntity>) -> Self {
        let entities = entities
            .into_iter()
            .map(|entity| (entity.id().to_string(), Mutex::new(entity)))
            .collect();
        Self { entities }
    }

    fn entry(&self, id: &str) -> Result<MutexGuard<'_, ServiceEntity>, InventoryError> {
        let entity = self
            .entities
            .get(id)
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))?;
        // A handler that panicked while holding this guard must not wedge
        // the entity for every later request.
        Ok(entity.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }

    /// Listing snapshot for `get_buses`. Each row is consistent with itself;
    /// rows may be mutually stale under concurrent booking, which is fine
    /// for display.
    pub fn list_buses(&self) -> Vec<BusSummary> {
        let mut rows: Vec<BusSummary> = self
            .entities
            .values()
            .filter_map(|entity| {
                let guard = entity.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                match &*guard {
                    ServiceEntity::Bus(bus) => Some(BusSummary::from(bus)),
                    ServiceEntity::Movie(_) => None,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        rows
    }

    /// Listing snapshot for `get_movies`.
    pub fn list_movies(&self) -> Vec<MovieSummary> {
        let mut rows: Vec<MovieSummary> = self
            .entities
            .values()
            .filter_map(|entity| {
                let guard = entity.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                match &*guard {
                    ServiceEntity::Bus(_) => None,
                    ServiceEntity::Movie(movie) => Some(MovieSummary::from(movie)),
                }
            })
            .collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        rows
    }

    /// Current availability, or `NotFound` for an unknown id. Used by the
    /// dispatcher's validation pass; the authoritative check is the one
    /// `allocate` performs under the entity guard.
    pub fn availability(&self, id: &str) -> Result<u32, InventoryError> {
        Ok(self.entry(id)?.available())
    }

    pub fn kind_of(&self, id: &str) -> Result<ServiceKind, InventoryError> {
        Ok(self.entry(id)?.kind())
    }

    /// Reserve `count` seats on one entity. The capacity check and the
    /// held-seat mutation happen under a single guard, so two racing
    /// allocations can never jointly oversell.
    pub fn allocate(&self, id: &str, count: u32) -> Result<Allocation, InventoryError> {
        let mut entity = self.entry(id)?;
        let available = entity.available();
        if count > available {
            return Err(InventoryError::InsufficientCapacity {
                requested: count,
                available,
            });
        }

        let seats = entity.allocate(count);
        tracing::debug!(service = id, count, "allocated seats");
        Ok(Allocation {
            kind: entity.kind(),
            service_name: entity.display_name(),
            price_per_seat: entity.price(),
            seats,
        })
    }

    /// Return seats to an entity. Identifiers already absent are ignored,
    /// so replaying a release is harmless.
    pub fn release(&self, id: &str, seats: &[SeatId]) -> Result<(), InventoryError> {
        let mut entity = self.entry(id)?;
        entity.release(seats);
        tracing::debug!(service = id, count = seats.len(), "released seats");
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("service not found: {0}")]
    NotFound(String),

    #[error("insufficient capacity: requested {requested}, available {available}")]
    InsufficientCapacity { requested: u32, available: u32 },
}

impl From<InventoryError> for BookingError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::NotFound(id) => BookingError::NotFound(format!("service not found: {}", id)),
            InventoryError::InsufficientCapacity { requested, available } => {
                BookingError::Capacity { requested, available }
            }
        }
    }
}
