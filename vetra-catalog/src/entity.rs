use crate::allocator;
use serde::Serialize;
use vetra_core::{SeatId, ServiceKind};

/// A scheduled coach trip. The held seats are the only mutable part; the
/// rest is fixed for the life of the process.
///
/// Held seats are a list, not a set: every seat sold adds one entry and
/// every cancellation removes at most the entries that booking held, so
/// `total - held.len()` is exact even when the count-derived numbering
/// revisits an identifier after a cancellation left holes.
#[derive(Debug)]
pub struct BusTrip {
    pub id: String,
    pub route: String,
    pub departure: String,
    pub arrival: String,
    pub price: u32,
    pub total_seats: u32,
    held: Vec<u32>,
}

impl BusTrip {
    pub fn new(
        id: impl Into<String>,
        route: impl Into<String>,
        departure: impl Into<String>,
        arrival: impl Into<String>,
        price: u32,
        total_seats: u32,
    ) -> Self {
        Self {
            id: id.into(),
            route: route.into(),
            departure: departure.into(),
            arrival: arrival.into(),
            price,
            total_seats,
            held: Vec::new(),
        }
    }
}

/// A movie screening at a fixed cinema and showtime.
#[derive(Debug)]
pub struct MovieScreening {
    pub id: String,
    pub title: String,
    pub showtime: String,
    pub duration: String,
    pub cinema: String,
    pub price: u32,
    pub total_seats: u32,
    held: Vec<String>,
}

impl MovieScreening {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        showtime: impl Into<String>,
        duration: impl Into<String>,
        cinema: impl Into<String>,
        price: u32,
        total_seats: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            showtime: showtime.into(),
            duration: duration.into(),
            cinema: cinema.into(),
            price,
            total_seats,
            held: Vec::new(),
        }
    }
}

/// A bookable unit of inventory. All seat accounting goes through the
/// methods here; the held seats are not reachable from outside the crate.
#[derive(Debug)]
pub enum ServiceEntity {
    Bus(BusTrip),
    Movie(MovieScreening),
}

impl ServiceEntity {
    pub fn id(&self) -> &str {
        match self {
            ServiceEntity::Bus(bus) => &bus.id,
            ServiceEntity::Movie(movie) => &movie.id,
        }
    }

    pub fn kind(&self) -> ServiceKind {
        match self {
            ServiceEntity::Bus(_) => ServiceKind::Bus,
            ServiceEntity::Movie(_) => ServiceKind::Movie,
        }
    }

    pub fn price(&self) -> u32 {
        match self {
            ServiceEntity::Bus(bus) => bus.price,
            ServiceEntity::Movie(movie) => movie.price,
        }
    }

    pub fn total_seats(&self) -> u32 {
        match self {
            ServiceEntity::Bus(bus) => bus.total_seats,
            ServiceEntity::Movie(movie) => movie.total_seats,
        }
    }

    pub fn held_count(&self) -> u32 {
        match self {
            ServiceEntity::Bus(bus) => bus.held.len() as u32,
            ServiceEntity::Movie(movie) => movie.held.len() as u32,
        }
    }

    pub fn available(&self) -> u32 {
        self.total_seats() - self.held_count()
    }

    /// Display snapshot stored on bookings: the route, or "title - showtime".
    pub fn display_name(&self) -> String {
        match self {
            ServiceEntity::Bus(bus) => bus.route.clone(),
            ServiceEntity::Movie(movie) => format!("{} - {}", movie.title, movie.showtime),
        }
    }

    /// Take `count` seats, numbering from the occupancy count at entry.
    /// The caller (the store) has already checked capacity under the same
    /// lock, so this never exceeds `total_seats`.
    pub(crate) fn allocate(&mut self, count: u32) -> Vec<SeatId> {
        match self {
            ServiceEntity::Bus(bus) => {
                let base = bus.held.len() as u32;
                (1..=count)
                    .map(|k| {
                        bus.held.push(base + k);
                        allocator::bus_seat(base + k)
                    })
                    .collect()
            }
            ServiceEntity::Movie(movie) => {
                let base = movie.held.len() as u32;
                (1..=count)
                    .map(|k| {
                        let seat = allocator::movie_seat(base + k);
                        if let SeatId::Label(label) = &seat {
                            movie.held.push(label.clone());
                        }
                        seat
                    })
                    .collect()
            }
        }
    }

    /// Return seats to the pool. Each identifier removes at most one held
    /// entry, so a booking can only ever free what it was sold; identifiers
    /// with no remaining entry are skipped.
    pub(crate) fn release(&mut self, seats: &[SeatId]) {
        for seat in seats {
            match (&mut *self, seat) {
                (ServiceEntity::Bus(bus), SeatId::Number(n)) => {
                    if let Some(pos) = bus.held.iter().position(|held| held == n) {
                        bus.held.remove(pos);
                    }
                }
                (ServiceEntity::Movie(movie), SeatId::Label(label)) => {
                    if let Some(pos) = movie.held.iter().position(|held| held == label) {
                        movie.held.remove(pos);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Listing row for `get_buses`.
#[derive(Debug, Clone, Serialize)]
pub struct BusSummary {
    pub id: String,
    pub route: String,
    pub departure: String,
    pub arrival: String,
    pub price: u32,
    pub available_seats: u32,
    pub total_seats: u32,
}

/// Listing row for `get_movies`.
#[derive(Debug, Clone, Serialize)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub showtime: String,
    pub duration: String,
    pub cinema: String,
    pub price: u32,
    pub available_seats: u32,
    pub total_seats: u32,
}

impl From<&BusTrip> for BusSummary {
    fn from(bus: &BusTrip) -> Self {
        Self {
            id: bus.id.clone(),
            route: bus.route.clone(),
            departure: bus.departure.clone(),
            arrival: bus.arrival.clone(),
            price: bus.price,
            available_seats: bus.total_seats - bus.held.len() as u32,
            total_seats: bus.total_seats,
        }
    }
}

impl From<&MovieScreening> for MovieSummary {
    fn from(movie: &MovieScreening) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            showtime: movie.showtime.clone(),
            duration: movie.duration.clone(),
            cinema: movie.cinema.clone(),
            price: movie.price,
            available_seats: movie.total_seats - movie.held.len() as u32,
            total_seats: movie.total_seats,
        }
    }
}
