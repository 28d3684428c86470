pub mod allocator;
pub mod entity;
pub mod inventory;
pub mod seed;

pub use entity::{BusSummary, BusTrip, MovieScreening, MovieSummary, ServiceEntity};
pub use inventory::{Allocation, InventoryError, InventoryStore};
