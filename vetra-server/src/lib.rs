pub mod config;
pub mod dispatcher;
pub mod listener;
pub mod protocol;

pub use listener::{serve, ConnectionSettings};
