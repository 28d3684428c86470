pub mod ledger;
pub mod service;

pub use ledger::{BookingDraft, BookingLedger, LedgerError};
pub use service::BookingService;
