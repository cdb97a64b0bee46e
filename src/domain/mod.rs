//! Domain model for the in-progress ledger record.

pub mod dates;
pub mod record;

pub use record::{EntryKind, Record, DEFAULT_INCOME_COUNTERPARTY, TRIP_CATEGORY};
