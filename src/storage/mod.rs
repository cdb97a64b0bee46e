//! External collaborators the dialog core consumes: the append-only ledger,
//! the reference lists, and the user allow-list. The core only ever sees
//! the traits; file-backed implementations live alongside.

pub mod ledger;
pub mod refdata;
pub mod users;

use crate::domain::{EntryKind, Record};
use crate::errors::Result;

pub use ledger::CsvLedger;
pub use refdata::JsonReferenceData;
pub use users::JsonUserStore;

/// Append-only store of finished records, plus the recency query the trip
/// sub-flow needs.
pub trait LedgerStore {
    fn append_record(&mut self, record: &Record) -> Result<()>;

    /// Trip label of the most recently appended record that has one.
    fn most_recent_trip(&self) -> Result<Option<String>>;
}

/// Read-only reference lists scoped by entry kind.
pub trait ReferenceStore {
    fn categories(&self, kind: EntryKind) -> Result<Vec<String>>;

    fn counterparties(&self) -> Result<Vec<String>>;
}

/// Static allow-list with password-gated registration.
pub trait AuthStore {
    fn is_registered(&self, user_id: i64) -> Result<bool>;

    /// Adds `user_id` when `credential` matches the shared password and the
    /// user is new; returns whether registration happened.
    fn register(&mut self, user_id: i64, credential: &str) -> Result<bool>;
}
