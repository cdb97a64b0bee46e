#![doc(test(attr(deny(warnings))))]

//! Gastobot walks a single chat user through a multi-step dialog to record an
//! expense or income entry and appends the finished record to a durable
//! ledger. The dialog keeps a per-session history of snapshots so the user
//! can step backward without losing already-validated data.

pub mod config;
pub mod dialog;
pub mod domain;
pub mod errors;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("gastobot=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
