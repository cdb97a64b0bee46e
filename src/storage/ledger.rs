//! Semicolon-delimited flat-file ledger, append-only.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::domain::Record;
use crate::errors::Result;
use crate::storage::LedgerStore;

/// Header written once, when the file is first created.
pub const LEDGER_HEADER: &str =
    "owner;date;amount;kind;category;description;counterparty;trip;annualizable";

const DELIMITER: &str = ";";
const TRIP_COLUMN: usize = 7;

/// Append-only CSV ledger at a fixed path.
#[derive(Debug, Clone)]
pub struct CsvLedger {
    path: PathBuf,
}

impl CsvLedger {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl LedgerStore for CsvLedger {
    fn append_record(&mut self, record: &Record) -> Result<()> {
        let first = !self.path.exists();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if first {
            writeln!(file, "{LEDGER_HEADER}")?;
        }
        writeln!(file, "{}", record.to_row().join(DELIMITER))?;
        tracing::info!(path = %self.path.display(), "record appended to ledger");
        Ok(())
    }

    fn most_recent_trip(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(contents
            .lines()
            .skip(1)
            .filter_map(|line| line.split(DELIMITER).nth(TRIP_COLUMN))
            .filter(|trip| !trip.is_empty())
            .last()
            .map(str::to_owned))
    }
}
