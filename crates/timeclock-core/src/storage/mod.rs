//! Storage interfaces and file-backed implementations.
//!
//! The engine consumes plain data; persistence sits behind these narrow
//! load/save interfaces so evaluation logic can be tested against
//! in-memory fakes with an injectable clock and random source.

mod config;
mod jitter_store;
mod ledger;
pub mod memory;

pub use config::{AppConfig, SubmitConfig};
pub use jitter_store::FileJitterStore;
pub use ledger::FilePunchLedger;

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::StorageError;
use crate::jitter::DailyJitter;
use crate::punch::PunchRecord;

/// Append-only per-day punch history. The outer loop appends a record
/// only after a confirmed submission; the engine only ever reads.
pub trait PunchLedger {
    fn load_punches(&self, date: NaiveDate) -> Result<Vec<PunchRecord>, StorageError>;
    fn append_punch(&mut self, date: NaiveDate, record: PunchRecord) -> Result<(), StorageError>;
}

/// Holder of the single current `DailyJitter`. A save replaces any
/// prior value; there is at most one mapping at a time.
pub trait JitterStore {
    fn load(&self) -> Result<Option<DailyJitter>, StorageError>;
    fn save(&mut self, jitter: &DailyJitter) -> Result<(), StorageError>;
}

/// Returns `~/.config/timeclock[-dev]/` based on TIMECLOCK_ENV.
///
/// Set TIMECLOCK_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TIMECLOCK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("timeclock-dev")
    } else {
        base_dir.join("timeclock")
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::WriteFailed {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
