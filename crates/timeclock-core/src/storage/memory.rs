//! In-memory store fakes for tests and simulations.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::{JitterStore, PunchLedger};
use crate::error::StorageError;
use crate::jitter::DailyJitter;
use crate::punch::PunchRecord;

#[derive(Debug, Clone, Default)]
pub struct MemoryPunchLedger {
    days: BTreeMap<NaiveDate, Vec<PunchRecord>>,
}

impl PunchLedger for MemoryPunchLedger {
    fn load_punches(&self, date: NaiveDate) -> Result<Vec<PunchRecord>, StorageError> {
        Ok(self.days.get(&date).cloned().unwrap_or_default())
    }

    fn append_punch(&mut self, date: NaiveDate, record: PunchRecord) -> Result<(), StorageError> {
        self.days.entry(date).or_default().push(record);
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryJitterStore {
    current: Option<DailyJitter>,
    /// Number of saves, exposed so tests can assert write counts.
    pub saves: usize,
}

impl JitterStore for MemoryJitterStore {
    fn load(&self) -> Result<Option<DailyJitter>, StorageError> {
        Ok(self.current.clone())
    }

    fn save(&mut self, jitter: &DailyJitter) -> Result<(), StorageError> {
        self.current = Some(jitter.clone());
        self.saves += 1;
        Ok(())
    }
}
