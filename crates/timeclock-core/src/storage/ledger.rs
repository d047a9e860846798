//! JSON-file punch ledger, one record list per calendar day.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::{data_dir, PunchLedger};
use crate::error::StorageError;
use crate::punch::PunchRecord;

type LedgerMap = BTreeMap<NaiveDate, Vec<PunchRecord>>;

/// Punch ledger persisted as a single JSON file keyed by date.
#[derive(Debug, Clone)]
pub struct FilePunchLedger {
    path: PathBuf,
}

impl FilePunchLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ledger at the default location, `<data_dir>/punches.json`.
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::new(data_dir()?.join("punches.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<LedgerMap, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| StorageError::Malformed {
                    path: self.path.clone(),
                    message: e.to_string(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LedgerMap::new()),
            Err(source) => Err(StorageError::ReadFailed {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write_all(&self, map: &LedgerMap) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(map).map_err(|e| StorageError::Malformed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&self.path, content).map_err(|source| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }
}

impl PunchLedger for FilePunchLedger {
    fn load_punches(&self, date: NaiveDate) -> Result<Vec<PunchRecord>, StorageError> {
        Ok(self.read_all()?.remove(&date).unwrap_or_default())
    }

    fn append_punch(&mut self, date: NaiveDate, record: PunchRecord) -> Result<(), StorageError> {
        let mut map = self.read_all()?;
        map.entry(date).or_default().push(record);
        self.write_all(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::punch::PunchKind;
    use chrono::NaiveTime;

    fn record(hour: u32, minute: u32, kind: PunchKind) -> PunchRecord {
        PunchRecord::new(NaiveTime::from_hms_opt(hour, minute, 0).unwrap(), kind)
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = FilePunchLedger::new(dir.path().join("punches.json"));
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(ledger.load_punches(date).unwrap().is_empty());
    }

    #[test]
    fn append_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = FilePunchLedger::new(dir.path().join("punches.json"));
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        ledger
            .append_punch(date, record(8, 0, PunchKind::EntryMorning))
            .unwrap();
        ledger
            .append_punch(date, record(12, 5, PunchKind::ExitLunch))
            .unwrap();

        let punches = ledger.load_punches(date).unwrap();
        assert_eq!(punches.len(), 2);
        assert_eq!(punches[0].kind, PunchKind::EntryMorning);
        assert_eq!(punches[1].kind, PunchKind::ExitLunch);

        // Other days stay empty.
        let other = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        assert!(ledger.load_punches(other).unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_an_error_not_a_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("punches.json");
        std::fs::write(&path, "not json").unwrap();

        let ledger = FilePunchLedger::new(&path);
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(matches!(
            ledger.load_punches(date),
            Err(StorageError::Malformed { .. })
        ));
    }
}
