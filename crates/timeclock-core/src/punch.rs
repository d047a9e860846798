//! Punch records and clock-string parsing.
//!
//! A day's ledger holds at most one punch per kind, in the fixed
//! entry -> lunch-exit -> lunch-return -> evening-exit order, with
//! strictly increasing times. The timesheet site reports bare `HH:MM`
//! strings; the kind of each one is inferred from its position in that
//! list.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The four daily time-tracking events, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchKind {
    EntryMorning,
    ExitLunch,
    ReturnLunch,
    ExitEvening,
}

impl PunchKind {
    pub const ALL: [PunchKind; 4] = [
        PunchKind::EntryMorning,
        PunchKind::ExitLunch,
        PunchKind::ReturnLunch,
        PunchKind::ExitEvening,
    ];

    /// Kind implied by position in the day's ordered punch list.
    pub fn from_position(index: usize) -> Option<PunchKind> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PunchKind::EntryMorning => "entry_morning",
            PunchKind::ExitLunch => "exit_lunch",
            PunchKind::ReturnLunch => "return_lunch",
            PunchKind::ExitEvening => "exit_evening",
        }
    }
}

impl std::fmt::Display for PunchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded punch. Created only after the external collaborator
/// confirmed the submission landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchRecord {
    pub time: NaiveTime,
    pub kind: PunchKind,
}

impl PunchRecord {
    pub fn new(time: NaiveTime, kind: PunchKind) -> Self {
        Self { time, kind }
    }
}

/// Parse a clock string in `%H:%M:%S` or `%H:%M` form.
pub fn parse_clock(raw: &str) -> Result<NaiveTime, EngineError> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| EngineError::Parse {
            raw: trimmed.to_string(),
        })
}

/// Convert the site's ordered clock strings into typed records,
/// inferring each kind from its position.
pub fn records_from_clock_strings(raw: &[String]) -> Result<Vec<PunchRecord>, EngineError> {
    raw.iter()
        .enumerate()
        .map(|(index, s)| {
            let kind = PunchKind::from_position(index).ok_or_else(|| {
                EngineError::StateInconsistency(format!(
                    "{} punches reported, expected at most 4",
                    raw.len()
                ))
            })?;
            Ok(PunchRecord::new(parse_clock(s)?, kind))
        })
        .collect()
}

pub(crate) fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_clock_accepts_both_forms() {
        let expected = NaiveTime::from_hms_opt(8, 5, 0).unwrap();
        assert_eq!(parse_clock("08:05").unwrap(), expected);
        assert_eq!(parse_clock("08:05:00").unwrap(), expected);
        assert_eq!(parse_clock(" 08:05 ").unwrap(), expected);
    }

    #[test]
    fn parse_clock_rejects_garbage() {
        assert!(matches!(
            parse_clock("8h05"),
            Err(EngineError::Parse { .. })
        ));
        assert!(matches!(parse_clock("25:00"), Err(EngineError::Parse { .. })));
    }

    #[test]
    fn kind_follows_position() {
        assert_eq!(PunchKind::from_position(0), Some(PunchKind::EntryMorning));
        assert_eq!(PunchKind::from_position(3), Some(PunchKind::ExitEvening));
        assert_eq!(PunchKind::from_position(4), None);
    }

    #[test]
    fn records_inherit_positional_kinds() {
        let raw = vec!["08:00".to_string(), "12:05".to_string()];
        let records = records_from_clock_strings(&raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, PunchKind::EntryMorning);
        assert_eq!(records[1].kind, PunchKind::ExitLunch);
    }

    #[test]
    fn more_than_four_punches_is_inconsistent() {
        let raw: Vec<String> = ["08:00", "12:00", "13:00", "17:00", "18:00"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(matches!(
            records_from_clock_strings(&raw),
            Err(EngineError::StateInconsistency(_))
        ));
    }

    #[test]
    fn record_serde_roundtrip() {
        let record = PunchRecord::new(hm(8, 30), PunchKind::EntryMorning);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("entry_morning"));
        let parsed: PunchRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
