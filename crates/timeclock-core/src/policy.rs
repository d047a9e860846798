//! Workday policy values.
//!
//! The policy is built once (normally from `AppConfig`) and handed to
//! the engine at construction; it is never mutated at runtime, so tests
//! and tenants can vary it freely.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::punch::{hm, PunchKind};

/// Upper bound in minutes of the random offset drawn per punch kind.
/// The lower bound is always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JitterBounds {
    #[serde(default = "default_entry_bound")]
    pub entry_morning: i64,
    #[serde(default = "default_exit_lunch_bound")]
    pub exit_lunch: i64,
    #[serde(default = "default_return_lunch_bound")]
    pub return_lunch: i64,
    #[serde(default = "default_exit_evening_bound")]
    pub exit_evening: i64,
}

impl JitterBounds {
    pub fn for_kind(&self, kind: PunchKind) -> i64 {
        match kind {
            PunchKind::EntryMorning => self.entry_morning,
            PunchKind::ExitLunch => self.exit_lunch,
            PunchKind::ReturnLunch => self.return_lunch,
            PunchKind::ExitEvening => self.exit_evening,
        }
    }
}

/// Immutable workday policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkdayPolicy {
    /// Target total worked hours per day (entry-to-exit minus lunch).
    #[serde(default = "default_daily_hours")]
    pub daily_hours_target: f64,
    /// Minimum lunch duration before the return punch becomes due.
    #[serde(default = "default_lunch_minutes")]
    pub lunch_duration_minutes: i64,
    /// Earliest morning entry; jitter is added on top.
    #[serde(default = "default_entry_trigger")]
    pub entry_trigger: NaiveTime,
    /// Earliest lunch exit; jitter is added on top.
    #[serde(default = "default_lunch_exit_trigger")]
    pub lunch_exit_trigger: NaiveTime,
    /// Start of the window in which a morning entry may fire (inclusive).
    #[serde(default = "default_entry_window_start")]
    pub entry_window_start: NaiveTime,
    /// End of the entry window (exclusive). Outside the window no entry
    /// punch is ever requested.
    #[serde(default = "default_entry_window_end")]
    pub entry_window_end: NaiveTime,
    #[serde(default)]
    pub jitter_bounds: JitterBounds,
}

impl WorkdayPolicy {
    /// Daily quota in whole seconds.
    pub fn daily_target_seconds(&self) -> i64 {
        (self.daily_hours_target * 3600.0).round() as i64
    }
}

// Default functions
fn default_daily_hours() -> f64 {
    8.0
}
fn default_lunch_minutes() -> i64 {
    60
}
fn default_entry_trigger() -> NaiveTime {
    hm(8, 0)
}
fn default_lunch_exit_trigger() -> NaiveTime {
    hm(12, 0)
}
fn default_entry_window_start() -> NaiveTime {
    hm(8, 0)
}
fn default_entry_window_end() -> NaiveTime {
    hm(12, 0)
}
fn default_entry_bound() -> i64 {
    20
}
fn default_exit_lunch_bound() -> i64 {
    10
}
fn default_return_lunch_bound() -> i64 {
    10
}
fn default_exit_evening_bound() -> i64 {
    10
}

impl Default for JitterBounds {
    fn default() -> Self {
        Self {
            entry_morning: default_entry_bound(),
            exit_lunch: default_exit_lunch_bound(),
            return_lunch: default_return_lunch_bound(),
            exit_evening: default_exit_evening_bound(),
        }
    }
}

impl Default for WorkdayPolicy {
    fn default() -> Self {
        Self {
            daily_hours_target: default_daily_hours(),
            lunch_duration_minutes: default_lunch_minutes(),
            entry_trigger: default_entry_trigger(),
            lunch_exit_trigger: default_lunch_exit_trigger(),
            entry_window_start: default_entry_window_start(),
            entry_window_end: default_entry_window_end(),
            jitter_bounds: JitterBounds::default(),
        }
    }
}
