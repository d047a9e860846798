//! # Timeclock Core Library
//!
//! Decision engine for a daily time-tracking ("punch clock") rota. At
//! each evaluation tick the engine maps the punches already recorded
//! today, the current wall-clock time, the workday policy, and a stable
//! per-day random jitter to a single decision: do nothing, or request
//! one specific punch kind now.
//!
//! ## Architecture
//!
//! - **Decision Engine**: stateless per tick; the day state is re-derived
//!   from the punch history on every call
//! - **Checkout Calculator**: the departure time that completes the daily
//!   hour quota, compensating lateness on the way out
//! - **Daily Jitter**: one random offset per punch kind per calendar day,
//!   stable across all evaluations of that day
//! - **Storage**: JSON punch ledger and jitter store behind narrow
//!   traits, plus the TOML application configuration
//!
//! The outer poll loop, the site automation, and submission confirmation
//! live outside this crate; the engine only consumes and produces plain
//! data.

pub mod calendar;
pub mod checkout;
pub mod engine;
pub mod error;
pub mod jitter;
pub mod policy;
pub mod punch;
pub mod storage;

pub use calendar::CalendarGate;
pub use checkout::{
    compute_target_checkout, fallback_checkout, plan_from_clock_strings, CheckoutBasis,
    CheckoutPlan,
};
pub use engine::{Decision, DecisionEngine, EvaluationReport};
pub use error::{ConfigError, CoreError, EngineError, StorageError};
pub use jitter::{get_or_create_jitter, DailyJitter};
pub use policy::{JitterBounds, WorkdayPolicy};
pub use punch::{PunchKind, PunchRecord};
pub use storage::{AppConfig, FileJitterStore, FilePunchLedger, JitterStore, PunchLedger};
