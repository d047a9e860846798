//! Punch scheduling decision engine.
//!
//! The engine is stateless across ticks: every evaluation re-derives the
//! day state from the punch history it is handed and returns either
//! `NoAction` or the single punch kind that is due right now. It
//! performs no I/O and never suspends; the outer loop owns the ledger,
//! the jitter store, and the site interaction.
//!
//! Re-evaluating with unchanged inputs yields the same decision, so
//! at-most-once submission per kind per day rests on the caller only
//! appending a record after a confirmed submission.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::checkout::{compute_target_checkout, CheckoutPlan};
use crate::error::EngineError;
use crate::jitter::DailyJitter;
use crate::policy::WorkdayPolicy;
use crate::punch::{PunchKind, PunchRecord};

/// Hour at which a missing lunch exit becomes overdue and fires
/// immediately, bypassing the jitter wait.
const LUNCH_EXIT_CATCHUP_HOUR: u32 = 13;
/// Hour at which a missing lunch return fires regardless of how little
/// lunch time has elapsed.
const LUNCH_RETURN_CATCHUP_HOUR: u32 = 18;

/// Outcome of one evaluation tick. Never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Decision {
    NoAction,
    RequestPunch { kind: PunchKind },
}

impl Decision {
    pub fn is_request(&self) -> bool {
        matches!(self, Decision::RequestPunch { .. })
    }
}

fn request(kind: PunchKind) -> Decision {
    Decision::RequestPunch { kind }
}

/// The decision state machine. Holds only the immutable policy; all
/// per-day state arrives as arguments on each call.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    policy: WorkdayPolicy,
}

impl DecisionEngine {
    pub fn new(policy: WorkdayPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &WorkdayPolicy {
        &self.policy
    }

    /// Decide whether a punch is due at `now` given today's history.
    ///
    /// # Errors
    ///
    /// Returns an error when the history cannot be trusted (count/kind
    /// mismatch, non-increasing times). The caller must treat the tick
    /// as a no-op and surface the error rather than guessing.
    pub fn evaluate(
        &self,
        now: NaiveDateTime,
        punches: &[PunchRecord],
        jitter: &DailyJitter,
    ) -> Result<Decision, EngineError> {
        validate_history(punches)?;
        let t = now.time();

        match punches {
            [] => Ok(self.entry_decision(t, jitter)),
            [_] => Ok(self.lunch_exit_decision(t, jitter)),
            [_, lunch_exit] => Ok(self.lunch_return_decision(t, lunch_exit.time, jitter)),
            [entry, lunch_exit, lunch_return] => {
                let plan = compute_target_checkout(
                    entry.time,
                    lunch_exit.time,
                    lunch_return.time,
                    &self.policy,
                    jitter,
                )?;
                // A target past midnight is a next-day clock time; the
                // exit stays pending for the rest of today rather than
                // comparing against the wrapped value.
                if !plan.past_midnight && t >= plan.target {
                    Ok(request(PunchKind::ExitEvening))
                } else {
                    Ok(Decision::NoAction)
                }
            }
            // Four punches: the day is complete.
            _ => Ok(Decision::NoAction),
        }
    }

    fn entry_decision(&self, t: NaiveTime, jitter: &DailyJitter) -> Decision {
        if t < self.policy.entry_window_start || t >= self.policy.entry_window_end {
            // Outside the entry window nothing fires, even late in the
            // day with zero punches: a missed morning has no catch-up.
            return Decision::NoAction;
        }
        let trigger = offset_by_minutes(
            self.policy.entry_trigger,
            jitter.offset(PunchKind::EntryMorning),
        );
        if t >= trigger {
            request(PunchKind::EntryMorning)
        } else {
            Decision::NoAction
        }
    }

    fn lunch_exit_decision(&self, t: NaiveTime, jitter: &DailyJitter) -> Decision {
        let hour = t.hour();
        if hour >= LUNCH_EXIT_CATCHUP_HOUR {
            return request(PunchKind::ExitLunch);
        }
        if hour == 12 {
            let trigger = offset_by_minutes(
                self.policy.lunch_exit_trigger,
                jitter.offset(PunchKind::ExitLunch),
            );
            if t >= trigger {
                return request(PunchKind::ExitLunch);
            }
        }
        Decision::NoAction
    }

    fn lunch_return_decision(
        &self,
        t: NaiveTime,
        lunch_exit: NaiveTime,
        jitter: &DailyJitter,
    ) -> Decision {
        if t.hour() >= LUNCH_RETURN_CATCHUP_HOUR {
            return request(PunchKind::ReturnLunch);
        }
        let elapsed_min = t.signed_duration_since(lunch_exit).num_minutes();
        let required_min =
            self.policy.lunch_duration_minutes + jitter.offset(PunchKind::ReturnLunch);
        if elapsed_min >= required_min {
            request(PunchKind::ReturnLunch)
        } else {
            Decision::NoAction
        }
    }

    /// Snapshot of one evaluation, including the predictions the
    /// dry-run surface reports. A rejected history is folded into
    /// `NoAction` with the error message attached.
    pub fn report(
        &self,
        now: NaiveDateTime,
        punches: &[PunchRecord],
        jitter: &DailyJitter,
    ) -> EvaluationReport {
        let (decision, error) = match self.evaluate(now, punches, jitter) {
            Ok(decision) => (decision, None),
            Err(e) => (Decision::NoAction, Some(e.to_string())),
        };

        let expected_lunch_return = match punches {
            [_, lunch_exit] => Some(offset_by_minutes(
                lunch_exit.time,
                self.policy.lunch_duration_minutes + jitter.offset(PunchKind::ReturnLunch),
            )),
            _ => None,
        };
        let checkout = match punches {
            [entry, lunch_exit, lunch_return] => compute_target_checkout(
                entry.time,
                lunch_exit.time,
                lunch_return.time,
                &self.policy,
                jitter,
            )
            .ok(),
            _ => None,
        };

        EvaluationReport {
            now,
            punch_count: punches.len(),
            punches: punches.to_vec(),
            decision,
            error,
            expected_lunch_return,
            checkout,
        }
    }
}

/// One evaluation spelled out for operators: the decision plus the
/// predicted lunch return and planned departure where they apply.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub now: NaiveDateTime,
    pub punch_count: usize,
    pub punches: Vec<PunchRecord>,
    pub decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Earliest lunch return, present with exactly two punches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_lunch_return: Option<NaiveTime>,
    /// Planned departure, present with exactly three punches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout: Option<CheckoutPlan>,
}

fn validate_history(punches: &[PunchRecord]) -> Result<(), EngineError> {
    if punches.len() > 4 {
        return Err(EngineError::StateInconsistency(format!(
            "{} punches recorded, expected at most 4",
            punches.len()
        )));
    }
    for (index, punch) in punches.iter().enumerate() {
        if let Some(expected) = PunchKind::from_position(index) {
            if punch.kind != expected {
                return Err(EngineError::StateInconsistency(format!(
                    "punch {} is {}, expected {}",
                    index + 1,
                    punch.kind,
                    expected
                )));
            }
        }
        if index > 0 && punches[index - 1].time >= punch.time {
            return Err(EngineError::Ordering {
                earlier: punches[index - 1].time,
                later: punch.time,
            });
        }
    }
    Ok(())
}

fn offset_by_minutes(t: NaiveTime, minutes: i64) -> NaiveTime {
    t.overflowing_add_signed(Duration::minutes(minutes)).0
}
