//! Checkout calculator: the departure time that completes the daily
//! hour quota.
//!
//! Lateness is compensated on the way out: however long the morning ran,
//! the evening target is `lunch_return + (quota - morning) + jitter`. A
//! morning that already covered the quota yields a target before the
//! lunch return, making the evening exit immediately due.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::jitter::DailyJitter;
use crate::policy::WorkdayPolicy;
use crate::punch::{hm, parse_clock, PunchKind};

/// Fixed departure used when the inputs cannot be trusted.
pub fn fallback_checkout() -> NaiveTime {
    hm(18, 0)
}

/// How the target was obtained. `Fallback` marks the fixed default used
/// for malformed or missing inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutBasis {
    Quota,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckoutPlan {
    pub target: NaiveTime,
    /// True when the target rolled past midnight; `target` is then a
    /// next-day clock time and the exit is not due today at all.
    pub past_midnight: bool,
    pub morning_hours: f64,
    /// May be negative when the morning already satisfied the quota.
    pub evening_hours_needed: f64,
    pub basis: CheckoutBasis,
}

/// Compute the target departure from typed punch times.
///
/// Precondition: `entry < lunch_exit < lunch_return`, all on the same
/// calendar day. A violation is an `Ordering` error, never a guess.
pub fn compute_target_checkout(
    entry: NaiveTime,
    lunch_exit: NaiveTime,
    lunch_return: NaiveTime,
    policy: &WorkdayPolicy,
    jitter: &DailyJitter,
) -> Result<CheckoutPlan, EngineError> {
    if entry >= lunch_exit {
        return Err(EngineError::Ordering {
            earlier: entry,
            later: lunch_exit,
        });
    }
    if lunch_exit >= lunch_return {
        return Err(EngineError::Ordering {
            earlier: lunch_exit,
            later: lunch_return,
        });
    }

    let morning_secs = lunch_exit.signed_duration_since(entry).num_seconds();
    let evening_secs = policy.daily_target_seconds() - morning_secs;
    let shift = Duration::seconds(evening_secs)
        + Duration::minutes(jitter.offset(PunchKind::ExitEvening));
    // With entry < lunch_exit < lunch_return the shift can never reach
    // back before today's midnight, so a nonzero overflow always means
    // the target falls on the next day.
    let (target, overflow_secs) = lunch_return.overflowing_add_signed(shift);

    Ok(CheckoutPlan {
        target,
        past_midnight: overflow_secs != 0,
        morning_hours: morning_secs as f64 / 3600.0,
        evening_hours_needed: evening_secs as f64 / 3600.0,
        basis: CheckoutBasis::Quota,
    })
}

/// Compute from the site's raw clock strings. Malformed, missing, or
/// mis-ordered input yields the tagged fixed fallback instead of an
/// error; reports can tell the two apart through `basis`.
pub fn plan_from_clock_strings(
    raw: &[String],
    policy: &WorkdayPolicy,
    jitter: &DailyJitter,
) -> CheckoutPlan {
    let parsed: Result<Vec<NaiveTime>, _> = raw.iter().take(3).map(|s| parse_clock(s)).collect();
    match parsed.as_deref() {
        Ok([entry, lunch_exit, lunch_return]) => {
            compute_target_checkout(*entry, *lunch_exit, *lunch_return, policy, jitter)
                .unwrap_or_else(|_| fallback_plan())
        }
        _ => fallback_plan(),
    }
}

fn fallback_plan() -> CheckoutPlan {
    CheckoutPlan {
        target: fallback_checkout(),
        past_midnight: false,
        morning_hours: 0.0,
        evening_hours_needed: 0.0,
        basis: CheckoutBasis::Fallback,
    }
}
