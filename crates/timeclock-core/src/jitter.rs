//! Per-day randomized trigger offsets.
//!
//! One offset per punch kind is drawn once per calendar day and reused
//! by every evaluation on that day, so decisions cannot flip-flop
//! between polls because a new random value was drawn. A new date fully
//! replaces the mapping; there is no partial carry-over.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::policy::WorkdayPolicy;
use crate::punch::PunchKind;
use crate::storage::JitterStore;

/// The stable per-day offsets, in minutes, added to decision boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyJitter {
    pub date: NaiveDate,
    pub offsets: BTreeMap<PunchKind, i64>,
}

impl DailyJitter {
    /// Zero offsets for every kind; used for dry runs and tests.
    pub fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            offsets: PunchKind::ALL.iter().map(|&kind| (kind, 0)).collect(),
        }
    }

    /// Offset for `kind`, defaulting to zero for absent entries.
    pub fn offset(&self, kind: PunchKind) -> i64 {
        self.offsets.get(&kind).copied().unwrap_or(0)
    }
}

/// Return the stored jitter if it already belongs to `date`, otherwise
/// draw a fresh mapping within the policy bounds and persist it.
///
/// Calling this twice on the same date returns identical offsets and
/// writes to the store only on the day transition.
pub fn get_or_create_jitter<R, S>(
    date: NaiveDate,
    policy: &WorkdayPolicy,
    rng: &mut R,
    store: &mut S,
) -> Result<DailyJitter, StorageError>
where
    R: Rng,
    S: JitterStore + ?Sized,
{
    if let Some(existing) = store.load()? {
        if existing.date == date {
            return Ok(existing);
        }
    }

    let mut offsets = BTreeMap::new();
    for kind in PunchKind::ALL {
        let bound = policy.jitter_bounds.for_kind(kind).max(0);
        offsets.insert(kind, rng.gen_range(0..=bound));
    }
    let jitter = DailyJitter { date, offsets };
    store.save(&jitter)?;
    Ok(jitter)
}
