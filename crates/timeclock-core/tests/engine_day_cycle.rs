//! Integration test driving a full simulated workday through the
//! engine, the jitter generator, and the in-memory stores, the way the
//! outer poll loop does: evaluate, submit, append on confirmation,
//! re-evaluate.

use chrono::{NaiveDate, NaiveDateTime};
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;

use timeclock_core::storage::memory::{MemoryJitterStore, MemoryPunchLedger};
use timeclock_core::storage::PunchLedger;
use timeclock_core::{
    get_or_create_jitter, DailyJitter, Decision, DecisionEngine, PunchKind, PunchRecord,
    WorkdayPolicy,
};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    day().and_hms_opt(hour, minute, 0).unwrap()
}

/// One poll-loop tick against the in-memory ledger: evaluate and, when a
/// punch is requested, record it as a confirmed submission.
fn tick(
    engine: &DecisionEngine,
    ledger: &mut MemoryPunchLedger,
    now: NaiveDateTime,
    jitter: &DailyJitter,
) -> Decision {
    let punches = ledger.load_punches(day()).unwrap();
    let decision = engine.evaluate(now, &punches, jitter).unwrap();
    if let Decision::RequestPunch { kind } = decision {
        ledger
            .append_punch(day(), PunchRecord::new(now.time(), kind))
            .unwrap();
    }
    decision
}

#[test]
fn a_full_day_progresses_through_all_four_punches() {
    let engine = DecisionEngine::new(WorkdayPolicy::default());
    let jitter = DailyJitter::zero(day());
    let mut ledger = MemoryPunchLedger::default();

    // Too early.
    assert_eq!(tick(&engine, &mut ledger, at(7, 55), &jitter), Decision::NoAction);

    // Morning entry fires inside the window.
    assert_eq!(
        tick(&engine, &mut ledger, at(8, 2), &jitter),
        Decision::RequestPunch {
            kind: PunchKind::EntryMorning
        }
    );

    // Mid-morning stays quiet.
    assert_eq!(tick(&engine, &mut ledger, at(10, 0), &jitter), Decision::NoAction);

    // Lunch exit at the noon trigger.
    assert_eq!(
        tick(&engine, &mut ledger, at(12, 6), &jitter),
        Decision::RequestPunch {
            kind: PunchKind::ExitLunch
        }
    );

    // Lunch not over yet.
    assert_eq!(tick(&engine, &mut ledger, at(12, 40), &jitter), Decision::NoAction);

    // Lunch return after the configured hour.
    assert_eq!(
        tick(&engine, &mut ledger, at(13, 10), &jitter),
        Decision::RequestPunch {
            kind: PunchKind::ReturnLunch
        }
    );

    // Morning was 08:02-12:06 (4h04m), so 3h56m remain: checkout 17:06.
    assert_eq!(tick(&engine, &mut ledger, at(17, 5), &jitter), Decision::NoAction);
    assert_eq!(
        tick(&engine, &mut ledger, at(17, 6), &jitter),
        Decision::RequestPunch {
            kind: PunchKind::ExitEvening
        }
    );

    // Terminal: nothing more fires today.
    assert_eq!(tick(&engine, &mut ledger, at(18, 0), &jitter), Decision::NoAction);
    assert_eq!(tick(&engine, &mut ledger, at(23, 59), &jitter), Decision::NoAction);
    assert_eq!(ledger.load_punches(day()).unwrap().len(), 4);
}

#[test]
fn unconfirmed_submissions_leave_the_next_tick_unchanged() {
    let engine = DecisionEngine::new(WorkdayPolicy::default());
    let jitter = DailyJitter::zero(day());
    let ledger = MemoryPunchLedger::default();

    // The submission failed, so no record was appended; the engine
    // re-requests the same punch on the next tick.
    let punches = ledger.load_punches(day()).unwrap();
    let first = engine.evaluate(at(8, 30), &punches, &jitter).unwrap();
    let second = engine.evaluate(at(8, 35), &punches, &jitter).unwrap();
    assert_eq!(
        first,
        Decision::RequestPunch {
            kind: PunchKind::EntryMorning
        }
    );
    assert_eq!(second, first);
}

#[test]
fn jitter_is_stable_for_the_whole_day_and_fresh_the_next() {
    let policy = WorkdayPolicy::default();
    let mut rng = Mcg128Xsl64::seed_from_u64(99);
    let mut store = MemoryJitterStore::default();

    let morning = get_or_create_jitter(day(), &policy, &mut rng, &mut store).unwrap();
    // Every poll of the same day sees identical offsets.
    for _ in 0..5 {
        let again = get_or_create_jitter(day(), &policy, &mut rng, &mut store).unwrap();
        assert_eq!(again, morning);
    }
    assert_eq!(store.saves, 1);

    let next_day = day().succ_opt().unwrap();
    let fresh = get_or_create_jitter(next_day, &policy, &mut rng, &mut store).unwrap();
    assert_eq!(fresh.date, next_day);
    assert_eq!(store.saves, 2);
}

#[test]
fn jittered_triggers_still_drive_a_consistent_day() {
    let policy = WorkdayPolicy::default();
    let mut rng = Mcg128Xsl64::seed_from_u64(3);
    let mut store = MemoryJitterStore::default();
    let jitter = get_or_create_jitter(day(), &policy, &mut rng, &mut store).unwrap();

    let engine = DecisionEngine::new(policy.clone());
    let mut ledger = MemoryPunchLedger::default();

    // Whatever the drawn entry offset is, the trigger lands inside the
    // window bound plus the maximum jitter.
    let mut fired = None;
    for minute in 0..=policy.jitter_bounds.entry_morning as u32 {
        let decision = tick(&engine, &mut ledger, at(8, minute), &jitter);
        if decision.is_request() {
            fired = Some(minute);
            break;
        }
    }
    let fired = fired.expect("entry fired within the jitter bound");
    assert_eq!(fired as i64, jitter.offset(PunchKind::EntryMorning));
}
