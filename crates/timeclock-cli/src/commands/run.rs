//! `once` and `watch`: the outer evaluation loop around the engine.

use std::thread;
use std::time::Duration;

use chrono::Local;
use log::{error, info, warn};

use timeclock_core::storage::{AppConfig, FileJitterStore, FilePunchLedger, PunchLedger};
use timeclock_core::{get_or_create_jitter, CalendarGate, Decision, DecisionEngine, PunchRecord};

use crate::submit::PunchSubmitter;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// One evaluation tick: gate, jitter, decide, submit, record on
/// confirmation. Every failure here is recoverable by the next tick.
fn tick(config: &AppConfig, submitter: &dyn PunchSubmitter) -> CliResult {
    let now = Local::now().naive_local();
    let today = now.date();

    let gate = CalendarGate::new(config.holidays.iter().copied());
    if !gate.is_business_day(today) {
        info!("{today} is not a business day, skipping");
        return Ok(());
    }

    let mut jitter_store = FileJitterStore::open_default()?;
    let mut ledger = FilePunchLedger::open_default()?;
    let jitter = get_or_create_jitter(
        today,
        &config.policy,
        &mut rand::thread_rng(),
        &mut jitter_store,
    )?;
    let punches = ledger.load_punches(today)?;

    let engine = DecisionEngine::new(config.policy.clone());
    match engine.evaluate(now, &punches, &jitter) {
        Ok(Decision::RequestPunch { kind }) => {
            info!("punch due: {kind}");
            if submitter.submit(kind)? {
                ledger.append_punch(today, PunchRecord::new(now.time(), kind))?;
                info!("{kind} confirmed and recorded at {}", now.format("%H:%M:%S"));
            } else {
                warn!("{kind} submission not confirmed, will retry next tick");
            }
        }
        Ok(Decision::NoAction) => {
            info!("no punch due ({} recorded today)", punches.len());
        }
        Err(e) => {
            warn!("punch history rejected, treating tick as no-op: {e}");
        }
    }
    Ok(())
}

pub fn once() -> CliResult {
    let config = AppConfig::load()?;
    let submitter = crate::submit::CommandSubmitter::from_config(&config.submit)?;
    tick(&config, &submitter)
}

pub fn watch() -> CliResult {
    let config = AppConfig::load()?;
    // A missing submit command is the one unrecoverable configuration
    // error; fail at startup instead of halfway through the day.
    let submitter = crate::submit::CommandSubmitter::from_config(&config.submit)?;

    let minutes = config.poll_interval_minutes.max(1);
    let interval = Duration::from_secs(minutes * 60);
    info!("watching: evaluating every {minutes} min");

    loop {
        if let Err(e) = tick(&config, &submitter) {
            error!("tick failed, retrying next interval: {e}");
        }
        thread::sleep(interval);
    }
}
