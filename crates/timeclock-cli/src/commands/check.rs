//! `check`: report the decision for given inputs without acting.

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Args;
use serde::Serialize;

use timeclock_core::punch::{parse_clock, records_from_clock_strings};
use timeclock_core::storage::{AppConfig, FileJitterStore, FilePunchLedger, PunchLedger};
use timeclock_core::{
    get_or_create_jitter, CalendarGate, DailyJitter, DecisionEngine, EvaluationReport,
};

#[derive(Args)]
pub struct CheckArgs {
    /// Date to evaluate (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Clock time to evaluate, HH:MM or HH:MM:SS (defaults to now)
    #[arg(long)]
    pub now: Option<String>,
    /// Comma-separated punch times in site order, e.g. 08:00,12:05
    #[arg(long, value_delimiter = ',')]
    pub punches: Option<Vec<String>>,
}

#[derive(Serialize)]
struct CheckReport {
    date: NaiveDate,
    business_day: bool,
    evaluation: EvaluationReport,
}

pub fn run(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    let frozen = args.date.is_some() || args.now.is_some() || args.punches.is_some();
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let time = match &args.now {
        Some(raw) => parse_clock(raw)?,
        None => Local::now().time(),
    };
    let now = NaiveDateTime::new(date, time);

    let punches = match &args.punches {
        Some(raw) => records_from_clock_strings(raw)?,
        None => FilePunchLedger::open_default()?.load_punches(date)?,
    };

    // Frozen inputs evaluate with zero jitter so the report is
    // reproducible and leaves the jitter store untouched.
    let jitter = if frozen {
        DailyJitter::zero(date)
    } else {
        let mut store = FileJitterStore::open_default()?;
        get_or_create_jitter(date, &config.policy, &mut rand::thread_rng(), &mut store)?
    };

    let gate = CalendarGate::new(config.holidays.iter().copied());
    let engine = DecisionEngine::new(config.policy.clone());
    let report = CheckReport {
        date,
        business_day: gate.is_business_day(date),
        evaluation: engine.report(now, &punches, &jitter),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
