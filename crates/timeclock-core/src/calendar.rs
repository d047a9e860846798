//! Business-day gate.
//!
//! Weekends and fixed holidays are excluded here, before the engine is
//! ever invoked; the engine itself knows nothing about the calendar.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

/// Fixed holiday list carried over from the deployed rota (2025 plus
/// the 2026 new year).
pub fn default_holidays() -> Vec<NaiveDate> {
    const DATES: [(i32, u32, u32); 16] = [
        (2025, 1, 1),
        (2025, 3, 3),
        (2025, 3, 4),
        (2025, 3, 5),
        (2025, 4, 17),
        (2025, 4, 18),
        (2025, 4, 21),
        (2025, 5, 1),
        (2025, 6, 19),
        (2025, 6, 20),
        (2025, 9, 7),
        (2025, 10, 12),
        (2025, 11, 2),
        (2025, 11, 15),
        (2025, 12, 25),
        (2026, 1, 1),
    ];
    DATES
        .iter()
        .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
        .collect()
}

#[derive(Debug, Clone)]
pub struct CalendarGate {
    holidays: BTreeSet<NaiveDate>,
}

impl CalendarGate {
    pub fn new(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn with_default_holidays() -> Self {
        Self::new(default_holidays())
    }

    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.contains(&date)
    }
}
