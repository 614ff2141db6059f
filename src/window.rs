use std::collections::HashMap;

use chrono::{Duration, Months, NaiveDate, Weekday};
use clap::ValueEnum;
use serde::Serialize;

use crate::models::WeeklyCount;

/// First day of the congressional session this deployment tracks; the
/// lower bound for the all-time range.
pub const SESSION_START: NaiveDate = match NaiveDate::from_ymd_opt(2025, 1, 3) {
    Some(d) => d,
    None => panic!("invalid session start date"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeRange {
    #[value(name = "30d")]
    Last30Days,
    #[value(name = "90d")]
    Last90Days,
    #[value(name = "6m")]
    Last6Months,
    #[value(name = "1y")]
    LastYear,
    #[value(name = "all")]
    AllTime,
}

/// Closed [from, to] interval of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Window {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Resolves a symbolic range against an injected evaluation date. Callers
/// pass `Utc::now().date_naive()`; tests pass a fixed date. Recomputed per
/// call, never cached.
pub fn resolve(range: TimeRange, today: NaiveDate) -> Window {
    let from = match range {
        TimeRange::Last30Days => today - Duration::days(30),
        TimeRange::Last90Days => today - Duration::days(90),
        TimeRange::Last6Months => today
            .checked_sub_months(Months::new(6))
            .unwrap_or(SESSION_START),
        TimeRange::LastYear => today
            .checked_sub_months(Months::new(12))
            .unwrap_or(SESSION_START),
        TimeRange::AllTime => SESSION_START,
    };
    Window { from, to: today }
}

/// Sunday-aligned start of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Sun).first_day()
}

/// Groups dated events into week buckets and returns counts sorted
/// ascending by week start. Weeks with zero events carry no entry, so the
/// series is sparse; renderers interpolate if they need a dense one.
pub fn bin_weekly(dates: &[NaiveDate]) -> Vec<WeeklyCount> {
    let mut buckets: HashMap<NaiveDate, u32> = HashMap::new();
    for date in dates {
        *buckets.entry(week_start(*date)).or_insert(0) += 1;
    }

    let mut trend: Vec<WeeklyCount> = buckets
        .into_iter()
        .map(|(week_start, count)| WeeklyCount { week_start, count })
        .collect();
    trend.sort_by_key(|w| w.week_start);
    trend
}
