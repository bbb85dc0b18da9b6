use anyhow::Context;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use std::fmt;

// The prompt talks about "the past 3 days" of share prices.
pub const DEFAULT_TRADING_DAYS: u32 = 3;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_param(), self.end_param())
    }
}

/// Explicit dates win. Otherwise the range ends on the last weekday before today (UTC) and
/// spans `trading_days` weekdays.
pub fn resolve_date_range(
    start_arg: Option<&str>,
    end_arg: Option<&str>,
    now_utc: DateTime<Utc>,
    trading_days: u32,
) -> anyhow::Result<DateRange> {
    anyhow::ensure!(trading_days >= 1, "trading_days must be >= 1");

    let end = match end_arg {
        Some(s) => parse_date(s)?,
        None => previous_weekday(now_utc.date_naive()),
    };

    let start = match start_arg {
        Some(s) => parse_date(s)?,
        None => {
            let mut date = end;
            for _ in 1..trading_days {
                date = previous_weekday(date);
            }
            date
        }
    };

    anyhow::ensure!(
        start <= end,
        "start date {start} must not be after end date {end}"
    );

    Ok(DateRange { start, end })
}

fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .with_context(|| format!("invalid date {s:?}, expected YYYY-MM-DD"))
}

fn previous_weekday(date: NaiveDate) -> NaiveDate {
    let mut date = date - Duration::days(1);
    while is_weekend(date) {
        date = date - Duration::days(1);
    }
    date
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun)
}
