//! Period keys for grouping monetary events.
//!
//! Keys sort lexicographically in chronological order within a granularity.
//! All keys are computed in UTC.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use hielitos_core::PeriodGranularity;

const DAY_MS: i64 = 86_400_000;
const WEEK_MS: i64 = 7 * DAY_MS;

/// Key of the period containing `timestamp`.
///
/// - day: `YYYY-MM-DD`
/// - week: `YYYY-Www`
/// - month: `YYYY-MM`
/// - year: `YYYY`
#[must_use]
pub fn period_key(timestamp: DateTime<Utc>, granularity: PeriodGranularity) -> String {
    match granularity {
        PeriodGranularity::Day => timestamp.format("%Y-%m-%d").to_string(),
        PeriodGranularity::Week => {
            format!("{}-W{:02}", timestamp.year(), week_number(timestamp))
        }
        PeriodGranularity::Month => timestamp.format("%Y-%m").to_string(),
        PeriodGranularity::Year => timestamp.year().to_string(),
    }
}

/// Week of the year, counting Sunday-started weeks from January 1st.
///
/// `ceil((elapsed_days + jan1_weekday + 1) / 7)` where `elapsed_days` is
/// fractional (the time of day counts) and weekdays count from Sunday = 0.
/// This is not the ISO-8601 week.
#[must_use]
pub fn week_number(timestamp: DateTime<Utc>) -> i64 {
    let Some(jan1) = NaiveDate::from_ymd_opt(timestamp.year(), 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|start| start.and_utc())
    else {
        return 1;
    };
    let elapsed_ms = (timestamp - jan1).num_milliseconds();
    let offset_ms = (i64::from(jan1.weekday().num_days_from_sunday()) + 1) * DAY_MS;
    (elapsed_ms + offset_ms + WEEK_MS - 1) / WEEK_MS
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_day_month_year_keys() {
        let ts = at(2024, 3, 5, 10);
        assert_eq!(period_key(ts, PeriodGranularity::Day), "2024-03-05");
        assert_eq!(period_key(ts, PeriodGranularity::Month), "2024-03");
        assert_eq!(period_key(ts, PeriodGranularity::Year), "2024");
    }

    #[test]
    fn test_week_keys() {
        // 2024-01-01 is a Monday (weekday 1): offset 2 days
        assert_eq!(period_key(at(2024, 1, 1, 0), PeriodGranularity::Week), "2024-W01");
        // 5 elapsed days + 2 = exactly 7 at midnight
        assert_eq!(week_number(at(2024, 1, 6, 0)), 1);
        // any time later that day tips into the next week
        assert_eq!(week_number(at(2024, 1, 6, 1)), 2);
        assert_eq!(period_key(at(2024, 3, 5, 10), PeriodGranularity::Week), "2024-W10");
    }

    #[test]
    fn test_week_starting_on_saturday() {
        // 2022-01-01 is a Saturday (weekday 6): offset 7 days
        assert_eq!(week_number(at(2022, 1, 1, 0)), 1);
        assert_eq!(week_number(at(2022, 1, 1, 12)), 2);
    }

    #[test]
    fn test_keys_sort_chronologically() {
        let early = period_key(at(2024, 2, 27, 0), PeriodGranularity::Week);
        let late = period_key(at(2024, 3, 5, 0), PeriodGranularity::Week);
        assert!(early < late);
    }
}
