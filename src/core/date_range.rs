use std::fmt::{Display, Formatter};

use chrono::{DateTime, Days, MappedLocalTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::core::{PricingServiceError, interval::Interval};

/// Calendar date range, both ends inclusive.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PricingServiceError> {
        if start > end {
            return Err(PricingServiceError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Resolve the optional bounds against the defaults.
    ///
    /// The end defaults to `today`, and the start defaults to the end minus `days_back` days.
    /// `days_back` is only used when the start is omitted.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        days_back: u32,
        today: NaiveDate,
    ) -> Result<Self, PricingServiceError> {
        let end = end.unwrap_or(today);
        let start = match start {
            Some(start) => start,
            None => end
                .checked_sub_days(Days::new(u64::from(days_back)))
                .unwrap_or(NaiveDate::MIN),
        };
        Self::new(start, end)
    }

    /// Zone-local interval from the start date's midnight till the midnight after the end date.
    pub fn localize(self, timezone: Tz) -> Result<Interval, PricingServiceError> {
        let start = local_midnight(self.start, timezone)?;
        let next_day = self.end.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
        let end = local_midnight(next_day, timezone)?;
        Ok(Interval::new(start, end))
    }
}

fn local_midnight(date: NaiveDate, timezone: Tz) -> Result<DateTime<Tz>, PricingServiceError> {
    match timezone.from_local_datetime(&date.and_time(NaiveTime::MIN)) {
        MappedLocalTime::Single(time) | MappedLocalTime::Ambiguous(time, _) => Ok(time),
        MappedLocalTime::None => Err(PricingServiceError::NonexistentLocalTime { date, timezone }),
    }
}

/// Parse a calendar date in the `YYYY-MM-DD` format.
pub fn parse_date(text: &str) -> Result<NaiveDate, PricingServiceError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| PricingServiceError::InvalidDate(text.to_owned()))
}

#[cfg(test)]
mod tests {
    use chrono_tz::{America, Europe};

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn resolve_defaults_ok() {
        let range = DateRange::resolve(None, None, 7, date(2024, 3, 10)).unwrap();
        assert_eq!(range, DateRange { start: date(2024, 3, 3), end: date(2024, 3, 10) });
    }

    #[test]
    fn resolve_days_back_from_end_ok() {
        let range = DateRange::resolve(None, Some(date(2024, 1, 2)), 3, date(2024, 6, 1)).unwrap();
        assert_eq!(range, DateRange { start: date(2023, 12, 30), end: date(2024, 1, 2) });
    }

    #[test]
    fn resolve_explicit_start_ignores_days_back_ok() {
        let today = date(2024, 6, 1);
        let range =
            DateRange::resolve(Some(date(2024, 1, 1)), Some(date(2024, 1, 5)), 365, today).unwrap();
        assert_eq!(range, DateRange { start: date(2024, 1, 1), end: date(2024, 1, 5) });
    }

    #[test]
    fn resolve_inverted_err() {
        let today = date(2024, 6, 1);
        let result = DateRange::resolve(Some(date(2024, 1, 5)), Some(date(2024, 1, 1)), 7, today);
        assert!(matches!(result, Err(PricingServiceError::InvertedRange { .. })));
    }

    #[test]
    fn localize_ok() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 1)).unwrap();
        let interval = range.localize(Europe::Stockholm).unwrap();
        assert_eq!(interval.start.to_rfc3339(), "2024-01-01T00:00:00+01:00");
        assert_eq!(interval.end.to_rfc3339(), "2024-01-02T00:00:00+01:00");
    }

    #[test]
    fn localize_across_dst_ok() {
        let range = DateRange::new(date(2024, 3, 31), date(2024, 3, 31)).unwrap();
        let interval = range.localize(Europe::Stockholm).unwrap();
        assert_eq!((interval.end - interval.start).num_hours(), 23);
    }

    #[test]
    fn localize_nonexistent_midnight_err() {
        // Santiago springs forward at midnight:
        let range = DateRange::new(date(2024, 9, 8), date(2024, 9, 8)).unwrap();
        let result = range.localize(America::Santiago);
        assert!(matches!(result, Err(PricingServiceError::NonexistentLocalTime { .. })));
    }

    #[test]
    fn parse_date_ok() {
        assert_eq!(parse_date("2024-01-31").unwrap(), date(2024, 1, 31));
        assert!(matches!(parse_date("31.01.2024"), Err(PricingServiceError::InvalidDate(_))));
    }
}
