//! Anchor date and the calendar arithmetic every component step funnels
//! through.
//!
//! The anchor is stored as one `NaiveDateTime`, and every field is derived
//! from it, so the year/month/day/clock/weekday readings are always a real
//! calendar moment. Durations (seconds through weeks) go through
//! [`AnchorDate::apply_delta`]; months and years are not fixed-length and go
//! through [`AnchorDate::shift_months`] / [`AnchorDate::shift_years`].

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::{Error, Result};

/// A signed duration split by unit. Weeks are seven days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delta {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub weeks: i64,
    pub seconds: i64,
}

impl Delta {
    pub fn days(days: i64) -> Self {
        Self { days, ..Self::default() }
    }

    pub fn hours(hours: i64) -> Self {
        Self { hours, ..Self::default() }
    }

    pub fn minutes(minutes: i64) -> Self {
        Self { minutes, ..Self::default() }
    }

    pub fn weeks(weeks: i64) -> Self {
        Self { weeks, ..Self::default() }
    }

    pub fn seconds(seconds: i64) -> Self {
        Self { seconds, ..Self::default() }
    }

    /// Combine all units into a single duration, `None` on overflow.
    fn to_time_delta(self) -> Option<TimeDelta> {
        TimeDelta::try_weeks(self.weeks)?
            .checked_add(&TimeDelta::try_days(self.days)?)?
            .checked_add(&TimeDelta::try_hours(self.hours)?)?
            .checked_add(&TimeDelta::try_minutes(self.minutes)?)?
            .checked_add(&TimeDelta::try_seconds(self.seconds)?)
    }
}

/// Mutable calendar state that relative phrases are resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorDate {
    at: NaiveDateTime,
}

impl AnchorDate {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }

    /// Today's local date with the clock at 00:00:00.
    ///
    /// Used when the caller supplies no anchor: only the calendar day is taken
    /// from the wall clock.
    pub fn midnight_today() -> Self {
        Self { at: Local::now().date_naive().and_time(NaiveTime::MIN) }
    }

    /// Parse an anchor timestamp with a chrono format string.
    ///
    /// # Errors
    /// Returns [`Error::InvalidAnchor`] if `value` does not match `format`.
    pub fn parse(value: &str, format: &str) -> Result<Self> {
        NaiveDateTime::parse_from_str(value.trim(), format)
            .map(Self::new)
            .map_err(|e| Error::InvalidAnchor(format!("'{value}' does not match '{format}': {e}")))
    }

    pub fn year(&self) -> i32 {
        self.at.year()
    }

    pub fn month(&self) -> u32 {
        self.at.month()
    }

    pub fn day(&self) -> u32 {
        self.at.day()
    }

    pub fn hour(&self) -> u32 {
        self.at.hour()
    }

    pub fn minute(&self) -> u32 {
        self.at.minute()
    }

    pub fn second(&self) -> u32 {
        self.at.second()
    }

    /// ISO weekday, 1 = Monday .. 7 = Sunday.
    pub fn weekday(&self) -> u32 {
        self.at.weekday().number_from_monday()
    }

    pub fn to_datetime(self) -> NaiveDateTime {
        self.at
    }

    /// Add a signed duration and re-derive every field from the result.
    ///
    /// An out-of-range result leaves the anchor unchanged.
    pub fn apply_delta(&mut self, delta: Delta) {
        match delta.to_time_delta().and_then(|d| self.at.checked_add_signed(d)) {
            Some(at) => self.at = at,
            None => tracing::warn!(?delta, anchor = %self.at, "relative delta overflows the calendar; ignored"),
        }
    }

    /// Move by whole months, carrying into the year in both directions.
    ///
    /// The day is clamped to the length of the target month (Jan 31 + 1 month
    /// is Feb 28/29). The clock is preserved.
    pub fn shift_months(&mut self, months: i64) {
        let zero_based = i64::from(self.month()) - 1 + months;
        let year = i64::from(self.year()) + zero_based.div_euclid(12);
        let month = zero_based.rem_euclid(12) + 1;
        self.set_year_month(year, month);
    }

    /// Move by whole years; Feb 29 clamps to Feb 28 in a common year.
    pub fn shift_years(&mut self, years: i64) {
        let year = i64::from(self.year()) + years;
        self.set_year_month(year, i64::from(self.month()));
    }

    fn set_year_month(&mut self, year: i64, month: i64) {
        let target = i32::try_from(year).ok().zip(u32::try_from(month).ok()).and_then(|(year, month)| {
            let day = self.day().min(days_in_month(year, month)?);
            NaiveDate::from_ymd_opt(year, month, day)
        });

        match target {
            Some(date) => self.at = NaiveDateTime::new(date, self.at.time()),
            None => tracing::warn!(year, month, anchor = %self.at, "calendar shift out of range; ignored"),
        }
    }
}

impl From<NaiveDateTime> for AnchorDate {
    fn from(at: NaiveDateTime) -> Self {
        Self::new(at)
    }
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 { (year.checked_add(1)?, 1) } else { (year, month + 1) };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    first_next.pred_opt().map(|last| last.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> AnchorDate {
        AnchorDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, mi, s).unwrap())
    }

    #[test]
    fn fields_and_weekday_are_derived() {
        let a = at(2019, 10, 31, 13, 21, 0);
        assert_eq!((a.year(), a.month(), a.day()), (2019, 10, 31));
        assert_eq!((a.hour(), a.minute(), a.second()), (13, 21, 0));
        assert_eq!(a.weekday(), 4);
    }

    #[test]
    fn apply_delta_crosses_year_boundary() {
        let mut a = at(2019, 12, 10, 8, 0, 0);
        a.apply_delta(Delta::days(40));
        assert_eq!(a, at(2020, 1, 19, 8, 0, 0));
        assert_eq!(a.weekday(), 7);
    }

    #[test]
    fn apply_delta_combines_units() {
        let mut a = at(2020, 2, 28, 23, 59, 30);
        a.apply_delta(Delta { days: 1, hours: 1, minutes: 1, weeks: 1, seconds: 30 });
        assert_eq!(a, at(2020, 3, 8, 1, 1, 0));
    }

    #[test]
    fn apply_delta_overflow_leaves_anchor() {
        let mut a = at(2019, 10, 31, 0, 0, 0);
        a.apply_delta(Delta::weeks(i64::MAX));
        assert_eq!(a, at(2019, 10, 31, 0, 0, 0));
    }

    #[test]
    fn december_plus_one_month_rolls_year() {
        let mut a = at(2019, 12, 5, 10, 0, 0);
        a.shift_months(1);
        assert_eq!(a, at(2020, 1, 5, 10, 0, 0));
    }

    #[test]
    fn january_minus_one_month_rolls_back() {
        let mut a = at(2019, 1, 5, 10, 0, 0);
        a.shift_months(-1);
        assert_eq!(a, at(2018, 12, 5, 10, 0, 0));
    }

    #[test]
    fn month_shift_carries_whole_years() {
        let mut a = at(2019, 11, 5, 0, 0, 0);
        a.shift_months(13);
        assert_eq!(a, at(2020, 12, 5, 0, 0, 0));

        let mut a = at(2019, 2, 5, 0, 0, 0);
        a.shift_months(-14);
        assert_eq!(a, at(2017, 12, 5, 0, 0, 0));
    }

    #[test]
    fn month_shift_clamps_day() {
        let mut a = at(2024, 1, 31, 8, 0, 0);
        a.shift_months(1);
        assert_eq!(a, at(2024, 2, 29, 8, 0, 0));
    }

    #[test]
    fn leap_day_year_shift_clamps() {
        let mut a = at(2024, 2, 29, 0, 0, 0);
        a.shift_years(-1);
        assert_eq!(a, at(2023, 2, 28, 0, 0, 0));
    }

    #[test]
    fn parse_accepts_unpadded_fields() {
        let a = AnchorDate::parse("2019-1-5 03:04:05", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(a, at(2019, 1, 5, 3, 4, 5));
    }

    #[test]
    fn parse_rejects_malformed_anchor() {
        let err = AnchorDate::parse("yesterday", "%Y-%m-%d %H:%M:%S").unwrap_err();
        assert!(matches!(err, Error::InvalidAnchor(_)));
    }

    #[test]
    fn midnight_today_zeroes_clock() {
        let before = Local::now().date_naive();
        let a = AnchorDate::midnight_today();
        let after = Local::now().date_naive();

        assert_eq!((a.hour(), a.minute(), a.second()), (0, 0, 0));
        let date = a.to_datetime().date();
        assert!(date == before || date == after);
    }
}
