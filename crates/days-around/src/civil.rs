//! Civil-day primitives: timezone parsing, calendar-day shifts, and the first
//! instant of a local date.
//!
//! A civil day runs from local midnight to local midnight, so its length in
//! absolute time is 23, 24, or 25 hours depending on DST. Everything here
//! works on calendar dates and resolves to instants only at the end.

use crate::error::{LayoutError, Result};
use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// Granularity used to find the end of a spring-forward gap that swallows
/// midnight. Every transition in the tz database lands on a quarter hour.
const GAP_PROBE_MINUTES: i64 = 15;

/// Probe at most one day past midnight.
const GAP_PROBE_STEPS: i64 = 24 * 60 / GAP_PROBE_MINUTES;

/// Consecutive dates a zone may skip entirely. The tz database never skips
/// more than one (dateline moves such as Samoa 2011 and Kwajalein 1993).
const MAX_SKIPPED_DAYS: usize = 2;

/// Parse an IANA timezone identifier (e.g. "Europe/Madrid").
///
/// # Errors
/// Returns `LayoutError::InvalidTimezone` if the name is not in the tz database.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| LayoutError::InvalidTimezone(name.to_string()))
}

/// Move `date` by `offset` calendar days (negative moves backwards).
///
/// # Errors
/// Returns `LayoutError::OutOfRange` if the result is not representable.
pub fn shift_days(date: NaiveDate, offset: i64) -> Result<NaiveDate> {
    let days = Days::new(offset.unsigned_abs());
    let shifted = if offset >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    };
    shifted.ok_or_else(|| {
        LayoutError::OutOfRange(format!("{} shifted by {} days", date, offset))
    })
}

/// The first instant of the civil date `date` in `tz`.
///
/// - Unique local midnight: that instant.
/// - Ambiguous midnight (clocks fall back across 00:00): the earlier instant.
/// - Nonexistent midnight (clocks spring forward across 00:00): the first
///   valid wall-clock time after the gap, still on `date`.
/// - Skipped date (the zone jumped over the whole day, e.g. Pacific/Apia on
///   2011-12-30): the first instant after it, which is the start of the next
///   date that exists. Such a date shares its instant with that next date.
///
/// # Errors
/// Returns `LayoutError::OutOfRange` if resolving would leave chrono's date
/// range.
pub fn civil_midnight<T: TimeZone>(date: NaiveDate, tz: &T) -> Result<DateTime<T>> {
    let mut candidate = date;

    for _ in 0..=MAX_SKIPPED_DAYS {
        if let Some(instant) = first_instant_on(candidate, tz) {
            return Ok(instant);
        }
        candidate = shift_days(candidate, 1)?;
    }

    Err(LayoutError::OutOfRange(format!(
        "no local time on or after {} is representable",
        date
    )))
}

/// Earliest wall-clock time on `date` that maps to an instant in `tz`.
fn first_instant_on<T: TimeZone>(date: NaiveDate, tz: &T) -> Option<DateTime<T>> {
    let midnight = date.and_time(NaiveTime::MIN);

    for step in 0..GAP_PROBE_STEPS {
        let probe = Duration::minutes(step * GAP_PROBE_MINUTES);
        let wall = midnight.checked_add_signed(probe)?;
        if wall.date() != date {
            return None;
        }
        if let Some(instant) = tz.from_local_datetime(&wall).earliest() {
            return Some(instant);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn shift_days_crosses_year_boundary() {
        assert_eq!(shift_days(ymd(2000, 12, 31), 1).unwrap(), ymd(2001, 1, 1));
        assert_eq!(shift_days(ymd(2001, 1, 1), -1).unwrap(), ymd(2000, 12, 31));
        assert_eq!(shift_days(ymd(2024, 2, 28), 1).unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn shift_days_overflow_is_an_error() {
        let err = shift_days(NaiveDate::MAX, 1).unwrap_err();
        assert!(matches!(err, LayoutError::OutOfRange(_)));

        let err = shift_days(NaiveDate::MIN, -1).unwrap_err();
        assert!(matches!(err, LayoutError::OutOfRange(_)));
    }

    #[test]
    fn utc_midnight_is_exact() {
        let m = civil_midnight(ymd(2026, 3, 1), &Utc).unwrap();
        assert_eq!(m, Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(m.nanosecond(), 0);
    }

    #[test]
    fn midnight_of_last_representable_date() {
        let m = civil_midnight(NaiveDate::MAX, &Utc).unwrap();
        assert_eq!(m.date_naive(), NaiveDate::MAX);
    }

    #[test]
    fn unknown_timezone_rejected() {
        let err = parse_timezone("Mars/Olympus_Mons").unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidTimezone("Mars/Olympus_Mons".to_string())
        );
    }
}
