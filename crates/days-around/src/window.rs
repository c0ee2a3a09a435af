//! Day windows: the contiguous run of civil days shown around a focal date.
//!
//! Offsets `-before..=after` are applied to the focal *calendar date* and only
//! then resolved to local midnights, so a step is always exactly one date even
//! when the wall-clock distance between midnights is 23 or 25 hours.

use crate::civil::{civil_midnight, shift_days};
use crate::error::{LayoutError, Result};
use crate::range::ClosedRange;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Columns alternate styling every this many days.
const ALTERNATE_STRIPES: usize = 2;

/// How many days to show before and after the focal day.
///
/// Both counts are non-negative; the focal day itself is always included.
/// Deserializes from `{"before": n, "after": m}` with either field optional
/// (default 0), rejecting negative values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RawDayWindow")]
pub struct DayWindow {
    before: i64,
    after: i64,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawDayWindow {
    before: i64,
    after: i64,
}

impl TryFrom<RawDayWindow> for DayWindow {
    type Error = LayoutError;

    fn try_from(raw: RawDayWindow) -> Result<Self> {
        Self::new(raw.before, raw.after)
    }
}

impl DayWindow {
    /// # Errors
    /// Returns `LayoutError::InvalidArgument` if either count is negative.
    pub fn new(before: i64, after: i64) -> Result<Self> {
        if before < 0 {
            return Err(LayoutError::InvalidArgument(format!(
                "`before` must be non-negative, got {}",
                before
            )));
        }
        if after < 0 {
            return Err(LayoutError::InvalidArgument(format!(
                "`after` must be non-negative, got {}",
                after
            )));
        }
        Ok(Self { before, after })
    }

    /// Just the focal day.
    pub fn focal_only() -> Self {
        Self::default()
    }

    pub fn before(&self) -> i64 {
        self.before
    }

    pub fn after(&self) -> i64 {
        self.after
    }

    /// Day offsets relative to the focal day, `-before..=after`.
    pub fn offsets(&self) -> ClosedRange {
        ClosedRange::around_zero(self.before, self.after)
    }

    /// Number of days in the window: `before + after + 1`.
    ///
    /// Both counts are non-negative `i64`s, so the sum always fits in `u64`.
    pub fn len(&self) -> u64 {
        self.before.unsigned_abs() + self.after.unsigned_abs() + 1
    }

    /// A window always holds at least the focal day.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// One rendered day column.
#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn<T: TimeZone> {
    /// Position from the left edge of the window, starting at 0.
    pub index: usize,
    /// Signed day offset from the focal day (0 is the focal day).
    pub offset: i64,
    /// Civil midnight opening this day.
    pub date: DateTime<T>,
    /// Whether the column takes the alternate stripe.
    pub alternate: bool,
    /// UTC ISO-8601 timestamp of `date` with millisecond precision. Unique per
    /// column unless the zone skipped one of the window's dates.
    pub key: String,
}

/// Generate the civil midnights of every day in `window` around `focal`.
///
/// The focal date is read in `focal`'s own timezone; its time of day is
/// ignored. The result has `window.len()` entries, one per calendar date, and
/// holds the focal day's midnight at position `window.before()`. It is
/// strictly ascending except around a date the zone skipped entirely, which
/// resolves to the same instant as the date after it (see [`civil_midnight`]).
///
/// # Errors
/// Returns `LayoutError::OutOfRange` if either end of the window lies past the
/// dates chrono can represent. Both ends are checked before any day is built.
pub fn generate_day_window<T: TimeZone>(
    focal: &DateTime<T>,
    window: DayWindow,
) -> Result<Vec<DateTime<T>>> {
    let tz = focal.timezone();
    let focal_date = focal.date_naive();

    shift_days(focal_date, -window.before())?;
    shift_days(focal_date, window.after())?;

    let days = window
        .offsets()
        .iter()
        .map(|offset| civil_midnight(shift_days(focal_date, offset)?, &tz))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        focal = %focal_date,
        before = window.before(),
        after = window.after(),
        days = days.len(),
        "generated day window"
    );

    Ok(days)
}

/// Generate the day window and wrap each day in a [`DayColumn`].
///
/// # Errors
/// Same as [`generate_day_window`].
pub fn day_columns<T: TimeZone>(
    focal: &DateTime<T>,
    window: DayWindow,
) -> Result<Vec<DayColumn<T>>> {
    let days = generate_day_window(focal, window)?;

    Ok(days
        .into_iter()
        .zip(window.offsets())
        .enumerate()
        .map(|(index, (date, offset))| DayColumn {
            index,
            offset,
            key: date
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            date,
            alternate: is_alternate(index),
        })
        .collect())
}

/// Whether the column at `index` (0-based from the window's left edge) takes
/// the alternate stripe. The leftmost column never does.
pub fn is_alternate(index: usize) -> bool {
    index % ALTERNATE_STRIPES == 1
}
