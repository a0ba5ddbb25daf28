use chrono::{NaiveDate, NaiveTime, TimeDelta};
use chrono_tz::Tz;

use crate::{Error, Result};

/// Default epoch: Sunday, January 1, 2023 00:00:00 Asia/Shanghai
/// (2022-12-31 16:00:00 UTC).
pub const DEFAULT_EPOCH_MILLIS: i64 = 1_672_502_400_000;

/// Zone start times are interpreted in, looked up in the IANA tz database.
///
/// Start times never depend on the host's local zone. Today the zone is a
/// plain UTC+08:00, but dates in its historical daylight saving periods
/// (1940s, 1986 to 1991) resolve to UTC+09:00.
pub const START_TIME_ZONE: Tz = chrono_tz::Asia::Shanghai;

/// Calendar format accepted for start times.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` start time into milliseconds since the Unix epoch,
/// taking midnight in [`START_TIME_ZONE`].
///
/// If the clocks jumped forward at that midnight, the instant the jump
/// happened is used.
///
/// # Errors
///
/// Returns [`Error::InvalidStartTime`] if `input` is not a valid date in
/// [`START_TIME_FORMAT`].
///
/// # Example
///
/// ```
/// assert_eq!(
///     flakegen::parse_start_time("2023-01-01")?,
///     flakegen::DEFAULT_EPOCH_MILLIS,
/// );
/// # Ok::<(), flakegen::Error>(())
/// ```
pub fn parse_start_time(input: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(input, START_TIME_FORMAT).map_err(|source| {
        Error::InvalidStartTime {
            input: input.to_owned(),
            source,
        }
    })?;

    let midnight = date.and_time(NaiveTime::MIN);
    midnight
        .and_local_timezone(START_TIME_ZONE)
        .earliest()
        .or_else(|| {
            // Midnight fell into a DST gap; 01:00 is the same instant.
            midnight
                .checked_add_signed(TimeDelta::hours(1))?
                .and_local_timezone(START_TIME_ZONE)
                .earliest()
        })
        .map(|at| at.timestamp_millis())
        .ok_or_else(|| Error::NonexistentStartTime {
            input: input.to_owned(),
        })
}

/// Resolves an optional start time to an epoch, falling back to
/// [`DEFAULT_EPOCH_MILLIS`].
///
/// # Errors
///
/// Returns [`Error::InvalidStartTime`] if a start time is given but cannot be
/// parsed.
pub fn resolve_epoch(start_time: Option<&str>) -> Result<i64> {
    start_time.map_or(Ok(DEFAULT_EPOCH_MILLIS), parse_start_time)
}
