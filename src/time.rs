use hifitime::{Epoch, Unit};
use std::str::FromStr;

use crate::constants::{SECONDS_PER_DAY, TLE_YEAR_PIVOT};
use crate::tlebins_errors::TleBinsError;

/// Expand the two-digit year of a TLE epoch into a full year
///
/// Argument
/// --------
/// * `two_digit_year`: the `YY` part of a TLE epoch (0..=99)
///
/// Return
/// ------
/// * the full year, 20YY below the pivot (57) and 19YY otherwise
pub fn expand_tle_year(two_digit_year: i32) -> i32 {
    if two_digit_year < TLE_YEAR_PIVOT {
        2000 + two_digit_year
    } else {
        1900 + two_digit_year
    }
}

/// Transformation from a packed TLE epoch `YYDDD.DDDDDDDD` to a UTC [`Epoch`]
///
/// The whole part of the day of year is added as `day - 1` days to January 1st 00:00:00 of the
/// decoded year, the fractional part is converted to seconds and added with its sub-second part
/// rounded to the microsecond.
///
/// Argument
/// --------
/// * `epoch_str`: the epoch field of a TLE line 1 (columns 18..32), surrounding blanks allowed
///
/// Return
/// ------
/// * the epoch in the UTC time scale, or a description of the malformed part
pub fn tle_epoch_to_epoch(epoch_str: &str) -> Result<Epoch, String> {
    let epoch_str = epoch_str.trim();

    let year_part = epoch_str
        .get(..2)
        .ok_or_else(|| format!("epoch too short: {epoch_str:?}"))?;
    let day_part = epoch_str
        .get(2..)
        .ok_or_else(|| format!("epoch too short: {epoch_str:?}"))?;

    let two_digit_year = i32::from_str(year_part.trim()).map_err(|_| "invalid year")?;
    let day_of_year = f64::from_str(day_part.trim()).map_err(|_| "invalid day of year")?;
    if !day_of_year.is_finite() {
        return Err("invalid day of year".to_string());
    }

    // Separation of day and fraction of day
    let day = day_of_year.trunc();
    let fraction = day_of_year - day;
    // Whole seconds first, only the sub-second part is rounded to the microsecond
    let seconds = fraction * SECONDS_PER_DAY;
    let whole_seconds = seconds.trunc();
    let micros = whole_seconds as i64 * 1_000_000 + ((seconds - whole_seconds) * 1e6).round() as i64;

    let new_year = Epoch::from_gregorian_utc_at_midnight(expand_tle_year(two_digit_year), 1, 1);
    Ok(new_year + Unit::Day * (day as i64 - 1) + Unit::Microsecond * micros)
}

/// Format an [`Epoch`] as an ISO 8601 UTC timestamp without time scale suffix
///
/// Microseconds are only written when they are not zero, e.g. `2024-01-01T12:00:00` or
/// `2024-01-01T12:00:00.250000`.
///
/// Argument
/// --------
/// * `epoch`: the epoch to format
///
/// Return
/// ------
/// * the formatted timestamp
pub fn epoch_to_iso(epoch: &Epoch) -> String {
    let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();
    let micros = nanos / 1_000;
    if micros == 0 {
        format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}")
    } else {
        format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}.{micros:06}")
    }
}

/// Parse an ISO 8601 timestamp (as found in the `EPOCH` field of OMM records) in UTC
///
/// Argument
/// --------
/// * `date`: a date in the format YYYY-MM-ddTHH:mm:ss[.ffffff]
///
/// Return
/// ------
/// * the epoch, or [`TleBinsError::InvalidEpoch`]
pub fn iso_to_epoch(date: &str) -> Result<Epoch, TleBinsError> {
    Epoch::from_str(date.trim()).map_err(|_| TleBinsError::InvalidEpoch(date.to_string()))
}
