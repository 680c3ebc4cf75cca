//! # TLE record parser
//!
//! Decodes one satellite of a **3-line TLE** file (name, line 1, line 2) into a strongly typed
//! [`TleRecord`].
//!
//! ## Column layout
//! -----------------
//! Columns are 0-indexed, half-open ranges into the 69-character NORAD lines.
//!
//! ```text
//! Line 1: 1 NNNNNC NNNNNAAA NNNNN.NNNNNNNN +.NNNNNNNN +NNNNN-N +NNNNN-N N NNNNN
//! Line 2: 2 NNNNN NNN.NNNN NNN.NNNN NNNNNNN NNN.NNNN NNN.NNNN NN.NNNNNNNNNNNNNN
//! ```
//!
//! | Line | Columns          | Field                                     |
//! |------|------------------|-------------------------------------------|
//! | 1    | `2..7`           | NORAD catalog number                      |
//! | 1    | `7`              | classification                            |
//! | 1    | `9..17`          | international designator (object id)     |
//! | 1    | `18..32`         | epoch `YYDDD.DDDDDDDD`                    |
//! | 1    | `33..43`         | first derivative of mean motion           |
//! | 1    | `44..50`+`50..52`| second derivative of mean motion (packed) |
//! | 1    | `53..59`+`59..61`| BSTAR drag term (packed)                  |
//! | 1    | `62`             | ephemeris type                            |
//! | 1    | `64..68`         | element set number                        |
//! | 2    | `8..16`          | inclination (deg)                         |
//! | 2    | `17..25`         | RAAN (deg)                                |
//! | 2    | `26..33`         | eccentricity, implied leading `0.`        |
//! | 2    | `34..42`         | argument of pericenter (deg)              |
//! | 2    | `43..51`         | mean anomaly (deg)                        |
//! | 2    | `52..63`         | mean motion (rev/day)                     |
//! | 2    | `63..68`         | revolution number at epoch                |
//!
//! ## Failure policy
//! -----------------
//! Every field is decoded into a `Result`. The two packed exponential fields (BSTAR and the
//! second derivative of mean motion) fall back to `0.0` when malformed; any other malformed
//! field rejects the whole record with a [`ParseTleError`].
use std::ops::Range;
use std::str::FromStr;

use hifitime::Epoch;
use thiserror::Error;

use crate::constants::{Degree, Kilometer, ObjectId, RevPerDay};
use crate::kepler::{mean_motion_to_altitude, semi_major_axis};
use crate::time::tle_epoch_to_epoch;
use crate::tlebins_errors::TleBinsError;

/// Line-level parsing errors for TLE records.
///
/// Variants
/// -----------------
/// * `InvalidLineNumber` – Line 1 does not start with `1` or line 2 with `2`.
/// * `MissingField` – A single-character field lies beyond the end of the line.
/// * `InvalidField` – A numeric field could not be decoded; payload carries the offending slice.
/// * `InvalidEpoch` – The packed epoch could not be decoded.
#[derive(Error, Debug, PartialEq)]
pub enum ParseTleError {
    #[error("Line {expected} does not start with '{expected}': {line:?}")]
    InvalidLineNumber { expected: u8, line: String },
    #[error("Missing {0} field")]
    MissingField(&'static str),
    #[error("Invalid {field} value: {value:?}")]
    InvalidField { field: &'static str, value: String },
    #[error("Invalid epoch {value:?}: {reason}")]
    InvalidEpoch { value: String, reason: String },
}

/// One satellite's mean orbital elements at one epoch, decoded from a TLE.
///
/// Angles are kept in **degrees** and the mean motion in **revolutions per day**, i.e. in the
/// units of the TLE itself. The two source lines are kept verbatim so that a record can be
/// written back without any loss.
#[derive(Debug, Clone, PartialEq)]
pub struct TleRecord {
    pub name: String,
    pub object_id: ObjectId,
    pub norad_cat_id: u32,
    pub classification: char,
    pub epoch: Epoch,
    pub mean_motion: RevPerDay,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub ra_of_asc_node: Degree,
    pub arg_of_pericenter: Degree,
    pub mean_anomaly: Degree,
    pub bstar: f64,
    pub mean_motion_dot: f64,
    pub mean_motion_ddot: f64,
    pub ephemeris_type: u8,
    pub element_set_no: u32,
    pub rev_at_epoch: u32,
    pub line1: String,
    pub line2: String,
}

impl TleRecord {
    /// Parse a TLE record from its name line and its two element lines.
    ///
    /// Surrounding whitespace is removed from the three lines before decoding; the trimmed
    /// element lines are stored in the record.
    ///
    /// Arguments
    /// -----------------
    /// * `name` – The satellite name line (line 0).
    /// * `line1` – TLE line 1.
    /// * `line2` – TLE line 2.
    ///
    /// Return
    /// ----------
    /// * The decoded [`TleRecord`], or the first [`ParseTleError`] met while decoding.
    ///
    /// See also
    /// ------------
    /// * [`decode_packed_exponent`] – Lenient decoder of the BSTAR / second derivative fields.
    /// * [`tle_epoch_to_epoch`] – Packed epoch decoder.
    pub fn from_lines(name: &str, line1: &str, line2: &str) -> Result<Self, ParseTleError> {
        let line1 = line1.trim();
        let line2 = line2.trim();

        if !line1.starts_with('1') {
            return Err(ParseTleError::InvalidLineNumber {
                expected: 1,
                line: line1.to_string(),
            });
        }
        if !line2.starts_with('2') {
            return Err(ParseTleError::InvalidLineNumber {
                expected: 2,
                line: line2.to_string(),
            });
        }

        // Line 1
        let norad_cat_id = parse_column::<u32>(line1, 2..7, "NORAD catalog number")?;
        let classification = column(line1, 7..8)
            .chars()
            .next()
            .ok_or(ParseTleError::MissingField("classification"))?;
        let object_id = column(line1, 9..17).trim().to_string();

        let epoch_str = column(line1, 18..32).trim();
        let epoch = tle_epoch_to_epoch(epoch_str).map_err(|reason| ParseTleError::InvalidEpoch {
            value: epoch_str.to_string(),
            reason,
        })?;

        let mean_motion_dot = parse_float_column(line1, 33..43, "mean motion first derivative")?;
        let mean_motion_ddot = decode_packed_exponent(column(line1, 44..50), column(line1, 50..52));
        let bstar = decode_packed_exponent(column(line1, 53..59), column(line1, 59..61));
        let ephemeris_type = parse_column::<u8>(line1, 62..63, "ephemeris type")?;
        let element_set_no = parse_column::<u32>(line1, 64..68, "element set number")?;

        // Line 2
        let inclination = parse_float_column(line2, 8..16, "inclination")?;
        let ra_of_asc_node = parse_float_column(line2, 17..25, "RAAN")?;

        let ecc_digits = column(line2, 26..33).trim();
        let eccentricity = parse_float(&format!("0.{ecc_digits}"), "eccentricity")
            .map_err(|_| invalid("eccentricity", ecc_digits))?;

        let arg_of_pericenter = parse_float_column(line2, 34..42, "argument of pericenter")?;
        let mean_anomaly = parse_float_column(line2, 43..51, "mean anomaly")?;
        let mean_motion = parse_float_column(line2, 52..63, "mean motion")?;
        let rev_at_epoch = parse_column::<u32>(line2, 63..68, "revolution number")?;

        Ok(TleRecord {
            name: name.trim().to_string(),
            object_id,
            norad_cat_id,
            classification,
            epoch,
            mean_motion,
            eccentricity,
            inclination,
            ra_of_asc_node,
            arg_of_pericenter,
            mean_anomaly,
            bstar,
            mean_motion_dot,
            mean_motion_ddot,
            ephemeris_type,
            element_set_no,
            rev_at_epoch,
            line1: line1.to_string(),
            line2: line2.to_string(),
        })
    }

    /// Semi-major axis (km) derived from the mean motion.
    pub fn semi_major_axis(&self) -> Result<Kilometer, TleBinsError> {
        semi_major_axis(self.mean_motion)
    }

    /// Mean altitude (km) derived from the mean motion, circular orbit assumed.
    pub fn altitude(&self) -> Result<Kilometer, TleBinsError> {
        mean_motion_to_altitude(self.mean_motion)
    }
}

impl std::fmt::Display for TleRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", self.line1)?;
        writeln!(f, "{}", self.line2)
    }
}

/// Decode the TLE packed exponential notation (`±NNNNN` mantissa, `±N` exponent).
///
/// A decimal point is implied before the mantissa digits: mantissa `"12345"` with exponent
/// `"-3"` is `0.12345e-3`. Both the mantissa and the exponent may carry an explicit sign.
///
/// Arguments
/// -----------------
/// * `mantissa` – The mantissa field, e.g. line 1 columns `53..59` for BSTAR.
/// * `exponent` – The exponent field, e.g. line 1 columns `59..61` for BSTAR.
///
/// Return
/// ----------
/// * The decoded value. A malformed mantissa or exponent (empty, non-numeric) yields `0.0`.
pub fn decode_packed_exponent(mantissa: &str, exponent: &str) -> f64 {
    let mantissa = mantissa.trim();
    let (sign, digits) = match mantissa.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return 0.0;
    }

    let Ok(exponent) = exponent.trim().parse::<i32>() else {
        return 0.0;
    };

    // -0.0 is normalized to 0.0
    format!("{sign}0.{digits}e{exponent}")
        .parse::<f64>()
        .map(|value| value + 0.0)
        .unwrap_or(0.0)
}

/// Slice `range` out of `line`, clamped to the line length.
///
/// A range starting past the end of the line yields an empty string.
fn column(line: &str, range: Range<usize>) -> &str {
    let end = range.end.min(line.len());
    let start = range.start.min(end);
    line.get(start..end).unwrap_or("")
}

fn invalid(field: &'static str, value: &str) -> ParseTleError {
    ParseTleError::InvalidField {
        field,
        value: value.to_string(),
    }
}

fn parse_column<T: FromStr>(
    line: &str,
    range: Range<usize>,
    field: &'static str,
) -> Result<T, ParseTleError> {
    let raw = column(line, range).trim();
    raw.parse::<T>().map_err(|_| invalid(field, raw))
}

fn parse_float(raw: &str, field: &'static str) -> Result<f64, ParseTleError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(invalid(field, raw)),
    }
}

fn parse_float_column(
    line: &str,
    range: Range<usize>,
    field: &'static str,
) -> Result<f64, ParseTleError> {
    parse_float(column(line, range).trim(), field)
}

#[cfg(test)]
mod tle_record_test {
    use super::*;
    use approx::assert_relative_eq;

    const ISS_LINE1: &str =
        "1 25544U 98067A   24001.50000000  .00016717  00000-0  10270-3 0  9003";
    const ISS_LINE2: &str =
        "2 25544  51.6400 208.5000 0007417  68.0000 292.1000 15.49560000400000";

    #[test]
    fn test_parse_iss() {
        let tle = TleRecord::from_lines("ISS (ZARYA)", ISS_LINE1, ISS_LINE2).unwrap();

        assert_eq!(tle.name, "ISS (ZARYA)");
        assert_eq!(tle.object_id, "98067A");
        assert_eq!(tle.norad_cat_id, 25544);
        assert_eq!(tle.classification, 'U');
        assert_eq!(tle.epoch.to_gregorian_utc(), (2024, 1, 1, 12, 0, 0, 0));
        assert_eq!(tle.mean_motion_dot, 0.00016717);
        assert_eq!(tle.mean_motion_ddot, 0.0);
        assert_relative_eq!(tle.bstar, 0.10270e-3, epsilon = 1e-15);
        assert_eq!(tle.ephemeris_type, 0);
        assert_eq!(tle.element_set_no, 900);
        assert_eq!(tle.inclination, 51.64);
        assert_eq!(tle.ra_of_asc_node, 208.5);
        assert_eq!(tle.eccentricity, 0.0007417);
        assert_eq!(tle.arg_of_pericenter, 68.0);
        assert_eq!(tle.mean_anomaly, 292.1);
        assert_eq!(tle.mean_motion, 15.4956);
        assert_eq!(tle.rev_at_epoch, 40000);
        assert_eq!(tle.line1, ISS_LINE1);
        assert_eq!(tle.line2, ISS_LINE2);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let first = TleRecord::from_lines("ISS", ISS_LINE1, ISS_LINE2).unwrap();
        let second = TleRecord::from_lines("ISS", ISS_LINE1, ISS_LINE2).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.bstar.to_bits(), second.bstar.to_bits());
    }

    #[test]
    fn test_iss_altitude() {
        let tle = TleRecord::from_lines("ISS", ISS_LINE1, ISS_LINE2).unwrap();
        let alt = tle.altitude().unwrap();
        assert!(alt > 410.0 && alt < 440.0, "ISS altitude={alt} km");
        assert_relative_eq!(
            tle.semi_major_axis().unwrap() - alt,
            crate::constants::EARTH_RADIUS_KM,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_packed_exponent() {
        assert_relative_eq!(decode_packed_exponent("12345", "-3"), 0.00012345, epsilon = 1e-18);
        assert_relative_eq!(decode_packed_exponent(" 10270", "-3"), 1.027e-4, epsilon = 1e-18);
        assert_relative_eq!(decode_packed_exponent("-11606", "-4"), -1.1606e-5, epsilon = 1e-18);
        assert_relative_eq!(decode_packed_exponent("+16538", "+1"), 1.6538, epsilon = 1e-15);
        assert_relative_eq!(decode_packed_exponent("50000", "0"), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_packed_exponent_zero_and_malformed() {
        assert_eq!(decode_packed_exponent("00000", "-0"), 0.0);
        assert_eq!(decode_packed_exponent("00000", "+7"), 0.0);
        assert_eq!(decode_packed_exponent("-00000", "-0").to_bits(), 0.0f64.to_bits());
        assert_eq!(decode_packed_exponent("", "-3"), 0.0);
        assert_eq!(decode_packed_exponent("12a45", "-3"), 0.0);
        assert_eq!(decode_packed_exponent("12345", ""), 0.0);
        assert_eq!(decode_packed_exponent("12345", "-x"), 0.0);
    }

    #[test]
    fn test_negative_bstar() {
        let line1 = "1 25544U 98067A   24001.50000000 -.00002182  00000-0 -11606-4 0  9003";
        let tle = TleRecord::from_lines("ISS", line1, ISS_LINE2).unwrap();
        assert_relative_eq!(tle.bstar, -1.1606e-5, epsilon = 1e-18);
        assert_eq!(tle.mean_motion_dot, -0.00002182);
    }

    #[test]
    fn test_malformed_bstar_falls_back_to_zero() {
        let line1 = "1 25544U 98067A   24001.50000000  .00016717  00000-0  1X270-3 0  9003";
        let tle = TleRecord::from_lines("ISS", line1, ISS_LINE2).unwrap();
        assert_eq!(tle.bstar, 0.0);
    }

    #[test]
    fn test_invalid_raan() {
        let line2 = "2 25544  51.6400 2O8.5000 0007417  68.0000 292.1000 15.49560000400000";
        assert_eq!(
            TleRecord::from_lines("ISS", ISS_LINE1, line2),
            Err(ParseTleError::InvalidField {
                field: "RAAN",
                value: "2O8.5000".into()
            })
        );
    }

    #[test]
    fn test_invalid_epoch() {
        let line1 = "1 25544U 98067A   2400X.50000000  .00016717  00000-0  10270-3 0  9003";
        let result = TleRecord::from_lines("ISS", line1, ISS_LINE2);
        assert!(matches!(result, Err(ParseTleError::InvalidEpoch { .. })));
    }

    #[test]
    fn test_truncated_lines() {
        assert_eq!(
            TleRecord::from_lines("ISS", &ISS_LINE1[..40], ISS_LINE2),
            Err(ParseTleError::InvalidField {
                field: "ephemeris type",
                value: "".into()
            })
        );

        // The mean motion still fits, the revolution number is gone
        assert_eq!(
            TleRecord::from_lines("ISS", ISS_LINE1, &ISS_LINE2[..60]),
            Err(ParseTleError::InvalidField {
                field: "revolution number",
                value: "".into()
            })
        );
    }

    #[test]
    fn test_swapped_lines() {
        assert!(matches!(
            TleRecord::from_lines("ISS", ISS_LINE2, ISS_LINE1),
            Err(ParseTleError::InvalidLineNumber { expected: 1, .. })
        ));
    }

    #[test]
    fn test_display_writes_three_lines() {
        let tle = TleRecord::from_lines("  ISS (ZARYA) ", ISS_LINE1, ISS_LINE2).unwrap();
        assert_eq!(
            tle.to_string(),
            format!("ISS (ZARYA)\n{ISS_LINE1}\n{ISS_LINE2}\n")
        );
    }
}
