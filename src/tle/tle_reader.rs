//! # 3-line TLE file reader
//!
//! Reads a flat TLE catalog made of `name / line 1 / line 2` triplets and decodes each
//! triplet with [`TleRecord::from_lines`].
//!
//! ## Error Handling
//! -----------------
//! - The file is read in full before processing; failing to read it is fatal and surfaces as
//!   [`TleBinsError::IoError`].
//! - A triplet that fails to decode is **skipped** with a `warn!` diagnostic naming the
//!   satellite; the reader carries on with the next triplet.
//! - The file is cut into consecutive triplets; blank lines are only dropped at the end of the
//!   file, so a blank name line does not shift the following records. Trailing lines that do
//!   not complete a triplet are reported as [`TleBinsError::IncompleteTleTriplet`] in the log
//!   and skipped.
use camino::Utf8Path;
use itertools::Itertools;
use log::warn;

use crate::tle::tle_record::TleRecord;
use crate::tlebins_errors::TleBinsError;

/// Outcome of reading a TLE catalog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TleBatch {
    /// Successfully decoded records, in file order.
    pub records: Vec<TleRecord>,
    /// Number of triplets (or trailing partial triplets) that were rejected.
    pub rejected: usize,
}

/// Decode every `name / line 1 / line 2` triplet of an in-memory TLE catalog.
///
/// Arguments
/// -----------------
/// * `content` – The whole catalog text.
///
/// Return
/// ----------
/// * A [`TleBatch`] holding the decoded records in input order and the number of rejected
///   triplets. This function never fails: malformed triplets are logged and counted.
pub fn parse_tle_text(content: &str) -> TleBatch {
    let mut lines = content.lines().map(str::trim).collect::<Vec<_>>();

    // Lines are taken three by three, an empty name line is still a name line
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let mut batch = TleBatch::default();
    let mut triplets = lines.iter().copied().tuples::<(_, _, _)>();

    for (name, line1, line2) in triplets.by_ref() {
        match TleRecord::from_lines(name, line1, line2) {
            Ok(record) => batch.records.push(record),
            Err(err) => {
                warn!("Failed to parse TLE for {name}: {err}");
                batch.rejected += 1;
            }
        }
    }

    let leftover = triplets.into_buffer().count();
    if leftover > 0 {
        let err = TleBinsError::IncompleteTleTriplet(lines.len() - leftover + 1);
        warn!("{err}");
        batch.rejected += 1;
    }

    batch
}

/// Read a TLE catalog from disk and decode all of its triplets.
///
/// Arguments
/// -----------------
/// * `path` – Path of the 3-line TLE file.
///
/// Return
/// ----------
/// * The decoded [`TleBatch`], or [`TleBinsError::IoError`] if the file cannot be read.
///
/// See also
/// ------------
/// * [`parse_tle_text`] – Decoding of the file content.
pub fn read_tle_file(path: &Utf8Path) -> Result<TleBatch, TleBinsError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_tle_text(&content))
}
