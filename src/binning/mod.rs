//! # Binning engine
//!
//! Assigns records to discrete bins and accumulates them into [`Groups`].
//!
//! ## Overview
//! -----------------
//! A binning **strategy** ([`BinStrategy`]) maps one record to one key. Two kinds exist:
//!
//! - **numeric formula** strategies, built on [`bin_value`]
//!   (`floor(v / w) · w`): [`PlaneBinning`] (RAAN), [`ShellBinning`] (altitude) and the
//!   compound [`ShellPlaneBinning`] (shell, then plane);
//! - **lookup key** strategies, where the key is an external identifier already attached to
//!   the record: [`FlightBinning`] (launch-log flight id).
//!
//! [`group_records`] drives any strategy over a record stream and returns the grouping as a
//! value; there is no shared accumulator.
//!
//! ## Invariants
//! -----------------
//! - A key depends only on the record and the strategy parameters, never on processing order.
//! - Within a group, records keep their arrival order.
//! - Groups iterate in ascending key order.
//! - For every finite `v` and `w > 0`: `bin_value(v, w) <= v < bin_value(v, w) + w`.
//!
//! ## See also
//! ------------
//! * [`crate::writer`] – Emits one output file per group.
pub mod strategies;

use std::collections::BTreeMap;

use itertools::Itertools;
use log::warn;

use crate::constants::{Degree, Kilometer};
use crate::tlebins_errors::TleBinsError;

pub use strategies::{
    FlightBinning, PlaneBinning, PlaneKey, ShellBinning, ShellKey, ShellPlaneBinning,
    ShellPlaneKey,
};

/// Floor a value to the lower boundary of its bin.
///
/// The boundary of `v` in `[k·w, (k+1)·w)` is `k·w`, rounding towards negative infinity, so
/// negative values land in negative bins. `-0.0` is returned as `0.0`.
///
/// Arguments
/// -----------------
/// * `value` – The value to bin (degrees, kilometers...).
/// * `width` – The bin width, strictly positive.
///
/// Return
/// ----------
/// * The bin lower boundary.
pub fn bin_value(value: f64, width: f64) -> f64 {
    let mut k = (value / width).floor();

    // The division may round across an integer, step back inside the bin
    if k * width > value {
        k -= 1.0;
    } else if (k + 1.0) * width <= value {
        k += 1.0;
    }
    k * width + 0.0
}

/// Check that a bin width is a finite, strictly positive number.
///
/// Return
/// ----------
/// * The width, or [`TleBinsError::InvalidGroupingParameter`] naming the parameter.
pub fn check_bin_width(name: &str, width: f64) -> Result<f64, TleBinsError> {
    if width.is_finite() && width > 0.0 {
        Ok(width)
    } else {
        Err(TleBinsError::InvalidGroupingParameter(format!(
            "{name} must be finite and strictly positive, got {width}"
        )))
    }
}

/// Human readable name of a record, used in diagnostics.
pub trait RecordLabel {
    fn label(&self) -> &str;
}

/// Orbital quantities the numeric strategies bin on.
///
/// Implemented by both [`TleRecord`](crate::tle::TleRecord) and
/// [`OmmRecord`](crate::omm::OmmRecord), so every numeric strategy works on either form.
pub trait OrbitalRecord {
    /// Right ascension of the ascending node (degrees).
    fn raan(&self) -> Result<Degree, TleBinsError>;

    /// Mean altitude (km).
    fn altitude(&self) -> Result<Kilometer, TleBinsError>;
}

/// A rule assigning a record to a bin.
pub trait BinStrategy<R> {
    type Key: Ord + Clone;

    /// Compute the key of `record`, or the reason it cannot be binned.
    fn bin_key(&self, record: &R) -> Result<Self::Key, TleBinsError>;
}

/// Records grouped by key, in arrival order within each group.
#[derive(Debug, Clone, PartialEq)]
pub struct Groups<K: Ord, R> {
    bins: BTreeMap<K, Vec<R>>,
}

impl<K: Ord, R> Default for Groups<K, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, R> Groups<K, R> {
    pub fn new() -> Self {
        Groups {
            bins: BTreeMap::new(),
        }
    }

    /// Append `record` to the group of `key`, creating the group on first use.
    pub fn push(&mut self, key: K, record: R) {
        self.bins.entry(key).or_default().push(record);
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Number of records over all groups.
    pub fn record_count(&self) -> usize {
        self.bins.values().map(Vec::len).sum()
    }

    pub fn get(&self, key: &K) -> Option<&[R]> {
        self.bins.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.bins.keys()
    }

    /// Iterate over `(key, records)` in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[R])> {
        self.bins
            .iter()
            .map(|(key, records)| (key, records.as_slice()))
    }
}

impl<R> Groups<ShellPlaneKey, R> {
    /// Number of distinct altitude shells among the (shell, plane) groups.
    pub fn shell_count(&self) -> usize {
        self.bins.keys().map(|key| key.shell).dedup().count()
    }
}

impl<K: Ord, R> IntoIterator for Groups<K, R> {
    type Item = (K, Vec<R>);
    type IntoIter = std::collections::btree_map::IntoIter<K, Vec<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.bins.into_iter()
    }
}

/// Group a stream of records with a binning strategy.
///
/// Records for which the strategy cannot compute a key (missing field, non-positive mean
/// motion...) are logged with their label and left out.
///
/// Arguments
/// -----------------
/// * `records` – Records in arrival order.
/// * `strategy` – The binning rule.
///
/// Return
/// ----------
/// * The groups and the number of records left out.
pub fn group_records<R, S>(
    records: impl IntoIterator<Item = R>,
    strategy: &S,
) -> (Groups<S::Key, R>, usize)
where
    R: RecordLabel,
    S: BinStrategy<R>,
{
    let mut groups = Groups::new();
    let mut skipped = 0;

    for record in records {
        match strategy.bin_key(&record) {
            Ok(key) => groups.push(key, record),
            Err(err) => {
                warn!("Skipping {}: {err}", record.label());
                skipped += 1;
            }
        }
    }

    (groups, skipped)
}
