//! # Grouping pipelines
//!
//! End-to-end runs chaining **parse → derive → bin → emit**. Each one backs a binary of the
//! crate.
//!
//! | Run                              | Input                  | Output                                   |
//! |----------------------------------|------------------------|------------------------------------------|
//! | [`group_tles_by_plane`]          | TLE file               | `plane_<raan>.tle`                       |
//! | [`group_tles_by_shell_and_plane`]| TLE file               | `shell_<alt>km/plane_<raan>.tle`         |
//! | [`group_tles_to_omm_json`]       | TLE file               | `shell_<alt>km/plane_<raan>.json`        |
//! | [`group_omm_by_flight`]          | launch log + OMM JSON  | `<flight id>.json`                       |
//!
//! Malformed records are logged and left out, I/O failures abort the run. Every run returns a
//! [`RunSummary`] whose `Display` is the one-line report printed by the binaries.
use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use log::info;

use crate::binning::{group_records, PlaneBinning, ShellPlaneBinning};
use crate::grouping_params::GroupingParams;
use crate::launch_log::{group_by_flight, read_launch_log};
use crate::omm::{read_omm_catalog, OmmRecord};
use crate::tle::read_tle_file;
use crate::tlebins_errors::TleBinsError;
use crate::writer::{write_json_groups, write_tle_groups};

/// Which run produced a [`RunSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Plane,
    ShellPlane,
    ShellPlaneJson,
    Flight,
}

/// Counters of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub kind: RunKind,
    pub output_dir: Utf8PathBuf,
    /// Records written.
    pub records: usize,
    /// Output files written, one per group.
    pub groups: usize,
    /// Distinct altitude shells, zero for runs without shells.
    pub shells: usize,
    /// Input records rejected by the parser.
    pub rejected: usize,
    /// Parsed records that could not be binned.
    pub skipped: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RunKind::Plane => write!(
                f,
                "Grouped {} TLEs into {} orbital planes.",
                self.records, self.groups
            ),
            RunKind::ShellPlane => write!(
                f,
                "Grouped into {} shells and {} planes.",
                self.shells, self.groups
            ),
            RunKind::ShellPlaneJson => write!(
                f,
                "Exported {} planes as full OMM JSON arrays.",
                self.groups
            ),
            RunKind::Flight => write!(
                f,
                "Saved {} grouped OMM JSON files to '{}'",
                self.groups, self.output_dir
            ),
        }
    }
}

/// Group the TLEs of `tle_path` by orbital plane into one TLE file per plane.
///
/// Arguments
/// -----------------
/// * `tle_path` – Input file, three lines per record.
/// * `output_dir` – Receives `plane_<raan>.tle`.
/// * `params` – Uses `raan_bin_width`.
///
/// Return
/// ----------
/// * The run counters, or the first I/O error.
pub fn group_tles_by_plane(
    tle_path: &Utf8Path,
    output_dir: &Utf8Path,
    params: &GroupingParams,
) -> Result<RunSummary, TleBinsError> {
    let batch = read_tle_file(tle_path)?;
    let (groups, skipped) = group_records(batch.records, &PlaneBinning::new(params.raan_bin_width)?);
    let written = write_tle_groups(&groups, output_dir)?;

    let summary = RunSummary {
        kind: RunKind::Plane,
        output_dir: output_dir.to_owned(),
        records: written.records,
        groups: written.files,
        shells: 0,
        rejected: batch.rejected,
        skipped,
    };
    log_summary(&summary);
    Ok(summary)
}

/// Group the TLEs of `tle_path` by altitude shell then orbital plane, as TLE files.
///
/// Arguments
/// -----------------
/// * `tle_path` – Input file, three lines per record.
/// * `output_dir` – Receives `shell_<alt>km/plane_<raan>.tle`.
/// * `params` – Uses `altitude_bin_width` and `raan_bin_width`.
///
/// Return
/// ----------
/// * The run counters, or the first I/O error.
pub fn group_tles_by_shell_and_plane(
    tle_path: &Utf8Path,
    output_dir: &Utf8Path,
    params: &GroupingParams,
) -> Result<RunSummary, TleBinsError> {
    let batch = read_tle_file(tle_path)?;
    let strategy = ShellPlaneBinning::new(params.altitude_bin_width, params.raan_bin_width)?;
    let (groups, skipped) = group_records(batch.records, &strategy);
    let written = write_tle_groups(&groups, output_dir)?;

    let summary = RunSummary {
        kind: RunKind::ShellPlane,
        output_dir: output_dir.to_owned(),
        records: written.records,
        groups: written.files,
        shells: groups.shell_count(),
        rejected: batch.rejected,
        skipped,
    };
    log_summary(&summary);
    Ok(summary)
}

/// Same grouping as [`group_tles_by_shell_and_plane`], emitted as OMM JSON arrays.
///
/// Each TLE is converted to an [`OmmRecord`] before binning, so the files carry the
/// derived OMM fields along with the raw TLE lines.
pub fn group_tles_to_omm_json(
    tle_path: &Utf8Path,
    output_dir: &Utf8Path,
    params: &GroupingParams,
) -> Result<RunSummary, TleBinsError> {
    let batch = read_tle_file(tle_path)?;
    let strategy = ShellPlaneBinning::new(params.altitude_bin_width, params.raan_bin_width)?;
    let omms = batch.records.into_iter().map(OmmRecord::from);
    let (groups, skipped) = group_records(omms, &strategy);
    let written = write_json_groups(&groups, output_dir)?;

    let summary = RunSummary {
        kind: RunKind::ShellPlaneJson,
        output_dir: output_dir.to_owned(),
        records: written.records,
        groups: written.files,
        shells: groups.shell_count(),
        rejected: batch.rejected,
        skipped,
    };
    log_summary(&summary);
    Ok(summary)
}

/// Join a launch log with an OMM catalog and write one JSON array per flight.
///
/// Arguments
/// -----------------
/// * `launch_log_path` – Tab-separated launch log.
/// * `omm_path` – OMM catalog, a JSON array.
/// * `output_dir` – Receives `<flight id>.json`.
/// * `params` – Uses `constellation_marker`.
///
/// Return
/// ----------
/// * The run counters, or the first I/O / decoding error.
///
/// See also
/// ------------
/// * [`crate::launch_log`] – Join rules.
pub fn group_omm_by_flight(
    launch_log_path: &Utf8Path,
    omm_path: &Utf8Path,
    output_dir: &Utf8Path,
    params: &GroupingParams,
) -> Result<RunSummary, TleBinsError> {
    let catalog = read_omm_catalog(omm_path)?;
    let rows = read_launch_log(launch_log_path)?;
    let groups = group_by_flight(&rows, &catalog, &params.constellation_marker);
    let written = write_json_groups(&groups, output_dir)?;

    let summary = RunSummary {
        kind: RunKind::Flight,
        output_dir: output_dir.to_owned(),
        records: written.records,
        groups: written.files,
        shells: 0,
        rejected: 0,
        skipped: 0,
    };
    log_summary(&summary);
    Ok(summary)
}

fn log_summary(summary: &RunSummary) {
    info!(
        "{:?} run: {} records in {} groups written to {} ({} rejected, {} skipped)",
        summary.kind,
        summary.records,
        summary.groups,
        summary.output_dir,
        summary.rejected,
        summary.skipped
    );
}
