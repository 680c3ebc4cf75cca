//! # Group writer
//!
//! Flushes [`Groups`] to disk, one output file per group.
//!
//! ## Output layout
//! -----------------
//! | Key                | File                                         |
//! |--------------------|----------------------------------------------|
//! | [`PlaneKey`]       | `<out>/plane_<raan>.<ext>`                   |
//! | [`ShellPlaneKey`]  | `<out>/shell_<alt>km/plane_<raan>.<ext>`     |
//! | flight id          | `<out>/<sanitized flight id>.<ext>`          |
//!
//! Numeric boundaries are truncated to integers. Flight ids have `\ / * ? : " < > |` and spaces
//! replaced by `_`. Two groups resolving to the same file are rejected with
//! [`TleBinsError::OutputNameCollision`] before anything is written.
//!
//! ## Formats
//! -----------------
//! * **TLE** – three lines (name, line 1, line 2) per record.
//! * **JSON** – a pretty-printed (2 spaces) array of records.
//!
//! Records are written in group (arrival) order.
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::sync::LazyLock;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use regex::Regex;
use serde::Serialize;

use crate::binning::{Groups, PlaneKey, ShellPlaneKey};
use crate::constants::FlightId;
use crate::tle::TleRecord;
use crate::tlebins_errors::TleBinsError;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/*?:"<>|]"#).expect("valid file name regex"));

/// Replace the characters that are unsafe in file names, and spaces, by `_`.
pub fn sanitize_filename(name: &str) -> String {
    UNSAFE_FILENAME_CHARS
        .replace_all(name, "_")
        .replace(' ', "_")
}

/// Integer label of a numeric bin boundary (truncated toward zero).
pub fn numeric_label(value: f64) -> i64 {
    value.trunc() as i64
}

/// Location of a group's output file, relative to the output directory.
pub trait GroupKey {
    fn output_path(&self, extension: &str) -> Utf8PathBuf;
}

impl GroupKey for PlaneKey {
    fn output_path(&self, extension: &str) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("plane_{}.{extension}", numeric_label(self.degrees())))
    }
}

impl GroupKey for ShellPlaneKey {
    fn output_path(&self, extension: &str) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("shell_{}km", numeric_label(self.shell.km())))
            .join(self.plane.output_path(extension))
    }
}

impl GroupKey for FlightId {
    fn output_path(&self, extension: &str) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}.{extension}", sanitize_filename(self)))
    }
}

/// What a writer call produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteSummary {
    pub files: usize,
    pub records: usize,
}

/// Write each group as a 3-line TLE file.
///
/// Arguments
/// -----------------
/// * `groups` – The TLE records grouped by key.
/// * `output_dir` – Root output directory, created if needed.
///
/// Return
/// ----------
/// * A [`WriteSummary`], or the first I/O / naming error.
pub fn write_tle_groups<K>(
    groups: &Groups<K, TleRecord>,
    output_dir: &Utf8Path,
) -> Result<WriteSummary, TleBinsError>
where
    K: Ord + GroupKey,
{
    write_groups(groups, output_dir, "tle", |writer, records| {
        for record in records {
            write!(writer, "{record}")?;
        }
        Ok(())
    })
}

/// Write each group as a pretty-printed JSON array.
///
/// Arguments
/// -----------------
/// * `groups` – Serializable records grouped by key.
/// * `output_dir` – Root output directory, created if needed.
///
/// Return
/// ----------
/// * A [`WriteSummary`], or the first I/O / serialization / naming error.
pub fn write_json_groups<K, R>(
    groups: &Groups<K, R>,
    output_dir: &Utf8Path,
) -> Result<WriteSummary, TleBinsError>
where
    K: Ord + GroupKey,
    R: Serialize,
{
    write_groups(groups, output_dir, "json", |writer, records| {
        serde_json::to_writer_pretty(writer, records)?;
        Ok(())
    })
}

fn write_groups<K, R, F>(
    groups: &Groups<K, R>,
    output_dir: &Utf8Path,
    extension: &str,
    mut write_records: F,
) -> Result<WriteSummary, TleBinsError>
where
    K: Ord + GroupKey,
    F: FnMut(&mut BufWriter<File>, &[R]) -> Result<(), TleBinsError>,
{
    let mut seen = HashSet::with_capacity(groups.len());
    let mut outputs = Vec::with_capacity(groups.len());
    for (key, records) in groups.iter() {
        let path = output_dir.join(key.output_path(extension));
        if !seen.insert(path.clone()) {
            return Err(TleBinsError::OutputNameCollision(path.into_string()));
        }
        outputs.push((path, records));
    }

    fs::create_dir_all(output_dir)?;

    let mut summary = WriteSummary::default();
    for (path, records) in outputs {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&path)?);
        write_records(&mut writer, records)?;
        writer.flush()?;

        debug!("Wrote {} records to {path}", records.len());
        summary.files += 1;
        summary.records += records.len();
    }

    Ok(summary)
}

#[cfg(test)]
mod writer_test {
    use super::*;
    use crate::binning::{PlaneKey, ShellKey};
    use ordered_float::OrderedFloat;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("F123"), "F123");
        assert_eq!(sanitize_filename("Starlink G6-3/B1067"), "Starlink_G6-3_B1067");
        assert_eq!(sanitize_filename(r#"a\b*c?d:e"f<g>h|i"#), "a_b_c_d_e_f_g_h_i");
    }

    #[test]
    fn test_output_paths() {
        let plane = PlaneKey(OrderedFloat(352.0));
        assert_eq!(plane.output_path("tle"), Utf8PathBuf::from("plane_352.tle"));

        let key = ShellPlaneKey {
            shell: ShellKey(OrderedFloat(500.0)),
            plane: PlaneKey(OrderedFloat(290.0)),
        };
        assert_eq!(
            key.output_path("json"),
            Utf8PathBuf::from("shell_500km").join("plane_290.json")
        );

        let flight: FlightId = "Starlink 6-3".into();
        assert_eq!(flight.output_path("json"), Utf8PathBuf::from("Starlink_6-3.json"));

        // Dots in flight ids are kept, not mistaken for an extension
        let flight: FlightId = "F9 v1.2".into();
        assert_eq!(flight.output_path("json"), Utf8PathBuf::from("F9_v1.2.json"));
    }

    #[test]
    fn test_numeric_label_truncates() {
        assert_eq!(numeric_label(2.0), 2);
        assert_eq!(numeric_label(2.5), 2);
        assert_eq!(numeric_label(-2.0), -2);
        assert_eq!(numeric_label(-0.5), 0);
    }

    #[test]
    fn test_name_collision() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = Utf8Path::from_path(dir.path()).unwrap();

        let mut groups: Groups<PlaneKey, serde_json::Value> = Groups::new();
        groups.push(PlaneKey(OrderedFloat(0.0)), serde_json::json!({"a": 1}));
        groups.push(PlaneKey(OrderedFloat(0.5)), serde_json::json!({"a": 2}));

        let result = write_json_groups(&groups, output_dir);
        assert!(matches!(result, Err(TleBinsError::OutputNameCollision(_))));
        assert!(!output_dir.join("plane_0.json").exists());
    }

    #[test]
    fn test_write_json_groups() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = Utf8Path::from_path(dir.path()).unwrap().join("flights");

        let mut groups: Groups<FlightId, serde_json::Value> = Groups::new();
        groups.push("F1".into(), serde_json::json!({"OBJECT_ID": "A"}));
        groups.push("F1".into(), serde_json::json!({"OBJECT_ID": "B"}));

        let summary = write_json_groups(&groups, &output_dir).unwrap();
        assert_eq!(summary, WriteSummary { files: 1, records: 2 });

        let content = fs::read_to_string(output_dir.join("F1.json")).unwrap();
        assert_eq!(
            content,
            "[\n  {\n    \"OBJECT_ID\": \"A\"\n  },\n  {\n    \"OBJECT_ID\": \"B\"\n  }\n]"
        );
    }
}
