//! # Launch log and flight join
//!
//! Reads a tab-separated **launch log** (one row per launched piece) and joins it with an OMM
//! catalog to group the tracked objects of a constellation by launch flight.
//!
//! ## Launch log format
//! -----------------
//! The first row holds the column names. The columns used here are `Name`, `Flight_ID`,
//! `Piece`, `Launch_Date`, `#Launch_Tag` and `JCAT`; other columns are ignored, a missing
//! column reads as an empty string, and rows may be shorter or longer than the header.
//! Fields are trimmed.
//!
//! ## Join rules
//! -----------------
//! A row takes part in the join when its `Name` contains the constellation marker and both its
//! `Flight_ID` and `Piece` are non-empty. The piece designator is looked up in the catalog
//! (`OBJECT_ID`); on a hit the OMM object is cloned unchanged, the launch provenance is appended
//! (`FLIGHT_ID`, `LAUNCH_DATE`, `LAUNCH_TAG`, `PIECE`, `JCAT`) and the record joins the group of
//! its flight. Pieces missing from the catalog (decayed, untracked) are skipped silently.
use std::fs::File;
use std::io::Read;

use camino::Utf8Path;
use log::warn;
use serde::Deserialize;

use crate::binning::{group_records, FlightBinning, Groups};
use crate::constants::FlightId;
use crate::omm::{keys, OmmCatalog, OmmRecord};
use crate::tlebins_errors::TleBinsError;

/// The launch log columns used by the flight join.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LaunchLogRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Flight_ID")]
    pub flight_id: String,
    #[serde(rename = "Piece")]
    pub piece: String,
    #[serde(rename = "Launch_Date")]
    pub launch_date: String,
    #[serde(rename = "#Launch_Tag")]
    pub launch_tag: String,
    #[serde(rename = "JCAT")]
    pub jcat: String,
}

impl LaunchLogRow {
    /// Whether this row describes a piece of the constellation identified by `marker`.
    pub fn is_constellation_piece(&self, marker: &str) -> bool {
        self.name.contains(marker)
            && !self.flight_id.trim().is_empty()
            && !self.piece.trim().is_empty()
    }

    /// Copy of `omm` carrying the launch provenance of this row.
    ///
    /// The catalog fields are kept untouched, the provenance keys are appended (or updated in
    /// place if the object already had them).
    pub fn enrich(&self, omm: &OmmRecord) -> OmmRecord {
        let mut enriched = omm.clone();
        enriched.insert(keys::FLIGHT_ID, self.flight_id.trim());
        enriched.insert(keys::LAUNCH_DATE, self.launch_date.trim());
        enriched.insert(keys::LAUNCH_TAG, self.launch_tag.trim());
        enriched.insert(keys::PIECE, self.piece.trim());
        enriched.insert(keys::JCAT, self.jcat.trim());
        enriched
    }
}

/// Read launch log rows from any tab-separated source.
///
/// Rows that cannot be decoded (e.g. invalid UTF-8) are logged and skipped; an I/O failure of
/// the underlying reader is fatal.
///
/// Arguments
/// -----------------
/// * `reader` – The TSV source, header row first.
///
/// Return
/// ----------
/// * The decoded rows in input order, or [`TleBinsError::CsvError`] on I/O failure.
pub fn parse_launch_log<R: Read>(reader: R) -> Result<Vec<LaunchLogRow>, TleBinsError> {
    let mut tsv = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in tsv.deserialize::<LaunchLogRow>() {
        match result {
            Ok(row) => rows.push(row),
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => warn!("Skipping launch log row: {err}"),
        }
    }
    Ok(rows)
}

/// Read the launch log file at `path`.
///
/// See also
/// ------------
/// * [`parse_launch_log`] – Decoding rules.
pub fn read_launch_log(path: &Utf8Path) -> Result<Vec<LaunchLogRow>, TleBinsError> {
    parse_launch_log(File::open(path)?)
}

/// Join launch log rows with an OMM catalog.
///
/// Arguments
/// -----------------
/// * `rows` – Launch log rows, in log order.
/// * `catalog` – OMM records indexed by `OBJECT_ID`.
/// * `marker` – Substring of `Name` identifying the constellation (e.g. `"Starlink"`).
///
/// Return
/// ----------
/// * The enriched OMM records, in log order.
pub fn join_flights(rows: &[LaunchLogRow], catalog: &OmmCatalog, marker: &str) -> Vec<OmmRecord> {
    rows.iter()
        .filter(|row| row.is_constellation_piece(marker))
        .filter_map(|row| catalog.get(row.piece.trim()).map(|omm| row.enrich(omm)))
        .collect()
}

/// Join launch log rows with an OMM catalog and group the result by flight id.
///
/// See also
/// ------------
/// * [`join_flights`] – Join rules.
/// * [`FlightBinning`] – Grouping on the attached `FLIGHT_ID`.
pub fn group_by_flight(
    rows: &[LaunchLogRow],
    catalog: &OmmCatalog,
    marker: &str,
) -> Groups<FlightId, OmmRecord> {
    // Every joined record carries a non-empty flight id, nothing is skipped here
    let (groups, _) = group_records(join_flights(rows, catalog, marker), &FlightBinning);
    groups
}

#[cfg(test)]
mod launch_log_test {
    use super::*;
    use crate::omm::parse_omm_catalog;
    use serde_json::{json, Value};

    const LOG: &str = "#Launch_Tag\tLaunch_Date\tPiece\tJCAT\tName\tFlight_ID\n\
2024-001\t2024 Jan  3\t2024-001A\tS58001\tStarlink-31 Flight 1\tF123\n\
2024-001\t2024 Jan  3\t2024-001B\tS58002\tStarlink-31 Flight 1\tF123\n\
2024-001\t2024 Jan  3\t2024-001Z\tS58026\tStarlink-31 Flight 1\tF123\n\
2024-002\t2024 Jan  4\t2024-002A\tS58030\tOneWeb-0601\tF124\n\
2024-003\t2024 Jan  5\t2024-003A\tS58040\tStarlink-32 Flight 2\t\n\
2024-004\t2024 Jan  6\t2024-004A\tS58050\tStarlink-33 Flight 3\n";

    fn catalog() -> OmmCatalog {
        let objects = ["2024-001A", "2024-001B", "2024-002A", "2024-003A", "2024-004A"]
            .into_iter()
            .map(|id| json!({"OBJECT_NAME": format!("OBJECT {id}"), "OBJECT_ID": id}))
            .collect::<Vec<_>>();
        parse_omm_catalog(&Value::Array(objects).to_string()).unwrap()
    }

    #[test]
    fn test_parse_launch_log() {
        let rows = parse_launch_log(LOG.as_bytes()).unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(
            rows[0],
            LaunchLogRow {
                name: "Starlink-31 Flight 1".into(),
                flight_id: "F123".into(),
                piece: "2024-001A".into(),
                launch_date: "2024 Jan  3".into(),
                launch_tag: "2024-001".into(),
                jcat: "S58001".into(),
            }
        );
        // Short row: the missing Flight_ID column reads as empty
        assert_eq!(rows[5].flight_id, "");
    }

    #[test]
    fn test_missing_optional_columns() {
        let rows = parse_launch_log("Name\tPiece\nStarlink-1\t2024-001A\n".as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].piece, "2024-001A");
        assert_eq!(rows[0].jcat, "");
        assert_eq!(rows[0].launch_tag, "");
    }

    #[test]
    fn test_join_flights() {
        let rows = parse_launch_log(LOG.as_bytes()).unwrap();
        let joined = join_flights(&rows, &catalog(), "Starlink");

        // 2024-001Z is not tracked, OneWeb is filtered, the last two have no flight id
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].object_id(), "2024-001A");
        assert_eq!(joined[0].object_name(), Some("OBJECT 2024-001A"));
        assert_eq!(joined[0].flight_id(), Some("F123"));
        assert_eq!(joined[0].text(keys::LAUNCH_DATE), Some("2024 Jan  3"));
        assert_eq!(joined[0].text(keys::LAUNCH_TAG), Some("2024-001"));
        assert_eq!(joined[0].text(keys::PIECE), Some("2024-001A"));
        assert_eq!(joined[0].text(keys::JCAT), Some("S58001"));
    }

    #[test]
    fn test_join_textual_catalog() {
        let catalog = parse_omm_catalog(
            r#"[{"OBJECT_ID": "2024-001A", "MEAN_MOTION": "15.06", "NORAD_CAT_ID": "58001"}]"#,
        )
        .unwrap();
        let rows = parse_launch_log(LOG.as_bytes()).unwrap();

        let groups = group_by_flight(&rows, &catalog, "Starlink");
        assert_eq!(groups.record_count(), 1);

        let record = &groups.get(&"F123".to_string()).unwrap()[0];
        assert_eq!(record.get("NORAD_CAT_ID"), Some(&json!("58001")));
        assert_eq!(record.number("MEAN_MOTION"), Ok(15.06));
    }

    #[test]
    fn test_group_by_flight() {
        let rows = parse_launch_log(LOG.as_bytes()).unwrap();
        let groups = group_by_flight(&rows, &catalog(), "Starlink");
        assert_eq!(groups.len(), 1);
        let ids = groups
            .get(&"F123".to_string())
            .unwrap()
            .iter()
            .map(OmmRecord::object_id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["2024-001A", "2024-001B"]);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_launch_log(Utf8Path::new("does/not/exist.tsv")),
            Err(TleBinsError::IoError(_))
        ));
    }
}
