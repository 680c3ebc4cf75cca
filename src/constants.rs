//! # Constants and type definitions for tlebins
//!
//! This module centralizes the **physical constants**, **default run configuration**, and
//! **common type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Geophysical constants used to derive altitudes from mean motion
//! - Default bin widths for the plane and shell pipelines
//! - Default input/output locations of the grouping binaries
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Earth standard gravitational parameter μ in km³/s²
pub const MU_EARTH: f64 = 398_600.4418;

/// Mean Earth radius in kilometers, subtracted from the semi-major axis to get an altitude
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Two-digit TLE years strictly below this pivot belong to the 21st century
pub const TLE_YEAR_PIVOT: i32 = 57;

// -------------------------------------------------------------------------------------------------
// Default run configuration
// -------------------------------------------------------------------------------------------------

/// RAAN bin width (degrees) used when grouping by orbital plane only
pub const DEFAULT_PLANE_RAAN_BIN_WIDTH: Degree = 2.0;

/// RAAN bin width (degrees) used inside each altitude shell
pub const DEFAULT_SHELL_RAAN_BIN_WIDTH: Degree = 10.0;

/// Altitude bin width (km) separating shells
pub const DEFAULT_ALTITUDE_BIN_WIDTH: Kilometer = 100.0;

/// Substring of the launch-log `Name` column identifying the constellation of interest
pub const DEFAULT_CONSTELLATION_MARKER: &str = "Starlink";

/// Full constellation catalog in TLE (3-line) form
pub const DEFAULT_TLE_FILE: &str = "../public/TLEs/starlink_all.txt";

/// Full constellation catalog in OMM JSON form
pub const DEFAULT_OMM_FILE: &str = "../public/TLEs/starlink.json";

/// Tab-separated launch log
pub const DEFAULT_LAUNCH_LOG_FILE: &str = "data/launchlog.tsv";

/// Output directory of the per-plane TLE files
pub const DEFAULT_PLANE_OUTPUT_DIR: &str = "../public/TLEs/starlink/grouped_planes";

/// Output directory of the per-shell TLE files
pub const DEFAULT_SHELL_OUTPUT_DIR: &str = "../public/TLEs/starlink/grouped_shells";

/// Output directory of the per-shell OMM JSON files
pub const DEFAULT_SHELL_JSON_OUTPUT_DIR: &str = "../public/TLEs/starlink/grouped_shells_json";

/// Output directory of the per-flight OMM JSON files
pub const DEFAULT_FLIGHT_OUTPUT_DIR: &str = "../public/TLEs/json_by_flight";

/// `COMMENT` attached to OMM records generated from TLE lines
pub const TLE_DERIVED_COMMENT: &str = "Grouped by shell and plane from TLE";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Mean motion in revolutions per day
pub type RevPerDay = f64;
/// International designator of an object (e.g. `2024-001A`)
pub type ObjectId = String;
/// Flight identifier taken from the launch log
pub type FlightId = String;
