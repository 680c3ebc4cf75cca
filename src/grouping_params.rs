//! # Grouping parameters
//!
//! [`GroupingParams`] carries the tunable values shared by the grouping pipelines, and
//! [`GroupingParamsBuilder`] validates them before a run starts.
//!
//! ## Parameters
//! -----------------
//! * `raan_bin_width` – Width of an orbital plane bin (degrees).
//! * `altitude_bin_width` – Width of an altitude shell bin (km).
//! * `constellation_marker` – Substring of the launch log `Name` column selecting the
//!   constellation pieces for the flight join.
//!
//! The plane pipeline uses narrow RAAN bins (`2°`), the shell pipelines coarser ones (`10°`);
//! start from [`GroupingParams::builder`] or [`GroupingParams::shell_builder`] accordingly.
//!
//! ## Example
//!
//! ```rust
//! use tlebins::grouping_params::GroupingParams;
//!
//! let params = GroupingParams::shell_builder()
//!     .altitude_bin_width(50.0)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.raan_bin_width, 10.0);
//! ```
use std::fmt;

use crate::binning::check_bin_width;
use crate::constants::{
    Degree, Kilometer, DEFAULT_ALTITUDE_BIN_WIDTH, DEFAULT_CONSTELLATION_MARKER,
    DEFAULT_PLANE_RAAN_BIN_WIDTH, DEFAULT_SHELL_RAAN_BIN_WIDTH,
};
use crate::tlebins_errors::TleBinsError;

#[derive(Debug, Clone, PartialEq)]
pub struct GroupingParams {
    pub raan_bin_width: Degree,
    pub altitude_bin_width: Kilometer,
    pub constellation_marker: String,
}

impl GroupingParams {
    /// Builder starting from the plane pipeline defaults.
    pub fn builder() -> GroupingParamsBuilder {
        GroupingParamsBuilder::new()
    }

    /// Builder starting from the shell pipeline defaults (coarser RAAN bins).
    pub fn shell_builder() -> GroupingParamsBuilder {
        GroupingParamsBuilder::new().raan_bin_width(DEFAULT_SHELL_RAAN_BIN_WIDTH)
    }
}

impl Default for GroupingParams {
    fn default() -> Self {
        GroupingParams {
            raan_bin_width: DEFAULT_PLANE_RAAN_BIN_WIDTH,
            altitude_bin_width: DEFAULT_ALTITUDE_BIN_WIDTH,
            constellation_marker: DEFAULT_CONSTELLATION_MARKER.to_string(),
        }
    }
}

/// Builder for [`GroupingParams`], with validation.
#[derive(Debug, Clone)]
pub struct GroupingParamsBuilder {
    params: GroupingParams,
}

impl Default for GroupingParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupingParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: GroupingParams::default(),
        }
    }

    pub fn raan_bin_width(mut self, v: Degree) -> Self {
        self.params.raan_bin_width = v;
        self
    }
    pub fn altitude_bin_width(mut self, v: Kilometer) -> Self {
        self.params.altitude_bin_width = v;
        self
    }
    pub fn constellation_marker(mut self, v: impl Into<String>) -> Self {
        self.params.constellation_marker = v.into();
        self
    }

    /// Finalize the builder.
    ///
    /// Return
    /// ----------
    /// * The parameters, or [`TleBinsError::InvalidGroupingParameter`] if a width is not
    ///   finite and strictly positive or the constellation marker is blank.
    pub fn build(self) -> Result<GroupingParams, TleBinsError> {
        let p = &self.params;

        check_bin_width("raan_bin_width", p.raan_bin_width)?;
        check_bin_width("altitude_bin_width", p.altitude_bin_width)?;

        if p.constellation_marker.trim().is_empty() {
            return Err(TleBinsError::InvalidGroupingParameter(
                "constellation_marker must not be empty".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for GroupingParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Grouping Parameters")?;
            writeln!(f, "-------------------")?;
            writeln!(f, "  raan_bin_width       = {:.3} deg", self.raan_bin_width)?;
            writeln!(f, "  altitude_bin_width   = {:.3} km", self.altitude_bin_width)?;
            writeln!(f, "  constellation_marker = {:?}", self.constellation_marker)
        } else {
            write!(
                f,
                "GroupingParams(raan={}°, altitude={} km, marker={:?})",
                self.raan_bin_width, self.altitude_bin_width, self.constellation_marker
            )
        }
    }
}

#[cfg(test)]
mod grouping_params_test {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = GroupingParams::builder().build().unwrap();
        assert_eq!(params, GroupingParams::default());
        assert_eq!(params.raan_bin_width, 2.0);
        assert_eq!(params.altitude_bin_width, 100.0);
        assert_eq!(params.constellation_marker, "Starlink");

        let shells = GroupingParams::shell_builder().build().unwrap();
        assert_eq!(shells.raan_bin_width, 10.0);
    }

    #[test]
    fn test_invalid_parameters() {
        let err = GroupingParams::builder().raan_bin_width(0.0).build();
        assert!(matches!(err, Err(TleBinsError::InvalidGroupingParameter(_))));

        let err = GroupingParams::builder()
            .altitude_bin_width(f64::INFINITY)
            .build();
        assert!(matches!(err, Err(TleBinsError::InvalidGroupingParameter(_))));

        let err = GroupingParams::builder().constellation_marker("  ").build();
        assert!(matches!(err, Err(TleBinsError::InvalidGroupingParameter(_))));
    }

    #[test]
    fn test_display() {
        let params = GroupingParams::default();
        assert_eq!(
            params.to_string(),
            "GroupingParams(raan=2°, altitude=100 km, marker=\"Starlink\")"
        );
        assert!(format!("{params:#}").contains("raan_bin_width       = 2.000 deg"));
    }
}
