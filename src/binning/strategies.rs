use ordered_float::OrderedFloat;

use crate::binning::{bin_value, check_bin_width, BinStrategy, OrbitalRecord, RecordLabel};
use crate::constants::{Degree, FlightId, Kilometer};
use crate::omm::OmmRecord;
use crate::tle::TleRecord;
use crate::tlebins_errors::TleBinsError;

/// Lower RAAN boundary (degrees) of an orbital plane bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaneKey(pub OrderedFloat<Degree>);

/// Lower altitude boundary (km) of a shell bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShellKey(pub OrderedFloat<Kilometer>);

/// Compound key: altitude shell first, then orbital plane inside the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShellPlaneKey {
    pub shell: ShellKey,
    pub plane: PlaneKey,
}

impl PlaneKey {
    pub fn degrees(&self) -> Degree {
        self.0.into_inner()
    }
}

impl ShellKey {
    pub fn km(&self) -> Kilometer {
        self.0.into_inner()
    }
}

/// Bin on the right ascension of the ascending node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneBinning {
    raan_bin_width: Degree,
}

impl PlaneBinning {
    pub fn new(raan_bin_width: Degree) -> Result<Self, TleBinsError> {
        Ok(PlaneBinning {
            raan_bin_width: check_bin_width("raan_bin_width", raan_bin_width)?,
        })
    }

    pub fn plane_of(&self, raan: Degree) -> PlaneKey {
        PlaneKey(OrderedFloat(bin_value(raan, self.raan_bin_width)))
    }
}

impl<R: OrbitalRecord> BinStrategy<R> for PlaneBinning {
    type Key = PlaneKey;

    fn bin_key(&self, record: &R) -> Result<PlaneKey, TleBinsError> {
        Ok(self.plane_of(record.raan()?))
    }
}

/// Bin on the mean altitude derived from the mean motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellBinning {
    altitude_bin_width: Kilometer,
}

impl ShellBinning {
    pub fn new(altitude_bin_width: Kilometer) -> Result<Self, TleBinsError> {
        Ok(ShellBinning {
            altitude_bin_width: check_bin_width("altitude_bin_width", altitude_bin_width)?,
        })
    }

    pub fn shell_of(&self, altitude: Kilometer) -> ShellKey {
        ShellKey(OrderedFloat(bin_value(altitude, self.altitude_bin_width)))
    }
}

impl<R: OrbitalRecord> BinStrategy<R> for ShellBinning {
    type Key = ShellKey;

    fn bin_key(&self, record: &R) -> Result<ShellKey, TleBinsError> {
        Ok(self.shell_of(record.altitude()?))
    }
}

/// Bin on altitude shell, then on orbital plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellPlaneBinning {
    shell: ShellBinning,
    plane: PlaneBinning,
}

impl ShellPlaneBinning {
    pub fn new(altitude_bin_width: Kilometer, raan_bin_width: Degree) -> Result<Self, TleBinsError> {
        Ok(ShellPlaneBinning {
            shell: ShellBinning::new(altitude_bin_width)?,
            plane: PlaneBinning::new(raan_bin_width)?,
        })
    }
}

impl<R: OrbitalRecord> BinStrategy<R> for ShellPlaneBinning {
    type Key = ShellPlaneKey;

    fn bin_key(&self, record: &R) -> Result<ShellPlaneKey, TleBinsError> {
        Ok(ShellPlaneKey {
            shell: self.shell.bin_key(record)?,
            plane: self.plane.bin_key(record)?,
        })
    }
}

/// Bin on the launch-log flight identifier attached by the flight join.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlightBinning;

impl BinStrategy<OmmRecord> for FlightBinning {
    type Key = FlightId;

    fn bin_key(&self, record: &OmmRecord) -> Result<FlightId, TleBinsError> {
        record
            .flight_id()
            .filter(|flight_id| !flight_id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| TleBinsError::MissingFlightId(record.object_id().to_string()))
    }
}

impl RecordLabel for TleRecord {
    fn label(&self) -> &str {
        &self.name
    }
}

impl OrbitalRecord for TleRecord {
    fn raan(&self) -> Result<Degree, TleBinsError> {
        Ok(self.ra_of_asc_node)
    }

    fn altitude(&self) -> Result<Kilometer, TleBinsError> {
        TleRecord::altitude(self)
    }
}

impl RecordLabel for OmmRecord {
    fn label(&self) -> &str {
        self.object_name().unwrap_or(self.object_id())
    }
}

impl OrbitalRecord for OmmRecord {
    fn raan(&self) -> Result<Degree, TleBinsError> {
        OmmRecord::raan(self)
    }

    fn altitude(&self) -> Result<Kilometer, TleBinsError> {
        OmmRecord::altitude(self)
    }
}
