use hifitime::Epoch;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{Degree, Kilometer, TLE_DERIVED_COMMENT};
use crate::kepler::mean_motion_to_altitude;
use crate::time::{epoch_to_iso, iso_to_epoch};
use crate::tle::TleRecord;
use crate::tlebins_errors::TleBinsError;

/// OMM key names.
pub mod keys {
    pub const OBJECT_NAME: &str = "OBJECT_NAME";
    pub const OBJECT_ID: &str = "OBJECT_ID";
    pub const EPOCH: &str = "EPOCH";
    pub const MEAN_MOTION: &str = "MEAN_MOTION";
    pub const ECCENTRICITY: &str = "ECCENTRICITY";
    pub const INCLINATION: &str = "INCLINATION";
    pub const RA_OF_ASC_NODE: &str = "RA_OF_ASC_NODE";
    pub const ARG_OF_PERICENTER: &str = "ARG_OF_PERICENTER";
    pub const MEAN_ANOMALY: &str = "MEAN_ANOMALY";
    pub const EPHEMERIS_TYPE: &str = "EPHEMERIS_TYPE";
    pub const CLASSIFICATION_TYPE: &str = "CLASSIFICATION_TYPE";
    pub const NORAD_CAT_ID: &str = "NORAD_CAT_ID";
    pub const ELEMENT_SET_NO: &str = "ELEMENT_SET_NO";
    pub const REV_AT_EPOCH: &str = "REV_AT_EPOCH";
    pub const BSTAR: &str = "BSTAR";
    pub const MEAN_MOTION_DOT: &str = "MEAN_MOTION_DOT";
    pub const MEAN_MOTION_DDOT: &str = "MEAN_MOTION_DDOT";
    pub const TLE_LINE1: &str = "TLE_LINE1";
    pub const TLE_LINE2: &str = "TLE_LINE2";
    pub const COMMENT: &str = "COMMENT";

    // Launch provenance, attached by the flight join
    pub const FLIGHT_ID: &str = "FLIGHT_ID";
    pub const LAUNCH_DATE: &str = "LAUNCH_DATE";
    pub const LAUNCH_TAG: &str = "LAUNCH_TAG";
    pub const PIECE: &str = "PIECE";
    pub const JCAT: &str = "JCAT";
}

/// Orbital Mean-Elements Message in its JSON form (CelesTrak / Space-Track).
///
/// The record is the catalog object itself: every key is kept with its original value, type
/// and position, and is serialized back unchanged. Orbital quantities are read on demand;
/// numeric fields accept JSON numbers as well as numeric strings, so a malformed or missing
/// field only fails the operation that needs it.
///
/// A record obtained from a catalog always has a string `OBJECT_ID` (see
/// [`OmmRecord::from_fields`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OmmRecord {
    fields: Map<String, Value>,
}

impl OmmRecord {
    /// Wrap a catalog object.
    ///
    /// Return
    /// ----------
    /// * `None` when the object has no string `OBJECT_ID`.
    pub fn from_fields(fields: Map<String, Value>) -> Option<Self> {
        fields
            .get(keys::OBJECT_ID)
            .is_some_and(Value::is_string)
            .then_some(OmmRecord { fields })
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set `key`. An existing key keeps its position, a new one is appended.
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.to_string(), value.into())
    }

    /// String value of `key`, if present and a string.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// `OBJECT_ID`, empty for a record built without one.
    pub fn object_id(&self) -> &str {
        self.text(keys::OBJECT_ID).unwrap_or_default()
    }

    pub fn object_name(&self) -> Option<&str> {
        self.text(keys::OBJECT_NAME)
    }

    /// `FLIGHT_ID` attached by the flight join.
    pub fn flight_id(&self) -> Option<&str> {
        self.text(keys::FLIGHT_ID)
    }

    /// Numeric value of `key`, from a JSON number or a numeric string.
    ///
    /// Return
    /// ----------
    /// * The value, [`TleBinsError::MissingOmmField`] if the key is absent or `null`, or
    ///   [`TleBinsError::InvalidOmmField`] if it holds anything else than a finite number.
    pub fn number(&self, key: &'static str) -> Result<f64, TleBinsError> {
        let value = match self.fields.get(key) {
            None | Some(Value::Null) => return Err(TleBinsError::MissingOmmField(key)),
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
            Some(_) => None,
        };

        value
            .filter(|v| v.is_finite())
            .ok_or_else(|| TleBinsError::InvalidOmmField(key, self.fields[key].to_string()))
    }

    /// Right ascension of the ascending node (degrees).
    pub fn raan(&self) -> Result<Degree, TleBinsError> {
        self.number(keys::RA_OF_ASC_NODE)
    }

    /// Mean altitude (km) derived from `MEAN_MOTION`, circular orbit assumed.
    pub fn altitude(&self) -> Result<Kilometer, TleBinsError> {
        mean_motion_to_altitude(self.number(keys::MEAN_MOTION)?)
    }

    /// The `EPOCH` field parsed as a UTC [`Epoch`].
    pub fn parsed_epoch(&self) -> Result<Epoch, TleBinsError> {
        match self.fields.get(keys::EPOCH) {
            None | Some(Value::Null) => Err(TleBinsError::MissingOmmField(keys::EPOCH)),
            Some(Value::String(epoch)) => iso_to_epoch(epoch),
            Some(other) => Err(TleBinsError::InvalidOmmField(keys::EPOCH, other.to_string())),
        }
    }
}

impl From<&TleRecord> for OmmRecord {
    fn from(tle: &TleRecord) -> Self {
        let fields = [
            (keys::OBJECT_NAME, Value::from(tle.name.as_str())),
            (keys::OBJECT_ID, Value::from(tle.object_id.as_str())),
            (keys::EPOCH, Value::from(epoch_to_iso(&tle.epoch))),
            (keys::MEAN_MOTION, Value::from(tle.mean_motion)),
            (keys::ECCENTRICITY, Value::from(tle.eccentricity)),
            (keys::INCLINATION, Value::from(tle.inclination)),
            (keys::RA_OF_ASC_NODE, Value::from(tle.ra_of_asc_node)),
            (keys::ARG_OF_PERICENTER, Value::from(tle.arg_of_pericenter)),
            (keys::MEAN_ANOMALY, Value::from(tle.mean_anomaly)),
            (keys::EPHEMERIS_TYPE, Value::from(tle.ephemeris_type)),
            (keys::CLASSIFICATION_TYPE, Value::from(tle.classification.to_string())),
            (keys::NORAD_CAT_ID, Value::from(tle.norad_cat_id)),
            (keys::ELEMENT_SET_NO, Value::from(tle.element_set_no)),
            (keys::REV_AT_EPOCH, Value::from(tle.rev_at_epoch)),
            (keys::BSTAR, Value::from(tle.bstar)),
            (keys::MEAN_MOTION_DOT, Value::from(tle.mean_motion_dot)),
            (keys::MEAN_MOTION_DDOT, Value::from(tle.mean_motion_ddot)),
            (keys::TLE_LINE1, Value::from(tle.line1.as_str())),
            (keys::TLE_LINE2, Value::from(tle.line2.as_str())),
            (keys::COMMENT, Value::from(TLE_DERIVED_COMMENT)),
        ];

        OmmRecord {
            fields: fields
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        }
    }
}

impl From<TleRecord> for OmmRecord {
    fn from(tle: TleRecord) -> Self {
        OmmRecord::from(&tle)
    }
}
