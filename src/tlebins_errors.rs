use thiserror::Error;

use crate::tle::tle_record::ParseTleError;

#[derive(Error, Debug)]
pub enum TleBinsError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON (de)serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Launch log reading error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Error during the TLE parsing: {0}")]
    ParsingTleError(ParseTleError),

    #[error("Incomplete TLE triplet at line {0}")]
    IncompleteTleTriplet(usize),

    #[error("Mean motion must be strictly positive, got {0} rev/day")]
    NonPositiveMeanMotion(f64),

    #[error("Missing OMM field: {0}")]
    MissingOmmField(&'static str),

    #[error("Invalid OMM field {0}: {1}")]
    InvalidOmmField(&'static str, String),

    #[error("Invalid epoch: {0}")]
    InvalidEpoch(String),

    #[error("Invalid grouping parameter: {0}")]
    InvalidGroupingParameter(String),

    #[error("Record has no flight identifier: {0}")]
    MissingFlightId(String),

    #[error("Two groups resolve to the same output file: {0}")]
    OutputNameCollision(String),
}

impl From<ParseTleError> for TleBinsError {
    fn from(err: ParseTleError) -> Self {
        TleBinsError::ParsingTleError(err)
    }
}

impl PartialEq for TleBinsError {
    fn eq(&self, other: &Self) -> bool {
        use TleBinsError::*;
        match (self, other) {
            // Not comparable: equal when the variant matches
            (IoError(_), IoError(_)) => true,
            (JsonError(_), JsonError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            (ParsingTleError(a), ParsingTleError(b)) => a == b,
            (IncompleteTleTriplet(a), IncompleteTleTriplet(b)) => a == b,
            (NonPositiveMeanMotion(a), NonPositiveMeanMotion(b)) => a.to_bits() == b.to_bits(),
            (MissingOmmField(a), MissingOmmField(b)) => a == b,
            (InvalidOmmField(a, x), InvalidOmmField(b, y)) => a == b && x == y,
            (InvalidEpoch(a), InvalidEpoch(b)) => a == b,
            (InvalidGroupingParameter(a), InvalidGroupingParameter(b)) => a == b,
            (MissingFlightId(a), MissingFlightId(b)) => a == b,
            (OutputNameCollision(a), OutputNameCollision(b)) => a == b,

            _ => false,
        }
    }
}
