//! # Two-Line Element sets
//!
//! Fixed-width TLE decoding:
//!
//! - [`tle_record`] – one `name / line 1 / line 2` triplet → [`TleRecord`], with the packed
//!   exponential decoder used by BSTAR and the second derivative of mean motion.
//! - [`tle_reader`] – whole 3-line catalogs → [`TleBatch`], skipping malformed triplets.
pub mod tle_reader;
pub mod tle_record;

pub use tle_reader::{parse_tle_text, read_tle_file, TleBatch};
pub use tle_record::{decode_packed_exponent, ParseTleError, TleRecord};
