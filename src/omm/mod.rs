//! # Orbital Mean-Elements Messages
//!
//! JSON (CelesTrak style) counterpart of the TLE records.
//!
//! - [`omm_record`] – [`OmmRecord`], a catalog object kept as is with typed accessors, its
//!   conversion from a [`TleRecord`](crate::tle::TleRecord), and the OMM key names including
//!   the launch provenance keys added by the flight join.
//! - [`omm_catalog`] – loading of a full OMM catalog into an `OBJECT_ID` lookup table.
pub mod omm_catalog;
pub mod omm_record;

pub use omm_catalog::{parse_omm_catalog, read_omm_catalog, OmmCatalog};
pub use omm_record::{keys, OmmRecord};
