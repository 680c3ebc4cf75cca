pub mod binning;
pub mod constants;
pub mod grouping_params;
pub mod kepler;
pub mod launch_log;
pub mod omm;
pub mod pipeline;
pub mod time;
pub mod tle;
pub mod tlebins_errors;
pub mod writer;

pub use grouping_params::GroupingParams;
pub use pipeline::{
    group_omm_by_flight, group_tles_by_plane, group_tles_by_shell_and_plane,
    group_tles_to_omm_json, RunSummary,
};
pub use tlebins_errors::TleBinsError;
