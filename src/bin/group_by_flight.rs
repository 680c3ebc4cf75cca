//! Join the launch log with an OMM catalog and write one JSON array per launch flight.
//!
//! Usage: `group_by_flight [LAUNCH_LOG] [OMM_FILE] [OUTPUT_DIR]`
//!
//! The constellation marker can be changed with the `TLEBINS_MARKER` environment variable.
use std::env;

use camino::Utf8PathBuf;
use env_logger::{Builder, Target};

use tlebins::constants::{DEFAULT_FLIGHT_OUTPUT_DIR, DEFAULT_LAUNCH_LOG_FILE, DEFAULT_OMM_FILE};
use tlebins::{group_omm_by_flight, GroupingParams, TleBinsError};

fn main() -> Result<(), TleBinsError> {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let mut args = env::args().skip(1);
    let launch_log =
        Utf8PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_LAUNCH_LOG_FILE.into()));
    let omm_path = Utf8PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_OMM_FILE.into()));
    let output_dir =
        Utf8PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_FLIGHT_OUTPUT_DIR.into()));

    let mut params = GroupingParams::builder();
    if let Ok(marker) = env::var("TLEBINS_MARKER") {
        params = params.constellation_marker(marker);
    }
    let params = params.build()?;

    let summary = group_omm_by_flight(&launch_log, &omm_path, &output_dir, &params)?;
    println!("{summary}");
    Ok(())
}
