//! Group a TLE catalog by orbital plane.
//!
//! Usage: `group_by_plane [TLE_FILE] [OUTPUT_DIR]`
use std::env;

use camino::Utf8PathBuf;
use env_logger::{Builder, Target};

use tlebins::constants::{DEFAULT_PLANE_OUTPUT_DIR, DEFAULT_TLE_FILE};
use tlebins::{group_tles_by_plane, GroupingParams, TleBinsError};

fn main() -> Result<(), TleBinsError> {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let mut args = env::args().skip(1);
    let tle_path = Utf8PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_TLE_FILE.into()));
    let output_dir =
        Utf8PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_PLANE_OUTPUT_DIR.into()));

    let params = GroupingParams::builder().build()?;
    let summary = group_tles_by_plane(&tle_path, &output_dir, &params)?;
    println!("{summary}");
    Ok(())
}
