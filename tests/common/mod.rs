#![allow(dead_code)]

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

pub const TLE_SAMPLE: &str = "tests/data/starlink_sample.tle";
pub const OMM_SAMPLE: &str = "tests/data/starlink_omm.json";
pub const LAUNCH_LOG_SAMPLE: &str = "tests/data/launchlog.tsv";

/// Temporary output directory, removed when the guard is dropped.
pub fn output_dir() -> (TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8Path::from_path(dir.path()).unwrap().join("out");
    (dir, path)
}

/// Files under `root`, as sorted `/`-separated paths relative to `root`.
pub fn list_files(root: &Utf8Path) -> Vec<String> {
    fn walk(root: &Utf8Path, dir: &Utf8Path, files: &mut Vec<String>) {
        for entry in dir.read_dir_utf8().unwrap() {
            let path = entry.unwrap().into_path();
            if path.is_dir() {
                walk(root, &path, files);
            } else {
                let relative = path.strip_prefix(root).unwrap();
                files.push(relative.components().map(|c| c.as_str()).collect::<Vec<_>>().join("/"));
            }
        }
    }

    let mut files = Vec::new();
    walk(root, root, &mut files);
    files.sort();
    files
}

/// Names (line 0) of the records of a 3-line TLE file.
pub fn tle_names(path: &Utf8Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .step_by(3)
        .map(str::to_string)
        .collect()
}

pub fn read_json(path: &Utf8Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
