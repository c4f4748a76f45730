//! Test helpers for laying out request and matrix files on disk.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use tripwise_core::{GreedySolver, RouteSolver};

use crate::schedule::{ScheduleConfig, ScheduleSolverBuilder};

/// Two places east of a start point; the nearer one is listed first.
pub(super) const TWO_PLACE_REQUEST: &str = r#"{
    "start_location": { "lat": 21.0, "lng": 105.80 },
    "places": [
        { "name": "Temple", "lat": 21.0, "lng": 105.81, "visit_minutes": 30 },
        { "name": "Lake", "lat": 21.0, "lng": 105.82, "visit_minutes": 20 }
    ],
    "start_time": "08:00"
}"#;

/// Travel seconds matching [`TWO_PLACE_REQUEST`].
pub(super) const TWO_PLACE_MATRIX: &str = "[[0, 600, 1200], [600, 0, 300], [1200, 300, 0]]";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// A temporary directory with UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        write_utf8(&path, contents.as_bytes());
        path
    }
}

/// Always hands out the nearest-neighbour solver.
#[derive(Debug)]
pub(super) struct GreedySolverBuilder;

impl ScheduleSolverBuilder for GreedySolverBuilder {
    fn build(&self, _config: &ScheduleConfig) -> Box<dyn RouteSolver> {
        Box::new(GreedySolver)
    }
}
