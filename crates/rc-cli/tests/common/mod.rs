#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the running-chart binary.
#[macro_export]
macro_rules! running_chart {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("running-chart"))
    };
}

pub const SAMPLE_LOG: &str = "\
# date      time     km
2022-01-03  30:00    5
2022-01-05  1:02:10  10.5   long run
2022-01-05  -        1.5
2022-02-14  -        3
2021-12-31  25:00    5
";

/// Temporary working directory for a single CLI run.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }
}
