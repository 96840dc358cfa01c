//! Common test utilities and helpers

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One access log line in the layout logsweep parses
pub fn access_line(day: &str, time: &str, micros: u64) -> String {
    format!(
        "10.0.0.1 - - [{day}:{time} -0700] \"GET /resolve?id=1 HTTP/1.1\" 200 231 \"-\" \"curl/7.38\" {micros}\n"
    )
}

/// Temporary directory holding an access log and anything a run writes
pub struct TestLog {
    temp_dir: TempDir,
    log_path: PathBuf,
}

impl TestLog {
    /// Write `lines` verbatim to `access.log` in a fresh directory
    pub fn new(lines: &[String]) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let log_path = temp_dir.path().join("access.log");
        fs::write(&log_path, lines.concat()).expect("write access log");
        Self { temp_dir, log_path }
    }

    /// Two overlapping requests then one disjoint request, all on one day
    pub fn overlapping_then_disjoint() -> Self {
        Self::new(&[
            access_line("12/Mar/2015", "10:00:00", 3_000_000),
            access_line("12/Mar/2015", "10:00:01", 4_000_000),
            access_line("12/Mar/2015", "10:00:10", 1_000_000),
        ])
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file next to the log and return its path
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content).expect("write file");
        path
    }
}
