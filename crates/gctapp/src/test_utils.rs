use crate::clock::ManualClock;
use crate::store::fs_backend::FsBackend;
use crate::store::JsonRepository;
use chrono::{DateTime, TimeZone, Utc};
use std::path::PathBuf;
use tempfile::TempDir;

/// Fixed instant every test clock starts from: 2024-05-01T10:00:00Z.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0)
        .single()
        .expect("valid fixed timestamp")
}

pub fn manual_clock() -> ManualClock {
    ManualClock::new(epoch())
}

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub repo: JsonRepository,
    pub data_file: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let data_file = temp_dir.path().join("gct").join("todos.json");
        let repo = JsonRepository::with_backend(FsBackend::new(&data_file));
        Self {
            _temp_dir: temp_dir,
            repo,
            data_file,
        }
    }

    /// Overwrite the data file with `contents`, creating its directory.
    pub fn write_data_file(&self, contents: &str) {
        if let Some(parent) = self.data_file.parent() {
            std::fs::create_dir_all(parent).expect("failed to create data dir");
        }
        std::fs::write(&self.data_file, contents).expect("failed to write data file");
    }
}
