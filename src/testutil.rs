use std::fs;
use std::path::{Path, PathBuf};

/// A throwaway directory tree under the OS temp dir, removed on drop.
/// Labels must be unique per test since tests run in parallel.
pub struct TestDir {
    path: PathBuf,
}

impl TestDir {
    pub fn new(label: &str) -> Self {
        let path = std::env::temp_dir().join(format!("asset-server-{}-{}", label, std::process::id()));
        if path.exists() {
            fs::remove_dir_all(&path).expect("clear stale test dir");
        }
        fs::create_dir_all(&path).expect("create test dir");
        // Canonical so that resolved paths compare equal under symlinked
        // temp dirs.
        let path = path.canonicalize().expect("canonicalize test dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a file at `relative`, creating parent directories as needed.
    pub fn write(&self, relative: &str, contents: &[u8]) {
        let target = self.path.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&target, contents).expect("write fixture file");
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}
