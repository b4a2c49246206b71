//! TestRepo builder for creating source-tree fixtures on disk

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use propscan::extract::TreeSitterParser;
use propscan::scan::{self, ScanOptions, ScanOutcome};
use propscan::schema::DocumentStore;

/// Builder for test repository structures
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new empty test repository
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Get the path to the test repository root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a source file with the given content
    pub fn add_file(&self, relative_path: &str, content: &str) -> &Self {
        let full_path = self.dir.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        self
    }

    /// Run a scan with default options
    pub fn scan(&self) -> ScanOutcome {
        self.scan_with(|_| {})
    }

    /// Run a scan with customized options
    pub fn scan_with(&self, configure: impl FnOnce(&mut ScanOptions)) -> ScanOutcome {
        let mut options = ScanOptions::new(self.path());
        configure(&mut options);
        scan::run(&options, &TreeSitterParser).expect("scan failed")
    }

    /// Read and deserialize the written document store
    pub fn read_store(&self) -> DocumentStore {
        let raw = fs::read_to_string(self.path().join("component_docs.json"))
            .expect("document store not written");
        serde_json::from_str(&raw).expect("document store is not valid JSON")
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
