//! Test fixtures for creating reproducible vaults.
//!
//! Provides pre-built vault layouts and task documents for consistent testing.

use std::path::Path;
use tempfile::TempDir;

use crate::config::PanelConfig;
use crate::vault::{FsVault, Vault};

/// A nested task document with completed, pending and orphan tasks.
pub const SAMPLE_TASKS: &str = "\
# Weekly plan

- [ ] Prepare release
  - [x] Update changelog
  - [ ] Tag version
    - [ ] Push tag
- [x] Reply to emails
Some notes in between.
  - [ ] Orphan without a parent
";

/// A second, flat task document.
pub const SAMPLE_ERRANDS: &str = "- [ ] Buy milk\n- [ ] Buy milk and eggs\n";

/// A temporary on-disk vault with the default task folder.
///
/// Automatically cleans up when dropped.
pub struct TestVault {
    temp_dir: TempDir,
    config: PanelConfig,
}

impl TestVault {
    /// Create an empty vault.
    ///
    /// # Panics
    ///
    /// Panics if temporary directory creation fails.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            config: PanelConfig::default(),
        }
    }

    /// Create a vault whose task folder holds the two sample documents.
    ///
    /// # Panics
    ///
    /// Panics if file creation fails.
    #[must_use]
    pub fn with_sample_tasks() -> Self {
        let fixture = Self::empty();
        let mut vault = fixture.vault();
        vault
            .write_text(&fixture.task_path("plan.md"), SAMPLE_TASKS)
            .expect("Failed to write plan.md");
        vault
            .write_text(&fixture.task_path("errands.md"), SAMPLE_ERRANDS)
            .expect("Failed to write errands.md");
        fixture
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    #[must_use]
    pub fn vault(&self) -> FsVault {
        FsVault::new(self.temp_dir.path())
    }

    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Vault path of a file inside the task folder.
    #[must_use]
    pub fn task_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.config.task_folder_path, file_name)
    }

    /// Read a vault file straight from disk.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be read.
    #[must_use]
    pub fn read(&self, vault_path: &str) -> String {
        self.vault().read_text(vault_path).expect("Failed to read file")
    }
}
