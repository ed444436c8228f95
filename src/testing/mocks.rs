//! In-memory test doubles.
//!
//! These mocks provide controllable stand-ins for the vault, enabling
//! deterministic unit tests without touching the disk.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::{Result, TaskPanelError};
use crate::vault::{normalize_path, FileHandle, Vault};

/// Vault that keeps every file in memory.
///
/// # Example
///
/// ```
/// use taskpanel::testing::MemoryVault;
/// use taskpanel::vault::Vault;
///
/// let mut vault = MemoryVault::new().with_file("tasks/a.md", "- [ ] A");
/// vault.write_text("tasks/b.md", "- [x] B").unwrap();
/// assert_eq!(vault.list_files("tasks").unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryVault {
    files: BTreeMap<String, String>,
    directories: BTreeSet<String>,
    unreadable: HashSet<String>,
    writes: usize,
}

impl MemoryVault {
    /// Create a new empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single file.
    #[must_use]
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(normalize_path(path), content.to_string());
        self
    }

    /// Make reads of `path` fail while it still shows up in listings.
    #[must_use]
    pub fn with_unreadable(mut self, path: &str) -> Self {
        self.unreadable.insert(normalize_path(path));
        self
    }

    /// Content of a file, if present.
    #[must_use]
    pub fn file(&self, path: &str) -> Option<&str> {
        self.files.get(&normalize_path(path)).map(String::as_str)
    }

    /// Number of successful `write_text` calls so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl Vault for MemoryVault {
    fn list_files(&self, path_prefix: &str) -> Result<Vec<FileHandle>> {
        let prefix = normalize_path(path_prefix);
        let prefix = if prefix.is_empty() {
            prefix
        } else {
            format!("{}/", prefix)
        };

        Ok(self
            .files
            .keys()
            .filter(|path| path.starts_with(&prefix))
            .map(|path| FileHandle::from_path(path.clone()))
            .collect())
    }

    fn read_text(&self, path: &str) -> Result<String> {
        let path = normalize_path(path);
        if self.unreadable.contains(&path) {
            return Err(anyhow::anyhow!("Permission denied: {}", path).into());
        }
        self.files
            .get(&path)
            .cloned()
            .ok_or(TaskPanelError::MissingFile { path })
    }

    fn write_text(&mut self, path: &str, content: &str) -> Result<()> {
        self.files.insert(normalize_path(path), content.to_string());
        self.writes += 1;
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        let path = normalize_path(path);
        let folder = format!("{}/", path);
        self.files.contains_key(&path)
            || self.directories.contains(&path)
            || self.files.keys().any(|file| file.starts_with(&folder))
    }

    fn create_dir(&mut self, path: &str) -> Result<()> {
        let mut current = String::new();
        for segment in normalize_path(path).split('/').filter(|s| !s.is_empty()) {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(segment);
            self.directories.insert(current.clone());
        }
        Ok(())
    }
}
