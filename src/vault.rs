//! Storage collaborator for task files.
//!
//! A vault is a directory tree addressed with `/`-separated relative paths.
//! The task core never touches it; the panel and scaffolding read and write
//! whole files through the [`Vault`] trait.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, TaskPanelError};

/// A file inside a vault.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FileHandle {
    /// Vault-relative path with `/` separators.
    pub path: String,
    /// Last path component.
    pub name: String,
    /// Extension without the dot, empty when there is none.
    pub extension: String,
}

impl FileHandle {
    #[must_use]
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or(&path).to_string();
        let extension = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_string(),
            _ => String::new(),
        };
        Self {
            path,
            name,
            extension,
        }
    }

    /// Whether this is a Markdown file.
    #[must_use]
    pub fn is_markdown(&self) -> bool {
        self.extension == "md"
    }
}

/// Abstraction over the note storage.
///
/// Enables running the panel against the local file system or in memory.
pub trait Vault {
    /// List every file below the folder `path_prefix`, sorted by path.
    ///
    /// A missing folder yields an empty list. Entries that cannot be read
    /// are left out; the rest of the folder is still listed.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be listed at all.
    fn list_files(&self, path_prefix: &str) -> Result<Vec<FileHandle>>;

    /// Read a file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskPanelError::MissingFile`] if the file does not exist.
    fn read_text(&self, path: &str) -> Result<String>;

    /// Replace a file's content, creating parent folders if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be written.
    fn write_text(&mut self, path: &str, content: &str) -> Result<()>;

    /// Check if a file or folder exists.
    fn exists(&self, path: &str) -> bool;

    /// Create a folder and its parents. Existing folders are fine.
    ///
    /// # Errors
    ///
    /// Returns an error if folder creation fails.
    fn create_dir(&mut self, path: &str) -> Result<()>;
}

/// Normalize a vault path: `\` becomes `/`, empty and `.` segments and
/// surrounding slashes are dropped.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Parent folder of a vault path, `None` at the vault root.
#[must_use]
pub fn parent_folder(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(parent, _)| parent)
}

// ============================================================================
// File-system vault
// ============================================================================

/// Vault backed by a directory on the local file system.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute location of a vault path.
    #[must_use]
    pub fn resolve(&self, path: &str) -> PathBuf {
        normalize_path(path)
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }

    fn relative_path(&self, absolute: &Path) -> Option<String> {
        let relative = absolute.strip_prefix(&self.root).ok()?;
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(segments.join("/"))
    }
}

impl Vault for FsVault {
    fn list_files(&self, path_prefix: &str) -> Result<Vec<FileHandle>> {
        let folder = self.resolve(path_prefix);
        if !folder.is_dir() {
            debug!("Folder {} does not exist, no files", folder.display());
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&folder).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", folder.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(path) = self.relative_path(entry.path()) {
                files.push(FileHandle::from_path(path));
            }
        }

        files.sort();
        Ok(files)
    }

    fn read_text(&self, path: &str) -> Result<String> {
        let absolute = self.resolve(path);
        if !absolute.is_file() {
            return Err(TaskPanelError::MissingFile {
                path: path.to_string(),
            });
        }
        let content = fs::read_to_string(&absolute)
            .with_context(|| format!("Failed to read {}", absolute.display()))?;
        Ok(content)
    }

    fn write_text(&mut self, path: &str, content: &str) -> Result<()> {
        let absolute = self.resolve(path);
        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&absolute, content)
            .with_context(|| format!("Failed to write {}", absolute.display()))?;
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    fn create_dir(&mut self, path: &str) -> Result<()> {
        let absolute = self.resolve(path);
        fs::create_dir_all(&absolute)
            .with_context(|| format!("Failed to create {}", absolute.display()))?;
        Ok(())
    }
}
