//! Task panel orchestration.
//!
//! The panel drives one read -> compute -> write sequence per action:
//!
//! ```text
//! ┌────────────┐ list/read ┌────────────┐ parse_file ┌──────────────┐
//! │   Vault    │──────────>│ TaskPanel  │───────────>│ TaskSnapshot │
//! │            │<──────────│            │<───────────│ (generation) │
//! └────────────┘   write   └────────────┘  task/id   └──────────────┘
//! ```
//!
//! Snapshots are plain values. Every call to [`TaskPanel::snapshot`]
//! produces a new generation; tasks from an older generation may point at
//! the wrong line once the file has changed, so the panel warns when it is
//! asked to act on a stale snapshot. There is no locking: two updates to the
//! same file race and the last write wins.

mod refresh;

pub use refresh::{watch, watch_until, RefreshSchedule};

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::PanelConfig;
use crate::error::{Result, TaskPanelError};
use crate::task::{
    locate as locate_line, parse_file, set_completion, LineIndex, Mutation, Task, TaskForest, TaskId,
};
use crate::vault::Vault;

/// Digest of file content, used to detect edits between parse and update.
#[must_use]
pub fn content_fingerprint(content: &str) -> String {
    format!("{:x}", md5::compute(content.as_bytes()))
}

// ============================================================================
// Snapshot
// ============================================================================

/// Tasks of every task file from one parse pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskSnapshot {
    /// Increases by one with every parse a panel performs.
    pub generation: u64,
    /// Tasks of all files, files sorted by path, tasks in line order.
    pub tasks: Vec<Task>,
    /// Content digest of every parsed file, keyed by vault path.
    pub fingerprints: BTreeMap<String, String>,
}

impl TaskSnapshot {
    /// Find a task by id.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Group the tasks for rendering.
    #[must_use]
    pub fn forest(&self) -> TaskForest {
        TaskForest::build(&self.tasks)
    }

    /// Number of files that were parsed.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.fingerprints.len()
    }
}

// ============================================================================
// Updates
// ============================================================================

/// Requested completion change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Check,
    Uncheck,
    /// Flip the state recorded in the task.
    Toggle,
}

impl Completion {
    /// Desired completion for a task currently in `completed` state.
    #[must_use]
    pub fn resolve(self, completed: bool) -> bool {
        match self {
            Self::Check => true,
            Self::Uncheck => false,
            Self::Toggle => !completed,
        }
    }
}

/// Result of a successful update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The marker on `line` was rewritten and the file saved.
    Written { line: LineIndex },
    /// The line already had the requested marker; nothing was written.
    AlreadySet { line: LineIndex },
}

impl UpdateOutcome {
    #[must_use]
    pub fn line(self) -> LineIndex {
        match self {
            Self::Written { line } | Self::AlreadySet { line } => line,
        }
    }
}

// ============================================================================
// Panel
// ============================================================================

/// Reads, renders and updates the tasks of one vault.
#[derive(Debug)]
pub struct TaskPanel<V: Vault> {
    config: PanelConfig,
    vault: V,
    generation: u64,
}

impl<V: Vault> TaskPanel<V> {
    #[must_use]
    pub fn new(config: PanelConfig, vault: V) -> Self {
        Self {
            config,
            vault,
            generation: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    #[must_use]
    pub fn vault(&self) -> &V {
        &self.vault
    }

    pub fn vault_mut(&mut self) -> &mut V {
        &mut self.vault
    }

    /// Parse every Markdown file of the task folder.
    ///
    /// A file that cannot be read is skipped with a warning; the others are
    /// still parsed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the task folder cannot be listed.
    pub fn snapshot(&mut self) -> Result<TaskSnapshot> {
        let folder = &self.config.task_folder_path;
        let files = self.vault.list_files(folder)?;

        self.generation += 1;
        let mut snapshot = TaskSnapshot {
            generation: self.generation,
            ..TaskSnapshot::default()
        };

        for file in files.iter().filter(|file| file.is_markdown()) {
            let content = match self.vault.read_text(&file.path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping {}: {}", file.path, e);
                    continue;
                }
            };

            let tasks = parse_file(&content, &file.path, &file.name);
            debug!("Parsed {} tasks from {}", tasks.len(), file.path);
            snapshot
                .fingerprints
                .insert(file.path.clone(), content_fingerprint(&content));
            snapshot.tasks.extend(tasks);
        }

        debug!(
            "Snapshot {}: {} tasks in {} files",
            snapshot.generation,
            snapshot.tasks.len(),
            snapshot.file_count()
        );
        Ok(snapshot)
    }

    /// Whether `file_path` changed since `snapshot` was taken.
    ///
    /// A file that is not part of the snapshot counts as stale.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn is_stale(&self, snapshot: &TaskSnapshot, file_path: &str) -> Result<bool> {
        let content = self.vault.read_text(file_path)?;
        Ok(snapshot.fingerprints.get(file_path) != Some(&content_fingerprint(&content)))
    }

    /// Find the current line of `task` in its file.
    ///
    /// `Ok(None)` means the task no longer matches any line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn locate(&self, task: &Task) -> Result<Option<LineIndex>> {
        let content = self.vault.read_text(&task.file_path)?;
        let line = locate_line(&content, task);
        debug!("Located {} at {:?}", task.id, line);
        Ok(line)
    }

    /// Set the completion of `task` in its file.
    ///
    /// The file is written only when its marker actually changes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskPanelError::TaskNotFound`] if no line matches the task,
    /// or an error if the file cannot be read or written.
    pub fn set_completed(&mut self, task: &Task, completed: bool) -> Result<UpdateOutcome> {
        let content = self.vault.read_text(&task.file_path)?;

        match set_completion(&content, task, completed) {
            Mutation::Changed { content, line } => {
                self.vault.write_text(&task.file_path, &content)?;
                info!(
                    "Marked '{}' {} ({}:{})",
                    task.text,
                    if completed { "complete" } else { "incomplete" },
                    task.file_path,
                    line + 1
                );
                Ok(UpdateOutcome::Written { line })
            }
            Mutation::Unchanged { line } => Ok(UpdateOutcome::AlreadySet { line }),
            Mutation::NotFound => Err(TaskPanelError::task_not_found(
                task.file_path.as_str(),
                task.text.as_str(),
            )),
        }
    }

    /// Flip the completion recorded in `task`.
    ///
    /// # Errors
    ///
    /// See [`TaskPanel::set_completed`].
    pub fn toggle(&mut self, task: &Task) -> Result<UpdateOutcome> {
        self.set_completed(task, !task.completed)
    }

    /// Resolve `id` in `snapshot` and apply `completion` to it.
    ///
    /// Acting on a snapshot whose file has changed since still proceeds, but
    /// logs a warning: positional ids may no longer name the same line.
    ///
    /// # Errors
    ///
    /// Returns [`TaskPanelError::UnknownTaskId`] if the snapshot has no such
    /// task, plus the errors of [`TaskPanel::set_completed`].
    pub fn update(
        &mut self,
        snapshot: &TaskSnapshot,
        id: &TaskId,
        completion: Completion,
    ) -> Result<(Task, UpdateOutcome)> {
        let task = snapshot
            .find(id)
            .cloned()
            .ok_or_else(|| TaskPanelError::UnknownTaskId { id: id.to_string() })?;

        if self.is_stale(snapshot, &task.file_path)? {
            warn!(
                "{} changed since snapshot {}; matching '{}' by text",
                task.file_path, snapshot.generation, task.text
            );
        }

        let outcome = self.set_completed(&task, completion.resolve(task.completed))?;
        Ok((task, outcome))
    }
}
