//! Custom error types for taskpanel.
//!
//! The pure task core never fails: a task that cannot be matched is reported
//! as a value (`None` / [`Mutation::NotFound`](crate::task::Mutation)). The
//! errors here belong to the orchestration around it: reading and writing
//! the vault, loading settings, and resolving ids handed in by a user.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for taskpanel operations
#[derive(Error, Debug)]
pub enum TaskPanelError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to load configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfig { field: String, reason: String },

    // =========================================================================
    // Task Errors
    // =========================================================================
    /// The task's line could not be matched in the current file content
    #[error("Task not found in {file_path}: {text}")]
    TaskNotFound { file_path: String, text: String },

    /// No task with this id exists in the current snapshot
    #[error("Unknown task id: {id}")]
    UnknownTaskId { id: String },

    // =========================================================================
    // Vault Errors
    // =========================================================================
    /// Missing required file
    #[error("Missing required file: {path}")]
    MissingFile { path: String },

    /// Refused to overwrite an existing file
    #[error("File already exists: {path}")]
    AlreadyExists { path: String },

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// IO error wrapper
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TaskPanelError {
    // =========================================================================
    // Constructor helpers
    // =========================================================================

    /// Create a configuration error with path
    pub fn config_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a task-not-found error
    pub fn task_not_found(file_path: impl Into<String>, text: impl Into<String>) -> Self {
        Self::TaskNotFound {
            file_path: file_path.into(),
            text: text.into(),
        }
    }

    // =========================================================================
    // Classification helpers
    // =========================================================================

    /// Check if this error is recoverable by reparsing and retrying.
    ///
    /// Task lookups go stale as soon as a file is edited; a fresh snapshot
    /// usually resolves them.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TaskNotFound { .. } | Self::UnknownTaskId { .. } | Self::AlreadyExists { .. }
        )
    }

    /// Get error code for exit status
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::TaskNotFound { .. } | Self::UnknownTaskId { .. } => 3,
            Self::AlreadyExists { .. } => 4,
            Self::MissingFile { .. } => 6,
            Self::Config { .. } | Self::InvalidConfig { .. } => 7,
            _ => 1,
        }
    }
}

/// Type alias for taskpanel results
pub type Result<T> = std::result::Result<T, TaskPanelError>;
