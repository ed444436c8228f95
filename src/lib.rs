//! Taskpanel - Markdown checkbox task panel
//!
//! Reads `- [ ] ` / `- [x] ` task lines from the Markdown files of a notes
//! vault, shows them as a nested checklist and flips their completion state
//! in place without disturbing anything else in the file.
//!
//! # Architecture
//!
//! - [`task`] - Pure task core: parsing, locating, mutating, forest grouping
//! - [`vault`] - Storage abstraction and the file-system vault
//! - [`panel`] - Snapshots, toggles, staleness checks and periodic refresh
//! - [`scaffold`] - Folder layout, task files and daily logs
//! - [`render`] - Terminal rendering of task forests
//! - [`config`] - Settings loading and validation
//! - [`error`] - Custom error types and handling
//! - [`testing`] - Testing infrastructure (mocks, fixtures)
//!
//! # Example
//!
//! ```rust
//! use taskpanel::testing::MemoryVault;
//! use taskpanel::{PanelConfig, TaskPanel};
//!
//! let vault = MemoryVault::new().with_file("AutoTask 任务/today.md", "- [ ] Write report");
//! let mut panel = TaskPanel::new(PanelConfig::default(), vault);
//!
//! let snapshot = panel.snapshot()?;
//! panel.toggle(&snapshot.tasks[0])?;
//! assert_eq!(panel.vault().file("AutoTask 任务/today.md"), Some("- [x] Write report"));
//! # Ok::<(), taskpanel::TaskPanelError>(())
//! ```

pub mod config;
pub mod error;
pub mod panel;
pub mod render;
pub mod scaffold;
pub mod task;
pub mod testing;
pub mod vault;

// Re-export commonly used types
pub use error::{Result, TaskPanelError};

pub use config::PanelConfig;

pub use task::{Task, TaskForest, TaskId};

pub use panel::{Completion, RefreshSchedule, TaskPanel, TaskSnapshot, UpdateOutcome};

pub use vault::{FsVault, Vault};

pub use render::{render_forest, RenderOptions};
