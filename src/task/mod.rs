//! Checkbox task extraction, lookup and in-place mutation.
//!
//! The task core is three pure functions over file content held in memory:
//!
//! ```text
//!   content ──parse_file──> Vec<Task> ──TaskForest::build──> roots/children
//!      │                       │
//!      │        ┌──────────────┘
//!      ▼        ▼
//!   locate(content, task)            -> Option<line index>
//!   apply(content, task, completed)  -> new content
//! ```
//!
//! A task line is any line whose trimmed form starts with `- [ ] ` or
//! `- [x] `. Nesting is inferred from leading whitespace alone: every two
//! whitespace characters add one level.
//!
//! # Identity
//!
//! Task ids are positional (`task-<file path>-<ordinal>`), so a [`Task`] is
//! only meaningful against the content it was parsed from. [`locate`] and
//! [`apply`] match on text instead: the first task line whose text starts
//! with the task's text wins. Both share [`matches_task`] so they always
//! agree on which line is "the" task.

mod forest;
mod locate;
mod mutate;
mod parsing;

pub use forest::{Progress, TaskForest, TaskNode};
pub use locate::{locate, LineIndex};
pub use mutate::{apply, set_completion, Mutation};
pub use parsing::{indent_width, level_for_indent, parse_file, parse_files};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker of an incomplete task, including the trailing space.
pub const OPEN_MARKER: &str = "- [ ] ";

/// Marker of a completed task, including the trailing space.
pub const DONE_MARKER: &str = "- [x] ";

/// Byte length shared by both markers.
pub const MARKER_LEN: usize = 6;

// ============================================================================
// Task Identifier
// ============================================================================

/// Positional identifier of a task within one parse pass.
///
/// Displays as `task-<file path>-<ordinal>` where the ordinal counts task
/// lines in scan order, starting at zero.
///
/// # Example
///
/// ```
/// use taskpanel::task::TaskId;
///
/// let id = TaskId::new("AutoTask 任务/today.md", 3);
/// assert_eq!(id.as_str(), "task-AutoTask 任务/today.md-3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Build the id of the `ordinal`-th task line of `file_path`.
    #[must_use]
    pub fn new(file_path: &str, ordinal: usize) -> Self {
        Self(format!("task-{}-{}", file_path, ordinal))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for TaskId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

// ============================================================================
// Task
// ============================================================================

/// A checkbox task as seen by one parse pass.
///
/// Tasks are values: every parse produces fresh ones and nothing mutates
/// them afterwards. Drop them when the file is reparsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// Line content after the marker, trimmed.
    pub text: String,
    pub completed: bool,
    /// Nearest earlier task of the same file one level up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TaskId>,
    /// 1-based nesting depth.
    pub level: usize,
    pub file_path: String,
    pub file_name: String,
}

impl Task {
    /// Whether this task sits below level 1 without a resolved parent.
    #[must_use]
    pub fn is_orphan(&self) -> bool {
        self.level > 1 && self.parent_id.is_none()
    }

    /// The marker this task's line currently carries.
    #[must_use]
    pub fn checkbox(&self) -> Checkbox {
        Checkbox::from_completed(self.completed)
    }
}

// ============================================================================
// Checkbox Lines
// ============================================================================

/// The two recognized checkbox states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Checkbox {
    Open,
    Done,
}

impl Checkbox {
    #[must_use]
    pub fn from_completed(completed: bool) -> Self {
        if completed {
            Self::Done
        } else {
            Self::Open
        }
    }

    #[must_use]
    pub fn is_completed(self) -> bool {
        self == Self::Done
    }

    /// The literal 6-character marker.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Open => OPEN_MARKER,
            Self::Done => DONE_MARKER,
        }
    }
}

/// A line recognized as a task line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLine<'a> {
    pub checkbox: Checkbox,
    /// Text after the marker, trimmed.
    pub text: &'a str,
}

/// Recognize a task line.
///
/// Returns `None` for every line whose trimmed form does not start with one
/// of the two literal markers. Other list notations (`* [ ]`, `+ [ ]`,
/// `- [X]`, numbered lists) are not task lines.
///
/// # Example
///
/// ```
/// use taskpanel::task::{parse_task_line, Checkbox};
///
/// let line = parse_task_line("    - [x] Ship it  ").unwrap();
/// assert_eq!(line.checkbox, Checkbox::Done);
/// assert_eq!(line.text, "Ship it");
///
/// assert!(parse_task_line("* [ ] not a task").is_none());
/// ```
#[must_use]
pub fn parse_task_line(line: &str) -> Option<TaskLine<'_>> {
    let trimmed = line.trim_matches(is_blank);
    let checkbox = if trimmed.starts_with(OPEN_MARKER) {
        Checkbox::Open
    } else if trimmed.starts_with(DONE_MARKER) {
        Checkbox::Done
    } else {
        return None;
    };
    Some(TaskLine {
        checkbox,
        text: trimmed[MARKER_LEN..].trim_matches(is_blank),
    })
}

/// Characters trimmed around task lines and counted as indentation.
///
/// Unicode whitespace plus U+FEFF, which editors write as a byte-order mark
/// at the start of a file.
#[must_use]
pub fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Whether `line` is the line of `task` under the prefix rule.
///
/// The line must be a task line and its text must start with the task's
/// text. Trailing content added after the task was parsed still matches.
#[must_use]
pub fn matches_task(line: &str, task: &Task) -> bool {
    match_task_line(line, task).is_some()
}

/// Like [`matches_task`], returning the recognized line on a match.
pub(crate) fn match_task_line<'a>(line: &'a str, task: &Task) -> Option<TaskLine<'a>> {
    parse_task_line(line).filter(|parsed| parsed.text.starts_with(task.text.as_str()))
}

/// Split content the same way for parsing, locating and mutating.
///
/// Only `\n` separates lines; a `\r` before it stays in the line so that
/// rejoining with `\n` restores the content byte for byte.
pub(crate) fn split_lines(content: &str) -> std::str::Split<'_, char> {
    content.split('\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_format() {
        let id = TaskId::new("tasks/a.md", 0);
        assert_eq!(id.to_string(), "task-tasks/a.md-0");
        assert_eq!(TaskId::from("task-tasks/a.md-0"), id);
    }

    #[test]
    fn test_parse_task_line_open_and_done() {
        let open = parse_task_line("- [ ] Write tests").unwrap();
        assert_eq!(open.checkbox, Checkbox::Open);
        assert_eq!(open.text, "Write tests");

        let done = parse_task_line("\t- [x]   Done thing\r").unwrap();
        assert!(done.checkbox.is_completed());
        assert_eq!(done.text, "Done thing");
    }

    #[test]
    fn test_parse_task_line_rejects_other_notations() {
        for line in [
            "* [ ] star",
            "+ [ ] plus",
            "1. [ ] numbered",
            "- [X] uppercase",
            "-[ ] no space",
            "- [ ]no space after",
            "- [ ]",
            "- [ ]   ",
            "plain text",
            "",
        ] {
            assert!(parse_task_line(line).is_none(), "{line:?} should not parse");
        }
    }

    #[test]
    fn test_matches_task_is_prefix_match() {
        let task = Task {
            id: TaskId::new("a.md", 0),
            text: "Buy milk".into(),
            completed: false,
            parent_id: None,
            level: 1,
            file_path: "a.md".into(),
            file_name: "a.md".into(),
        };
        assert!(matches_task("- [ ] Buy milk", &task));
        assert!(matches_task("  - [x] Buy milk and eggs #shop", &task));
        assert!(!matches_task("- [ ] Buy bread", &task));
        assert!(!matches_task("Buy milk", &task));
    }

    #[test]
    fn test_parse_task_line_after_byte_order_mark() {
        let line = parse_task_line("\u{FEFF}- [ ] First\u{FEFF}").unwrap();
        assert_eq!(line.checkbox, Checkbox::Open);
        assert_eq!(line.text, "First");
        assert!(is_blank('\u{FEFF}'));
        assert!(!is_blank('-'));
    }

    #[test]
    fn test_checkbox_markers() {
        assert_eq!(Checkbox::Open.marker(), "- [ ] ");
        assert_eq!(Checkbox::Done.marker(), "- [x] ");
        assert_eq!(Checkbox::Open.marker().len(), MARKER_LEN);
        assert_eq!(Checkbox::from_completed(true), Checkbox::Done);
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let task = Task {
            id: TaskId::new("a.md", 1),
            text: "Child".into(),
            completed: true,
            parent_id: Some(TaskId::new("a.md", 0)),
            level: 2,
            file_path: "a.md".into(),
            file_name: "a.md".into(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], "task-a.md-1");
        assert_eq!(json["parentId"], "task-a.md-0");
        assert_eq!(json["filePath"], "a.md");
        assert_eq!(json["fileName"], "a.md");
    }
}
