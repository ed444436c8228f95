//! In-place completion changes.
//!
//! Only the 6-character marker of the located line is ever rewritten.
//! Indentation, trailing text and every other line stay byte-identical.

use super::{is_blank, match_task_line, split_lines, Checkbox, LineIndex, Task, MARKER_LEN};

/// Outcome of a completion change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// The marker on `line` was rewritten.
    Changed { content: String, line: LineIndex },
    /// `line` already carries the requested marker.
    Unchanged { line: LineIndex },
    /// No line matches the task.
    NotFound,
}

impl Mutation {
    /// Line the task was matched on, if any.
    #[must_use]
    pub fn line(&self) -> Option<LineIndex> {
        match self {
            Self::Changed { line, .. } | Self::Unchanged { line } => Some(*line),
            Self::NotFound => None,
        }
    }

    #[must_use]
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    /// Resulting content, a copy of `original` when nothing changed.
    #[must_use]
    pub fn into_content(self, original: &str) -> String {
        match self {
            Self::Changed { content, .. } => content,
            Self::Unchanged { .. } | Self::NotFound => original.to_string(),
        }
    }
}

/// Set the completion of `task` in `content`.
///
/// The task is matched with the same first-match prefix rule as
/// [`locate`](super::locate).
#[must_use]
pub fn set_completion(content: &str, task: &Task, completed: bool) -> Mutation {
    let desired = Checkbox::from_completed(completed);
    let mut line_start = 0;

    for (index, line) in split_lines(content).enumerate() {
        if let Some(matched) = match_task_line(line, task) {
            if matched.checkbox == desired {
                return Mutation::Unchanged { line: index };
            }

            let indent_len = line.len() - line.trim_start_matches(is_blank).len();
            let marker_start = line_start + indent_len;
            let mut updated = String::with_capacity(content.len());
            updated.push_str(&content[..marker_start]);
            updated.push_str(desired.marker());
            updated.push_str(&content[marker_start + MARKER_LEN..]);

            return Mutation::Changed {
                content: updated,
                line: index,
            };
        }
        line_start += line.len() + 1;
    }

    Mutation::NotFound
}

/// Return `content` with `task` set to `completed`.
///
/// When the task cannot be matched, or already has the requested state, the
/// content comes back unchanged.
///
/// # Example
///
/// ```
/// use taskpanel::task::{apply, parse_file};
///
/// let content = "- [ ] A\n  - [ ] B  #tag\n";
/// let tasks = parse_file(content, "a.md", "a.md");
///
/// let done = apply(content, &tasks[1], true);
/// assert_eq!(done, "- [ ] A\n  - [x] B  #tag\n");
/// assert_eq!(apply(&done, &tasks[1], false), content);
/// ```
#[must_use]
pub fn apply(content: &str, task: &Task, completed: bool) -> String {
    set_completion(content, task, completed).into_content(content)
}
