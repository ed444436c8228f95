//! Find the current line of a task.

use super::{matches_task, split_lines, Task};

/// 0-based index of a line in the content.
pub type LineIndex = usize;

/// Locate `task` in `content`.
///
/// Scans top to bottom and returns the first task line whose text starts
/// with `task.text`. `None` means the task no longer matches any line,
/// usually because it was edited or deleted after the last parse.
///
/// # Example
///
/// ```
/// use taskpanel::task::{locate, parse_file};
///
/// let tasks = parse_file("- [ ] Buy milk", "a.md", "a.md");
/// let edited = "# Shopping\n- [ ] Buy milk #today";
/// assert_eq!(locate(edited, &tasks[0]), Some(1));
/// assert_eq!(locate("", &tasks[0]), None);
/// ```
#[must_use]
pub fn locate(content: &str, task: &Task) -> Option<LineIndex> {
    split_lines(content).position(|line| matches_task(line, task))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::parse_file;

    fn first_task(content: &str) -> Task {
        parse_file(content, "a.md", "a.md").remove(0)
    }

    #[test]
    fn test_locate_after_lines_inserted_above() {
        let task = first_task("- [ ] Write report");
        let content = "# Today\n\nnotes\n- [ ] Write report";
        assert_eq!(locate(content, &task), Some(3));
    }

    #[test]
    fn test_locate_first_match_wins() {
        let task = first_task("- [ ] Buy milk");
        let content = "- [ ] Buy milk\n- [ ] Buy milk and eggs";
        assert_eq!(locate(content, &task), Some(0));

        // The longer task is still found on its own line
        let longer = parse_file(content, "a.md", "a.md").remove(1);
        assert_eq!(locate(content, &longer), Some(1));
    }

    #[test]
    fn test_locate_prefix_shadowing() {
        let task = first_task("- [ ] Buy milk");
        let content = "- [ ] Buy milk and eggs\n- [ ] Buy milk";
        assert_eq!(locate(content, &task), Some(0));
    }

    #[test]
    fn test_locate_ignores_completion_and_indent() {
        let task = first_task("- [ ] Call Bob");
        assert_eq!(locate("text\n      - [x] Call Bob", &task), Some(1));
    }

    #[test]
    fn test_locate_requires_task_line() {
        let task = first_task("- [ ] Call Bob");
        assert_eq!(locate("Call Bob\n* [ ] Call Bob", &task), None);
    }

    #[test]
    fn test_locate_missing_line() {
        let task = first_task("- [ ] A\n- [ ] B");
        assert_eq!(locate("- [ ] B", &task), None);
    }
}
