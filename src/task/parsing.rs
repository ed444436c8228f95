//! Task tree construction from raw file content.
//!
//! This module turns the text of one file into a flat list of [`Task`]s with
//! levels and parent links. Levels come from leading whitespace only.

use std::collections::HashMap;

use super::{is_blank, parse_task_line, split_lines, Task, TaskId};

// ============================================================================
// Indentation
// ============================================================================

/// Count leading whitespace characters.
///
/// Every whitespace character counts as one, so a tab weighs the same as a
/// space. Tab-indented lists therefore come out shallower than they look.
/// A byte-order mark counts as one character as well.
#[must_use]
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|&c| is_blank(c)).count()
}

/// Map an indentation width to a 1-based level: two characters per level.
#[must_use]
pub fn level_for_indent(indent: usize) -> usize {
    indent / 2 + 1
}

// ============================================================================
// File Parsing
// ============================================================================

/// Parse every task line of one file.
///
/// Non-task lines are skipped. A task's parent is the most recent earlier
/// task of this file exactly one level up; a task below level 1 without such
/// a task is an orphan and gets no parent. Parsing is deterministic: the same
/// content always yields the same ids, levels and links.
///
/// # Example
///
/// ```
/// use taskpanel::task::parse_file;
///
/// let tasks = parse_file("- [ ] A\n  - [x] B\n", "tasks/a.md", "a.md");
/// assert_eq!(tasks.len(), 2);
/// assert_eq!(tasks[1].level, 2);
/// assert_eq!(tasks[1].parent_id.as_ref(), Some(&tasks[0].id));
/// assert!(tasks[1].completed);
/// ```
#[must_use]
pub fn parse_file(content: &str, file_path: &str, file_name: &str) -> Vec<Task> {
    let mut tasks = Vec::new();
    // Most recent task seen at each level. Never cleared: a shallower task in
    // between does not hide an earlier candidate parent.
    let mut latest_at_level: HashMap<usize, TaskId> = HashMap::new();

    for line in split_lines(content) {
        let Some(parsed) = parse_task_line(line) else {
            continue;
        };

        let level = level_for_indent(indent_width(line));
        let id = TaskId::new(file_path, tasks.len());
        let parent_id = if level > 1 {
            latest_at_level.get(&(level - 1)).cloned()
        } else {
            None
        };

        latest_at_level.insert(level, id.clone());
        tasks.push(Task {
            id,
            text: parsed.text.to_string(),
            completed: parsed.checkbox.is_completed(),
            parent_id,
            level,
            file_path: file_path.to_string(),
            file_name: file_name.to_string(),
        });
    }

    tasks
}

/// Parse several files and concatenate the results in the order given.
///
/// Each item is `(content, file path, file name)`. Files are independent:
/// parent links never cross file boundaries.
pub fn parse_files<'a, I>(files: I) -> Vec<Task>
where
    I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
{
    files
        .into_iter()
        .flat_map(|(content, file_path, file_name)| parse_file(content, file_path, file_name))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<Task> {
        parse_file(content, "tasks/plan.md", "plan.md")
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_ignores_non_task_lines() {
        let content = "# Heading\n\nSome prose\n* [ ] star list\n- plain bullet\n";
        assert!(parse(content).is_empty());
    }

    #[test]
    fn test_parse_fields() {
        let tasks = parse("intro\n- [x]   Ship release  \n");
        assert_eq!(tasks.len(), 1);

        let task = &tasks[0];
        assert_eq!(task.id.as_str(), "task-tasks/plan.md-0");
        assert_eq!(task.text, "Ship release");
        assert!(task.completed);
        assert_eq!(task.level, 1);
        assert!(task.parent_id.is_none());
        assert_eq!(task.file_path, "tasks/plan.md");
        assert_eq!(task.file_name, "plan.md");
    }

    #[test]
    fn test_parse_nearest_ancestor() {
        let tasks = parse("- [ ] A\n  - [ ] B\n  - [ ] C\n- [ ] D");
        assert_eq!(tasks.len(), 4);

        let (a, b, c, d) = (&tasks[0], &tasks[1], &tasks[2], &tasks[3]);
        assert_eq!(a.level, 1);
        assert!(a.parent_id.is_none());
        assert_eq!(b.level, 2);
        assert_eq!(b.parent_id.as_ref(), Some(&a.id));
        assert_eq!(c.level, 2);
        assert_eq!(c.parent_id.as_ref(), Some(&a.id));
        assert_eq!(d.level, 1);
        assert!(d.parent_id.is_none());
    }

    #[test]
    fn test_parse_deeper_nesting() {
        let tasks = parse("- [ ] A\n  - [ ] B\n    - [ ] C\n    - [x] D\n  - [ ] E");
        assert_eq!(tasks[2].level, 3);
        assert_eq!(tasks[2].parent_id.as_ref(), Some(&tasks[1].id));
        assert_eq!(tasks[3].parent_id.as_ref(), Some(&tasks[1].id));
        assert_eq!(tasks[4].parent_id.as_ref(), Some(&tasks[0].id));
    }

    #[test]
    fn test_parse_orphan() {
        let tasks = parse("  - [ ] X");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].level, 2);
        assert!(tasks[0].parent_id.is_none());
        assert!(tasks[0].is_orphan());
    }

    #[test]
    fn test_parse_parent_skips_over_shallower_task() {
        // D (level 3) attaches to B, the latest level-2 task, even though the
        // level-1 task C sits in between.
        let tasks = parse("- [ ] A\n  - [ ] B\n- [ ] C\n    - [ ] D");
        assert_eq!(tasks[3].level, 3);
        assert_eq!(tasks[3].parent_id.as_ref(), Some(&tasks[1].id));
    }

    #[test]
    fn test_parse_skipped_level_is_orphan() {
        let tasks = parse("- [ ] A\n    - [ ] Deep");
        assert_eq!(tasks[1].level, 3);
        assert!(tasks[1].parent_id.is_none());
    }

    #[test]
    fn test_parse_odd_indent_rounds_down() {
        let tasks = parse("- [ ] A\n - [ ] one space\n   - [ ] three spaces");
        assert_eq!(tasks[1].level, 1);
        assert_eq!(tasks[2].level, 2);
        assert_eq!(tasks[2].parent_id.as_ref(), Some(&tasks[1].id));
    }

    #[test]
    fn test_parse_tab_counts_as_one_character() {
        let tasks = parse("- [ ] A\n\t- [ ] tab child\n\t\t- [ ] two tabs");
        assert_eq!(tasks[1].level, 1);
        assert!(tasks[1].parent_id.is_none());
        assert_eq!(tasks[2].level, 2);
        assert_eq!(tasks[2].parent_id.as_ref(), Some(&tasks[1].id));
    }

    #[test]
    fn test_parse_crlf_content() {
        let tasks = parse("- [ ] A\r\n  - [x] B\r\n");
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].text, "A");
        assert_eq!(tasks[1].text, "B");
        assert_eq!(tasks[1].parent_id.as_ref(), Some(&tasks[0].id));
    }

    #[test]
    fn test_parse_first_line_after_byte_order_mark() {
        let tasks = parse("\u{FEFF}- [ ] First\n- [ ] Second\n  - [ ] Child");
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].text, "First");
        assert_eq!(tasks[0].level, 1);
        assert_eq!(tasks[0].id.as_str(), "task-tasks/plan.md-0");
        assert_eq!(tasks[2].parent_id.as_ref(), Some(&tasks[1].id));
    }

    #[test]
    fn test_parse_ordinals_count_task_lines_only() {
        let tasks = parse("text\n- [ ] A\n\nmore\n- [ ] B");
        assert_eq!(tasks[0].id.as_str(), "task-tasks/plan.md-0");
        assert_eq!(tasks[1].id.as_str(), "task-tasks/plan.md-1");
    }

    #[test]
    fn test_parse_deterministic() {
        let content = "- [ ] A\n  - [x] B\n    - [ ] C\n  - [ ] D\n- [ ] E";
        assert_eq!(parse(content), parse(content));
    }

    #[test]
    fn test_parse_files_keeps_files_separate() {
        let tasks = parse_files([
            ("- [ ] A", "t/one.md", "one.md"),
            ("  - [ ] B", "t/two.md", "two.md"),
        ]);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].file_name, "one.md");
        assert_eq!(tasks[1].id.as_str(), "task-t/two.md-0");
        assert!(tasks[1].parent_id.is_none());
    }

    #[test]
    fn test_indent_width_and_level() {
        assert_eq!(indent_width("- [ ] a"), 0);
        assert_eq!(indent_width("    - [ ] a"), 4);
        assert_eq!(indent_width(" \t- [ ] a"), 2);
        assert_eq!(indent_width("\u{3000}\u{3000}- [ ] a"), 2);
        assert_eq!(indent_width("\u{FEFF}- [ ] a"), 1);
        assert_eq!(level_for_indent(0), 1);
        assert_eq!(level_for_indent(1), 1);
        assert_eq!(level_for_indent(2), 2);
        assert_eq!(level_for_indent(5), 3);
    }
}
