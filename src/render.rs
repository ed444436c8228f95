//! Terminal rendering of a task forest.

use colored::Colorize;

use crate::task::{Checkbox, TaskForest, TaskNode};

/// What to include when rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Append each task's id.
    pub show_ids: bool,
    /// Leave out completed tasks together with their subtrees.
    pub hide_completed: bool,
}

/// Render the forest as an indented checklist grouped by file.
///
/// Each file gets a header line; tasks below it are indented two spaces per
/// depth. A summary line with the overall progress closes the output.
#[must_use]
pub fn render_forest(forest: &TaskForest, options: &RenderOptions) -> String {
    if forest.is_empty() {
        return format!("{}\n", "No tasks found".dimmed());
    }

    let mut out = String::new();
    let mut current_file: Option<&str> = None;

    for root in forest.roots() {
        if current_file != Some(root.task.file_path.as_str()) {
            if current_file.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("{}\n", root.task.file_name.bold()));
            current_file = Some(root.task.file_path.as_str());
        }
        render_node(&mut out, root, 1, options);
    }

    let progress = forest.progress();
    out.push_str(&format!(
        "\n{} {}/{} completed ({:.0}%)\n",
        "Progress:".cyan(),
        progress.completed,
        progress.total,
        progress.percentage()
    ));
    out
}

fn render_node(out: &mut String, node: &TaskNode, depth: usize, options: &RenderOptions) {
    let task = &node.task;
    if options.hide_completed && task.completed {
        return;
    }

    let indent = "  ".repeat(depth);
    let line = match task.checkbox() {
        Checkbox::Done => format!("{}{} {}", indent, "[x]".green(), task.text.dimmed()),
        Checkbox::Open => format!("{}[ ] {}", indent, task.text),
    };
    out.push_str(&line);
    if options.show_ids {
        out.push_str(&format!("  {}", task.id.as_str().dimmed()));
    }
    out.push('\n');

    for child in &node.children {
        render_node(out, child, depth + 1, options);
    }
}
