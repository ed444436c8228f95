//! Grouping of a flat task list into the ordered forest renderers consume.

use std::collections::HashMap;

use serde::Serialize;

use super::{Task, TaskId};

/// A task with its children, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskNode {
    #[serde(flatten)]
    pub task: Task,
    pub children: Vec<TaskNode>,
}

impl TaskNode {
    /// Number of tasks in this subtree, this one included.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(TaskNode::subtree_len).sum::<usize>()
    }
}

/// Completed versus total task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Completion percentage, 0.0 when there are no tasks.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

/// Tasks grouped by parent link.
///
/// Roots are tasks without a parent, which includes orphans. Children keep
/// the order of the input list, so feeding it the concatenated per-file
/// parse results yields files in caller order and tasks in line order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskForest {
    roots: Vec<TaskNode>,
}

impl TaskForest {
    /// Build the forest from a flat task list.
    ///
    /// # Example
    ///
    /// ```
    /// use taskpanel::task::{parse_file, TaskForest};
    ///
    /// let tasks = parse_file("- [ ] A\n  - [x] B\n- [ ] C", "a.md", "a.md");
    /// let forest = TaskForest::build(&tasks);
    /// assert_eq!(forest.roots().len(), 2);
    /// assert_eq!(forest.roots()[0].children[0].task.text, "B");
    /// assert_eq!(forest.progress().completed, 1);
    /// ```
    #[must_use]
    pub fn build(tasks: &[Task]) -> Self {
        let mut children_of: HashMap<&TaskId, Vec<&Task>> = HashMap::new();
        let mut roots = Vec::new();

        for task in tasks {
            match &task.parent_id {
                Some(parent_id) => children_of.entry(parent_id).or_default().push(task),
                None => roots.push(task),
            }
        }

        Self {
            roots: roots
                .into_iter()
                .map(|task| Self::node(task, &children_of))
                .collect(),
        }
    }

    fn node(task: &Task, children_of: &HashMap<&TaskId, Vec<&Task>>) -> TaskNode {
        let children = children_of
            .get(&task.id)
            .map(|children| {
                children
                    .iter()
                    .map(|child| Self::node(child, children_of))
                    .collect()
            })
            .unwrap_or_default();

        TaskNode {
            task: task.clone(),
            children,
        }
    }

    #[must_use]
    pub fn roots(&self) -> &[TaskNode] {
        &self.roots
    }

    /// Total number of tasks in the forest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.iter().map(TaskNode::subtree_len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Completion counts over every task in the forest.
    #[must_use]
    pub fn progress(&self) -> Progress {
        fn walk(node: &TaskNode, progress: &mut Progress) {
            progress.total += 1;
            if node.task.completed {
                progress.completed += 1;
            }
            for child in &node.children {
                walk(child, progress);
            }
        }

        let mut progress = Progress::default();
        for root in &self.roots {
            walk(root, &mut progress);
        }
        progress
    }
}
