//! Parent/child hierarchy construction from indentation.
//!
//! Tasks live in an arena in source order; the builder keeps a stack of open
//! ancestors and links each new task under the nearest ancestor with a
//! strictly smaller indent. Non-task lines never alter the stack. A task
//! whose indentation corresponds to no open ancestor becomes a root with its
//! indent normalized to 0, so one malformed line never fails a whole-file
//! parse.

use crate::model::Task;

#[derive(Debug, Clone, Copy)]
struct OpenAncestor {
    index: usize,
    indent: usize,
}

/// Builds the task hierarchy from an ordered line stream.
#[derive(Debug, Default)]
pub struct TaskTreeBuilder {
    arena: Vec<Task>,
    stack: Vec<OpenAncestor>,
}

impl TaskTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the next task line's task, linking it under its parent.
    pub fn push(&mut self, mut task: Task) {
        while let Some(top) = self.stack.last() {
            if top.indent < task.indent_level {
                break;
            }
            self.stack.pop();
        }

        match self.stack.last() {
            Some(parent) => {
                task.parent_id = Some(self.arena[parent.index].id.clone());
                let child_id = task.id.clone();
                self.arena[parent.index].children.push(child_id);
            }
            None => {
                // No open ancestor: this is a root, whatever its indentation.
                task.indent_level = 0;
                task.parent_id = None;
            }
        }

        let indent = task.indent_level;
        let index = self.arena.len();
        self.arena.push(task);
        self.stack.push(OpenAncestor { index, indent });
    }

    /// The finished arena, in source order (parents precede children).
    pub fn into_tasks(self) -> Vec<Task> {
        self.arena
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatusCategory;
    use crate::model::TaskMetadata;

    fn make_task(line: usize, indent_level: usize) -> Task {
        Task {
            id: Task::make_id("todo.md", line),
            file_path: "todo.md".to_string(),
            line,
            indent_level,
            list_marker: "-".to_string(),
            status: ' ',
            status_category: StatusCategory::NotStarted,
            completed: false,
            content: format!("task {line}"),
            original_markdown: String::new(),
            metadata: TaskMetadata::default(),
            parent_id: None,
            children: vec![],
        }
    }

    fn build(levels: &[usize]) -> Vec<Task> {
        let mut builder = TaskTreeBuilder::new();
        for (line, &indent) in levels.iter().enumerate() {
            builder.push(make_task(line, indent));
        }
        builder.into_tasks()
    }

    #[test]
    fn test_flat_list_has_no_parents() {
        let tasks = build(&[0, 0, 0]);
        assert!(tasks.iter().all(|t| t.parent_id.is_none()));
        assert!(tasks.iter().all(|t| t.children.is_empty()));
    }

    #[test]
    fn test_nested_chain() {
        let tasks = build(&[0, 4, 8]);
        assert_eq!(tasks[1].parent_id.as_deref(), Some("todo.md:0"));
        assert_eq!(tasks[2].parent_id.as_deref(), Some("todo.md:1"));
        assert_eq!(tasks[0].children, vec!["todo.md:1".to_string()]);
        assert_eq!(tasks[1].children, vec!["todo.md:2".to_string()]);
    }

    #[test]
    fn test_dedent_returns_to_earlier_ancestor() {
        // 0, 4, 8, then back to 4: the last task is a child of the first.
        let tasks = build(&[0, 4, 8, 4]);
        assert_eq!(tasks[3].parent_id.as_deref(), Some("todo.md:0"));
        assert_eq!(
            tasks[0].children,
            vec!["todo.md:1".to_string(), "todo.md:3".to_string()]
        );
    }

    #[test]
    fn test_sibling_at_equal_indent_shares_parent() {
        let tasks = build(&[0, 4, 4]);
        assert_eq!(tasks[1].parent_id.as_deref(), Some("todo.md:0"));
        assert_eq!(tasks[2].parent_id.as_deref(), Some("todo.md:0"));
    }

    #[test]
    fn test_orphaned_indented_first_line_becomes_root() {
        let tasks = build(&[4, 8]);
        assert!(tasks[0].parent_id.is_none());
        assert_eq!(tasks[0].indent_level, 0);
        // The following deeper line still nests under it.
        assert_eq!(tasks[1].parent_id.as_deref(), Some("todo.md:0"));
    }

    #[test]
    fn test_hierarchy_invariant_holds() {
        let tasks = build(&[0, 2, 6, 4, 0, 8]);
        let by_id = |id: &str| tasks.iter().find(|t| t.id == id).unwrap();

        for task in &tasks {
            // Strictly increasing indent down the tree.
            if let Some(parent_id) = &task.parent_id {
                assert!(by_id(parent_id).indent_level < task.indent_level);
            }
            // Walking parent pointers terminates at a root.
            let mut current = task;
            let mut hops = 0;
            while let Some(parent_id) = &current.parent_id {
                current = by_id(parent_id);
                hops += 1;
                assert!(hops <= tasks.len(), "cycle in parent chain");
            }
        }
    }
}
