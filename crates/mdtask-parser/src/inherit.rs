//! Frontmatter metadata inheritance.
//!
//! Copies file-level metadata onto tasks that do not specify the field
//! themselves. Inheritance only fills gaps: explicitly parsed task metadata
//! is never overwritten. Each field is independently inherited; there is no
//! all-or-nothing semantics. The `project` key is governed by project
//! resolution, not by this generic path.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::MetadataConfig;
use crate::dates::resolve_date;
use crate::model::Task;
use crate::priority::resolve_priority;
use crate::recurrence::parse_recurrence;

/// Applies the owning file's frontmatter to one task.
///
/// A top-level task inherits when `inherit_from_frontmatter` is enabled; a
/// subtask additionally requires `inherit_from_frontmatter_for_subtasks`.
pub fn apply_frontmatter(
    task: &mut Task,
    frontmatter: &BTreeMap<String, String>,
    config: &MetadataConfig,
    today: NaiveDate,
) {
    if !config.inherit_from_frontmatter {
        return;
    }
    if task.indent_level > 0 && !config.inherit_from_frontmatter_for_subtasks {
        return;
    }

    for (key, value) in frontmatter {
        if key == &config.metadata_key {
            continue;
        }
        inherit_field(task, key, value, today);
    }
}

/// Routes one frontmatter key onto the task, filling only absent fields.
fn inherit_field(task: &mut Task, key: &str, value: &str, today: NaiveDate) {
    let metadata = &mut task.metadata;
    match key {
        "due" | "dueDate" => {
            if metadata.due_date.is_none() {
                metadata.due_date = resolve_date(value, today);
            }
        }
        "start" | "startDate" => {
            if metadata.start_date.is_none() {
                metadata.start_date = resolve_date(value, today);
            }
        }
        "scheduled" | "scheduledDate" => {
            if metadata.scheduled_date.is_none() {
                metadata.scheduled_date = resolve_date(value, today);
            }
        }
        "created" | "createdDate" => {
            if metadata.created_date.is_none() {
                metadata.created_date = resolve_date(value, today);
            }
        }
        "completed" | "completedDate" => {
            if metadata.completed_date.is_none() {
                metadata.completed_date = resolve_date(value, today);
            }
        }
        "priority" => {
            if metadata.priority.is_none() {
                metadata.priority = resolve_priority(value);
            }
        }
        "context" => {
            if metadata.context.is_none() && !value.is_empty() {
                metadata.context = Some(value.to_string());
            }
        }
        "repeat" | "recurrence" => {
            if metadata.recurrence.is_none() && !value.is_empty() {
                metadata.recurrence = Some(parse_recurrence(value));
            }
        }
        "tags" => {
            // Comma-separated frontmatter tag lists merge into the task's
            // tags without duplicating.
            for tag in value.split(',') {
                let tag = tag.trim().trim_start_matches('#');
                if !tag.is_empty() && !metadata.tags.iter().any(|t| t == tag) {
                    metadata.tags.push(tag.to_string());
                }
            }
        }
        _ => {
            metadata
                .extra
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatusCategory;
    use crate::model::TaskMetadata;

    fn make_task(indent_level: usize) -> Task {
        Task {
            id: Task::make_id("todo.md", 0),
            file_path: "todo.md".to_string(),
            line: 0,
            indent_level,
            list_marker: "-".to_string(),
            status: ' ',
            status_category: StatusCategory::NotStarted,
            completed: false,
            content: "Task".to_string(),
            original_markdown: "- [ ] Task".to_string(),
            metadata: TaskMetadata::default(),
            parent_id: None,
            children: vec![],
        }
    }

    fn config(top: bool, subtasks: bool) -> MetadataConfig {
        MetadataConfig {
            metadata_key: "project".to_string(),
            inherit_from_frontmatter: top,
            inherit_from_frontmatter_for_subtasks: subtasks,
            enabled: true,
        }
    }

    fn seed_frontmatter() -> BTreeMap<String, String> {
        let mut fm = BTreeMap::new();
        fm.insert("project".to_string(), "P".to_string());
        fm.insert("priority".to_string(), "high".to_string());
        fm.insert("category".to_string(), "work".to_string());
        fm
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_top_level_inherits_when_enabled() {
        let mut task = make_task(0);
        apply_frontmatter(&mut task, &seed_frontmatter(), &config(true, false), today());

        assert_eq!(task.metadata.priority, Some(4));
        assert_eq!(task.metadata.extra.get("category"), Some(&"work".to_string()));
        // "project" is handled by project resolution, not here.
        assert!(task.metadata.extra.get("project").is_none());
        assert!(task.metadata.project.is_none());
    }

    #[test]
    fn test_subtask_skipped_without_subtask_flag() {
        let mut task = make_task(4);
        apply_frontmatter(&mut task, &seed_frontmatter(), &config(true, false), today());

        assert!(task.metadata.priority.is_none());
        assert!(task.metadata.extra.is_empty());
    }

    #[test]
    fn test_subtask_inherits_with_both_flags() {
        let mut task = make_task(4);
        apply_frontmatter(&mut task, &seed_frontmatter(), &config(true, true), today());

        assert_eq!(task.metadata.priority, Some(4));
        assert_eq!(task.metadata.extra.get("category"), Some(&"work".to_string()));
    }

    #[test]
    fn test_nothing_inherits_when_master_flag_off() {
        let mut task = make_task(0);
        apply_frontmatter(&mut task, &seed_frontmatter(), &config(false, true), today());

        assert!(task.metadata.priority.is_none());
        assert!(task.metadata.extra.is_empty());
    }

    #[test]
    fn test_explicit_task_metadata_is_never_overwritten() {
        let mut task = make_task(0);
        task.metadata.priority = Some(3);
        apply_frontmatter(&mut task, &seed_frontmatter(), &config(true, false), today());

        assert_eq!(task.metadata.priority, Some(3));
    }

    #[test]
    fn test_date_fields_resolve_through_date_parser() {
        let mut task = make_task(0);
        let mut fm = BTreeMap::new();
        fm.insert("due".to_string(), "2024-06-01".to_string());
        fm.insert("start".to_string(), "not a date".to_string());
        apply_frontmatter(&mut task, &fm, &config(true, false), today());

        assert!(task.metadata.due_date.is_some());
        assert!(task.metadata.start_date.is_none());
    }

    #[test]
    fn test_frontmatter_tags_merge_without_duplicates() {
        let mut task = make_task(0);
        task.metadata.tags.push("existing".to_string());
        let mut fm = BTreeMap::new();
        fm.insert("tags".to_string(), "existing, new, #hashed".to_string());
        apply_frontmatter(&mut task, &fm, &config(true, false), today());

        assert_eq!(
            task.metadata.tags,
            vec![
                "existing".to_string(),
                "new".to_string(),
                "hashed".to_string()
            ]
        );
    }
}
