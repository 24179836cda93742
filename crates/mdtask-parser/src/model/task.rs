//! The canonical task record produced by a parse.

use std::collections::BTreeMap;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::config::StatusCategory;

/// Stable task identifier: `"{file_path}:{line}"`.
///
/// Identity is positional, so a re-parse of a file fully replaces that file's
/// prior task set rather than merging into it.
pub type TaskId = String;

/// How an inferred project value was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TgProjectKind {
    /// Longest-prefix match against the configured folder mappings.
    #[serde(rename = "path")]
    Path,
    /// The configured frontmatter metadata key.
    #[serde(rename = "metadata")]
    Metadata,
    /// The nearest per-folder project config file.
    #[serde(rename = "config")]
    ConfigFile,
}

/// A project value inferred for a task rather than explicitly authored.
///
/// Inferred projects are read-only from an editor's perspective: adding an
/// explicit project tag overrides them, but they cannot be blanked back to
/// "no project".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TgProject {
    /// The inference source.
    #[serde(rename = "type")]
    pub kind: TgProjectKind,
    /// The project value the source produced.
    pub source: String,
    /// Always true for inferred projects.
    pub read_only: bool,
}

/// Recurrence interval unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecurrenceUnit {
    Day,
    Week,
    Month,
    Year,
}

/// A recurrence rule, or the original phrase when it could not be parsed.
///
/// Downstream consumers treat recurrence as advisory, so unparseable phrases
/// are retained verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Recurrence {
    /// A parsed `every [N] unit` rule.
    Rule {
        /// The interval unit.
        unit: RecurrenceUnit,
        /// Interval count, always at least 1.
        interval: u32,
        /// Weekday pin (0 = Sunday .. 6 = Saturday) for `every monday` style
        /// phrases.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weekday: Option<u8>,
    },
    /// An unrecognized phrase, kept as written.
    Raw(String),
}

/// Structured metadata resolved for a task.
///
/// Dates are canonical epoch-millisecond timestamps, normalized to start of
/// day unless the source carried an explicit time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<i64>,

    /// Priority 1 (lowest) to 5 (highest).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,

    /// Explicitly authored project (tag or inline field).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Inferred project, absent when an explicit project is present or no
    /// inference source produced a value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tg_project: Option<TgProject>,

    /// Ordered, deduplicated tags with the leading `#` stripped.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,

    /// Inherited frontmatter keys that do not map onto a typed field.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl TaskMetadata {
    /// The effective project: explicit if present, else the inferred source.
    pub fn effective_project(&self) -> Option<&str> {
        self.project
            .as_deref()
            .or_else(|| self.tg_project.as_ref().map(|tg| tg.source.as_str()))
    }
}

/// The canonical unit produced by the parsing engine.
///
/// Tasks are created once per scan of a file and wholly replaced on re-scan;
/// they are never mutated field-by-field after a parse completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable positional identifier (`"{file_path}:{line}"`).
    pub id: TaskId,

    /// Source file path, `/`-separated.
    pub file_path: String,

    /// Source line number, 0-based.
    pub line: usize,

    /// Indentation depth in columns, tabs expanded.
    pub indent_level: usize,

    /// The list marker as written (`-`, `*`, `+`, or `1.` style).
    pub list_marker: String,

    /// Raw status character from inside the checkbox brackets.
    pub status: char,

    /// Lifecycle category derived from `status` via the configured mapping.
    pub status_category: StatusCategory,

    /// True when `status_category` is [`StatusCategory::Completed`].
    pub completed: bool,

    /// Task text with all recognized metadata markup removed.
    pub content: String,

    /// Untouched source line, kept for write-back.
    pub original_markdown: String,

    /// Resolved metadata.
    pub metadata: TaskMetadata,

    /// Parent task id, absent for roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TaskId>,

    /// Child task ids, in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TaskId>,
}

impl Task {
    /// Builds the stable positional id for a task.
    pub fn make_id(file_path: &str, line: usize) -> TaskId {
        format!("{file_path}:{line}")
    }

    /// Regenerates a canonical markdown line for this task.
    ///
    /// The output round-trips through the line grammar: indentation as
    /// spaces, the original list marker and status character, the cleaned
    /// content, then emoji-grammar metadata (dates, recurrence) and a
    /// dataview project/context field when present. Tags are re-appended as
    /// `#tag` tokens.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for _ in 0..self.indent_level {
            out.push(' ');
        }
        out.push_str(&self.list_marker);
        out.push_str(" [");
        out.push(self.status);
        out.push_str("] ");
        out.push_str(&self.content);

        if let Some(priority) = self.metadata.priority {
            if let Some(symbol) = priority_symbol(priority) {
                out.push(' ');
                out.push_str(symbol);
            }
        }
        if let Some(project) = &self.metadata.project {
            out.push_str(&format!(" [project::{project}]"));
        }
        if let Some(context) = &self.metadata.context {
            out.push_str(&format!(" @{context}"));
        }
        for tag in &self.metadata.tags {
            out.push_str(&format!(" #{tag}"));
        }
        if let Some(recurrence) = &self.metadata.recurrence {
            out.push_str(&format!(" 🔁 {}", recurrence_phrase(recurrence)));
        }
        push_date(&mut out, "🛫", self.metadata.start_date);
        push_date(&mut out, "⏳", self.metadata.scheduled_date);
        push_date(&mut out, "📅", self.metadata.due_date);
        push_date(&mut out, "➕", self.metadata.created_date);
        push_date(&mut out, "✅", self.metadata.completed_date);

        out
    }
}

/// The default emoji symbol for a priority level.
fn priority_symbol(priority: u8) -> Option<&'static str> {
    match priority {
        1 => Some("⏬"),
        2 => Some("🔽"),
        3 => Some("🔼"),
        4 => Some("⏫"),
        5 => Some("🔺"),
        _ => None,
    }
}

fn recurrence_phrase(recurrence: &Recurrence) -> String {
    match recurrence {
        Recurrence::Raw(phrase) => phrase.clone(),
        Recurrence::Rule {
            unit,
            interval,
            weekday,
        } => {
            if let Some(weekday) = weekday {
                let name = match weekday {
                    0 => "sunday",
                    1 => "monday",
                    2 => "tuesday",
                    3 => "wednesday",
                    4 => "thursday",
                    5 => "friday",
                    _ => "saturday",
                };
                return format!("every {name}");
            }
            let unit_name = match unit {
                RecurrenceUnit::Day => "day",
                RecurrenceUnit::Week => "week",
                RecurrenceUnit::Month => "month",
                RecurrenceUnit::Year => "year",
            };
            if *interval == 1 {
                format!("every {unit_name}")
            } else {
                format!("every {interval} {unit_name}s")
            }
        }
    }
}

fn push_date(out: &mut String, symbol: &str, timestamp: Option<i64>) {
    let Some(timestamp) = timestamp else {
        return;
    };
    if let Some(datetime) = DateTime::from_timestamp_millis(timestamp) {
        out.push(' ');
        out.push_str(symbol);
        out.push(' ');
        out.push_str(&datetime.format("%Y-%m-%d").to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(content: &str) -> Task {
        Task {
            id: Task::make_id("notes/todo.md", 3),
            file_path: "notes/todo.md".to_string(),
            line: 3,
            indent_level: 0,
            list_marker: "-".to_string(),
            status: ' ',
            status_category: StatusCategory::NotStarted,
            completed: false,
            content: content.to_string(),
            original_markdown: format!("- [ ] {content}"),
            metadata: TaskMetadata::default(),
            parent_id: None,
            children: vec![],
        }
    }

    #[test]
    fn test_make_id_is_positional() {
        assert_eq!(Task::make_id("a/b.md", 12), "a/b.md:12");
    }

    #[test]
    fn test_effective_project_prefers_explicit() {
        let mut metadata = TaskMetadata {
            project: Some("Explicit".to_string()),
            ..Default::default()
        };
        metadata.tg_project = Some(TgProject {
            kind: TgProjectKind::Path,
            source: "Inferred".to_string(),
            read_only: true,
        });
        assert_eq!(metadata.effective_project(), Some("Explicit"));

        metadata.project = None;
        assert_eq!(metadata.effective_project(), Some("Inferred"));

        metadata.tg_project = None;
        assert_eq!(metadata.effective_project(), None);
    }

    #[test]
    fn test_to_markdown_plain_task() {
        let task = make_task("Water the plants");
        assert_eq!(task.to_markdown(), "- [ ] Water the plants");
    }

    #[test]
    fn test_to_markdown_with_metadata() {
        let mut task = make_task("Ship release");
        task.metadata.priority = Some(5);
        task.metadata.due_date = Some(1_735_689_600_000); // 2025-01-01
        task.metadata.tags = vec!["release".to_string()];

        let line = task.to_markdown();
        assert!(line.starts_with("- [ ] Ship release"));
        assert!(line.contains("🔺"));
        assert!(line.contains("#release"));
        assert!(line.contains("📅 2025-01-01"));
    }

    #[test]
    fn test_tg_project_kind_serializes_as_source_tag() {
        let tg = TgProject {
            kind: TgProjectKind::ConfigFile,
            source: "Acme".to_string(),
            read_only: true,
        };
        let json = serde_json::to_string(&tg).unwrap();
        assert!(json.contains("\"type\":\"config\""));
        assert!(json.contains("\"readOnly\":true"));
    }
}
