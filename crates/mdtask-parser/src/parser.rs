//! The top-level parse entry point.
//!
//! `TaskParser` validates the configuration once at construction, builds the
//! per-parse lookup tables, and then converts raw file text into a flat,
//! source-ordered list of tasks with resolved metadata and hierarchy.
//!
//! Parsing is best-effort: malformed metadata never fails a line, and a
//! malformed line never fails a file. Malformed tokens stay visible in the
//! task content instead of being silently dropped.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::config::{MetadataField, ParserConfig, StatusCategory};
use crate::dates::{resolve_daily_note_date, resolve_date};
use crate::error::{ConfigError, ConfigResult};
use crate::extract::{ExtractedMetadata, MetadataExtractor, RawField};
use crate::inherit::apply_frontmatter;
use crate::model::{Task, TaskMetadata};
use crate::priority::resolve_priority;
use crate::project::resolve_project;
use crate::recurrence::parse_recurrence;
use crate::scanner::scan_line;
use crate::tree::TaskTreeBuilder;

/// Markdown task parsing and metadata resolution engine.
///
/// Construction validates the configuration; parsing never fails after that.
/// The parser holds no mutable state and may be shared across threads; each
/// file parses independently.
#[derive(Debug, Clone)]
pub struct TaskParser {
    config: ParserConfig,
    extractor: MetadataExtractor,
}

impl TaskParser {
    /// Creates a parser, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration is unusable: a zero
    /// iteration bound, an empty status mapping, daily-note dates enabled
    /// without a format, or the frontmatter project lookup enabled without a
    /// key. Malformed *data* is never an error; only configuration is.
    pub fn new(config: ParserConfig) -> ConfigResult<Self> {
        if config.max_metadata_iterations < 1 {
            return Err(ConfigError::InvalidIterationBound {
                value: config.max_metadata_iterations,
            });
        }
        if config.status_mapping.is_empty() {
            return Err(ConfigError::EmptyStatusMapping);
        }
        if config.use_daily_note_path_as_date && config.daily_note_format.is_empty() {
            return Err(ConfigError::EmptyDailyNoteFormat);
        }
        if config.project_config.metadata_config.enabled
            && config.project_config.metadata_config.metadata_key.is_empty()
        {
            return Err(ConfigError::EmptyMetadataKey);
        }

        let extractor = MetadataExtractor::from_config(&config);
        Ok(Self { config, extractor })
    }

    /// Parses a file's raw text into a flat task list.
    ///
    /// Hierarchy is encoded via `parent_id`/`children`; tasks appear in
    /// source order, so a parent always precedes its children. Relative date
    /// keywords resolve against the current wall-clock date.
    pub fn parse(
        &self,
        content: &str,
        file_path: &str,
        frontmatter: &BTreeMap<String, String>,
    ) -> Vec<Task> {
        self.parse_with_reference(content, file_path, frontmatter, Local::now().date_naive())
    }

    /// Parses with an explicit reference date for relative keywords.
    pub fn parse_with_reference(
        &self,
        content: &str,
        file_path: &str,
        frontmatter: &BTreeMap<String, String>,
        today: NaiveDate,
    ) -> Vec<Task> {
        let mut builder = TaskTreeBuilder::new();
        let mut in_comment = false;

        for (line_number, raw_line) in content.lines().enumerate() {
            let was_in_comment = in_comment;
            if raw_line.matches("%%").count() % 2 == 1 {
                in_comment = !in_comment;
            }
            if was_in_comment && !self.config.parse_comments {
                continue;
            }

            let Some(scanned) = scan_line(raw_line, self.config.tab_size) else {
                continue;
            };

            let extracted = self.extractor.extract(&scanned.content);
            let task = self.build_task(file_path, line_number, raw_line, &scanned, extracted, today);
            builder.push(task);
        }

        let mut tasks = builder.into_tasks();

        // Top-down resolution: the arena is in source order, so every parent
        // is resolved before its children.
        for task in &mut tasks {
            let resolved = resolve_project(
                &self.config.project_config,
                task.metadata.project.as_deref(),
                file_path,
                frontmatter,
                task.indent_level,
            );
            task.metadata.project = resolved.project;
            task.metadata.tg_project = resolved.tg_project;

            apply_frontmatter(
                task,
                frontmatter,
                &self.config.project_config.metadata_config,
                today,
            );
        }

        debug!(file_path, tasks = tasks.len(), "parsed file");
        tasks
    }

    /// Assembles one task from a scanned line and its extracted metadata.
    fn build_task(
        &self,
        file_path: &str,
        line_number: usize,
        raw_line: &str,
        scanned: &crate::scanner::ScannedLine,
        extracted: ExtractedMetadata,
        today: NaiveDate,
    ) -> Task {
        let mut content = extracted.content;
        let mut metadata = TaskMetadata {
            tags: extracted.tags,
            ..Default::default()
        };

        for (field, raw) in extracted.fields {
            self.apply_field(&mut metadata, &mut content, field, raw, today);
        }

        if self.config.use_daily_note_path_as_date {
            let slot = date_slot(&mut metadata, self.config.use_as_date_type.field());
            if slot.is_none() {
                *slot = resolve_daily_note_date(
                    file_path,
                    &self.config.daily_note_path,
                    &self.config.daily_note_format,
                );
            }
        }

        let status_category = self
            .config
            .status_mapping
            .get(&scanned.status)
            .copied()
            .unwrap_or(StatusCategory::NotStarted);

        Task {
            id: Task::make_id(file_path, line_number),
            file_path: file_path.to_string(),
            line: line_number,
            indent_level: scanned.indent_level,
            list_marker: scanned.list_marker.clone(),
            status: scanned.status,
            status_category,
            completed: status_category == StatusCategory::Completed,
            content,
            original_markdown: raw_line.to_string(),
            metadata,
            parent_id: None,
            children: vec![],
        }
    }

    /// Resolves one raw field token onto the metadata bag.
    ///
    /// A token that fails resolution puts its markup back into the content so
    /// the malformed input stays visible.
    fn apply_field(
        &self,
        metadata: &mut TaskMetadata,
        content: &mut String,
        field: MetadataField,
        raw: RawField,
        today: NaiveDate,
    ) {
        match field {
            MetadataField::Priority => match resolve_priority(&raw.value) {
                Some(priority) => metadata.priority = Some(priority),
                None => restore_markup(content, &raw.markup),
            },
            MetadataField::Project => {
                if raw.value.is_empty() {
                    restore_markup(content, &raw.markup);
                } else {
                    metadata.project = Some(raw.value);
                }
            }
            MetadataField::Context => {
                if raw.value.is_empty() {
                    restore_markup(content, &raw.markup);
                } else {
                    metadata.context = Some(raw.value);
                }
            }
            MetadataField::Area => {
                if raw.value.is_empty() {
                    restore_markup(content, &raw.markup);
                } else {
                    metadata.extra.insert("area".to_string(), raw.value);
                }
            }
            MetadataField::Recurrence => {
                if raw.value.is_empty() {
                    restore_markup(content, &raw.markup);
                } else {
                    metadata.recurrence = Some(parse_recurrence(&raw.value));
                }
            }
            date_field => match resolve_date(&raw.value, today) {
                Some(timestamp) => *date_slot(metadata, date_field) = Some(timestamp),
                None => restore_markup(content, &raw.markup),
            },
        }
    }
}

/// The metadata slot for a date-valued field.
fn date_slot(metadata: &mut TaskMetadata, field: MetadataField) -> &mut Option<i64> {
    match field {
        MetadataField::StartDate => &mut metadata.start_date,
        MetadataField::ScheduledDate => &mut metadata.scheduled_date,
        MetadataField::CompletedDate => &mut metadata.completed_date,
        MetadataField::CreatedDate => &mut metadata.created_date,
        _ => &mut metadata.due_date,
    }
}

fn restore_markup(content: &mut String, markup: &str) {
    if markup.is_empty() {
        return;
    }
    if !content.is_empty() {
        content.push(' ');
    }
    content.push_str(markup);
}
