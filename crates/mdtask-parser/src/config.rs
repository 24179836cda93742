//! Parser configuration model.
//!
//! Configuration arrives as camelCase JSON from the settings collaborator and
//! is consumed read-only for the duration of a parse. All lookup tables
//! derived from it (emoji symbols, dataview keys, tag prefixes) are built once
//! in [`crate::TaskParser::new`], never per line.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which inline-metadata grammar(s) are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataParseMode {
    /// Only the emoji-symbol grammar (`📅 2024-01-01`, `🔺`).
    EmojiOnly,
    /// Only bracketed `[key::value]` inline fields.
    DataviewOnly,
    /// Both grammars; the dataview form wins when the same logical field
    /// appears in both on one line.
    Both,
}

/// Lifecycle category a raw status character maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusCategory {
    NotStarted,
    InProgress,
    Abandoned,
    Planned,
    Completed,
}

/// Logical metadata field a symbol, inline-field key, or tag prefix maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataField {
    DueDate,
    StartDate,
    ScheduledDate,
    CompletedDate,
    CreatedDate,
    Priority,
    Project,
    Context,
    Area,
    Recurrence,
}

impl MetadataField {
    /// Returns true for the five date-valued fields.
    pub fn is_date(self) -> bool {
        matches!(
            self,
            MetadataField::DueDate
                | MetadataField::StartDate
                | MetadataField::ScheduledDate
                | MetadataField::CompletedDate
                | MetadataField::CreatedDate
        )
    }
}

/// Which date field a daily-note path date is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateKind {
    Due,
    Start,
    Scheduled,
}

impl DateKind {
    /// The metadata field this date kind populates.
    pub fn field(self) -> MetadataField {
        match self {
            DateKind::Due => MetadataField::DueDate,
            DateKind::Start => MetadataField::StartDate,
            DateKind::Scheduled => MetadataField::ScheduledDate,
        }
    }
}

/// A folder-prefix to project-name mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMapping {
    /// Folder prefix, `/`-separated, matched against the start of a file path.
    pub path_prefix: String,
    /// Project name assigned to tasks under that prefix.
    pub project_name: String,
    /// Disabled mappings are skipped without being removed from settings.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Frontmatter-based project lookup and inheritance flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataConfig {
    /// Frontmatter key that names the project (usually `"project"`).
    pub metadata_key: String,
    /// Whether file-level metadata propagates to top-level tasks.
    pub inherit_from_frontmatter: bool,
    /// Whether file-level metadata also propagates to subtasks. Only
    /// effective when `inherit_from_frontmatter` is enabled.
    pub inherit_from_frontmatter_for_subtasks: bool,
    /// Master switch for the frontmatter project source.
    pub enabled: bool,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            metadata_key: "project".to_string(),
            inherit_from_frontmatter: true,
            inherit_from_frontmatter_for_subtasks: false,
            enabled: true,
        }
    }
}

/// Project-config-file lookup settings.
///
/// The file-I/O collaborator reads the config files from disk and supplies
/// their project values through [`ProjectConfig::config_file_projects`]; this
/// struct only controls how that map is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFileConfig {
    /// Name of the per-folder config file (e.g. `"project.md"`).
    pub file_name: String,
    /// Walk up ancestor folders looking for the nearest config file.
    pub search_recursively: bool,
    /// Master switch for the config-file project source.
    pub enabled: bool,
}

impl Default for ConfigFileConfig {
    fn default() -> Self {
        Self {
            file_name: "project.md".to_string(),
            search_recursively: true,
            enabled: false,
        }
    }
}

/// Project resolution policy: explicit tags always win, then path mappings,
/// then frontmatter metadata, then per-folder config files.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectConfig {
    /// Folder-prefix mappings, longest prefix wins.
    pub path_mappings: Vec<PathMapping>,
    /// Frontmatter lookup and inheritance flags.
    pub metadata_config: MetadataConfig,
    /// Config-file lookup settings.
    pub config_file: ConfigFileConfig,
    /// Folder path → project value, extracted from the on-disk config files
    /// by the file-I/O collaborator. Keys use `/`-separated vault paths with
    /// no trailing slash; the vault root is the empty string.
    pub config_file_projects: BTreeMap<String, String>,
}

/// Complete parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserConfig {
    /// Parse task lines found inside `%% ... %%` comment blocks.
    pub parse_comments: bool,
    /// Run the inline-metadata grammars at all.
    pub parse_metadata: bool,
    /// Collect `#tag` / `@context` tokens.
    pub parse_tags: bool,
    /// Which inline-metadata grammar(s) are active.
    pub metadata_parse_mode: MetadataParseMode,
    /// Upper bound on extraction passes per line. Each pass consumes exactly
    /// one metadata token (an inline field, an emoji symbol, or a tag), so
    /// this is effectively a per-line token budget. Exceeding it stops
    /// further stripping on that line; remaining markup stays visible in the
    /// content.
    pub max_metadata_iterations: u32,
    /// Symbol → field for the emoji grammar.
    pub emoji_mapping: BTreeMap<String, MetadataField>,
    /// Tag prefix → field for `#prefix/value` tags, and extra inline-field
    /// keys for the dataview grammar.
    pub special_tag_prefixes: BTreeMap<String, MetadataField>,
    /// Raw status character → lifecycle category.
    pub status_mapping: BTreeMap<char, StatusCategory>,
    /// Project resolution policy.
    pub project_config: ProjectConfig,
    /// Derive a date from the file path of daily notes.
    pub use_daily_note_path_as_date: bool,
    /// chrono format string for the daily-note file stem (e.g. `"%Y-%m-%d"`).
    pub daily_note_format: String,
    /// Folder containing daily notes, `/`-separated, no trailing slash.
    pub daily_note_path: String,
    /// Which date field a daily-note date populates.
    pub use_as_date_type: DateKind,
    /// Columns per tab when measuring indentation.
    pub tab_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            parse_comments: false,
            parse_metadata: true,
            parse_tags: true,
            metadata_parse_mode: MetadataParseMode::Both,
            max_metadata_iterations: 20,
            emoji_mapping: default_emoji_mapping(),
            special_tag_prefixes: default_tag_prefixes(),
            status_mapping: default_status_mapping(),
            project_config: ProjectConfig::default(),
            use_daily_note_path_as_date: false,
            daily_note_format: "%Y-%m-%d".to_string(),
            daily_note_path: String::new(),
            use_as_date_type: DateKind::Due,
            tab_size: 4,
        }
    }
}

fn default_true() -> bool {
    true
}

/// The conventional Tasks-style emoji symbol set.
pub fn default_emoji_mapping() -> BTreeMap<String, MetadataField> {
    let mut map = BTreeMap::new();
    map.insert("📅".to_string(), MetadataField::DueDate);
    map.insert("🛫".to_string(), MetadataField::StartDate);
    map.insert("⏳".to_string(), MetadataField::ScheduledDate);
    map.insert("✅".to_string(), MetadataField::CompletedDate);
    map.insert("➕".to_string(), MetadataField::CreatedDate);
    map.insert("🔁".to_string(), MetadataField::Recurrence);
    map.insert("⏬".to_string(), MetadataField::Priority);
    map.insert("🔽".to_string(), MetadataField::Priority);
    map.insert("🔼".to_string(), MetadataField::Priority);
    map.insert("⏫".to_string(), MetadataField::Priority);
    map.insert("🔺".to_string(), MetadataField::Priority);
    map
}

/// Default `#prefix/value` tag prefixes.
pub fn default_tag_prefixes() -> BTreeMap<String, MetadataField> {
    let mut map = BTreeMap::new();
    map.insert("project".to_string(), MetadataField::Project);
    map.insert("context".to_string(), MetadataField::Context);
    map.insert("area".to_string(), MetadataField::Area);
    map
}

/// Default status character classification.
pub fn default_status_mapping() -> BTreeMap<char, StatusCategory> {
    let mut map = BTreeMap::new();
    map.insert(' ', StatusCategory::NotStarted);
    map.insert('/', StatusCategory::InProgress);
    map.insert('x', StatusCategory::Completed);
    map.insert('X', StatusCategory::Completed);
    map.insert('-', StatusCategory::Abandoned);
    map.insert('?', StatusCategory::Planned);
    map
}
