//! Effective-project resolution.
//!
//! Computes `metadata.project` (explicit) and `metadata.tg_project`
//! (inferred) under a fixed precedence. Sources are evaluated lazily: once
//! one produces a value, later sources are not consulted.
//!
//! 1. Task-level explicit tag or inline field: always wins, never
//!    overridden by inference.
//! 2. Path mapping: longest-prefix match of the file path against the
//!    configured folders.
//! 3. Frontmatter metadata key, gated by the inheritance flags and depth.
//! 4. Nearest ancestor config file, walking up folders when recursive
//!    search is enabled.

use std::collections::BTreeMap;

use crate::config::ProjectConfig;
use crate::model::{TgProject, TgProjectKind};

/// Project resolution outcome for one task.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedProject {
    /// Explicitly authored project, if any.
    pub project: Option<String>,
    /// Inferred project, absent when an explicit project is present.
    pub tg_project: Option<TgProject>,
}

/// Resolves the effective project for a task.
///
/// `explicit` is the project extracted from the task line itself;
/// `indent_level` gates the frontmatter source for subtasks.
pub fn resolve_project(
    config: &ProjectConfig,
    explicit: Option<&str>,
    file_path: &str,
    frontmatter: &BTreeMap<String, String>,
    indent_level: usize,
) -> ResolvedProject {
    if let Some(project) = explicit {
        return ResolvedProject {
            project: Some(project.to_string()),
            tg_project: None,
        };
    }

    let inferred = path_mapping_project(config, file_path)
        .or_else(|| frontmatter_project(config, frontmatter, indent_level))
        .or_else(|| config_file_project(config, file_path));

    ResolvedProject {
        project: None,
        tg_project: inferred,
    }
}

/// Longest-prefix match against the enabled path mappings.
fn path_mapping_project(config: &ProjectConfig, file_path: &str) -> Option<TgProject> {
    config
        .path_mappings
        .iter()
        .filter(|m| m.enabled && !m.path_prefix.is_empty())
        .filter(|m| {
            file_path == m.path_prefix
                || file_path.starts_with(&format!("{}/", m.path_prefix))
        })
        .max_by_key(|m| m.path_prefix.len())
        .map(|m| TgProject {
            kind: TgProjectKind::Path,
            source: m.project_name.clone(),
            read_only: true,
        })
}

/// Frontmatter lookup via the configured metadata key.
fn frontmatter_project(
    config: &ProjectConfig,
    frontmatter: &BTreeMap<String, String>,
    indent_level: usize,
) -> Option<TgProject> {
    let meta = &config.metadata_config;
    if !meta.enabled || !meta.inherit_from_frontmatter {
        return None;
    }
    if indent_level > 0 && !meta.inherit_from_frontmatter_for_subtasks {
        return None;
    }
    let value = frontmatter.get(&meta.metadata_key)?;
    if value.is_empty() {
        return None;
    }
    Some(TgProject {
        kind: TgProjectKind::Metadata,
        source: value.clone(),
        read_only: true,
    })
}

/// Nearest-folder config file lookup, optionally walking up ancestors.
fn config_file_project(config: &ProjectConfig, file_path: &str) -> Option<TgProject> {
    if !config.config_file.enabled {
        return None;
    }

    let mut folder = parent_folder(file_path);
    loop {
        if let Some(value) = config.config_file_projects.get(folder) {
            if !value.is_empty() {
                return Some(TgProject {
                    kind: TgProjectKind::ConfigFile,
                    source: value.clone(),
                    read_only: true,
                });
            }
        }
        if !config.config_file.search_recursively || folder.is_empty() {
            return None;
        }
        folder = parent_folder(folder);
    }
}

/// The `/`-separated parent of a path; the vault root is the empty string.
fn parent_folder(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}
