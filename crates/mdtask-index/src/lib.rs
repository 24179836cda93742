//! Flat task index and view filtering over parsed markdown tasks.
//!
//! This crate holds the vault-wide task collection produced by per-file
//! parses, plus the two filtering layers a view applies to it: the default
//! field rules ([`view::ViewFilterRules`]) and the advanced boolean filter
//! tree ([`filter::FilterEngine`]).
//!
//! Files parse independently, possibly concurrently, so per-file results
//! arrive in no particular order. Task identity is positional (file path plus
//! line), which makes partial updates unsound: a re-parse must replace the
//! file's entire prior task set, and an older in-flight result must never
//! overwrite a newer one. [`TaskIndex::replace_file`] enforces both with a
//! per-file revision.

use std::collections::BTreeMap;

use mdtask_parser::{Task, TaskId};
use tracing::{debug, warn};

pub mod filter;
pub mod view;

pub use filter::{
    Filter, FilterCondition, FilterGroup, FilterProperty, FilterEngine, GroupCondition,
    RootFilterState,
};
pub use view::{FieldRule, ViewFilterRules};

/// Per-file bookkeeping inside the index.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FileEntry {
    /// Monotonic revision of the last accepted parse for this file.
    revision: u64,
    /// Ids of the file's tasks, in line order.
    task_ids: Vec<TaskId>,
}

/// The vault-wide task collection, keyed by task id.
///
/// Updates are whole-file and last-write-wins: [`TaskIndex::replace_file`]
/// drops every prior task for the file before inserting the new set, and
/// rejects results whose revision is not strictly newer than the stored one.
#[derive(Debug, Clone, Default)]
pub struct TaskIndex {
    tasks: BTreeMap<TaskId, Task>,
    files: BTreeMap<String, FileEntry>,
}

impl TaskIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces a file's entire task set.
    ///
    /// `revision` orders competing parses of the same file (a content hash
    /// counter or modification timestamp works). A revision less than or
    /// equal to the stored one is a stale in-flight result and is rejected;
    /// returns whether the result was accepted.
    pub fn replace_file(&mut self, file_path: &str, revision: u64, tasks: Vec<Task>) -> bool {
        if let Some(entry) = self.files.get(file_path) {
            if revision <= entry.revision {
                warn!(
                    file_path,
                    stored = entry.revision,
                    offered = revision,
                    "discarding stale parse result"
                );
                return false;
            }
        }

        self.drop_file_tasks(file_path);

        let task_ids: Vec<TaskId> = tasks.iter().map(|t| t.id.clone()).collect();
        for task in tasks {
            self.tasks.insert(task.id.clone(), task);
        }
        debug!(file_path, revision, tasks = task_ids.len(), "replaced file tasks");
        self.files
            .insert(file_path.to_string(), FileEntry { revision, task_ids });
        true
    }

    /// Removes a file and all of its tasks; returns whether it was present.
    pub fn remove_file(&mut self, file_path: &str) -> bool {
        let present = self.files.contains_key(file_path);
        self.drop_file_tasks(file_path);
        self.files.remove(file_path);
        present
    }

    fn drop_file_tasks(&mut self, file_path: &str) {
        if let Some(entry) = self.files.get(file_path) {
            for id in &entry.task_ids {
                self.tasks.remove(id);
            }
        }
    }

    /// Looks up one task by id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// The last accepted revision for a file, if it is indexed.
    pub fn file_revision(&self, file_path: &str) -> Option<u64> {
        self.files.get(file_path).map(|e| e.revision)
    }

    /// A file's tasks in line order; empty when the file is not indexed.
    pub fn tasks_for_file(&self, file_path: &str) -> Vec<&Task> {
        let Some(entry) = self.files.get(file_path) else {
            return vec![];
        };
        entry
            .task_ids
            .iter()
            .filter_map(|id| self.tasks.get(id))
            .collect()
    }

    /// All indexed tasks, in id order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
