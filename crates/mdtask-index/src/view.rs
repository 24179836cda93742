//! Per-view default filter rules.
//!
//! Every view carries a set of simple field-equality rules plus the
//! hide-completed and hide-blank flags. These defaults are applied before the
//! view's advanced filter tree and are never skipped, even when a tree is
//! also configured.

use mdtask_parser::Task;
use serde::{Deserialize, Serialize};

use crate::filter::{evaluator, Filter, FilterCondition, FilterProperty};

/// One field-equality rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRule {
    /// The task property the rule inspects.
    pub property: FilterProperty,
    /// The value the property must equal (case-insensitive).
    pub value: String,
}

/// A view's default filtering: equality rules plus the two hide flags.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewFilterRules {
    /// Field-equality rules; all must hold.
    pub rules: Vec<FieldRule>,
    /// Hide tasks whose status category is completed.
    pub hide_completed: bool,
    /// Hide tasks with no content text.
    pub hide_blank: bool,
}

impl ViewFilterRules {
    /// True when the task passes every default rule and both hide flags.
    pub fn allows(&self, task: &Task) -> bool {
        if self.hide_completed && task.completed {
            return false;
        }
        if self.hide_blank && task.content.trim().is_empty() {
            return false;
        }
        self.rules.iter().all(|rule| {
            let filter = Filter {
                property: rule.property,
                condition: FilterCondition::Is,
                value: Some(rule.value.clone()),
            };
            evaluator::evaluate_filter(task, &filter)
        })
    }
}
