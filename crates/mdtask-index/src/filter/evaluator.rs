//! Filter evaluation against parsed tasks.
//!
//! Evaluates an advanced filter tree against one task at a time. Evaluation
//! is pure and never errors: a condition applied to a property that cannot
//! support it, or an operand that fails to parse, evaluates to false, and a
//! property absent on the task behaves as its type's empty value.

use chrono::{DateTime, NaiveDate};
use mdtask_parser::Task;

use super::ast::{Filter, FilterCondition, FilterGroup, FilterProperty, GroupCondition, RootFilterState};

/// Evaluates filter trees against tasks.
///
/// Holds no state; one engine may be shared freely across views and threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    /// True when the task matches the filter tree.
    ///
    /// An empty tree matches everything, and an empty group is vacuously
    /// true regardless of its combinator.
    pub fn evaluate(&self, task: &Task, state: &RootFilterState) -> bool {
        if state.filter_groups.is_empty() {
            return true;
        }
        let group_results = state
            .filter_groups
            .iter()
            .map(|group| self.evaluate_group(task, group));
        combine(state.root_condition, group_results)
    }

    fn evaluate_group(&self, task: &Task, group: &FilterGroup) -> bool {
        if group.filters.is_empty() {
            return true;
        }
        let results = group.filters.iter().map(|f| evaluate_filter(task, f));
        combine(group.group_condition, results)
    }
}

/// Folds member results under a combinator. `none` is logical NOR.
fn combine(condition: GroupCondition, mut results: impl Iterator<Item = bool>) -> bool {
    match condition {
        GroupCondition::All => results.all(|r| r),
        GroupCondition::Any => results.any(|r| r),
        GroupCondition::None => !results.any(|r| r),
    }
}

/// Dispatches one leaf filter to its property-typed comparator.
pub(crate) fn evaluate_filter(task: &Task, filter: &Filter) -> bool {
    let operand = filter.value.as_deref().unwrap_or("");
    match filter.property {
        FilterProperty::Content => compare_string(Some(&task.content), filter.condition, operand),
        FilterProperty::Status => {
            let status = task.status.to_string();
            compare_string(Some(&status), filter.condition, operand)
        }
        FilterProperty::FilePath => {
            compare_string(Some(&task.file_path), filter.condition, operand)
        }
        FilterProperty::Project => {
            compare_string(task.metadata.effective_project(), filter.condition, operand)
        }
        FilterProperty::Context => {
            compare_string(task.metadata.context.as_deref(), filter.condition, operand)
        }
        FilterProperty::Priority => {
            compare_number(task.metadata.priority.map(i64::from), filter.condition, operand)
        }
        FilterProperty::DueDate => compare_date(task.metadata.due_date, filter.condition, operand),
        FilterProperty::StartDate => {
            compare_date(task.metadata.start_date, filter.condition, operand)
        }
        FilterProperty::ScheduledDate => {
            compare_date(task.metadata.scheduled_date, filter.condition, operand)
        }
        FilterProperty::CompletedDate => {
            compare_date(task.metadata.completed_date, filter.condition, operand)
        }
        FilterProperty::CreatedDate => {
            compare_date(task.metadata.created_date, filter.condition, operand)
        }
        FilterProperty::Tags => compare_tags(&task.metadata.tags, filter.condition, operand),
        FilterProperty::Completed => compare_bool(task.completed, filter.condition, operand),
    }
}

/// Case-insensitive string comparator. An absent property is the empty
/// string; ordering conditions do not apply to strings.
fn compare_string(actual: Option<&str>, condition: FilterCondition, operand: &str) -> bool {
    let actual = actual.unwrap_or("").to_lowercase();
    let operand = operand.to_lowercase();
    match condition {
        FilterCondition::Contains => actual.contains(&operand),
        FilterCondition::DoesNotContain => !actual.contains(&operand),
        FilterCondition::Is => actual == operand,
        FilterCondition::IsNot => actual != operand,
        FilterCondition::StartsWith => actual.starts_with(&operand),
        FilterCondition::EndsWith => actual.ends_with(&operand),
        FilterCondition::IsEmpty => actual.is_empty(),
        FilterCondition::IsNotEmpty => !actual.is_empty(),
        _ => false,
    }
}

/// Day-granularity date comparator against a `YYYY-MM-DD` operand.
///
/// Ordering conditions on a missing date, or an unparseable operand, are
/// false; only `isEmpty`/`isNotEmpty` see the absence itself.
fn compare_date(actual_ms: Option<i64>, condition: FilterCondition, operand: &str) -> bool {
    match condition {
        FilterCondition::IsEmpty => return actual_ms.is_none(),
        FilterCondition::IsNotEmpty => return actual_ms.is_some(),
        _ => {}
    }

    let Some(actual) = actual_ms.and_then(to_day) else {
        return false;
    };
    let Ok(operand) = NaiveDate::parse_from_str(operand, "%Y-%m-%d") else {
        return false;
    };

    match condition {
        FilterCondition::Is => actual == operand,
        FilterCondition::IsNot => actual != operand,
        FilterCondition::Greater => actual > operand,
        FilterCondition::Less => actual < operand,
        FilterCondition::GreaterOrEqual => actual >= operand,
        FilterCondition::LessOrEqual => actual <= operand,
        _ => false,
    }
}

fn to_day(timestamp_ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|dt| dt.date_naive())
}

/// Numeric comparator; the operand must parse as an integer.
fn compare_number(actual: Option<i64>, condition: FilterCondition, operand: &str) -> bool {
    match condition {
        FilterCondition::IsEmpty => return actual.is_none(),
        FilterCondition::IsNotEmpty => return actual.is_some(),
        _ => {}
    }

    let Some(actual) = actual else {
        return false;
    };
    let Ok(operand) = operand.parse::<i64>() else {
        return false;
    };

    match condition {
        FilterCondition::Is => actual == operand,
        FilterCondition::IsNot => actual != operand,
        FilterCondition::Greater => actual > operand,
        FilterCondition::Less => actual < operand,
        FilterCondition::GreaterOrEqual => actual >= operand,
        FilterCondition::LessOrEqual => actual <= operand,
        _ => false,
    }
}

/// Tag-list comparator: containment is exact membership, case-insensitive,
/// with a leading `#` on the operand forgiven.
fn compare_tags(tags: &[String], condition: FilterCondition, operand: &str) -> bool {
    let operand = operand.trim_start_matches('#').to_lowercase();
    let has = tags.iter().any(|t| t.to_lowercase() == operand);
    match condition {
        FilterCondition::Contains | FilterCondition::Is => has,
        FilterCondition::DoesNotContain | FilterCondition::IsNot => !has,
        FilterCondition::IsEmpty => tags.is_empty(),
        FilterCondition::IsNotEmpty => !tags.is_empty(),
        _ => false,
    }
}

/// Boolean comparator; the operand `"true"` (any case) is true, anything
/// else false. A boolean is never empty.
fn compare_bool(actual: bool, condition: FilterCondition, operand: &str) -> bool {
    let operand = operand.eq_ignore_ascii_case("true");
    match condition {
        FilterCondition::Is => actual == operand,
        FilterCondition::IsNot => actual != operand,
        FilterCondition::IsEmpty => false,
        FilterCondition::IsNotEmpty => true,
        _ => false,
    }
}
