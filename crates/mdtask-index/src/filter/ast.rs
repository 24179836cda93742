//! Abstract syntax tree for view filter expressions.
//!
//! A saved view's advanced filter is a two-level boolean tree: the root
//! combines filter groups, and each group combines leaf filters, each level
//! under its own `all`/`any`/`none` combinator. The tree arrives as camelCase
//! JSON from the settings collaborator and is evaluated read-only.

use serde::{Deserialize, Serialize};

/// Boolean combinator for a group of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupCondition {
    /// Logical AND: every member must match.
    All,
    /// Logical OR: at least one member must match.
    Any,
    /// Logical NOR: true iff no member matches.
    None,
}

/// Task property a leaf filter inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterProperty {
    Content,
    Status,
    Priority,
    DueDate,
    StartDate,
    ScheduledDate,
    CompletedDate,
    CreatedDate,
    Tags,
    FilePath,
    Completed,
    Project,
    Context,
}

/// Comparison a leaf filter applies to its property.
///
/// Conditions are property-type-specific: the string conditions apply to text
/// properties, the ordering conditions to dates and numbers. A condition
/// applied to a property that does not support it simply evaluates to false;
/// evaluation never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterCondition {
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "doesNotContain")]
    DoesNotContain,
    #[serde(rename = "is")]
    Is,
    #[serde(rename = "isNot")]
    IsNot,
    #[serde(rename = "startsWith")]
    StartsWith,
    #[serde(rename = "endsWith")]
    EndsWith,
    #[serde(rename = "isEmpty")]
    IsEmpty,
    #[serde(rename = "isNotEmpty")]
    IsNotEmpty,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<=")]
    LessOrEqual,
}

/// One leaf predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// The task property to inspect.
    pub property: FilterProperty,
    /// The comparison to apply.
    pub condition: FilterCondition,
    /// Comparison operand; absent for `isEmpty`/`isNotEmpty`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A group of leaf filters under one combinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    /// How the leaf results combine.
    pub group_condition: GroupCondition,
    /// The leaves. An empty group is vacuously true.
    #[serde(default)]
    pub filters: Vec<Filter>,
}

/// The root of a view's advanced filter tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootFilterState {
    /// How the per-group results combine.
    pub root_condition: GroupCondition,
    /// The groups. An empty tree matches every task.
    #[serde(default)]
    pub filter_groups: Vec<FilterGroup>,
}

impl RootFilterState {
    /// A tree that matches every task.
    pub fn match_all() -> Self {
        Self {
            root_condition: GroupCondition::All,
            filter_groups: vec![],
        }
    }
}
