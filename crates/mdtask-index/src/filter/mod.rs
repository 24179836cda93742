//! Advanced filter trees for saved views.
//!
//! A view may carry a user-authored boolean filter tree on top of its default
//! rules. The tree has two levels: the root combines filter groups, and each
//! group combines leaf predicates, each level under its own `all`/`any`/
//! `none` combinator.
//!
//! # Example
//!
//! ```
//! use mdtask_index::filter::{FilterEngine, RootFilterState};
//!
//! // A view's saved filter, straight from settings JSON.
//! let state: RootFilterState = serde_json::from_str(r#"{
//!     "rootCondition": "all",
//!     "filterGroups": [
//!         {
//!             "groupCondition": "any",
//!             "filters": [
//!                 { "property": "priority", "condition": ">=", "value": "4" },
//!                 { "property": "tags", "condition": "contains", "value": "urgent" }
//!             ]
//!         }
//!     ]
//! }"#).unwrap();
//!
//! let engine = FilterEngine::new();
//! let tasks: Vec<mdtask_parser::Task> = vec![];
//! let matching: Vec<_> = tasks.iter().filter(|t| engine.evaluate(t, &state)).collect();
//! ```

mod ast;
pub(crate) mod evaluator;

pub use ast::{
    Filter, FilterCondition, FilterGroup, FilterProperty, GroupCondition, RootFilterState,
};
pub use evaluator::FilterEngine;
