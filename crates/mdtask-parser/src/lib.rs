//! Markdown task parsing and metadata resolution library
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use mdtask_parser::prelude::*;
//! ```
//!
//! This re-exports the most commonly used types including [`TaskParser`],
//! the configuration model, and the task data model.
//!
//! The typical flow is: build a [`ParserConfig`] (usually deserialized from
//! settings JSON), construct a [`TaskParser`] once, then call
//! [`TaskParser::parse`] per file. Parsing is pure and best-effort: after
//! construction it never fails, and malformed metadata stays visible in task
//! content instead of being dropped.

pub mod config;
pub mod dates;
pub mod error;
pub mod model;
pub mod prelude;
pub mod priority;
pub mod project;
pub mod recurrence;
pub mod scanner;
pub mod tree;

mod extract;
mod inherit;
mod parser;

pub use config::{
    DateKind, MetadataConfig, MetadataField, MetadataParseMode, ParserConfig, PathMapping,
    ProjectConfig, StatusCategory,
};
pub use error::{ConfigError, ConfigResult};
pub use model::{
    Recurrence, RecurrenceUnit, Task, TaskId, TaskMetadata, TgProject, TgProjectKind,
    WorkflowDefinition, WorkflowError, WorkflowStage,
};
pub use parser::TaskParser;
