//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the mdtask-parser
//! crate, making it easy for library consumers to import everything they need
//! with a single use statement.
//!
//! # Example
//!
//! ```
//! use mdtask_parser::prelude::*;
//!
//! // Now you have access to:
//! // - TaskParser (the parsing engine)
//! // - ParserConfig, MetadataParseMode, StatusCategory (configuration)
//! // - ConfigError, ConfigResult (error handling)
//! // - Task, TaskMetadata, TgProject, Recurrence (data models)
//! // - WorkflowDefinition, WorkflowStage (workflow validation)
//! ```

// Parsing engine
pub use crate::parser::TaskParser;

// Error types
pub use crate::error::{ConfigError, ConfigResult};

// Configuration types
pub use crate::config::{
    DateKind,
    MetadataConfig,
    MetadataField,
    MetadataParseMode,
    ParserConfig,
    PathMapping,
    ProjectConfig,
    StatusCategory,
};

// Task data models
pub use crate::model::{
    Recurrence,
    RecurrenceUnit,
    Task,
    TaskId,
    TaskMetadata,
    TgProject,
    TgProjectKind,
};

// Workflow types
pub use crate::model::{
    StageType, SubStage, WorkflowDefinition, WorkflowError, WorkflowResult, WorkflowStage,
};
