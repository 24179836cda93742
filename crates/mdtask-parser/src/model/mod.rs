//! Data models produced and consumed by the parsing engine.

pub mod task;
pub mod workflow;

pub use task::{Recurrence, RecurrenceUnit, Task, TaskId, TaskMetadata, TgProject, TgProjectKind};
pub use workflow::{
    StageType, SubStage, WorkflowDefinition, WorkflowError, WorkflowResult, WorkflowStage,
};
