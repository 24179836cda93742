//! Workflow stage definitions.
//!
//! A workflow is a user-defined task lifecycle state machine: linear stages
//! advance to a single `next` stage, cycle stages rotate through a ring of
//! sub-stages, and terminal stages end the lifecycle. Referential integrity
//! is validated once at definition-load time, never during traversal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A specialized Result type for workflow validation.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Errors raised when a workflow definition fails validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// The definition contains no stages.
    #[error("workflow '{workflow}' has no stages")]
    EmptyWorkflow {
        /// The workflow id.
        workflow: String,
    },

    /// Two stages share an id.
    #[error("duplicate stage id '{id}'")]
    DuplicateStageId {
        /// The duplicated id.
        id: String,
    },

    /// A `next` or `canProceedTo` reference names a stage that does not
    /// exist in the same definition.
    #[error("stage '{from}' references unknown stage '{target}'")]
    UnknownStageReference {
        /// The referencing stage id.
        from: String,
        /// The missing target id.
        target: String,
    },

    /// A terminal stage declares a `next` stage.
    #[error("terminal stage '{stage}' must not have a next stage")]
    TerminalStageHasNext {
        /// The offending stage id.
        stage: String,
    },

    /// A cycle stage has no sub-stages.
    #[error("cycle stage '{stage}' has no sub-stages")]
    EmptyCycle {
        /// The offending stage id.
        stage: String,
    },

    /// A cycle stage's sub-stages do not form a closed ring.
    #[error("cycle stage '{stage}' sub-stages do not form a ring")]
    BrokenSubStageRing {
        /// The offending stage id.
        stage: String,
    },
}

/// Stage behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StageType {
    /// Advances to a single `next` stage.
    Linear,
    /// Rotates through a ring of sub-stages until explicitly advanced.
    Cycle,
    /// Ends the lifecycle; has no `next`.
    Terminal,
}

/// A sub-stage inside a cycle stage.
///
/// When `next` is absent, the ring advances to the following sub-stage in
/// declaration order, wrapping at the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubStage {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// A named state in a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStage {
    pub id: String,
    pub name: String,
    /// Stage behavior.
    #[serde(rename = "type")]
    pub stage_type: StageType,
    /// The stage entered when this one completes. Forbidden on terminal
    /// stages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Ring of sub-stages for cycle stages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_stages: Vec<SubStage>,
    /// Stages this one may jump to out of order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub can_proceed_to: Vec<String>,
}

/// A complete workflow definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    pub id: String,
    pub name: String,
    pub stages: Vec<WorkflowStage>,
}

impl WorkflowDefinition {
    /// Validates referential integrity of the definition.
    ///
    /// Checks that stage ids are unique, every `next` and `canProceedTo`
    /// target resolves to a stage in this definition, terminal stages carry
    /// no `next`, and every cycle stage's sub-stages form a closed ring.
    pub fn validate(&self) -> WorkflowResult<()> {
        if self.stages.is_empty() {
            return Err(WorkflowError::EmptyWorkflow {
                workflow: self.id.clone(),
            });
        }

        let mut ids = std::collections::BTreeSet::new();
        for stage in &self.stages {
            if !ids.insert(stage.id.as_str()) {
                return Err(WorkflowError::DuplicateStageId {
                    id: stage.id.clone(),
                });
            }
        }

        for stage in &self.stages {
            if stage.stage_type == StageType::Terminal && stage.next.is_some() {
                return Err(WorkflowError::TerminalStageHasNext {
                    stage: stage.id.clone(),
                });
            }

            if let Some(next) = &stage.next {
                if !ids.contains(next.as_str()) {
                    return Err(WorkflowError::UnknownStageReference {
                        from: stage.id.clone(),
                        target: next.clone(),
                    });
                }
            }

            for target in &stage.can_proceed_to {
                if !ids.contains(target.as_str()) {
                    return Err(WorkflowError::UnknownStageReference {
                        from: stage.id.clone(),
                        target: target.clone(),
                    });
                }
            }

            if stage.stage_type == StageType::Cycle {
                validate_sub_stage_ring(stage)?;
            }
        }

        Ok(())
    }
}

/// Checks that walking effective `next` pointers from the first sub-stage
/// returns to it without leaving the stage.
fn validate_sub_stage_ring(stage: &WorkflowStage) -> WorkflowResult<()> {
    if stage.sub_stages.is_empty() {
        return Err(WorkflowError::EmptyCycle {
            stage: stage.id.clone(),
        });
    }

    let index_of = |id: &str| stage.sub_stages.iter().position(|s| s.id == id);

    let mut current = 0usize;
    for _ in 0..stage.sub_stages.len() {
        let sub = &stage.sub_stages[current];
        let next_index = match &sub.next {
            Some(next_id) => index_of(next_id).ok_or_else(|| WorkflowError::UnknownStageReference {
                from: format!("{}/{}", stage.id, sub.id),
                target: next_id.clone(),
            })?,
            // Implicit next: the following sub-stage, wrapping.
            None => (current + 1) % stage.sub_stages.len(),
        };
        if next_index == 0 {
            return Ok(());
        }
        current = next_index;
    }

    Err(WorkflowError::BrokenSubStageRing {
        stage: stage.id.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(id: &str, next: Option<&str>) -> WorkflowStage {
        WorkflowStage {
            id: id.to_string(),
            name: id.to_string(),
            stage_type: StageType::Linear,
            next: next.map(|s| s.to_string()),
            sub_stages: vec![],
            can_proceed_to: vec![],
        }
    }

    fn terminal(id: &str) -> WorkflowStage {
        WorkflowStage {
            id: id.to_string(),
            name: id.to_string(),
            stage_type: StageType::Terminal,
            next: None,
            sub_stages: vec![],
            can_proceed_to: vec![],
        }
    }

    fn definition(stages: Vec<WorkflowStage>) -> WorkflowDefinition {
        WorkflowDefinition {
            id: "wf".to_string(),
            name: "Workflow".to_string(),
            stages,
        }
    }

    #[test]
    fn test_valid_linear_workflow() {
        let wf = definition(vec![
            linear("todo", Some("doing")),
            linear("doing", Some("done")),
            terminal("done"),
        ]);
        assert!(wf.validate().is_ok());
    }

    #[test]
    fn test_empty_workflow_is_rejected() {
        let wf = definition(vec![]);
        assert_eq!(
            wf.validate(),
            Err(WorkflowError::EmptyWorkflow {
                workflow: "wf".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_stage_id_is_rejected() {
        let wf = definition(vec![linear("a", None), linear("a", None)]);
        assert_eq!(
            wf.validate(),
            Err(WorkflowError::DuplicateStageId { id: "a".to_string() })
        );
    }

    #[test]
    fn test_unknown_next_reference_is_rejected() {
        let wf = definition(vec![linear("a", Some("ghost"))]);
        assert_eq!(
            wf.validate(),
            Err(WorkflowError::UnknownStageReference {
                from: "a".to_string(),
                target: "ghost".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_can_proceed_to_is_rejected() {
        let mut stage = linear("a", None);
        stage.can_proceed_to = vec!["ghost".to_string()];
        let wf = definition(vec![stage]);
        assert!(matches!(
            wf.validate(),
            Err(WorkflowError::UnknownStageReference { .. })
        ));
    }

    #[test]
    fn test_terminal_stage_with_next_is_rejected() {
        let mut stage = terminal("done");
        stage.next = Some("todo".to_string());
        let wf = definition(vec![linear("todo", None), stage]);
        assert_eq!(
            wf.validate(),
            Err(WorkflowError::TerminalStageHasNext {
                stage: "done".to_string()
            })
        );
    }

    #[test]
    fn test_cycle_with_implicit_ring_is_valid() {
        let stage = WorkflowStage {
            id: "review".to_string(),
            name: "Review".to_string(),
            stage_type: StageType::Cycle,
            next: None,
            sub_stages: vec![
                SubStage {
                    id: "draft".to_string(),
                    name: "Draft".to_string(),
                    next: None,
                },
                SubStage {
                    id: "feedback".to_string(),
                    name: "Feedback".to_string(),
                    next: None,
                },
            ],
            can_proceed_to: vec![],
        };
        let wf = definition(vec![stage]);
        assert!(wf.validate().is_ok());
    }

    #[test]
    fn test_cycle_ring_that_never_returns_is_rejected() {
        // "b" points back to itself, so the walk never reaches "a" again.
        let stage = WorkflowStage {
            id: "cycle".to_string(),
            name: "Cycle".to_string(),
            stage_type: StageType::Cycle,
            next: None,
            sub_stages: vec![
                SubStage {
                    id: "a".to_string(),
                    name: "A".to_string(),
                    next: Some("b".to_string()),
                },
                SubStage {
                    id: "b".to_string(),
                    name: "B".to_string(),
                    next: Some("b".to_string()),
                },
            ],
            can_proceed_to: vec![],
        };
        let wf = definition(vec![stage]);
        assert_eq!(
            wf.validate(),
            Err(WorkflowError::BrokenSubStageRing {
                stage: "cycle".to_string()
            })
        );
    }

    #[test]
    fn test_empty_cycle_is_rejected() {
        let stage = WorkflowStage {
            id: "cycle".to_string(),
            name: "Cycle".to_string(),
            stage_type: StageType::Cycle,
            next: None,
            sub_stages: vec![],
            can_proceed_to: vec![],
        };
        let wf = definition(vec![stage]);
        assert_eq!(
            wf.validate(),
            Err(WorkflowError::EmptyCycle {
                stage: "cycle".to_string()
            })
        );
    }

    #[test]
    fn test_workflow_deserializes_from_json() {
        let json = r#"{
            "id": "dev",
            "name": "Development",
            "stages": [
                { "id": "todo", "name": "To Do", "type": "linear", "next": "done" },
                { "id": "done", "name": "Done", "type": "terminal" }
            ]
        }"#;
        let wf: WorkflowDefinition = serde_json::from_str(json).unwrap();
        assert!(wf.validate().is_ok());
        assert_eq!(wf.stages[0].stage_type, StageType::Linear);
    }
}
