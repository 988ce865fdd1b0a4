//! Error types for Roadmap Core
//!
//! Only construction can fail. Mutations that reference a missing task or
//! subtask are no-ops and never produce an error.

use crate::types::{SubtaskId, TaskId};

/// Construction error: the payload does not have the roadmap shape
#[derive(Debug, thiserror::Error)]
pub enum RoadmapError {
    /// Not JSON, or JSON that does not match the roadmap structure
    #[error("malformed roadmap: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two tasks share an id
    #[error("duplicate task id: {0}")]
    DuplicateTaskId(TaskId),

    /// Two subtasks of one task share an id
    #[error("duplicate subtask id: {subtask} in task {task}")]
    DuplicateSubtaskId {
        /// Owning task
        task: TaskId,
        /// Repeated subtask id
        subtask: SubtaskId,
    },
}

/// Result alias for construction
pub type Result<T> = std::result::Result<T, RoadmapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roadmap_error_display() {
        let err = RoadmapError::DuplicateTaskId(TaskId(4));
        assert_eq!(err.to_string(), "duplicate task id: 4");

        let err = RoadmapError::DuplicateSubtaskId {
            task: TaskId(1),
            subtask: SubtaskId::Text("a".to_string()),
        };
        assert_eq!(err.to_string(), "duplicate subtask id: a in task 1");
    }

    #[test]
    fn malformed_wraps_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = RoadmapError::from(serde_err);
        assert!(err.to_string().starts_with("malformed roadmap:"));
    }
}
