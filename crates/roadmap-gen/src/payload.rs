//! Boundary between raw model output and the roadmap store
//!
//! The model may leave out subtask ids, subtask statuses or whole subtask
//! lists. Normalization fills those in before the roadmap is validated:
//! - missing subtask list -> empty list
//! - missing, null or empty subtask id -> `"<taskId>-sub-<index>"`, suffixed
//!   with `-1`, `-2`, ... when the model already used that id in the task
//! - missing subtask status -> `Todo`

use crate::error::{Failure, GenerationError};
use roadmap_core::{
    Priority, Roadmap, RoadmapStore, Stage, Subtask, SubtaskId, SubtaskStatus, Task, TaskId,
    TaskStatus,
};
use serde::Deserialize;
use std::collections::HashSet;

/// Roadmap as the model returns it
#[derive(Debug, Clone, Deserialize)]
pub struct RawRoadmap {
    /// Plan summary
    pub project_summary: String,
    /// Stages
    pub stages: Vec<RawStage>,
}

/// Stage as the model returns it
#[derive(Debug, Clone, Deserialize)]
pub struct RawStage {
    /// Label
    pub stage_name: String,
    /// Tasks
    pub tasks: Vec<RawTask>,
}

/// Task as the model returns it
#[derive(Debug, Clone, Deserialize)]
pub struct RawTask {
    /// Id
    pub id: TaskId,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Reasoning
    pub reasoning: String,
    /// Priority
    pub priority: Priority,
    /// Status
    pub status: TaskStatus,
    /// Tags
    pub tags: Vec<String>,
    /// Subtasks, possibly absent
    #[serde(default)]
    pub subtasks: Option<Vec<RawSubtask>>,
}

/// Subtask as the model returns it
#[derive(Debug, Clone, Deserialize)]
pub struct RawSubtask {
    /// Id, possibly absent
    #[serde(default)]
    pub id: Option<SubtaskId>,
    /// Title
    pub title: String,
    /// Status, possibly absent
    #[serde(default)]
    pub status: Option<SubtaskStatus>,
}

impl RawRoadmap {
    /// Fill in missing subtask data
    #[must_use]
    pub fn normalize(self) -> Roadmap {
        Roadmap {
            project_summary: self.project_summary,
            stages: self.stages.into_iter().map(RawStage::normalize).collect(),
        }
    }
}

impl RawStage {
    fn normalize(self) -> Stage {
        Stage {
            stage_name: self.stage_name,
            tasks: self.tasks.into_iter().map(RawTask::normalize).collect(),
        }
    }
}

impl RawTask {
    fn normalize(self) -> Task {
        let task_id = self.id;
        let raw_subtasks = self.subtasks.unwrap_or_default();

        let mut taken: HashSet<SubtaskId> = raw_subtasks
            .iter()
            .filter_map(|raw| raw.id.clone())
            .filter(|id| !is_blank(id))
            .collect();

        let subtasks = raw_subtasks
            .into_iter()
            .enumerate()
            .map(|(index, raw)| Subtask {
                id: match raw.id {
                    Some(id) if !is_blank(&id) => id,
                    _ => free_positional_id(task_id, index, &mut taken),
                },
                title: raw.title,
                status: raw.status.unwrap_or_default(),
            })
            .collect();

        Task {
            id: task_id,
            title: self.title,
            description: self.description,
            reasoning: self.reasoning,
            priority: self.priority,
            status: self.status,
            tags: self.tags,
            subtasks,
        }
    }
}

fn is_blank(id: &SubtaskId) -> bool {
    matches!(id, SubtaskId::Text(text) if text.is_empty())
}

/// `"<taskId>-sub-<index>"`, or with a `-<n>` suffix when the model already used it
fn free_positional_id(task: TaskId, index: usize, taken: &mut HashSet<SubtaskId>) -> SubtaskId {
    let base = SubtaskId::positional(task, index);
    let mut id = base.clone();
    let mut suffix = 1;
    while taken.contains(&id) {
        id = SubtaskId::Text(format!("{base}-{suffix}"));
        suffix += 1;
    }
    taken.insert(id.clone());
    id
}

/// Turn model output text into a store
///
/// # Errors
/// A [`GenerationError`] when the text is empty, not JSON, not the roadmap
/// shape, or breaks roadmap invariants.
pub fn parse_generated(text: &str) -> Result<RoadmapStore, GenerationError> {
    parse(text).map_err(GenerationError::new)
}

pub(crate) fn parse(text: &str) -> Result<RoadmapStore, Failure> {
    if text.trim().is_empty() {
        return Err(Failure::EmptyResponse);
    }
    let raw: RawRoadmap = serde_json::from_str(text)?;
    Ok(RoadmapStore::from_roadmap(raw.normalize())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn task_json(subtasks: &str) -> String {
        format!(
            r#"{{
                "project_summary": "p",
                "stages": [{{"stage_name": "s", "tasks": [{{
                    "id": 5, "title": "t", "description": "d", "reasoning": "r",
                    "priority": "Low", "status": "Todo", "tags": []{subtasks}
                }}]}}]
            }}"#
        )
    }

    #[test]
    fn missing_subtask_list_becomes_empty() {
        let store = parse_generated(&task_json("")).unwrap();
        assert!(store.task(TaskId(5)).unwrap().subtasks.is_empty());
    }

    #[test]
    fn missing_ids_are_positional() {
        let store = parse_generated(&task_json(
            r#", "subtasks": [
                {"title": "a", "status": "Done"},
                {"id": null, "title": "b", "status": "Todo"},
                {"id": "", "title": "c", "status": "Todo"},
                {"id": 40, "title": "d", "status": "Todo"}
            ]"#,
        ))
        .unwrap();

        let ids: Vec<_> = store
            .task(TaskId(5))
            .unwrap()
            .subtasks
            .iter()
            .map(|s| s.id.clone())
            .collect();
        assert_eq!(
            ids,
            vec![
                SubtaskId::from("5-sub-0"),
                SubtaskId::from("5-sub-1"),
                SubtaskId::from("5-sub-2"),
                SubtaskId::Number(40),
            ]
        );
    }

    #[test]
    fn positional_ids_skip_ids_the_model_used() {
        let store = parse_generated(&task_json(
            r#", "subtasks": [
                {"id": "5-sub-1", "title": "a", "status": "Todo"},
                {"title": "b"},
                {"id": "5-sub-1-1", "title": "c", "status": "Todo"},
                {"title": "d"}
            ]"#,
        ))
        .unwrap();

        let ids: Vec<_> = store
            .task(TaskId(5))
            .unwrap()
            .subtasks
            .iter()
            .map(|s| s.id.to_string())
            .collect();
        assert_eq!(ids, vec!["5-sub-1", "5-sub-1-2", "5-sub-1-1", "5-sub-3"]);
    }

    #[test]
    fn numeric_zero_id_is_kept() {
        let store = parse_generated(&task_json(r#", "subtasks": [{"id": 0, "title": "a"}]"#))
            .unwrap();
        assert_eq!(
            store.task(TaskId(5)).unwrap().subtasks[0].id,
            SubtaskId::Number(0)
        );
    }

    #[test]
    fn missing_status_defaults_to_todo() {
        let store = parse_generated(&task_json(r#", "subtasks": [{"id": "x", "title": "a"}]"#)).unwrap();
        let subtask = &store.task(TaskId(5)).unwrap().subtasks[0];
        assert_eq!(subtask.status, SubtaskStatus::Todo);
    }

    #[test]
    fn empty_text_fails() {
        let err = parse_generated("  \n").unwrap_err();
        assert_eq!(err.source().unwrap().to_string(), "empty response from model");
    }

    #[test]
    fn schema_violation_fails() {
        let err = parse_generated(r#"{"project_summary": "p"}"#).unwrap_err();
        assert_eq!(err.to_string(), "plan could not be created");
        assert!(err.source().unwrap().to_string().starts_with("malformed response"));
    }

    #[test]
    fn invariant_violation_fails() {
        let err = parse_generated(&task_json(
            r#", "subtasks": [{"id": 1, "title": "a"}, {"id": 1, "title": "b"}]"#,
        ))
        .unwrap_err();
        assert!(err.source().unwrap().to_string().starts_with("invalid roadmap"));
    }
}
