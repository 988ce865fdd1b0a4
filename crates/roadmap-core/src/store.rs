//! Roadmap store
//!
//! Owns one roadmap snapshot. Reads are plain borrows; every mutation clones
//! the whole roadmap, edits the clone and returns it wrapped in a new store,
//! so two snapshots never share mutable state.
//!
//! Mutations referencing an unknown task or subtask return an unchanged copy.
//!
//! # Example
//!
//! ```rust
//! use roadmap_core::{Priority, Roadmap, RoadmapStore, Stage, Task, TaskId, TaskStatus};
//!
//! let roadmap = Roadmap::new("Launch a blog")
//!     .with_stage(Stage::new("Setup").with_task(Task::new(1, "Pick a host", Priority::High)));
//!
//! let store = RoadmapStore::new(&roadmap);
//! let store = store.toggle_task_status(TaskId(1));
//!
//! assert_eq!(store.task(TaskId(1)).unwrap().status, TaskStatus::InProgress);
//! assert_eq!(store.statistics().total, 1);
//! ```

use crate::error::{Result, RoadmapError};
use crate::stats::{StageStatistics, Statistics};
use crate::types::{Roadmap, Stage, Subtask, SubtaskId, SubtaskStatus, Task, TaskId, TaskStatus};
use std::collections::HashSet;

/// Snapshot of a roadmap plus the operations on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapStore {
    data: Roadmap,
}

impl RoadmapStore {
    /// Wrap a copy of a typed roadmap
    #[inline]
    #[must_use]
    pub fn new(roadmap: &Roadmap) -> Self {
        Self {
            data: roadmap.clone(),
        }
    }

    /// Take ownership of a roadmap after checking its invariants
    ///
    /// # Errors
    /// Fails on duplicate task ids or duplicate subtask ids within a task.
    pub fn from_roadmap(roadmap: Roadmap) -> Result<Self> {
        validate(&roadmap)?;
        Ok(Self { data: roadmap })
    }

    /// Parse and validate an exported roadmap document
    ///
    /// # Errors
    /// [`RoadmapError::Malformed`] when the text is not a roadmap-shaped JSON
    /// document, or any error of [`RoadmapStore::from_roadmap`].
    pub fn from_json(json: &str) -> Result<Self> {
        let roadmap: Roadmap = serde_json::from_str(json)?;
        let store = Self::from_roadmap(roadmap)?;
        tracing::info!(
            "Loaded roadmap: {} stages, {} tasks",
            store.data.stages.len(),
            store.all_tasks().count()
        );
        Ok(store)
    }

    /// Validate an already parsed JSON value
    ///
    /// # Errors
    /// Same as [`RoadmapStore::from_json`].
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let roadmap: Roadmap = serde_json::from_value(value)?;
        Self::from_roadmap(roadmap)
    }

    /// Plan summary
    #[inline]
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.data.project_summary
    }

    /// Stages in order
    #[inline]
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.data.stages
    }

    /// Every task, in stage order then task order
    pub fn all_tasks(&self) -> impl Iterator<Item = &Task> + Clone + '_ {
        self.data.stages.iter().flat_map(|stage| stage.tasks.iter())
    }

    /// First task with this id
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.all_tasks().find(|task| task.id == id)
    }

    /// Stage holding the task with this id
    #[must_use]
    pub fn stage_of(&self, id: TaskId) -> Option<&Stage> {
        self.data
            .stages
            .iter()
            .find(|stage| stage.tasks.iter().any(|task| task.id == id))
    }

    /// Roadmap-wide statistics
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        Statistics::from_tasks(self.all_tasks())
    }

    /// Per-stage breakdown, in stage order
    #[must_use]
    pub fn stage_statistics(&self) -> Vec<StageStatistics> {
        self.data
            .stages
            .iter()
            .map(StageStatistics::from_stage)
            .collect()
    }

    /// Advance the task one step through `Todo -> In Progress -> Done -> Todo`
    ///
    /// Reaching `Done` checks off every subtask.
    #[must_use]
    pub fn toggle_task_status(&self, task_id: TaskId) -> Self {
        self.edit_task(task_id, |task| {
            task.status = task.status.next();
            if task.status == TaskStatus::Done {
                for subtask in &mut task.subtasks {
                    subtask.status = SubtaskStatus::Done;
                }
            }
            tracing::debug!(task = %task_id, status = %task.status, "toggled task");
        })
    }

    /// Flip one subtask between `Todo` and `Done`
    ///
    /// Afterwards a task whose subtasks are all done becomes `Done`, and a
    /// `Done` task with an open subtask drops back to `In Progress`.
    #[must_use]
    pub fn toggle_subtask(&self, task_id: TaskId, subtask_id: &SubtaskId) -> Self {
        self.edit_task(task_id, |task| {
            let Some(subtask) = task.subtasks.iter_mut().find(|s| &s.id == subtask_id) else {
                tracing::trace!(task = %task_id, subtask = %subtask_id, "subtask not found");
                return;
            };
            subtask.status = subtask.status.toggled();

            let all_done = !task.subtasks.is_empty() && task.subtasks.iter().all(Subtask::is_done);
            if all_done {
                task.status = TaskStatus::Done;
            } else if task.status == TaskStatus::Done {
                task.status = TaskStatus::InProgress;
            }
            tracing::debug!(
                task = %task_id,
                subtask = %subtask_id,
                status = %task.status,
                "toggled subtask"
            );
        })
    }

    /// Append an open subtask with a fresh id
    ///
    /// The title is stored as given. A `Done` task drops back to `In Progress`.
    #[must_use]
    pub fn add_subtask(&self, task_id: TaskId, title: &str) -> Self {
        self.edit_task(task_id, |task| {
            let id = fresh_subtask_id(task);
            tracing::debug!(task = %task_id, subtask = %id, "added subtask");
            task.subtasks.push(Subtask::new(id, title));
            if task.status == TaskStatus::Done {
                task.status = TaskStatus::InProgress;
            }
        })
    }

    /// Remove a subtask; the task status is left as is
    #[must_use]
    pub fn delete_subtask(&self, task_id: TaskId, subtask_id: &SubtaskId) -> Self {
        self.edit_task(task_id, |task| {
            let before = task.subtasks.len();
            task.subtasks.retain(|s| &s.id != subtask_id);
            if task.subtasks.len() == before {
                tracing::trace!(task = %task_id, subtask = %subtask_id, "subtask not found");
            } else {
                tracing::debug!(task = %task_id, subtask = %subtask_id, "deleted subtask");
            }
        })
    }

    /// Remove a task; its stage stays even when left empty
    #[must_use]
    pub fn delete_task(&self, task_id: TaskId) -> Self {
        let mut data = self.data.clone();
        let mut removed = 0;
        for stage in &mut data.stages {
            let before = stage.tasks.len();
            stage.tasks.retain(|task| task.id != task_id);
            removed += before - stage.tasks.len();
        }
        if removed == 0 {
            tracing::trace!(task = %task_id, "task not found");
        } else {
            tracing::debug!(task = %task_id, "deleted task");
        }
        Self { data }
    }

    /// Borrow the current roadmap
    #[inline]
    #[must_use]
    pub fn as_roadmap(&self) -> &Roadmap {
        &self.data
    }

    /// Export a copy of the current roadmap
    #[inline]
    #[must_use]
    pub fn to_roadmap(&self) -> Roadmap {
        self.data.clone()
    }

    /// Export the current roadmap without copying
    #[inline]
    #[must_use]
    pub fn into_roadmap(self) -> Roadmap {
        self.data
    }

    /// Export as compact JSON
    ///
    /// # Errors
    /// Propagates serializer failures.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.data)?)
    }

    /// Export as indented JSON
    ///
    /// # Errors
    /// Propagates serializer failures.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }

    /// Clone, apply `edit` to the first task with `task_id`, wrap the clone
    fn edit_task(&self, task_id: TaskId, edit: impl FnOnce(&mut Task)) -> Self {
        let mut data = self.data.clone();
        match data.task_mut(task_id) {
            Some(task) => edit(task),
            None => tracing::trace!(task = %task_id, "task not found"),
        }
        Self { data }
    }
}

/// Fresh manual id that does not collide with the task's current subtasks
fn fresh_subtask_id(task: &Task) -> SubtaskId {
    loop {
        let id = SubtaskId::manual();
        if task.subtask(&id).is_none() {
            return id;
        }
    }
}

/// Check the invariants serde cannot express
fn validate(roadmap: &Roadmap) -> Result<()> {
    let mut task_ids = HashSet::new();
    for task in roadmap.stages.iter().flat_map(|stage| stage.tasks.iter()) {
        if !task_ids.insert(task.id) {
            return Err(RoadmapError::DuplicateTaskId(task.id));
        }

        let mut subtask_ids = HashSet::new();
        for subtask in &task.subtasks {
            if !subtask_ids.insert(&subtask.id) {
                return Err(RoadmapError::DuplicateSubtaskId {
                    task: task.id,
                    subtask: subtask.id.clone(),
                });
            }
        }
    }
    Ok(())
}
