//! Core types for roadmaps
//!
//! Defines the roadmap aggregate and its parts:
//! - Roadmap (summary + ordered stages)
//! - Stages, tasks and subtasks
//! - Identifiers, priorities and statuses

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Task identifier, unique across the whole roadmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subtask identifier, unique within its owning task
///
/// Generated plans may carry numeric or textual ids. The two variants never
/// compare equal to each other, so `Number(1)` and `Text("1")` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubtaskId {
    /// Numeric token
    Number(i64),
    /// String token
    Text(String),
}

impl SubtaskId {
    /// Generate a fresh id for a manually added subtask
    #[inline]
    #[must_use]
    pub fn manual() -> Self {
        Self::Text(format!("manual-{}", Ulid::new()))
    }

    /// Id synthesized for a generated subtask that arrived without one
    #[inline]
    #[must_use]
    pub fn positional(task: TaskId, index: usize) -> Self {
        Self::Text(format!("{task}-sub-{index}"))
    }

    /// Parse a token typed by a user: integers become `Number`
    #[must_use]
    pub fn parse_token(token: &str) -> Self {
        token
            .parse::<i64>()
            .map_or_else(|_| Self::Text(token.to_string()), Self::Number)
    }
}

impl From<i64> for SubtaskId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SubtaskId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SubtaskId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl std::fmt::Display for SubtaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// On the critical path
    High,
    /// Normal
    Medium,
    /// Nice to have
    Low,
}

impl Priority {
    /// All priorities, highest first
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Wire spelling
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started
    #[default]
    Todo,
    /// Started
    #[serde(rename = "In Progress")]
    InProgress,
    /// Finished
    Done,
}

impl TaskStatus {
    /// Successor in the manual cycle `Todo -> In Progress -> Done -> Todo`
    #[inline]
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            TaskStatus::Todo => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Todo,
        }
    }

    /// Wire spelling
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "Todo",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subtask status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubtaskStatus {
    /// Open
    #[default]
    Todo,
    /// Checked off
    Done,
}

impl SubtaskStatus {
    /// Binary flip
    #[inline]
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SubtaskStatus::Todo => SubtaskStatus::Done,
            SubtaskStatus::Done => SubtaskStatus::Todo,
        }
    }

    /// Wire spelling
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SubtaskStatus::Todo => "Todo",
            SubtaskStatus::Done => "Done",
        }
    }
}

impl std::fmt::Display for SubtaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Atomic checklist item under a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    /// Id, unique within the owning task
    pub id: SubtaskId,
    /// Display text
    pub title: String,
    /// Status
    pub status: SubtaskStatus,
}

impl Subtask {
    /// Create new open subtask
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<SubtaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: SubtaskStatus::Todo,
        }
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: SubtaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the subtask is checked off
    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status == SubtaskStatus::Done
    }
}

/// Unit of work inside a stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Id, unique across the roadmap
    pub id: TaskId,
    /// Display title
    pub title: String,
    /// What the task involves
    pub description: String,
    /// Why the task matters now
    pub reasoning: String,
    /// Priority
    pub priority: Priority,
    /// Status
    pub status: TaskStatus,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Checklist
    pub subtasks: Vec<Subtask>,
}

impl Task {
    /// Create new task with empty text fields, no tags and no subtasks
    #[must_use]
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            reasoning: String::new(),
            priority,
            status: TaskStatus::Todo,
            tags: Vec::new(),
            subtasks: Vec::new(),
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With reasoning
    #[inline]
    #[must_use]
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// With tag
    #[inline]
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// With subtask
    #[inline]
    #[must_use]
    pub fn with_subtask(mut self, subtask: Subtask) -> Self {
        self.subtasks.push(subtask);
        self
    }

    /// Whether the task is done
    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Number of checked-off subtasks
    #[inline]
    #[must_use]
    pub fn done_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| s.is_done()).count()
    }

    /// Find subtask by id
    #[must_use]
    pub fn subtask(&self, id: &SubtaskId) -> Option<&Subtask> {
        self.subtasks.iter().find(|s| &s.id == id)
    }
}

/// Named phase grouping tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Display label, used as a grouping key
    pub stage_name: String,
    /// Tasks in order
    pub tasks: Vec<Task>,
}

impl Stage {
    /// Create empty stage
    #[inline]
    #[must_use]
    pub fn new(stage_name: impl Into<String>) -> Self {
        Self {
            stage_name: stage_name.into(),
            tasks: Vec::new(),
        }
    }

    /// With task
    #[inline]
    #[must_use]
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }
}

/// Full generated plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    /// Summary of the plan
    pub project_summary: String,
    /// Stages in order
    pub stages: Vec<Stage>,
}

impl Roadmap {
    /// Create roadmap without stages
    #[inline]
    #[must_use]
    pub fn new(project_summary: impl Into<String>) -> Self {
        Self {
            project_summary: project_summary.into(),
            stages: Vec::new(),
        }
    }

    /// With stage
    #[inline]
    #[must_use]
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// First task with the given id, scanning stages in order
    pub(crate) fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.stages
            .iter_mut()
            .flat_map(|stage| stage.tasks.iter_mut())
            .find(|task| task.id == id)
    }
}
