//! Progress statistics
//!
//! Tasks count at full weight and subtasks at half weight in the completion
//! percentage. Weights are tracked in half-units so the rounding is exact.

use crate::types::{Priority, Stage, Task};
use serde::{Deserialize, Serialize};

/// Weight of a subtask relative to its parent task
pub const SUBTASK_WEIGHT: f64 = 0.5;

/// Half-units per task
const TASK_UNITS: u64 = 2;

/// Half-units per subtask
const SUBTASK_UNITS: u64 = 1;

/// Task counts per priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    /// High priority tasks
    #[serde(rename = "High")]
    pub high: usize,
    /// Medium priority tasks
    #[serde(rename = "Medium")]
    pub medium: usize,
    /// Low priority tasks
    #[serde(rename = "Low")]
    pub low: usize,
}

impl PriorityCounts {
    /// Count tasks by priority
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut counts, task| {
            match task.priority {
                Priority::High => counts.high += 1,
                Priority::Medium => counts.medium += 1,
                Priority::Low => counts.low += 1,
            }
            counts
        })
    }

    /// Count for one priority
    #[inline]
    #[must_use]
    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    /// Sum over all priorities
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Roadmap-wide statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of tasks (subtasks excluded)
    pub total: usize,
    /// Number of tasks with status `Done`
    pub completed: usize,
    /// Weighted completion, rounded half-up, in `0..=100`
    pub percent: u8,
    /// Task counts per priority
    pub by_priority: PriorityCounts,
    /// Sum of weights of all tasks and subtasks
    pub total_weight: f64,
    /// Sum of weights of finished tasks and subtasks
    pub completed_weight: f64,
}

impl Statistics {
    /// Compute statistics over tasks
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task> + Clone) -> Self {
        let mut total = 0;
        let mut completed = 0;
        let mut total_units = 0_u64;
        let mut completed_units = 0_u64;

        for task in tasks.clone() {
            total += 1;
            total_units += TASK_UNITS + SUBTASK_UNITS * task.subtasks.len() as u64;
            if task.is_done() {
                completed += 1;
                completed_units += TASK_UNITS;
            }
            completed_units += SUBTASK_UNITS * task.done_subtasks() as u64;
        }

        Self {
            total,
            completed,
            percent: weighted_percent(completed_units, total_units),
            by_priority: PriorityCounts::from_tasks(tasks),
            total_weight: half_units_to_weight(total_units),
            completed_weight: half_units_to_weight(completed_units),
        }
    }
}

/// Per-stage breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageStatistics {
    /// Stage label
    pub stage_name: String,
    /// Number of tasks in the stage
    pub total: usize,
    /// Number of finished tasks in the stage
    pub completed: usize,
    /// Task counts per priority
    pub by_priority: PriorityCounts,
}

impl StageStatistics {
    /// Compute breakdown for one stage
    #[must_use]
    pub fn from_stage(stage: &Stage) -> Self {
        Self {
            stage_name: stage.stage_name.clone(),
            total: stage.tasks.len(),
            completed: stage.tasks.iter().filter(|t| t.is_done()).count(),
            by_priority: PriorityCounts::from_tasks(&stage.tasks),
        }
    }
}

/// `round(100 * completed / total)` with half-up rounding; 0 when empty
fn weighted_percent(completed_units: u64, total_units: u64) -> u8 {
    if total_units == 0 {
        return 0;
    }
    let rounded = (200 * completed_units + total_units) / (2 * total_units);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

#[allow(clippy::cast_precision_loss)]
fn half_units_to_weight(units: u64) -> f64 {
    units as f64 * SUBTASK_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Subtask, SubtaskStatus, TaskStatus};

    fn task_with(status: TaskStatus, subtasks: &[SubtaskStatus]) -> Task {
        subtasks.iter().enumerate().fold(
            Task::new(1, "t", Priority::High).with_status(status),
            |task, (i, s)| task.with_subtask(Subtask::new(i as i64, "s").with_status(*s)),
        )
    }

    #[test]
    fn empty_is_zero_percent() {
        let tasks: [Task; 0] = [];
        let stats = Statistics::from_tasks(&tasks);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.percent, 0);
        assert_eq!(stats.total_weight, 0.0);
    }

    #[test]
    fn fully_done_task_with_subtasks() {
        let tasks = [task_with(
            TaskStatus::Done,
            &[SubtaskStatus::Done, SubtaskStatus::Done],
        )];
        let stats = Statistics::from_tasks(&tasks);
        assert_eq!(stats.total_weight, 2.0);
        assert_eq!(stats.completed_weight, 2.0);
        assert_eq!(stats.percent, 100);
    }

    #[test]
    fn half_done_subtasks_weigh_half() {
        let tasks = [task_with(
            TaskStatus::InProgress,
            &[SubtaskStatus::Done, SubtaskStatus::Todo],
        )];
        let stats = Statistics::from_tasks(&tasks);
        assert_eq!(stats.completed_weight, 0.5);
        assert_eq!(stats.percent, 25);
        assert_eq!(stats.completed, 0);
    }

    #[test]
    fn percent_rounds_half_up() {
        // 1 of 8 half-units -> 12.5%
        assert_eq!(weighted_percent(1, 8), 13);
        // 1 of 3 half-units -> 33.33%
        assert_eq!(weighted_percent(1, 3), 33);
        // 2 of 3 half-units -> 66.67%
        assert_eq!(weighted_percent(2, 3), 67);
        assert_eq!(weighted_percent(5, 5), 100);
    }

    #[test]
    fn priority_counts() {
        let tasks = [
            Task::new(1, "a", Priority::High),
            Task::new(2, "b", Priority::Low),
            Task::new(3, "c", Priority::Low),
        ];
        let counts = PriorityCounts::from_tasks(&tasks);
        assert_eq!(counts.get(Priority::High), 1);
        assert_eq!(counts.get(Priority::Medium), 0);
        assert_eq!(counts.get(Priority::Low), 2);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn stage_breakdown() {
        let stage = Stage::new("Setup")
            .with_task(Task::new(1, "a", Priority::High).with_status(TaskStatus::Done))
            .with_task(Task::new(2, "b", Priority::Medium));

        let stats = StageStatistics::from_stage(&stage);
        assert_eq!(stats.stage_name, "Setup");
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.by_priority.medium, 1);
    }
}
