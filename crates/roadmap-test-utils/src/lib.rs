//! Testing utilities for the roadmap workspace
//!
//! Shared fixtures, roadmap builders and proptest strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use roadmap_core::{
    Priority, Roadmap, RoadmapStore, Stage, Subtask, SubtaskStatus, Task, TaskStatus,
};

pub fn subtask(id: i64, status: SubtaskStatus) -> Subtask {
    Subtask::new(id, format!("Subtask {id}")).with_status(status)
}

/// Task with one numeric subtask per entry of `subtasks`, ids counting from 1
pub fn task_with_subtasks(id: i64, status: TaskStatus, subtasks: &[SubtaskStatus]) -> Task {
    subtasks
        .iter()
        .zip(1..)
        .fold(
            Task::new(id, format!("Task {id}"), Priority::Medium).with_status(status),
            |task, (s, sub_id)| task.with_subtask(subtask(sub_id, *s)),
        )
}

/// One stage holding exactly `task`
pub fn single_task_roadmap(task: Task) -> Roadmap {
    Roadmap::new("Single task plan").with_stage(Stage::new("Stage 1").with_task(task))
}

pub fn single_task_store(task: Task) -> RoadmapStore {
    RoadmapStore::new(&single_task_roadmap(task))
}

/// Three stages, mixed priorities and statuses; the last stage is empty
pub fn sample_roadmap() -> Roadmap {
    Roadmap::new("Open a small coffee shop")
        .with_stage(
            Stage::new("Research")
                .with_task(
                    Task::new(1, "Study the market", Priority::High)
                        .with_description("Survey competitors in the area")
                        .with_reasoning("Pricing depends on it")
                        .with_tag("market")
                        .with_status(TaskStatus::Done)
                        .with_subtask(subtask(1, SubtaskStatus::Done))
                        .with_subtask(subtask(2, SubtaskStatus::Done)),
                )
                .with_task(
                    Task::new(2, "Pick a location", Priority::High)
                        .with_tag("premises")
                        .with_status(TaskStatus::InProgress)
                        .with_subtask(subtask(1, SubtaskStatus::Done))
                        .with_subtask(Subtask::new("2-sub-1", "Visit candidates")),
                ),
        )
        .with_stage(
            Stage::new("Launch")
                .with_task(Task::new(3, "Hire staff", Priority::Medium))
                .with_task(Task::new(4, "Order equipment", Priority::Low).with_tag("budget")),
        )
        .with_stage(Stage::new("Later"))
}

pub fn sample_store() -> RoadmapStore {
    RoadmapStore::new(&sample_roadmap())
}

/// Roadmap JSON as a generation service would return it
pub fn sample_roadmap_json() -> String {
    serde_json::json!({
        "project_summary": "Write a novel",
        "stages": [{
            "stage_name": "Drafting",
            "tasks": [{
                "id": 10,
                "title": "Outline the plot",
                "description": "Three acts",
                "reasoning": "Everything else builds on it",
                "priority": "High",
                "status": "Todo",
                "tags": ["writing"],
                "subtasks": [
                    {"title": "Act one", "status": "Todo"},
                    {"id": "custom", "title": "Act two"},
                    {"id": 7, "title": "Act three", "status": "Done"}
                ]
            }]
        }]
    })
    .to_string()
}

pub fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![Just(Priority::High), Just(Priority::Medium), Just(Priority::Low)]
}

pub fn task_status_strategy() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Todo),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Done),
    ]
}

pub fn subtask_status_strategy() -> impl Strategy<Value = SubtaskStatus> {
    prop_oneof![Just(SubtaskStatus::Todo), Just(SubtaskStatus::Done)]
}

/// Arbitrary valid roadmap: task ids unique across stages, subtask ids unique per task
pub fn roadmap_strategy() -> impl Strategy<Value = Roadmap> {
    let task_shape = (
        priority_strategy(),
        task_status_strategy(),
        prop::collection::vec(subtask_status_strategy(), 0..5),
    );
    prop::collection::vec(prop::collection::vec(task_shape, 0..5), 0..4).prop_map(|stages| {
        let mut next_id = 1;
        stages
            .into_iter()
            .enumerate()
            .fold(Roadmap::new("Generated"), |roadmap, (i, tasks)| {
                let stage = tasks.into_iter().fold(
                    Stage::new(format!("Stage {}", i + 1)),
                    |stage, (priority, status, subtasks)| {
                        let mut task = task_with_subtasks(next_id, status, &subtasks);
                        task.priority = priority;
                        next_id += 1;
                        stage.with_task(task)
                    },
                );
                roadmap.with_stage(stage)
            })
    })
}
