//! Subcommand implementations
//!
//! Each edit loads a roadmap document, applies one store mutation and writes
//! the new snapshot back out. Blank user input is rejected here, before the
//! store or the generator is called.

use anyhow::{ensure, Context, Result};
use roadmap_core::{RoadmapStore, SubtaskId, TaskId};
use roadmap_gen::{GeminiGenerator, GenerationError, GeneratorConfig, RoadmapGenerator};
use std::path::Path;

/// One store mutation requested on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Edit {
    ToggleTask(TaskId),
    ToggleSubtask(TaskId, SubtaskId),
    AddSubtask(TaskId, String),
    DeleteSubtask(TaskId, SubtaskId),
    DeleteTask(TaskId),
}

impl Edit {
    /// Build an `AddSubtask`, refusing blank titles
    pub(crate) fn add_subtask(task: TaskId, title: &str) -> Result<Self> {
        ensure!(!title.trim().is_empty(), "subtask title must not be empty");
        Ok(Self::AddSubtask(task, title.to_string()))
    }

    pub(crate) fn apply(&self, store: &RoadmapStore) -> RoadmapStore {
        match self {
            Edit::ToggleTask(task) => store.toggle_task_status(*task),
            Edit::ToggleSubtask(task, subtask) => store.toggle_subtask(*task, subtask),
            Edit::AddSubtask(task, title) => store.add_subtask(*task, title),
            Edit::DeleteSubtask(task, subtask) => store.delete_subtask(*task, subtask),
            Edit::DeleteTask(task) => store.delete_task(*task),
        }
    }
}

pub(crate) fn load(path: &Path) -> Result<RoadmapStore> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading roadmap {}", path.display()))?;
    RoadmapStore::from_json(&text).with_context(|| format!("loading roadmap {}", path.display()))
}

/// Write pretty JSON to `output`, or stdout when absent
pub(crate) fn write(store: &RoadmapStore, output: Option<&Path>) -> Result<()> {
    let json = store.to_json_pretty()?;
    match output {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("writing roadmap {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

pub(crate) fn edit(input: &Path, edit: &Edit, output: Option<&Path>) -> Result<()> {
    let store = load(input)?;
    let updated = edit.apply(&store);
    if updated == store {
        tracing::warn!("{:?} changed nothing", edit);
    }
    write(&updated, output)
}

pub(crate) fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            Ok(GeneratorConfig::from_toml_str(&text)?)
        }
        None => Ok(GeneratorConfig::new()),
    }
}

/// Outcome of `generate`: either a store or the generic failure
pub(crate) async fn generate(
    generator: &dyn RoadmapGenerator,
    goal: &str,
) -> Result<std::result::Result<RoadmapStore, GenerationError>> {
    ensure!(!goal.trim().is_empty(), "goal must not be empty");
    Ok(generator.generate(goal).await)
}

pub(crate) async fn run_generate(
    goal: &str,
    config: Option<&Path>,
    output: Option<&Path>,
) -> Result<bool> {
    let generator = GeminiGenerator::new(load_config(config)?)?;
    match generate(&generator, goal).await? {
        Ok(store) => {
            write(&store, output)?;
            Ok(true)
        }
        Err(_) => {
            eprintln!("{}", GenerationError::USER_MESSAGE);
            Ok(false)
        }
    }
}

/// Human-readable statistics report
pub(crate) fn render_stats(store: &RoadmapStore) -> String {
    let stats = store.statistics();
    let mut out = String::new();
    out.push_str(store.summary());
    out.push_str("\n\n");
    out.push_str(&format!(
        "Progress: {}% ({} of {} tasks done)\n",
        stats.percent, stats.completed, stats.total
    ));
    out.push_str(&format!(
        "Priority: High {} / Medium {} / Low {}\n",
        stats.by_priority.high, stats.by_priority.medium, stats.by_priority.low
    ));
    out.push_str("\nStages:\n");
    for stage in store.stage_statistics() {
        out.push_str(&format!(
            "  {}: {}/{} done\n",
            stage.stage_name, stage.completed, stage.total
        ));
    }
    out
}

pub(crate) fn stats_json(store: &RoadmapStore) -> Result<String> {
    let value = serde_json::json!({
        "statistics": store.statistics(),
        "stages": store.stage_statistics(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
