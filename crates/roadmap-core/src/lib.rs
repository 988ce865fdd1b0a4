//! Roadmap Core
//!
//! The data model of a generated project plan and the store that tracks it:
//! - Roadmaps made of ordered stages, tasks and subtasks
//! - Weighted progress statistics
//! - Snapshot mutations that keep task and subtask statuses in sync
//! - Validation of roadmap documents coming from outside
//!
//! # Example
//!
//! ```rust
//! use roadmap_core::{RoadmapStore, SubtaskId, TaskId, TaskStatus};
//!
//! let json = r#"{
//!     "project_summary": "Learn Rust",
//!     "stages": [{
//!         "stage_name": "Basics",
//!         "tasks": [{
//!             "id": 1, "title": "Read the book", "description": "", "reasoning": "",
//!             "priority": "High", "status": "Todo", "tags": ["reading"],
//!             "subtasks": [{"id": "1-sub-0", "title": "Chapter 1", "status": "Todo"}]
//!         }]
//!     }]
//! }"#;
//!
//! let store = RoadmapStore::from_json(json)?;
//! let store = store.toggle_subtask(TaskId(1), &SubtaskId::from("1-sub-0"));
//!
//! assert_eq!(store.task(TaskId(1)).unwrap().status, TaskStatus::Done);
//! assert_eq!(store.statistics().percent, 100);
//! # Ok::<(), roadmap_core::RoadmapError>(())
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod stats;
pub mod store;
pub mod types;

pub use error::{Result, RoadmapError};
pub use stats::{PriorityCounts, StageStatistics, Statistics, SUBTASK_WEIGHT};
pub use store::RoadmapStore;
pub use types::{
    Priority, Roadmap, Stage, Subtask, SubtaskId, SubtaskStatus, Task, TaskId, TaskStatus,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with roadmaps
    pub use crate::{
        Priority, Roadmap, RoadmapStore, Stage, Statistics, Subtask, SubtaskId, SubtaskStatus,
        Task, TaskId, TaskStatus,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
