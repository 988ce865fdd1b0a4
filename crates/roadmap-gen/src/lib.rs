//! Roadmap Generation
//!
//! Turns a free-text goal into a validated [`RoadmapStore`]:
//! - Configuration of the generation service
//! - System instruction and response schema for the model
//! - HTTP client for the Gemini API
//! - Normalization of raw model output at the store boundary
//!
//! # Example
//!
//! ```rust,ignore
//! use roadmap_gen::{GeminiGenerator, GeneratorConfig, RoadmapGenerator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = GeminiGenerator::new(GeneratorConfig::new())?;
//! let store = generator.generate("Open a small coffee shop").await?;
//!
//! println!("{}% done", store.statistics().percent);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod generator;
pub mod payload;
pub mod prompt;

pub use config::GeneratorConfig;
pub use error::{ConfigError, GenerationError};
pub use generator::{GeminiGenerator, RoadmapGenerator};
pub use payload::{parse_generated, RawRoadmap};
pub use roadmap_core::RoadmapStore;
