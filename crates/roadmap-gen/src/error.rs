//! Error types for roadmap generation
//!
//! Every way a generation attempt can go wrong collapses into one opaque
//! [`GenerationError`]. The concrete cause stays reachable through
//! [`std::error::Error::source`] for logs, but callers cannot branch on it.

use roadmap_core::RoadmapError;

/// Generator configuration errors, raised when the generator is built
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No API key in the config or the environment
    #[error("API key missing")]
    MissingApiKey,

    /// Temperature outside the range the service accepts
    #[error("invalid temperature: {0} (expected 0.0..=2.0)")]
    InvalidTemperature(f32),

    /// Config file is not valid TOML or has wrong field types
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// HTTP client could not be built
    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// A generation attempt failed; no partial roadmap is available
#[derive(Debug, thiserror::Error)]
#[error("plan could not be created")]
pub struct GenerationError {
    #[source]
    cause: Failure,
}

impl GenerationError {
    /// Message shown to the user, prompting a retry
    pub const USER_MESSAGE: &'static str = "Could not create the plan. Please try again.";

    pub(crate) fn new(cause: Failure) -> Self {
        Self { cause }
    }
}

/// Concrete cause behind a [`GenerationError`]
#[derive(Debug, thiserror::Error)]
pub(crate) enum Failure {
    /// Network or protocol failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Service answered without any text
    #[error("empty response from model")]
    EmptyResponse,

    /// Text is not JSON or not the expected shape
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// JSON had the right shape but broke roadmap invariants
    #[error("invalid roadmap: {0}")]
    InvalidRoadmap(#[from] RoadmapError),
}
