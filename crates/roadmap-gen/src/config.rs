//! Generator configuration
//!
//! Loaded from TOML or built in code. The API key can come from the config
//! itself or from the `GEMINI_API_KEY` / `API_KEY` environment variables.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Environment variables consulted for the API key, in order
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Stands in for the API key in debug output
pub(crate) const REDACTED: &str = "<redacted>";

/// Generation service configuration
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Model name
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Base URL of the generation API
    pub endpoint: String,
    /// Language the plan is written in
    pub response_language: String,
    /// API key; falls back to the environment when unset
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl GeneratorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing fields keep their defaults
    ///
    /// # Errors
    /// [`ConfigError::Parse`] on invalid TOML or mistyped fields.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// With model
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// With temperature
    #[inline]
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// With endpoint
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// With API key
    #[inline]
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// With response language
    #[inline]
    #[must_use]
    pub fn with_response_language(mut self, language: impl Into<String>) -> Self {
        self.response_language = language.into();
        self
    }

    /// Check value ranges
    ///
    /// # Errors
    /// [`ConfigError::InvalidTemperature`] outside `0.0..=2.0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidTemperature(self.temperature));
        }
        Ok(())
    }

    /// Configured key, else the first non-empty variable of [`API_KEY_VARS`]
    ///
    /// # Errors
    /// [`ConfigError::MissingApiKey`] when neither source has a key.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    fn resolve_api_key_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<String, ConfigError> {
        self.api_key
            .clone()
            .into_iter()
            .chain(API_KEY_VARS.iter().filter_map(|&name| lookup(name)))
            .find(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("endpoint", &self.endpoint)
            .field("response_language", &self.response_language)
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .finish()
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.3,
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            response_language: "Russian".to_string(),
            api_key: None,
        }
    }
}
