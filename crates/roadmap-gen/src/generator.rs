//! Roadmap generators
//!
//! [`RoadmapGenerator`] is the seam between the application and the language
//! model. [`GeminiGenerator`] talks to the Gemini `generateContent` REST API.
//!
//! A generation attempt is a single request: no retry, no timeout beyond the
//! HTTP client's defaults, no cancellation. Any failure ends the attempt.

use crate::config::{GeneratorConfig, REDACTED};
use crate::error::{ConfigError, Failure, GenerationError};
use crate::payload;
use crate::prompt::{response_schema, system_instruction};
use async_trait::async_trait;
use roadmap_core::RoadmapStore;
use serde::Deserialize;
use serde_json::{json, Value};

/// Produces a roadmap from a free-text goal
#[async_trait]
pub trait RoadmapGenerator: Send + Sync {
    /// Generate a roadmap for `goal`
    ///
    /// # Errors
    /// A single opaque [`GenerationError`] for every kind of failure.
    async fn generate(&self, goal: &str) -> Result<RoadmapStore, GenerationError>;
}

/// Generator backed by the Gemini REST API
#[derive(Clone)]
pub struct GeminiGenerator {
    client: reqwest::Client,
    config: GeneratorConfig,
    api_key: String,
}

impl GeminiGenerator {
    /// Build a generator; the API key is resolved here
    ///
    /// # Errors
    /// [`ConfigError::MissingApiKey`] without a key,
    /// [`ConfigError::InvalidTemperature`] for an out-of-range temperature,
    /// [`ConfigError::Client`] when the HTTP client cannot be built.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let api_key = config.resolve_api_key()?;
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body(&self, goal: &str) -> Value {
        json!({
            "contents": [{ "role": "user", "parts": [{ "text": goal }] }],
            "systemInstruction": {
                "parts": [{ "text": system_instruction(&self.config.response_language) }]
            },
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
                "temperature": self.config.temperature
            }
        })
    }

    async fn request_text(&self, goal: &str) -> Result<String, Failure> {
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(goal))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Failure::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        Ok(parsed.text())
    }

    async fn try_generate(&self, goal: &str) -> Result<RoadmapStore, Failure> {
        let text = self.request_text(goal).await?;
        tracing::debug!("Model returned {} bytes", text.len());
        payload::parse(&text)
    }
}

impl std::fmt::Debug for GeminiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGenerator")
            .field("config", &self.config)
            .field("api_key", &REDACTED)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RoadmapGenerator for GeminiGenerator {
    async fn generate(&self, goal: &str) -> Result<RoadmapStore, GenerationError> {
        tracing::info!("Generating roadmap with {}", self.config.model);

        match self.try_generate(goal).await {
            Ok(store) => {
                tracing::info!(
                    "Generated roadmap: {} stages, {} tasks",
                    store.stages().len(),
                    store.all_tasks().count()
                );
                Ok(store)
            }
            Err(cause) => {
                tracing::error!("Generation failed: {}", cause);
                Err(GenerationError::new(cause))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> GeminiGenerator {
        GeminiGenerator::new(
            GeneratorConfig::new()
                .with_api_key("test-key")
                .with_endpoint("http://localhost:1/v1beta/"),
        )
        .unwrap()
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        assert_eq!(
            generator().url(),
            "http://localhost:1/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn request_body_carries_goal_and_schema() {
        let body = generator().request_body("Open a bakery");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Open a bakery");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"]["required"],
            json!(["project_summary", "stages"])
        );
    }

    #[test]
    fn new_rejects_bad_temperature() {
        let err = GeminiGenerator::new(
            GeneratorConfig::new()
                .with_api_key("k")
                .with_temperature(-1.0),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTemperature(_)));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let text = format!("{:?}", generator());
        assert!(!text.contains("test-key"));
        assert!(text.contains("<redacted>"));
    }

    #[test]
    fn response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] } }]
        }))
        .unwrap();
        assert_eq!(response.text(), "{\"a\":1}");
    }

    #[test]
    fn response_without_candidates_is_empty() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.text(), "");
    }
}
