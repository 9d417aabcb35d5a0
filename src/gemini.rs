//! Gemini API client for plan generation
//!
//! Wraps the Google `generateContent` endpoint behind the [`TextGenerator`]
//! trait so the planner can be tested against mocks. Transient upstream
//! failures get a single bounded retry via `reqwest-retry`.

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::GeminiConfig;
use crate::{PlannerError, Result};

/// A text-completion capability treated as an opaque collaborator
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produce a text completion for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Gemini `generateContent` API client
pub struct GeminiClient {
    http: ClientWithMiddleware,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    /// Create a new client from configuration
    ///
    /// Fails with a `Config` error when no API key is present.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| PlannerError::config("Gemini API key is not configured"))?;

        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("tripplanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlannerError::config(format!("Failed to create HTTP client: {e}")))?;

        // One retry for transient upstream failures (connect errors, 5xx)
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(1);
        let http = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            http,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn build_request_body(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        }
    }

    fn extract_text(response: GenerateContentResponse) -> Result<String> {
        if let Some(feedback) = &response.prompt_feedback
            && let Some(reason) = &feedback.block_reason
        {
            warn!("Prompt was blocked by the model: {reason}");
            return Err(PlannerError::generation(format!(
                "Prompt was blocked by the model: {reason}"
            )));
        }

        let text: String = response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(PlannerError::generation(
                "Model returned an empty response",
            ));
        }

        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = self.endpoint();
        let body = self.build_request_body(prompt);

        // Log the endpoint without the credential
        debug!("Gemini request URL: {url}");
        let start = std::time::Instant::now();

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| match e {
                reqwest_middleware::Error::Reqwest(inner) if inner.is_timeout() => {
                    PlannerError::Timeout {
                        seconds: start.elapsed().as_secs(),
                    }
                }
                other => PlannerError::generation(format!("Gemini request failed: {other}")),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Gemini API error {status}: {message}");
            return Err(PlannerError::generation(format!(
                "Gemini API returned {status}: {message}"
            )));
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            PlannerError::generation(format!("Invalid Gemini response body: {e}"))
        })?;

        let text = Self::extract_text(api_response)?;
        info!(
            "Generated {} chars in {:.3}s",
            text.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(text)
    }
}

// Gemini API wire types

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}
