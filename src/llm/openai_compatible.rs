// ABOUTME: Generic OpenAI-compatible LLM provider for local and cloud endpoints
// ABOUTME: Supports Ollama, vLLM, LocalAI, and any OpenAI-compatible API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! Generic implementation for any `OpenAI`-compatible chat completion
//! endpoint. This enables integration with local LLM servers like Ollama,
//! vLLM, and `LocalAI`.
//!
//! ## Supported Backends
//!
//! - **Ollama**: <http://localhost:11434/v1>
//! - **vLLM**: <http://localhost:8000/v1>
//! - **`LocalAI`**: <http://localhost:8080/v1>
//! - **Any `OpenAI`-compatible endpoint**

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use sage_core::{PlannerError, PlannerResult};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use crate::config::LlmConfig;

/// Connection timeout for local servers (more lenient than cloud)
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Request timeout (local inference can be slow)
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// OpenAI-compatible API request structure
#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Message structure for OpenAI-compatible API
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

/// OpenAI-compatible API response structure
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Error response structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

/// Configuration for the `OpenAI`-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <http://localhost:11434/v1>)
    pub base_url: String,
    /// API key (optional for local servers)
    pub api_key: Option<String>,
    /// Default model to use
    pub default_model: String,
    /// Provider name for display/logging
    pub provider_name: &'static str,
    /// Provider display name
    pub display_name: &'static str,
}

impl From<&LlmConfig> for OpenAiCompatibleConfig {
    fn from(llm: &LlmConfig) -> Self {
        // Detect provider type from URL for better display names
        let (provider_name, display_name) = if llm.base_url.contains(":11434") {
            ("ollama", "Ollama (Local)")
        } else if llm.base_url.contains(":8000") {
            ("vllm", "vLLM (Local)")
        } else if llm.base_url.contains(":8080") {
            ("localai", "LocalAI")
        } else {
            ("local", "Local LLM")
        };

        Self {
            base_url: llm.base_url.clone(),
            api_key: llm.api_key.clone(),
            default_model: llm.model.clone(),
            provider_name,
            display_name,
        }
    }
}

/// Generic `OpenAI`-compatible LLM provider
///
/// Works with any endpoint that implements the `OpenAI` chat completions
/// API, including Ollama, vLLM, `LocalAI`, and cloud services.
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> PlannerResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| PlannerError::http(format!("failed to create HTTP client: {e}")))?;

        info!(
            "Initializing {} provider: base_url={}, model={}",
            config.display_name, config.base_url, config.default_model
        );

        Ok(Self { client, config })
    }

    /// Create a provider from the planner's LLM settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_llm_config(llm: &LlmConfig) -> PlannerResult<Self> {
        Self::new(OpenAiCompatibleConfig::from(llm))
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.header("Authorization", format!("Bearer {api_key}"))
        } else {
            request
        }
    }

    /// Parse error response from API
    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> PlannerError {
        if let Ok(error_response) = serde_json::from_str::<OpenAiErrorResponse>(body) {
            let error_type = error_response
                .error
                .error_type
                .unwrap_or_else(|| "unknown".to_owned());
            PlannerError::http(format!(
                "API error ({status}): {error_type} - {}",
                error_response.error.message
            ))
        } else {
            // Non-JSON error bodies are common with local servers
            match status.as_u16() {
                502..=504 => PlannerError::http(
                    "local LLM server is not responding; is Ollama/vLLM running?",
                ),
                _ => PlannerError::http(format!(
                    "API error ({status}): {}",
                    body.chars().take(200).collect::<String>()
                )),
            }
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        self.config.provider_name
    }

    fn display_name(&self) -> &'static str {
        self.config.display_name
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    async fn complete(&self, request: &ChatRequest) -> PlannerResult<ChatResponse> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);

        debug!(
            provider = self.config.provider_name,
            model,
            messages = request.messages.len(),
            "sending chat completion request"
        );

        let openai_request = OpenAiRequest {
            model: model.to_owned(),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let http_request = self
            .client
            .post(self.api_url("chat/completions"))
            .header("Content-Type", "application/json")
            .json(&openai_request);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| {
                error!(
                    "failed to send request to {}: {e}",
                    self.config.provider_name
                );
                if e.is_connect() {
                    PlannerError::http(format!(
                        "cannot connect to {}; is the server running at {}?",
                        self.config.display_name, self.config.base_url
                    ))
                } else {
                    PlannerError::http(format!("failed to connect: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PlannerError::http(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!(
                "failed to parse API response: {e} - body: {}",
                &body[..body.len().min(500)]
            );
            PlannerError::http(format!("failed to parse response: {e}"))
        })?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| PlannerError::http("response contained no choices"))?;

        Ok(ChatResponse {
            content: choice.message.content.unwrap_or_default(),
            model: openai_response.model,
            usage: openai_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason,
        })
    }

    async fn health_check(&self) -> PlannerResult<bool> {
        let http_request = self.client.get(self.api_url("models"));
        match self.add_auth_header(http_request).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                debug!("health check failed: {e}");
                Ok(false)
            }
        }
    }
}
