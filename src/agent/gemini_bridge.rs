// SYNOID Shorts Gemini Bridge
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use crate::agent::content_requester::{GenerationError, LanguageModel};
use crate::config::ModelConfig;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{error, info};

pub struct GeminiClient {
    client: reqwest::Client,
    api_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Build a client from config, reading the key from the configured
    /// environment variable.
    pub fn from_env(config: &ModelConfig) -> Result<Self, GenerationError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GenerationError::MissingApiKey(config.api_key_env.clone()))?;
        Ok(Self::new(&config.base_url, &config.model, &api_key))
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        info!("[GEMINI] Calling {} ({} chars of prompt)", self.model, prompt.len());

        let resp = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                error!("[GEMINI] Connection failed: {}", e);
                GenerationError::Network(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(classify_failure(status, body));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;
        extract_text(&json)
    }
}

pub fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": prompt }]
            }
        ]
    })
}

/// Pull `candidates[0].content.parts[*].text` out of a generateContent reply.
pub fn extract_text(json: &Value) -> Result<String, GenerationError> {
    let parts = json
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| {
            GenerationError::MalformedResponse(
                "missing candidates[0].content.parts".to_string(),
            )
        })?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.trim().is_empty() {
        return Err(GenerationError::MalformedResponse(
            "response contained no text".to_string(),
        ));
    }
    Ok(text)
}

fn classify_failure(status: StatusCode, body: String) -> GenerationError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerationError::Auth(body),
        StatusCode::TOO_MANY_REQUESTS => GenerationError::Quota(body),
        // Gemini reports a bad key as 400 INVALID_ARGUMENT.
        StatusCode::BAD_REQUEST if body.contains("API_KEY_INVALID") => GenerationError::Auth(body),
        _ => GenerationError::Api {
            status: status.as_u16(),
            body,
        },
    }
}
