use async_trait::async_trait;
use lingo_config::gemini::GeminiConfig;
use serde_json::json;

use crate::{GenerateError, ProviderMetadata, TextGenerator};

pub const FLASH_MODEL: &str = "gemini-2.5-flash";
pub const PRO_MODEL: &str = "gemini-2.5-pro";
pub const KNOWN_MODELS: [&str; 2] = [FLASH_MODEL, PRO_MODEL];

/// Gemini `generateContent` REST client
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    pub fn from_config(config: &GeminiConfig) -> Self {
        Self::new(
            config.api_key.clone(),
            config.api_url.clone(),
            config.model.clone(),
        )
    }

    pub fn current_model(&self) -> &str {
        &self.model
    }

    /// Switch to another model; unknown names are rejected
    pub fn switch_model(&mut self, model: &str) -> Result<(), GenerateError> {
        if !KNOWN_MODELS.contains(&model) {
            return Err(GenerateError::InvalidInput(format!(
                "unknown model '{model}', expected one of {KNOWN_MODELS:?}"
            )));
        }
        tracing::info!("Switching model {} -> {}", self.model, model);
        self.model = model.to_string();
        Ok(())
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        if self.api_key.trim().is_empty() {
            return Err(GenerateError::MissingApiKey);
        }

        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
        });

        tracing::debug!("Gemini request to {} ({} chars)", self.model, prompt.len());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status == 429 {
            return Err(GenerateError::RateLimitExceeded);
        }

        if status == 401 || status == 403 {
            return Err(GenerateError::AuthenticationError);
        }

        if !status.is_success() {
            let json: serde_json::Value = response.json().await.unwrap_or_default();
            let message = json["error"]["message"]
                .as_str()
                .unwrap_or("request failed")
                .to_string();
            tracing::error!("Gemini returned HTTP {}: {}", status, message);
            return Err(GenerateError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let json: serde_json::Value = response.json().await?;

        let text: String = json["candidates"]
            .get(0)
            .and_then(|candidate| candidate["content"]["parts"].as_array())
            .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            return Err(GenerateError::EmptyResponse);
        }

        Ok(text.to_string())
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}
