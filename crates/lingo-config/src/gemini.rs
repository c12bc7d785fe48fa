use std::env;

use serde::{Deserialize, Serialize};

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL, the model path is appended per request
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self {
            api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| default_model()),
            api_url: env::var("GEMINI_API_URL").unwrap_or_else(|_| default_api_url()),
        }
    }

    pub fn enabled(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            api_url: default_api_url(),
        }
    }
}
