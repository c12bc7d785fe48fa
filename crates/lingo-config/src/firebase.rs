use std::env;

use serde::{Deserialize, Serialize};

fn default_auth_url() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

fn default_firestore_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

/// Account backend settings. Account mode needs both `api_key` and `project_id`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FirebaseConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_firestore_url")]
    pub firestore_url: String,
}

impl FirebaseConfig {
    pub fn new() -> Self {
        Self {
            api_key: env::var("FIREBASE_API_KEY").unwrap_or_default(),
            project_id: env::var("FIREBASE_PROJECT_ID").unwrap_or_default(),
            auth_url: env::var("FIREBASE_AUTH_URL").unwrap_or_else(|_| default_auth_url()),
            firestore_url: env::var("FIRESTORE_URL").unwrap_or_else(|_| default_firestore_url()),
        }
    }

    pub fn enabled(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.project_id.trim().is_empty()
    }

    /// Root of the document tree for the configured project
    pub fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.firestore_url.trim_end_matches('/'),
            self.project_id
        )
    }
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            project_id: String::new(),
            auth_url: default_auth_url(),
            firestore_url: default_firestore_url(),
        }
    }
}
