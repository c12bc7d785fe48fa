use serde::{Deserialize, Serialize};

use self::firebase::FirebaseConfig;
use self::gemini::GeminiConfig;
use self::storage::StorageConfig;

pub mod firebase;
pub mod gemini;
pub mod storage;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub storage: StorageConfig,
    pub firebase: FirebaseConfig,
}

impl Config {
    /// Build the config from environment variables, falling back to defaults
    pub fn new() -> Self {
        Config {
            gemini: GeminiConfig::new(),
            storage: StorageConfig::new(),
            firebase: FirebaseConfig::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"gemini": {"api_key": "k"}, "firebase": {"project_id": "p"}}"#)
                .unwrap();

        assert_eq!(config.gemini.api_key, "k");
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert!(config.gemini.enabled());
        assert_eq!(config.storage.data_dir.to_str(), Some("lingo-data"));
        assert!(!config.firebase.enabled());
    }

    #[test]
    fn documents_url_includes_project() {
        let firebase = FirebaseConfig {
            project_id: "demo".into(),
            firestore_url: "http://localhost:8080/v1/".into(),
            ..FirebaseConfig::default()
        };

        assert_eq!(
            firebase.documents_url(),
            "http://localhost:8080/v1/projects/demo/databases/(default)/documents"
        );
    }
}
