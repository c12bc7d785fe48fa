use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_data_dir() -> PathBuf {
    PathBuf::from("lingo-data")
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the local key-value records
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new() -> Self {
        let data_dir = env::var("LINGO_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        Self { data_dir }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}
