use crate::error::Result;
use crate::model::ServerDialect;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for servdb, stored in .servdb/config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServdbConfig {
    /// Directories probed, in order, when resolving a dataset's file
    #[serde(default)]
    pub search_roots: Vec<PathBuf>,

    /// Sub-folder candidates for datasets with renewal variants
    #[serde(default = "default_sub_paths")]
    pub sub_paths: Vec<String>,

    /// Dialect assumed when a save does not name one
    #[serde(default)]
    pub dialect: ServerDialect,
}

fn default_sub_paths() -> Vec<String> {
    vec!["pre-re".to_string(), "re".to_string()]
}

impl Default for ServdbConfig {
    fn default() -> Self {
        Self {
            search_roots: Vec::new(),
            sub_paths: default_sub_paths(),
            dialect: ServerDialect::default(),
        }
    }
}

impl ServdbConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: ServdbConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }
}
