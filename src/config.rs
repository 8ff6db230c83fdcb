//! Console configuration loading.
//!
//! The configuration file is optional JSON naming a module to load at
//! startup, so scripted runs do not need a leading `module load` line.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ConsoleResult;

/// Startup configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Name of the module to load at startup
    #[serde(default)]
    pub module_name: Option<String>,

    /// Library path recorded for the module
    #[serde(default)]
    pub module_path: Option<String>,
}

impl ConsoleConfig {
    /// Loads the configuration from `path`. A missing file is not an
    /// error; it yields the default configuration.
    pub fn load(path: &Path) -> ConsoleResult<Self> {
        if !path.exists() {
            return Ok(ConsoleConfig::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: ConsoleConfig = serde_json::from_str(&contents)?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }
}
