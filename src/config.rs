use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::generator::DEFAULT_TIMEOUT_SECS;

pub const DEFAULT_GENERATOR: &str = "gen_struct";
pub const DEFAULT_TEMPLATE: &str = "prompts/rename.md.template";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub generator: String,
    pub template: PathBuf,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generator: DEFAULT_GENERATOR.to_string(),
            template: PathBuf::from(DEFAULT_TEMPLATE),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    fn get_config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(home_dir.join(".renamile").join("config.json"))
    }

    pub fn load() -> Result<Option<Config>> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(Some(config))
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content)?;

        println!("Configuration saved to: {}", config_path.display());
        Ok(())
    }

    pub fn get_config_file_path() -> Result<PathBuf> {
        Self::get_config_path()
    }
}
