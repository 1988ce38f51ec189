use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::extractor::VERSION_FILE;

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Version file, relative to the repository root unless absolute
    pub output: PathBuf,
    /// git executable
    pub git: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from(VERSION_FILE),
            git: "git".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>, repo: &Path) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/tagversion/tagversion.yml
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join("tagversion").join("tagversion.yml");
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: <repo>/tagversion.yml
        let fallback_config = repo.join("tagversion.yml");
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Version file location for `repo`; absolute outputs are used as-is.
    pub fn output_in(&self, repo: &Path) -> PathBuf {
        repo.join(&self.output)
    }
}
