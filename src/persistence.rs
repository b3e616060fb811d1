use crate::links::LinkManager;
use crate::types::{Config, default_links};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";

/// A loaded configuration plus anything that was wrong with the file
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<String>,
}

/// Reads `config.json`. The close-action set is never written here.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Use the platform config directory, creating it if needed
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "anchor-modal")
            .context("Failed to determine config directory")?;

        let config_dir = project_dirs.config_dir().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        }

        Ok(ConfigManager {
            config_path: config_dir.join(CONFIG_FILE_NAME),
        })
    }

    /// Use an explicit config file
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        ConfigManager {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load_config(&self) -> Result<LoadedConfig> {
        if !self.config_path.exists() {
            // Create default config
            let config = Config::default();
            self.save_config(&config)?;
            return Ok(LoadedConfig {
                config,
                warnings: Vec::new(),
            });
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read config file")?;

        let mut warnings = Vec::new();
        let mut config: Config = serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse config file: {}. Using defaults.", e);
            warnings.push(format!("Config file is invalid ({}); using defaults", e));
            Config::default()
        });

        let (links, rejected) = LinkManager::sanitize(std::mem::take(&mut config.links));
        warnings.extend(rejected);
        config.links = if links.is_empty() {
            tracing::warn!("No usable links in config. Using default links.");
            default_links()
        } else {
            links
        };

        Ok(LoadedConfig { config, warnings })
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, content).context("Failed to write config file")?;

        Ok(())
    }
}
