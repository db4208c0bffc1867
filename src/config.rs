use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{render::RenderOptions, DisplayFormat};

/// User defaults for docx-comments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout used when `--display-format` is not given
    pub display_format: DisplayFormat,
    /// Default for `--include-details`
    pub include_details: bool,
}

impl Config {
    /// Load config from the config directory, falling back to defaults
    pub fn load() -> Result<Self> {
        match Self::get_config_path() {
            Some(config_path) => Self::load_from(&config_path),
            None => Ok(Config::default()),
        }
    }

    /// Load config from an explicit path; a missing file yields defaults
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", config_path.display()))?;
        Ok(config)
    }

    /// Save config to the config directory
    pub fn save(&self) -> Result<Option<PathBuf>> {
        let Some(config_path) = Self::get_config_path() else {
            return Ok(None);
        };
        self.save_to(&config_path)?;
        Ok(Some(config_path))
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Combine command-line values with these defaults; an explicit format
    /// wins, and details are on when either side asks for them
    pub fn resolve(
        &self,
        display_format: Option<DisplayFormat>,
        include_details: bool,
    ) -> (DisplayFormat, RenderOptions) {
        let format = display_format.unwrap_or(self.display_format);
        let options = RenderOptions {
            include_details: include_details || self.include_details,
        };
        (format, options)
    }

    /// Get the path to the config file
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docx-comments").join("config.toml"))
    }

    /// Write the default config file, returning where it went
    pub fn init_default() -> Result<Option<PathBuf>> {
        Config::default().save()
    }
}
