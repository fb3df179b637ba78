use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Config {
    pub fn expand_path(path: &str) -> PathBuf {
        let expanded = shellexpand::tilde(path);
        PathBuf::from(expanded.into_owned())
    }

    /// `~/.chainpeek/config.json`, or the platform data dir on Windows.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Cannot find home directory")?;

        if cfg!(target_os = "windows") {
            let base = dirs::data_dir().unwrap_or(home).join("chainpeek");
            return Ok(base.join("config.json"));
        }

        Ok(home.join(".chainpeek").join("config.json"))
    }

    /// Writes a default file first if none exists.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!(
                "Configuration file not found. Creating default configuration: {:?}",
                path
            );
            let cfg = Self::default();
            cfg.save_to(path)?;
            return Ok(cfg);
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {:?}", path))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Configuration file format error in {:?}", path))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))
    }

    /// Update one key in memory. An empty `api_key` clears it.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_url" => self.api_url = value.to_string(),
            "api_key" if value.is_empty() => self.api_key = None,
            "api_key" => self.api_key = Some(value.to_string()),
            _ => return Err(anyhow!("Unknown configuration key: {}", key)),
        }
        Ok(())
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8332".to_string(),
            api_key: None,
        }
    }
}
