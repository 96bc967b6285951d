use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Startup settings. Loaded once; edits made in the running app (the
/// excluded-author list) are not written back.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub repo_owner: Option<String>,
    pub repo_name: Option<String>,
    pub excluded_authors: Vec<String>,
    pub page_size: u8,
    pub max_pages: u32,
    pub api_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repo_owner: None,
            repo_name: None,
            excluded_authors: Vec::new(),
            page_size: 50,
            max_pages: 10,
            api_url: None,
        }
    }
}

impl Settings {
    pub fn repo(&self) -> Option<(String, String)> {
        match (&self.repo_owner, &self.repo_name) {
            (Some(owner), Some(name)) => Some((owner.clone(), name.clone())),
            _ => None,
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("extprs").join("config.json"))
}

/// Load settings from the config file, falling back to defaults when the
/// file does not exist. A file that exists but does not parse is an error.
pub fn load_settings() -> Result<Settings> {
    let Some(path) = get_config_path() else {
        return Ok(Settings::default());
    };
    if !path.exists() {
        return Ok(Settings::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_settings(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn parse_settings(contents: &str) -> Result<Settings> {
    Ok(serde_json::from_str(contents)?)
}
