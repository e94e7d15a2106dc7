//! File configuration: struct definitions and event signatures to preload

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct StructEntry {
    /// Struct-definition text, e.g. `struct Task { string title; }` spread over lines
    pub definition: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventEntry {
    /// Event signature, e.g.
    /// `event Transfer(address indexed from, address indexed to, uint256 value)`
    pub signature: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub structs: Vec<StructEntry>,

    #[serde(default)]
    pub events: Vec<EventEntry>,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("parse config")
    }
}

/// Load the config from [`config_path`], falling back to an empty config
pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    if !path.exists() {
        return Config::default();
    }
    match load_from(&path) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path.display(), "ignoring config: {err:#}");
            Config::default()
        }
    }
}

pub fn load_from(path: &Path) -> Result<Config> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    Config::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("ABIDEC_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("abidec").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("abidec").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "abidec", "abidec")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = Config::from_toml_str(
            r#"
            [[structs]]
            definition = """
            struct Task {
                string title;
                address reporter;
            }
            """

            [[events]]
            signature = "event Transfer(address indexed from, address indexed to, uint256 value)"
            "#,
        )
        .unwrap();
        assert_eq!(config.structs.len(), 1);
        assert!(config.structs[0].definition.contains("struct Task"));
        assert_eq!(config.events.len(), 1);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_toml_str("").unwrap();
        assert!(config.structs.is_empty());
        assert!(config.events.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_toml_str("[[structs]]\nname = 1").is_err());
    }
}
