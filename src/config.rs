//! Config loading for the FeelBot core and the interactive binary.
//!
//! Config lives in a single JSON file. A missing or unparsable file never
//! stops startup: defaults are used and the reason is logged.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Env var that points at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "FEELBOT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to create config directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeelBotConfig {
    /// Average the compound polarity method into sentiment scores.
    #[serde(default = "default_true")]
    pub compound_sentiment: bool,
    /// Extra tab-separated valence lexicon merged into the compound method.
    #[serde(default)]
    pub compound_lexicon_path: Option<PathBuf>,
    /// Append a topic clause (work, family, ...) to composed replies.
    #[serde(default)]
    pub personalize: bool,
    /// Seed for reply selection. Unset = fresh randomness every run.
    #[serde(default)]
    pub rng_seed: Option<u64>,
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    #[serde(default)]
    pub log_filter: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for FeelBotConfig {
    fn default() -> Self {
        Self {
            compound_sentiment: true,
            compound_lexicon_path: None,
            personalize: false,
            rng_seed: None,
            log_filter: None,
        }
    }
}

/// `$FEELBOT_CONFIG`, else `<data dir>/feelbot/config.json`.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    dirs_next::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("feelbot")
        .join("config.json")
}

pub fn load_config(path: &Path) -> FeelBotConfig {
    load_json_config(path, "FEELBOT")
}

pub fn save_config(path: &Path, config: &FeelBotConfig) -> Result<(), ConfigError> {
    save_json_config(path, config, "FEELBOT")
}

/// Generic load for any Serde config type with a `Default` implementation.
/// Falls back to `T::default()` if the file is missing or unparsable.
pub fn load_json_config<T: DeserializeOwned + Default>(path: &Path, label: &str) -> T {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<T>(&content) {
            Ok(config) => {
                tracing::info!(label, path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(
                    label,
                    path = %path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                T::default()
            }
        },
        Err(_) => {
            tracing::info!(label, path = %path.display(), "no config file, using defaults");
            T::default()
        }
    }
}

/// Generic save for any Serde config type.
pub fn save_json_config<T: Serialize>(path: &Path, config: &T, label: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(label, path = %path.display(), "saved config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.json"));
        assert_eq!(config, FeelBotConfig::default());
        assert!(config.compound_sentiment);
    }

    #[test]
    fn garbage_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_config(&path), FeelBotConfig::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "personalize": true, "rng_seed": 7 }"#).unwrap();
        let config = load_config(&path);
        assert!(config.personalize);
        assert_eq!(config.rng_seed, Some(7));
        assert!(config.compound_sentiment, "omitted bool keeps its true default");
    }

    #[test]
    fn save_then_load_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.json");
        let config = FeelBotConfig {
            compound_sentiment: false,
            log_filter: Some("feelbot=debug".to_string()),
            ..FeelBotConfig::default()
        };
        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path), config);
    }
}
