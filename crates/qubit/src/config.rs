use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// File name probed under the qubit home directory
pub const CONFIG_FILE: &str = "config.json";

fn default_max_solutions() -> usize {
  8
}

fn default_search_limit() -> usize {
  5
}

fn default_randomness_factor() -> f32 {
  0.15
}

fn default_min_similarity() -> f32 {
  0.1
}

fn default_high_confidence() -> f32 {
  0.5
}

fn default_medium_confidence() -> f32 {
  0.3
}

/// Tunable knobs for scoring and ranking.
///
/// Every field has a default, so a config file only needs to name the
/// values it wants to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  /// Hard cap on solutions returned by a single search
  #[serde(default = "default_max_solutions")]
  pub max_solutions: usize,

  /// How many ranked topics are expanded into solutions
  #[serde(default = "default_search_limit")]
  pub search_limit: usize,

  /// Upper bound on the random drift added to each similarity score
  #[serde(default = "default_randomness_factor")]
  pub randomness_factor: f32,

  /// Topics scoring below this are dropped entirely
  #[serde(default = "default_min_similarity")]
  pub min_similarity: f32,

  /// Above this, a topic's solutions are returned verbatim
  #[serde(default = "default_high_confidence")]
  pub high_confidence: f32,

  /// Above this (and at or below high), solutions are hedged
  #[serde(default = "default_medium_confidence")]
  pub medium_confidence: f32,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      max_solutions: default_max_solutions(),
      search_limit: default_search_limit(),
      randomness_factor: default_randomness_factor(),
      min_similarity: default_min_similarity(),
      high_confidence: default_high_confidence(),
      medium_confidence: default_medium_confidence(),
    }
  }
}

impl Config {
  /// Load configuration from a specific file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let content = fs::read_to_string(&path)
      .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

    let config: Config = serde_json::from_str(&content)
      .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

    Ok(config)
  }

  /// Load configuration from the qubit home, falling back to defaults.
  ///
  /// A missing file is normal. An unreadable one is logged and ignored,
  /// so a typo in the config never takes the assistant down.
  pub fn load() -> Self {
    let path = crate::knowledge::qubit_home().join(CONFIG_FILE);
    if !path.exists() {
      return Self::default();
    }

    match Self::load_from_file(&path) {
      Ok(config) => config,
      Err(e) => {
        warn!("ignoring config at {}: {e}", path.display());
        Self::default()
      }
    }
  }

  /// Save configuration to a specific file
  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
      fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

    fs::write(&path, content)
      .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.max_solutions, 8);
    assert_eq!(config.search_limit, 5);
    assert_eq!(config.randomness_factor, 0.15);
    assert_eq!(config.min_similarity, 0.1);
    assert_eq!(config.high_confidence, 0.5);
    assert_eq!(config.medium_confidence, 0.3);
  }

  #[test]
  fn test_partial_file_fills_in_defaults() {
    let config: Config = serde_json::from_str(r#"{"randomness_factor": 0.0}"#).unwrap();
    assert_eq!(config.randomness_factor, 0.0);
    assert_eq!(config.max_solutions, 8);
    assert_eq!(config.search_limit, 5);
  }

  #[test]
  fn test_save_and_load_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join(CONFIG_FILE);

    let config = Config { max_solutions: 3, min_similarity: 0.25, ..Config::default() };
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.max_solutions, 3);
    assert_eq!(loaded.min_similarity, 0.25);
    assert_eq!(loaded.search_limit, 5);
  }

  #[test]
  fn test_load_from_file_rejects_garbage() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(CONFIG_FILE);
    std::fs::write(&path, "not json at all").unwrap();

    assert!(Config::load_from_file(&path).is_err());
  }
}
