use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{sentiment, server, weights};
use crate::engine::{SentimentEngine, WeightTable};
use crate::error::TrackerError;
use crate::models::ParticipantCategory;

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "TRACKER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SentimentConfig {
    pub neutral_zone_pct: f64,
    /// Overrides applied on top of the fixed participant weights
    pub weights: HashMap<ParticipantCategory, f64>,
    pub default_weight: f64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            neutral_zone_pct: sentiment::NEUTRAL_ZONE_PCT,
            weights: HashMap::new(),
            default_weight: weights::DEFAULT,
        }
    }
}

impl SentimentConfig {
    pub fn weight_table(&self) -> WeightTable {
        WeightTable::default()
            .with_overrides(&self.weights)
            .with_default_weight(self.default_weight)
    }

    pub fn build_engine(&self) -> SentimentEngine {
        SentimentEngine::new(self.weight_table(), self.neutral_zone_pct)
    }

    fn validate(&self) -> Result<(), TrackerError> {
        if !(0.0..=100.0).contains(&self.neutral_zone_pct) {
            return Err(TrackerError::Config(format!(
                "neutral_zone_pct must be within [0, 100], got {}",
                self.neutral_zone_pct
            )));
        }
        if !self.default_weight.is_finite() || self.default_weight < 0.0 {
            return Err(TrackerError::Config(format!(
                "default_weight must be a non-negative number, got {}",
                self.default_weight
            )));
        }
        for (category, weight) in &self.weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(TrackerError::Config(format!(
                    "weight for {category} must be a non-negative number, got {weight}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: server::DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub server: ServerConfig,
    pub sentiment: SentimentConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            server: ServerConfig::default(),
            sentiment: SentimentConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml(content: &str) -> Result<Self, TrackerError> {
        // Strip BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AppConfig = serde_yaml::from_str(content)?;
        config.sentiment.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, TrackerError> {
        let content =
            fs::read_to_string(path).map_err(|e| TrackerError::io(path.display().to_string(), e))?;
        Self::from_yaml(&content)
    }

    /// Resolves the config file: explicit path, then `TRACKER_CONFIG`, then
    /// `config.yaml` in the working directory. Falls back to defaults when no
    /// file is named and the default file does not exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, TrackerError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::load_from(&PathBuf::from(path));
        }
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            Self::load_from(default_path)
        } else {
            Ok(Self::default())
        }
    }
}
