//! Configuration for screening runs

use crate::error::{Error, Result};
use crate::export::DEFAULT_REGISTRY_DETAIL_URL;
use crate::report::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Screening configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scores strictly above this value are concerns (0-100)
    pub threshold: f64,

    /// Registry detail page, the registry ID is appended
    pub registry_detail_base_url: String,

    /// Portfolio column delimiter (single byte)
    pub portfolio_delimiter: char,

    /// Score portfolio entries on the rayon pool
    pub parallel: bool,

    /// Abort on the first invalid portfolio entry instead of skipping it
    pub strict_portfolio: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            registry_detail_base_url: DEFAULT_REGISTRY_DETAIL_URL.to_string(),
            portfolio_delimiter: ';',
            parallel: true,
            strict_portfolio: false,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, or the file named by `FREEZE_SCREENING_CONFIG`, overlaid
    /// with environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var("FREEZE_SCREENING_CONFIG") {
            Ok(path) => Config::from_file(path)?,
            Err(_) => Config::default(),
        };

        if let Ok(threshold) = std::env::var("FREEZE_SCREENING_THRESHOLD") {
            config.threshold = threshold.trim().parse().map_err(|e| {
                Error::Config(format!("FREEZE_SCREENING_THRESHOLD={}: {}", threshold, e))
            })?;
        }

        if let Ok(url) = std::env::var("FREEZE_SCREENING_BASE_URL") {
            config.registry_detail_base_url = url;
        }

        if let Ok(delimiter) = std::env::var("FREEZE_SCREENING_DELIMITER") {
            let mut chars = delimiter.chars();
            config.portfolio_delimiter = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(Error::Config(format!(
                        "FREEZE_SCREENING_DELIMITER must be one character, got {:?}",
                        delimiter
                    )))
                }
            };
        }

        if let Ok(parallel) = std::env::var("FREEZE_SCREENING_PARALLEL") {
            config.parallel = parse_flag("FREEZE_SCREENING_PARALLEL", &parallel)?;
        }

        if let Ok(strict) = std::env::var("FREEZE_SCREENING_STRICT") {
            config.strict_portfolio = parse_flag("FREEZE_SCREENING_STRICT", &strict)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)?;
        if !self.portfolio_delimiter.is_ascii() {
            return Err(Error::Config(format!(
                "Portfolio delimiter {:?} is not a single byte",
                self.portfolio_delimiter
            )));
        }
        Ok(())
    }

    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.portfolio_delimiter as u8
    }
}

/// Thresholds live on the 0-100 score scale
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&threshold) {
        return Err(Error::Config(format!(
            "Threshold {} is outside the 0-100 score scale",
            threshold
        )));
    }
    Ok(())
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("{}={}: expected a boolean", name, other))),
    }
}
