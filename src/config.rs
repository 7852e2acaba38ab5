/**
* filename : config
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::AggregationError;

/// 작업 디렉터리에서 자동으로 찾는 설정 파일
pub const DEFAULT_CONFIG_FILE: &str = "trade_stats.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub delimiter: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub progress_interval: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig { delimiter: ',' }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            progress_interval: 1_000_000,
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, or from `trade_stats.json` if present
    pub fn load(path: Option<&Path>) -> Result<Self, AggregationError> {
        let mut cfg = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Config::default()
                }
            }
        };

        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(path: &Path) -> Result<Self, AggregationError> {
        let mut file = File::open(path).map_err(|e| {
            AggregationError::ConfigError(format!("Failed to open config file {}: {}", path.display(), e))
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| AggregationError::ConfigError(format!("Failed to read config file: {}", e)))?;

        Ok(serde_json::from_str(&contents)?)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<(), AggregationError> {
        use std::env;
        if let Ok(v) = env::var("TRADE_STATS_DELIMITER") {
            if !v.is_empty() {
                let mut chars = v.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => self.input.delimiter = c,
                    _ => {
                        return Err(AggregationError::ConfigError(format!(
                            "TRADE_STATS_DELIMITER must be a single character, got {:?}",
                            v
                        )))
                    }
                }
            }
        }
        if let Ok(v) = env::var("TRADE_STATS_PROGRESS_INTERVAL") {
            if !v.is_empty() {
                self.logging.progress_interval = v.trim().parse().map_err(|_| {
                    AggregationError::ConfigError(format!(
                        "TRADE_STATS_PROGRESS_INTERVAL must be a non-negative integer, got {:?}",
                        v
                    ))
                })?;
            }
        }
        if let Ok(v) = env::var("TRADE_STATS_LOG_LEVEL") {
            if !v.is_empty() { self.logging.level = v; }
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), AggregationError> {
        self.input.delimiter_byte().map(|_| ())
    }
}

impl InputConfig {
    /// csv 리더에 넘길 단일 바이트 구분자
    pub fn delimiter_byte(&self) -> Result<u8, AggregationError> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(AggregationError::ConfigError(format!(
                "Delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )))
        }
    }
}
