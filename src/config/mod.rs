use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::events::DEFAULT_BLINK_INTERVAL;


pub const BLINK_ENV: &str = "PROMPTLINE_BLINK_MS";
pub const STYLES_ENV: &str = "PROMPTLINE_STYLES";
pub const QUIT_HINT_ENV: &str = "PROMPTLINE_QUIT_HINT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a whole number of milliseconds greater than zero, got `{value}`")]
    InvalidDuration { name: &'static str, value: String },
    #[error("{name} must be one of 1/0, true/false, on/off, yes/no, got `{value}`")]
    InvalidFlag { name: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub title: String,
    pub blink_interval: Duration,
    /// Show the "(ctrl+c to quit)" footer under the hosted widget.
    pub quit_hint: bool,
    pub stylesheet: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "promptline".to_string(),
            blink_interval: DEFAULT_BLINK_INTERVAL,
            quit_hint: true,
            stylesheet: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for the
    /// `PROMPTLINE_*` variables. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get(BLINK_ENV) {
            config.blink_interval = parse_millis(BLINK_ENV, &value)?;
        }
        if let Some(value) = get(QUIT_HINT_ENV) {
            config.quit_hint = parse_flag(QUIT_HINT_ENV, &value)?;
        }
        if let Some(value) = get(STYLES_ENV) {
            config.stylesheet = Some(PathBuf::from(value));
        }
        Ok(config)
    }
}

fn parse_millis(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::InvalidDuration {
            name,
            value: value.to_string(),
        }),
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: value.to_string(),
        }),
    }
}
