use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::copy::SHORTCUT_KEYWORD;

const CONFIG_FILE_PATH: &str = "chat_widget.toml";
const DEFAULT_ENDPOINT: &str = "http://devstudio.ddns.net:4000/chat_test";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Delays driving the avatar and typing indicators, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Inactivity before the eyes fall asleep
    pub idle_ms: u64,
    /// Keystroke silence before the user-typing indicator clears
    pub typing_stop_ms: u64,
    /// Period of the thinking gaze cycle while a reply is pending
    pub gaze_cycle_ms: u64,
    /// Length of each half of a wake-up blink
    pub blink_ms: u64,
    /// Number of blinks played when waking up
    pub wake_blinks: u8,
    /// How long the responding gaze is held after a reply lands
    pub settle_ms: u64,
    /// Artificial delay before the shortcut reply appears
    pub shortcut_delay_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            idle_ms: 15_000,
            typing_stop_ms: 1_500,
            gaze_cycle_ms: 700,
            blink_ms: 200,
            wake_blinks: 2,
            settle_ms: 1_000,
            shortcut_delay_ms: 500,
        }
    }
}

impl Timings {
    /// Reject delays the timers cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("idle_ms", self.idle_ms),
            ("typing_stop_ms", self.typing_stop_ms),
            ("gaze_cycle_ms", self.gaze_cycle_ms),
            ("blink_ms", self.blink_ms),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(ConfigError::Invalid(format!(
                    "timings.{} must be greater than zero",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn idle(&self) -> Duration {
        Duration::from_millis(self.idle_ms)
    }

    pub fn typing_stop(&self) -> Duration {
        Duration::from_millis(self.typing_stop_ms)
    }

    pub fn gaze_cycle(&self) -> Duration {
        Duration::from_millis(self.gaze_cycle_ms)
    }

    pub fn blink(&self) -> Duration {
        Duration::from_millis(self.blink_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn shortcut_delay(&self) -> Duration {
        Duration::from_millis(self.shortcut_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Answering service URL; the question is sent as the `question` query parameter
    pub endpoint: String,
    pub shortcut_keyword: String,
    pub request_timeout_secs: u64,
    pub timings: Timings,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            shortcut_keyword: SHORTCUT_KEYWORD.to_string(),
            request_timeout_secs: 30,
            timings: Timings::default(),
        }
    }
}

fn parse_u64_env(name: &str, value: &str) -> Option<u64> {
    match value.trim().parse::<u64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a non-negative integer", name, value);
            None
        }
    }
}

impl WidgetConfig {
    /// Load `chat_widget.toml` from the working directory when present, then
    /// apply environment overrides. A broken file falls back to defaults.
    pub fn new() -> Self {
        let mut config = WidgetConfig::default();

        if Path::new(CONFIG_FILE_PATH).exists() {
            match Self::load_from(CONFIG_FILE_PATH) {
                Ok(file_config) => config = file_config,
                Err(e) => log::warn!("Using default widget config: {}", e),
            }
        }

        config.apply_env();
        config
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str::<WidgetConfig>(content)?;
        config.timings.validate()?;
        Ok(config)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn apply_env(&mut self) {
        if let Ok(endpoint) = std::env::var("CHAT_WIDGET_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Ok(keyword) = std::env::var("CHAT_WIDGET_KEYWORD") {
            self.shortcut_keyword = keyword;
        }
        if let Ok(timeout) = std::env::var("CHAT_WIDGET_REQUEST_TIMEOUT_SECS") {
            if let Some(secs) = parse_u64_env("CHAT_WIDGET_REQUEST_TIMEOUT_SECS", &timeout) {
                self.request_timeout_secs = secs;
            }
        }
        if let Ok(settle) = std::env::var("CHAT_WIDGET_SETTLE_MS") {
            if let Some(ms) = parse_u64_env("CHAT_WIDGET_SETTLE_MS", &settle) {
                self.timings.settle_ms = ms;
            }
        }
    }
}
