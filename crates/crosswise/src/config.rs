//! Display and input settings loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "crosswise.toml";

/// Settings for the terminal game.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Text shown in the header bar.
    header_text: String,

    /// Terminal window title.
    window_title: String,

    /// Header text color (any name ratatui parses, e.g. "red" or "#ff0000").
    header_foreground: String,

    /// Header background color.
    header_background: String,

    /// Body text color.
    body_foreground: String,

    /// Body background color.
    body_background: String,

    /// Blank columns left and right of the body.
    horizontal_margin: u16,

    /// Seconds a player has to finish a turn. 0 waits forever.
    input_timeout_secs: u64,

    /// Invalid keys allowed per turn before the game ends.
    max_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            header_text: "Crosswise - Three in a Row".to_string(),
            window_title: "Crosswise".to_string(),
            header_foreground: "red".to_string(),
            header_background: "white".to_string(),
            body_foreground: "white".to_string(),
            body_background: "black".to_string(),
            horizontal_margin: 3,
            input_timeout_secs: 60,
            max_attempts: 3,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!("Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise [`DEFAULT_CONFIG_PATH`] if it exists,
    /// otherwise the defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Renders this configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Replaces the timeout and attempt limit where the command line gave one.
    #[instrument(skip(self))]
    pub fn apply_overrides(&mut self, input_timeout_secs: Option<u64>, max_attempts: Option<u32>) {
        if let Some(secs) = input_timeout_secs {
            self.input_timeout_secs = secs;
        }
        if let Some(attempts) = max_attempts {
            self.max_attempts = attempts.max(1);
        }
    }

    /// Time allowed for a turn, or `None` to wait forever.
    pub fn input_timeout(&self) -> Option<Duration> {
        (self.input_timeout_secs > 0).then(|| Duration::from_secs(self.input_timeout_secs))
    }

    /// Header colors as `(foreground, background)`.
    pub fn header_colors(&self) -> (Color, Color) {
        (
            parse_color(&self.header_foreground),
            parse_color(&self.header_background),
        )
    }

    /// Body colors as `(foreground, background)`.
    pub fn body_colors(&self) -> (Color, Color) {
        (
            parse_color(&self.body_foreground),
            parse_color(&self.body_background),
        )
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("header_foreground", &self.header_foreground),
            ("header_background", &self.header_background),
            ("body_foreground", &self.body_foreground),
            ("body_background", &self.body_background),
        ] {
            if value.parse::<Color>().is_err() {
                return Err(ConfigError::new(format!("Unknown color for {}: {:?}", field, value)));
            }
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::new("max_attempts must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn parse_color(name: &str) -> Color {
    name.parse().unwrap_or(Color::Reset)
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = GameConfig::from_toml("max_attempts = 5\nheader_text = \"Hi\"").unwrap();
        assert_eq!(*config.max_attempts(), 5);
        assert_eq!(config.header_text(), "Hi");
        assert_eq!(*config.horizontal_margin(), 3);
    }

    #[test]
    fn test_unknown_color_rejected() {
        let err = GameConfig::from_toml("body_foreground = \"plaid\"").unwrap_err();
        assert!(err.message.contains("body_foreground"));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        assert!(GameConfig::from_toml("max_attempts = 0").is_err());
    }

    #[test]
    fn test_zero_timeout_waits_forever() {
        let mut config = GameConfig::default();
        assert_eq!(config.input_timeout(), Some(Duration::from_secs(60)));
        config.apply_overrides(Some(0), None);
        assert_eq!(config.input_timeout(), None);
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let text = GameConfig::default().to_toml().unwrap();
        assert_eq!(GameConfig::from_toml(&text).unwrap(), GameConfig::default());
    }
}
