//! Configuration management for tracelens.
//!
//! Configuration is resolved with the following precedence:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Config file (`~/.config/tracelens/config.yaml`)
//! 4. Defaults (lowest priority)

use crate::core::{Result, TraceLensError};
use serde::{Deserialize, Serialize};

/// Default short-span threshold in percent of total duration
pub const DEFAULT_THRESHOLD_PERCENT: u8 = 5;

/// Default waterfall width in terminal columns
pub const DEFAULT_WIDTH: usize = 80;

/// Complete configuration for tracelens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Span visibility settings
    pub view: ViewConfig,
    /// Waterfall rendering settings
    pub render: RenderConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Debug mode
    #[serde(skip)]
    pub debug: bool,
}

/// Span visibility settings.
///
/// These are the user-facing knobs of the short-span classifier. They
/// reset to defaults whenever a new trace is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Hide spans classified as insignificant
    pub hide_short_spans: bool,
    /// Insignificance threshold as a percentage of total duration
    pub threshold_percent: u8,
}

impl ViewConfig {
    /// Returns the threshold clamped to [0, 100].
    ///
    /// The clamp happens at the read side so that values arriving from
    /// a config file or setter never need separate validation.
    pub fn threshold(&self) -> u8 {
        self.threshold_percent.min(100)
    }

    /// Restores the default settings (new-submission lifecycle)
    pub fn reset(&mut self) {
        *self = ViewConfig::default();
    }
}

/// Waterfall rendering settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Timeline width in terminal columns
    pub width: usize,
    /// Print the per-span detail listing after the waterfall
    pub details: bool,
}

/// Logging settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Returns the level as a `tracing` filter directive
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            view: ViewConfig::default(),
            render: RenderConfig::default(),
            logging: LoggingConfig::default(),
            debug: false,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            hide_short_spans: false,
            threshold_percent: DEFAULT_THRESHOLD_PERCENT,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: DEFAULT_WIDTH,
            details: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Result<Self> {
        let config = Config::default();
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.render.width == 0 {
            return Err(TraceLensError::config("render width must be greater than 0"));
        }
        Ok(())
    }
}

/// Builder for assembling configuration from multiple sources
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a builder seeded with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from a YAML document, replacing current values
    pub fn from_yaml(mut self, yaml: &str) -> Result<Self> {
        self.config = serde_yaml::from_str(yaml)
            .map_err(|e| TraceLensError::config(format!("Invalid config file: {}", e)))?;
        Ok(self)
    }

    /// Sets the short-span threshold, clamping to [0, 100]
    pub fn threshold_percent(mut self, threshold: u8) -> Self {
        self.config.view.threshold_percent = threshold.min(100);
        self
    }

    /// Sets whether insignificant spans are hidden
    pub fn hide_short_spans(mut self, hide: bool) -> Self {
        self.config.view.hide_short_spans = hide;
        self
    }

    /// Sets the waterfall width in columns
    pub fn width(mut self, width: usize) -> Self {
        self.config.render.width = width;
        self
    }

    /// Enables the per-span detail listing
    pub fn details(mut self, details: bool) -> Self {
        self.config.render.details = details;
        self
    }

    /// Enables debug mode
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Validates and returns the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
