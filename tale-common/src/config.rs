//! Navigator configuration loading
//!
//! Configuration is a single TOML document. Every field has a built-in
//! default, so a missing file never prevents the reader from starting.
//!
//! # Resolution priority
//!
//! 1. Explicit path (highest priority)
//! 2. `TALE_CONFIG` environment variable
//! 3. `<user config dir>/tale/navigator.toml`
//! 4. Built-in defaults (fallback)
//!
//! A path named explicitly (1 or 2) must be readable. The per-user file (3)
//! is optional. Any file that is found must parse and validate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Error, Result};

/// Environment variable naming the configuration file
pub const CONFIG_ENV_VAR: &str = "TALE_CONFIG";

/// Segments per content page
pub const DEFAULT_CHUNK_SIZE: usize = 4;

/// Language used when a story lacks the requested one
pub const DEFAULT_LANGUAGE: &str = "en";

/// Navigator event broadcast buffer
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Arbitration between sync-driven and manual page requests
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Most recently processed request wins, whatever its origin
    #[default]
    LastWriterWins,

    /// After a manual turn, sync requests are ignored until playback has
    /// advanced `hold_secs` past the time of the turn
    ManualHold { hold_secs: f64 },
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Navigator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Segments grouped on one content page
    pub chunk_size: usize,

    /// Fallback language for content selection
    pub default_language: String,

    /// Keep the last matched segment highlighted through gaps
    pub sticky_highlight: bool,

    pub conflict_policy: ConflictPolicy,

    /// Capacity of the navigator event channel
    pub event_capacity: usize,

    pub logging: LoggingConfig,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            default_language: DEFAULT_LANGUAGE.to_string(),
            sticky_highlight: true,
            conflict_policy: ConflictPolicy::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
            logging: LoggingConfig::default(),
        }
    }
}

impl NavigatorConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject values the navigator cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be at least 1".to_string()));
        }
        if self.default_language.trim().is_empty() {
            return Err(Error::Config("default_language must not be empty".to_string()));
        }
        if self.event_capacity == 0 {
            return Err(Error::Config("event_capacity must be at least 1".to_string()));
        }
        if let ConflictPolicy::ManualHold { hold_secs } = self.conflict_policy {
            if !hold_secs.is_finite() || hold_secs < 0.0 {
                return Err(Error::Config(format!(
                    "manual_hold hold_secs must be a non-negative number, got {}",
                    hold_secs
                )));
            }
        }
        Ok(())
    }
}

/// Per-user configuration file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tale").join("navigator.toml"))
}

/// Resolves which configuration file to load
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    explicit_path: Option<PathBuf>,
    env_var: String,
    default_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self {
            explicit_path: None,
            env_var: CONFIG_ENV_VAR.to_string(),
            default_path: default_config_path(),
        }
    }

    /// Use this file ahead of the environment and the per-user file
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }

    /// Replace the per-user fallback location (`None` disables it)
    pub fn with_default_path(mut self, path: Option<PathBuf>) -> Self {
        self.default_path = path;
        self
    }

    /// Load configuration following the resolution priority
    pub fn resolve(&self) -> Result<NavigatorConfig> {
        // Priority 1: explicit path
        if let Some(path) = &self.explicit_path {
            info!("Loading navigator config from {:?}", path);
            return NavigatorConfig::load(path);
        }

        // Priority 2: environment variable
        if let Ok(path) = std::env::var(&self.env_var) {
            if !path.is_empty() {
                info!("Loading navigator config from {} = {}", self.env_var, path);
                return NavigatorConfig::load(Path::new(&path));
            }
        }

        // Priority 3: per-user config file
        if let Some(path) = &self.default_path {
            if path.exists() {
                info!("Loading navigator config from {:?}", path);
                return NavigatorConfig::load(path);
            }
            debug!("No navigator config at {:?}", path);
        }

        // Priority 4: built-in defaults
        info!("No navigator config file found, using built-in defaults");
        Ok(NavigatorConfig::default())
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}
