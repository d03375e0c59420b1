//! Configuration management for markup assembly.
//!
//! Parses `markup.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Programmatic overrides can be applied during load via [`Settings`].
//!
//! ## Environment Variable Expansion
//!
//! `debug.log_file` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct Settings {
    /// Override the default tag name.
    pub tag: Option<String>,
    /// Override the attribute quote character.
    pub quote_style: Option<char>,
    /// Override hook suppression.
    pub suppress_hooks: Option<bool>,
    /// Override file logging.
    pub file_logging: Option<bool>,
    /// Override page logging.
    pub page_logging: Option<bool>,
    /// Override the debug log file path.
    pub log_file: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "markup.toml";

/// Default debug log filename.
const DEFAULT_LOG_FILE: &str = "markup-debug.log";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults applied to every assembly call.
    pub defaults: DefaultsConfig,
    /// Debug trace configuration (log path is a relative string from TOML).
    debug: DebugConfigRaw,

    /// Resolved debug configuration (set after loading).
    #[serde(skip)]
    pub debug_resolved: DebugConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Assembly defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Tag used when the caller doesn't name one.
    pub tag: String,
    /// Attribute quote character, `"` or `'`.
    pub quote_style: String,
    /// Whether hooks are suppressed unless the caller says otherwise.
    pub suppress_hooks: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            tag: "div".to_owned(),
            quote_style: "\"".to_owned(),
            suppress_hooks: false,
        }
    }
}

impl DefaultsConfig {
    /// Quote character from `quote_style`.
    ///
    /// Falls back to `"` when the configured value is empty.
    #[must_use]
    pub fn quote_char(&self) -> char {
        self.quote_style.chars().next().unwrap_or('"')
    }
}

/// Raw debug configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DebugConfigRaw {
    file_logging: bool,
    page_logging: bool,
    log_file: Option<String>,
}

/// Resolved debug trace configuration with an absolute log path.
#[derive(Debug, Default)]
pub struct DebugConfig {
    /// Append trace lines to `log_file`.
    pub file_logging: bool,
    /// Write trace lines to standard output.
    pub page_logging: bool,
    /// Debug log file.
    pub log_file: PathBuf,
}

impl DebugConfig {
    /// Whether any trace output is enabled.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.file_logging || self.page_logging
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`debug.log_file`").
        field: String,
        /// Error message (e.g., "${`MARKUP_LOG_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional settings overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `markup.toml` in current directory and parents.
    ///
    /// Settings are applied after loading and path resolution.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(config_path: Option<&Path>, settings: Option<&Settings>) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = settings {
            config.apply_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply settings overrides to the configuration.
    fn apply_settings(&mut self, settings: &Settings) {
        if let Some(tag) = &settings.tag {
            self.defaults.tag.clone_from(tag);
        }
        if let Some(quote) = settings.quote_style {
            self.defaults.quote_style = quote.to_string();
        }
        if let Some(suppress) = settings.suppress_hooks {
            self.defaults.suppress_hooks = suppress;
        }
        if let Some(file_logging) = settings.file_logging {
            self.debug_resolved.file_logging = file_logging;
        }
        if let Some(page_logging) = settings.page_logging {
            self.debug_resolved.page_logging = page_logging;
        }
        if let Some(log_file) = &settings.log_file {
            self.debug_resolved.log_file.clone_from(log_file);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            defaults: DefaultsConfig::default(),
            debug: DebugConfigRaw::default(),
            debug_resolved: DebugConfig {
                file_logging: false,
                page_logging: false,
                log_file: base.join(DEFAULT_LOG_FILE),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_defaults()?;
        self.validate_debug()?;
        Ok(())
    }

    fn validate_defaults(&self) -> Result<(), ConfigError> {
        let tag = &self.defaults.tag;
        require_non_empty(tag, "defaults.tag")?;
        if !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ConfigError::Validation(format!(
                "defaults.tag contains invalid characters: {tag}"
            )));
        }

        match self.defaults.quote_style.as_str() {
            "\"" | "'" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "defaults.quote_style must be \" or ', got {other:?}"
            ))),
        }
    }

    fn validate_debug(&self) -> Result<(), ConfigError> {
        if self.debug_resolved.file_logging && self.debug_resolved.log_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "debug.file_logging requires debug.log_file".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref log_file) = self.debug.log_file {
            self.debug.log_file = Some(expand::expand_env(log_file, "debug.log_file")?);
        }
        Ok(())
    }

    /// Resolve the relative log path against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.debug_resolved = DebugConfig {
            file_logging: self.debug.file_logging,
            page_logging: self.debug.page_logging,
            log_file: config_dir.join(self.debug.log_file.as_deref().unwrap_or(DEFAULT_LOG_FILE)),
        };
    }
}
