//! Startup configuration for a [`Logger`](super::Logger).
//!
//! Values can come from code (`LoggerConfig::default()` plus field updates),
//! from `LOGGER_*` environment variables, or from a JSON document. After
//! startup every value stays mutable through the logger's setters.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::prefix_level::PrefixLevel;
use serde::{Deserialize, Serialize};

/// Prefix template used when none is configured
pub const DEFAULT_PREFIX_FORMAT: &str = "{TIME} {USER_HEADER} {SEVERITY} {FILELINE} {THREAD}";

/// strftime pattern used for the `{TIME}` token
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

pub const ENV_MAX_LOG_LEVEL: &str = "LOGGER_MAX_LOG_LEVEL_PRINTED";
pub const ENV_PREFIX_LEVEL: &str = "LOGGER_PREFIX_LEVEL";
pub const ENV_ENABLE_COLORS: &str = "LOGGER_ENABLE_COLORS";
pub const ENV_COLORS_ON_USER_HEADER: &str = "LOGGER_ENABLE_COLORS_ON_USER_HEADER";
pub const ENV_PREFIX_FORMAT: &str = "LOGGER_PREFIX_FORMAT";
pub const ENV_CLEAR_LINE_BEFORE_PRINT: &str = "LOGGER_CLEAR_LINE_BEFORE_PRINT";
pub const ENV_USER_HEADER: &str = "LOGGER_USER_HEADER";
pub const ENV_TIME_FORMAT: &str = "LOGGER_TIME_FORMAT";
pub const ENV_DISABLE_PRINTF_LINE_JUMP: &str = "LOGGER_DISABLE_PRINTF_LINE_JUMP";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Records less severe than this are dropped
    pub max_log_level: LogLevel,
    pub prefix_level: PrefixLevel,
    pub enable_colors: bool,
    /// Paint the user header with the record's level color
    pub propagate_colors_on_user_header: bool,
    /// Blank a pending partial terminal line instead of pushing it down
    pub clean_line_before_print: bool,
    /// Templated calls do not append a trailing newline
    pub disable_printf_line_jump: bool,
    pub user_header: String,
    pub prefix_format: String,
    pub time_format: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_log_level: LogLevel::Trace,
            prefix_level: PrefixLevel::Production,
            enable_colors: true,
            propagate_colors_on_user_header: false,
            clean_line_before_print: false,
            disable_printf_line_jump: false,
            user_header: String::new(),
            prefix_format: DEFAULT_PREFIX_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl LoggerConfig {
    /// Defaults overlaid with any `LOGGER_*` variables of the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values returned by `lookup`
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_logger::{LogLevel, LoggerConfig, PrefixLevel};
    ///
    /// let config = LoggerConfig::from_env_with(|key| match key {
    ///     "LOGGER_MAX_LOG_LEVEL_PRINTED" => Some("4".to_string()),
    ///     "LOGGER_PREFIX_LEVEL" => Some("full".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(config.max_log_level, LogLevel::Info);
    /// assert_eq!(config.prefix_level, PrefixLevel::Full);
    /// ```
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_MAX_LOG_LEVEL) {
            config.max_log_level = parse_log_level(ENV_MAX_LOG_LEVEL, &value)?;
        }
        if let Some(value) = lookup(ENV_PREFIX_LEVEL) {
            config.prefix_level = parse_prefix_level(ENV_PREFIX_LEVEL, &value)?;
        }
        if let Some(value) = lookup(ENV_ENABLE_COLORS) {
            config.enable_colors = parse_flag(ENV_ENABLE_COLORS, &value)?;
        }
        if let Some(value) = lookup(ENV_COLORS_ON_USER_HEADER) {
            config.propagate_colors_on_user_header = parse_flag(ENV_COLORS_ON_USER_HEADER, &value)?;
        }
        if let Some(value) = lookup(ENV_CLEAR_LINE_BEFORE_PRINT) {
            config.clean_line_before_print = parse_flag(ENV_CLEAR_LINE_BEFORE_PRINT, &value)?;
        }
        if let Some(value) = lookup(ENV_DISABLE_PRINTF_LINE_JUMP) {
            config.disable_printf_line_jump = parse_flag(ENV_DISABLE_PRINTF_LINE_JUMP, &value)?;
        }
        if let Some(value) = lookup(ENV_PREFIX_FORMAT) {
            config.prefix_format = value;
        }
        if let Some(value) = lookup(ENV_USER_HEADER) {
            config.user_header = value;
        }
        if let Some(value) = lookup(ENV_TIME_FORMAT) {
            config.time_format = value;
        }

        Ok(config)
    }

    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Accepts a level name (`"info"`, `"WARN"`) or its integer value.
/// Integers outside `[0, 6]` are clamped.
fn parse_log_level(component: &str, value: &str) -> Result<LogLevel> {
    let value = value.trim();
    if let Ok(raw) = value.parse::<i64>() {
        return Ok(LogLevel::from_int(raw));
    }
    value
        .parse::<LogLevel>()
        .map_err(|message| LoggerError::config(component, message))
}

fn parse_prefix_level(component: &str, value: &str) -> Result<PrefixLevel> {
    let value = value.trim();
    if let Ok(raw) = value.parse::<i64>() {
        return Ok(PrefixLevel::from_int(raw));
    }
    value
        .parse::<PrefixLevel>()
        .map_err(|message| LoggerError::config(component, message))
}

fn parse_flag(component: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(LoggerError::config(
            component,
            format!("expected a boolean, got '{}'", other),
        )),
    }
}
