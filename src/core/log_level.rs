//! Log level definitions
//!
//! Levels are ordered by severity: a lower numeric value is more severe.
//! A record is emitted when its level is numerically less than or equal to
//! the logger's maximum level.

use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ANSI sequence that resets all attributes
pub const RESET_COLOR: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Fatal = 0,
    Error = 1,
    Alert = 2,
    Warning = 3,
    Info = 4,
    Debug = 5,
    #[default]
    Trace = 6,
}

impl LogLevel {
    /// All levels, most severe first
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Alert,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Alert => "ALERT",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    /// Numeric value of the level (FATAL=0 … TRACE=6)
    #[inline]
    pub fn as_int(&self) -> i64 {
        *self as i64
    }

    /// Convert a raw integer into a level, clamping out-of-range values
    /// to `[Fatal, Trace]`.
    pub fn from_int(value: i64) -> Self {
        let clamped = value.clamp(LogLevel::Fatal as i64, LogLevel::Trace as i64);
        LogLevel::ALL[clamped as usize]
    }

    /// Whether a record at `self` passes a filter set to `max_level`
    #[inline]
    pub fn is_enabled_for(&self, max_level: LogLevel) -> bool {
        *self <= max_level
    }

    pub fn color_code(&self) -> Color {
        use colored::Color::*;
        match self {
            LogLevel::Fatal => Red,
            LogLevel::Error => Red,
            LogLevel::Alert => Magenta,
            LogLevel::Warning => Yellow,
            LogLevel::Info => Green,
            LogLevel::Debug => Cyan,
            LogLevel::Trace => BrightBlack,
        }
    }

    /// Opening ANSI escape sequence for this level's tag.
    ///
    /// FATAL is rendered bold on a red background, every other level uses
    /// its foreground color.
    pub fn ansi_prefix(&self) -> String {
        match self {
            LogLevel::Fatal => format!("\x1b[1;{}m", self.color_code().to_bg_str()),
            _ => format!("\x1b[{}m", self.color_code().to_fg_str()),
        }
    }

    /// Wrap `text` in this level's color
    pub fn paint(&self, text: &str) -> String {
        format!("{}{}{}", self.ansi_prefix(), text, RESET_COLOR)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FATAL" => Ok(LogLevel::Fatal),
            "ERROR" => Ok(LogLevel::Error),
            "ALERT" => Ok(LogLevel::Alert),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl TryFrom<i64> for LogLevel {
    type Error = String;

    // `Self::Error` would name the `LogLevel::Error` variant here
    fn try_from(value: i64) -> Result<Self, String> {
        if (LogLevel::Fatal as i64..=LogLevel::Trace as i64).contains(&value) {
            Ok(LogLevel::from_int(value))
        } else {
            Err(format!("Log level out of range [0, 6]: {}", value))
        }
    }
}
