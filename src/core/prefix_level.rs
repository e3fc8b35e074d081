//! Prefix verbosity tiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much information the prefix carries.
///
/// Each tier includes everything from the previous one:
/// user header, then severity tag, then clock, then file and line,
/// then thread id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrefixLevel {
    None = 0,
    Minimal = 1,
    #[default]
    Production = 2,
    Debug = 3,
    Full = 4,
}

impl PrefixLevel {
    pub const ALL: [PrefixLevel; 5] = [
        PrefixLevel::None,
        PrefixLevel::Minimal,
        PrefixLevel::Production,
        PrefixLevel::Debug,
        PrefixLevel::Full,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            PrefixLevel::None => "NONE",
            PrefixLevel::Minimal => "MINIMAL",
            PrefixLevel::Production => "PRODUCTION",
            PrefixLevel::Debug => "DEBUG",
            PrefixLevel::Full => "FULL",
        }
    }

    /// Convert a raw integer, clamping to `[None, Full]`
    pub fn from_int(value: i64) -> Self {
        let clamped = value.clamp(PrefixLevel::None as i64, PrefixLevel::Full as i64);
        PrefixLevel::ALL[clamped as usize]
    }
}

impl fmt::Display for PrefixLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for PrefixLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NONE" => Ok(PrefixLevel::None),
            "MINIMAL" => Ok(PrefixLevel::Minimal),
            "PRODUCTION" => Ok(PrefixLevel::Production),
            "DEBUG" => Ok(PrefixLevel::Debug),
            "FULL" => Ok(PrefixLevel::Full),
            _ => Err(format!("Invalid prefix level: '{}'", s)),
        }
    }
}

impl TryFrom<i64> for PrefixLevel {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (PrefixLevel::None as i64..=PrefixLevel::Full as i64).contains(&value) {
            Ok(PrefixLevel::from_int(value))
        } else {
            Err(format!("Prefix level out of range [0, 4]: {}", value))
        }
    }
}
