//! Core logger types

pub mod config;
pub mod error;
pub mod last_char;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod prefix;
pub mod prefix_level;
pub mod printf;
pub mod state;
pub mod string_utils;
pub mod terminal;

pub use config::{LoggerConfig, DEFAULT_PREFIX_FORMAT, DEFAULT_TIME_FORMAT};
pub use error::{LoggerError, Result};
pub use last_char::LastCharWriter;
pub use log_level::LogLevel;
pub use log_record::{LogRecord, LogStream};
pub use logger::{Logger, LoggerBuilder};
pub use prefix::{build_prefix, PrefixContext};
pub use prefix_level::PrefixLevel;
pub use printf::{format_string, FormatArg};
pub use state::LogState;
