//! # Prefix Logger
//!
//! A call-site aware logging front end. Every statement captures its
//! severity, file and line, gets a configurable prefix (clock, user header,
//! severity tag, file:line, thread id), is filtered by level, optionally
//! colored, and is written to a shared sink under a single lock.
//!
//! ## Features
//!
//! - **Prefix templates**: `{TIME} {USER_HEADER} {SEVERITY} {FILELINE} {THREAD}`
//!   tokens, pruned by a [`PrefixLevel`] verbosity tier
//! - **Line tracking**: a new prefix always starts at column 0
//! - **Three call styles**: `format!`-style macros, runtime printf templates
//!   and a `<<` streaming builder
//! - **Thread safe**: statements never interleave their bytes
//!
//! ```
//! use prefix_logger::prelude::*;
//! use prefix_logger::{info, log_stream};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder()
//!     .prefix_level(PrefixLevel::Minimal)
//!     .enable_colors(false)
//!     .sink(sink.clone())
//!     .build();
//!
//! info!(logger, "listening on port {}", 8080);
//! (log_stream!(logger, LogLevel::Debug) << "cache hits: " << 12).endl().unwrap();
//!
//! assert_eq!(sink.contents(), "INFO listening on port 8080\nDEBUG cache hits: 12\n");
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        FormatArg, LogLevel, LogRecord, LogStream, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, PrefixLevel, Result,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, Sink};
}

pub use crate::core::{
    FormatArg, LogLevel, LogRecord, LogStream, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    PrefixLevel, Result,
};
pub use sinks::{ConsoleSink, FileSink, MemorySink, Sink};
