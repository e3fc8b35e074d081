//! Logging macros that capture the call site.
//!
//! Every macro records `file!()` (directory stripped) and `line!()` of the
//! statement it expands in.
//!
//! # Examples
//!
//! ```
//! use prefix_logger::prelude::*;
//! use prefix_logger::{info, log_printf, log_stream, warning};
//!
//! let logger = Logger::with_sink(MemorySink::new());
//!
//! // format!-style, checked at compile time
//! info!(logger, "Server listening on port {}", 8080);
//! warning!(logger, "Retry attempt {} of {}", 3, 5);
//!
//! // printf-style, checked at run time
//! log_printf!(logger, LogLevel::Info, "%s style calls: %d", "printf()", 42).unwrap();
//!
//! // streaming
//! (log_stream!(logger, LogLevel::Debug) << "value: " << 10).endl().unwrap();
//! ```

/// Source file name of the expansion site, without directories.
#[macro_export]
macro_rules! file_name {
    () => {
        $crate::core::string_utils::file_name(file!())
    };
}

/// Log a message with automatic formatting.
///
/// Sink failures are reported on stderr.
///
/// # Examples
///
/// ```
/// # use prefix_logger::prelude::*;
/// # let logger = Logger::with_sink(MemorySink::new());
/// use prefix_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger
            .record_at($level, $crate::file_name!(), line!())
            .log(format_args!($($arg)+))
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log an alert-level message.
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Alert, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Alias of [`warning!`].
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a printf-style template; evaluates to a [`Result`](crate::Result)
/// carrying any formatting error.
///
/// # Examples
///
/// ```
/// # use prefix_logger::prelude::*;
/// # let logger = Logger::with_sink(MemorySink::new());
/// use prefix_logger::log_printf;
/// let data = [1u8, 2, 3];
/// log_printf!(logger, LogLevel::Info, "buffer at %p holds %u bytes", data.as_ptr(), data.len())
///     .unwrap();
/// assert!(log_printf!(logger, LogLevel::Info, "%d", "not a number").is_err());
/// ```
#[macro_export]
macro_rules! log_printf {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger
            .record_at($level, $crate::file_name!(), line!())
            .printf($template, &[$($crate::core::FormatArg::from($arg)),*])
    };
}

/// Start a streaming statement at the call site.
#[macro_export]
macro_rules! log_stream {
    ($logger:expr, $level:expr) => {
        $logger
            .record_at($level, $crate::file_name!(), line!())
            .stream()
    };
}
