//! Per-statement log records.
//!
//! A [`LogRecord`] is created for every log statement with its level and
//! call site. It is either filtered out (nothing is written) or emitted
//! through one of two payload protocols:
//!
//! - templated: [`LogRecord::emit`] with `format_args!`, or
//!   [`LogRecord::printf`] with a runtime printf-style template;
//! - streaming: [`LogRecord::stream`] returns a [`LogStream`] that collects
//!   appended values and writes them, after a single prefix, when it is
//!   ended or dropped.

use super::error::Result;
use super::log_level::LogLevel;
use super::logger::{report_error, Logger};
use super::printf::{format_string, FormatArg};
use std::fmt::{self, Write as _};
use std::ops::Shl;

#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    logger: &'a Logger,
    level: LogLevel,
    file: &'a str,
    line: u32,
    line_jump: Option<bool>,
}

impl<'a> LogRecord<'a> {
    pub fn new(logger: &'a Logger, level: LogLevel, file: &'a str, line: u32) -> Self {
        Self {
            logger,
            level,
            file,
            line,
            line_jump: None,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn file(&self) -> &str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Whether the logger's current maximum level lets this record through
    pub fn is_enabled(&self) -> bool {
        self.logger.is_enabled(self.level)
    }

    /// Do not append the trailing newline, whatever the logger is configured to do
    #[must_use]
    pub fn without_line_jump(mut self) -> Self {
        self.line_jump = Some(false);
        self
    }

    /// Always append the trailing newline
    #[must_use]
    pub fn with_line_jump(mut self) -> Self {
        self.line_jump = Some(true);
        self
    }

    /// Emit a message built with `format_args!`.
    ///
    /// Filtered-out records return `Ok(())` without formatting anything.
    pub fn emit(self, args: fmt::Arguments<'_>) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        let payload = match args.as_str() {
            Some(literal) => literal.to_string(),
            None => args.to_string(),
        };
        self.logger
            .emit(self.level, self.file, self.line, &payload, self.line_jump)
    }

    /// Like [`emit`](Self::emit), but reports sink failures on stderr
    /// instead of returning them.
    pub fn log(self, args: fmt::Arguments<'_>) {
        report_error(self.emit(args));
    }

    /// Emit a message rendered from a printf-style template.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::FormatError`](super::LoggerError::FormatError)
    /// when the arguments do not match the template's specifiers; nothing is
    /// written in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_logger::{Logger, LogLevel, MemorySink, PrefixLevel};
    ///
    /// let sink = MemorySink::new();
    /// let logger = Logger::builder()
    ///     .prefix_level(PrefixLevel::None)
    ///     .sink(sink.clone())
    ///     .build();
    ///
    /// logger
    ///     .record(LogLevel::Info)
    ///     .printf("%s took %.1f ms", &["query".into(), 12.5.into()])
    ///     .unwrap();
    /// assert_eq!(sink.contents(), "query took 12.5 ms\n");
    ///
    /// assert!(logger.record(LogLevel::Info).printf("%d", &[]).is_err());
    /// ```
    pub fn printf(self, template: &str, args: &[FormatArg<'_>]) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        let payload = format_string(template, args)?;
        self.logger
            .emit(self.level, self.file, self.line, &payload, self.line_jump)
    }

    /// Start a streaming statement
    pub fn stream(self) -> LogStream<'a> {
        let enabled = self.is_enabled();
        LogStream {
            record: self,
            enabled,
            buffer: String::new(),
            started: false,
            finished: false,
        }
    }

    /// Move to the start of a fresh line without printing a prefix
    pub fn quiet_line_jump(&self) -> Result<()> {
        self.logger.quiet_line_jump()
    }
}

/// Streaming statement returned by [`LogRecord::stream`].
///
/// Values are appended with [`append`](Self::append) or `<<` and written,
/// behind exactly one prefix, by [`endl`](Self::endl) (which terminates the
/// line) or [`end`](Self::end) / drop (which leave the line open).
///
/// # Examples
///
/// ```
/// use prefix_logger::{Logger, LogLevel, MemorySink, PrefixLevel};
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder()
///     .prefix_level(PrefixLevel::Minimal)
///     .enable_colors(false)
///     .sink(sink.clone())
///     .build();
///
/// (logger.record(LogLevel::Warning).stream() << 3 << " retries left, ok=" << true)
///     .endl()
///     .unwrap();
/// assert_eq!(sink.contents(), "WARNING 3 retries left, ok=true\n");
/// ```
#[must_use = "a stream writes nothing until it is ended or dropped"]
pub struct LogStream<'a> {
    record: LogRecord<'a>,
    enabled: bool,
    buffer: String,
    started: bool,
    finished: bool,
}

impl LogStream<'_> {
    /// Append the `Display` representation of `value`
    pub fn append<T: fmt::Display>(mut self, value: T) -> Self {
        self.started = true;
        if self.enabled {
            let _ = write!(self.buffer, "{}", value);
        }
        self
    }

    /// Append the address of `pointer`
    pub fn pointer<T: ?Sized>(mut self, pointer: *const T) -> Self {
        self.started = true;
        if self.enabled {
            let _ = write!(self.buffer, "{:p}", pointer);
        }
        self
    }

    /// Text collected so far
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Write the statement and terminate the line
    pub fn endl(mut self) -> Result<()> {
        self.flush(true)
    }

    /// Write the statement and leave the line open
    pub fn end(mut self) -> Result<()> {
        self.flush(false)
    }

    fn flush(&mut self, line_jump: bool) -> Result<()> {
        self.finished = true;
        if !self.enabled {
            return Ok(());
        }
        let record = &self.record;
        record.logger.emit(
            record.level,
            record.file,
            record.line,
            &self.buffer,
            Some(line_jump),
        )
    }
}

impl<T: fmt::Display> Shl<T> for LogStream<'_> {
    type Output = Self;

    fn shl(self, value: T) -> Self::Output {
        self.append(value)
    }
}

impl Drop for LogStream<'_> {
    fn drop(&mut self) {
        if !self.finished && self.started {
            report_error(self.flush(false));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LoggerError, PrefixLevel};
    use crate::sinks::MemorySink;

    fn plain_logger() -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .prefix_level(PrefixLevel::Minimal)
            .enable_colors(false)
            .sink(sink.clone())
            .build();
        (logger, sink)
    }

    #[test]
    fn test_emit() {
        let (logger, sink) = plain_logger();
        logger
            .record_at(LogLevel::Info, "main.rs", 1)
            .emit(format_args!("{} + {} = {}", 1, 2, 3))
            .unwrap();
        assert_eq!(sink.contents(), "INFO 1 + 2 = 3\n");
    }

    #[test]
    fn test_filtered_record_writes_nothing() {
        let (logger, sink) = plain_logger();
        logger.set_max_log_level(LogLevel::Warning);

        let record = logger.record(LogLevel::Debug);
        assert!(!record.is_enabled());
        record.emit(format_args!("hidden")).unwrap();

        // Filtered records do not even validate their template
        logger.record(LogLevel::Trace).printf("%d", &[]).unwrap();

        (logger.record(LogLevel::Info).stream() << "hidden").endl().unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_printf() {
        let (logger, sink) = plain_logger();
        logger
            .record(LogLevel::Error)
            .printf("code=%d msg=%s", &[500.into(), "boom".into()])
            .unwrap();
        assert_eq!(sink.contents(), "ERROR code=500 msg=boom\n");
    }

    #[test]
    fn test_printf_error_writes_nothing() {
        let (logger, sink) = plain_logger();
        let err = logger
            .record(LogLevel::Info)
            .printf("%s and %s", &["one".into()])
            .unwrap_err();
        assert!(matches!(err, LoggerError::FormatError { .. }));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_without_line_jump() {
        let (logger, sink) = plain_logger();
        logger
            .record(LogLevel::Info)
            .without_line_jump()
            .emit(format_args!("loading"))
            .unwrap();
        assert_eq!(sink.contents(), "INFO loading");

        logger.set_disable_printf_line_jump(true);
        logger
            .record(LogLevel::Info)
            .with_line_jump()
            .emit(format_args!("done"))
            .unwrap();
        assert_eq!(sink.contents(), "INFO loading\nINFO done\n");
    }

    #[test]
    fn test_stream_prefix_written_once() {
        let (logger, sink) = plain_logger();
        let stream = logger.record(LogLevel::Alert).stream();
        let stream = stream.append("a").append(1).append(2.5).append('c').append(false);
        assert_eq!(stream.buffered(), "a12.5cfalse");
        stream.endl().unwrap();

        assert_eq!(sink.contents(), "ALERT a12.5cfalse\n");
    }

    #[test]
    fn test_stream_pointer() {
        let (logger, sink) = plain_logger();
        let value = 5_i32;
        let address = format!("{:p}", &value as *const i32);
        logger
            .record(LogLevel::Info)
            .stream()
            .append("at ")
            .pointer(&value as *const i32)
            .endl()
            .unwrap();
        assert_eq!(sink.contents(), format!("INFO at {}\n", address));
    }

    #[test]
    fn test_stream_flushes_on_drop_without_newline() {
        let (logger, sink) = plain_logger();
        {
            let _stream = logger.record(LogLevel::Info).stream() << "no endl";
        }
        assert_eq!(sink.contents(), "INFO no endl");

        (logger.record(LogLevel::Info).stream() << "next").endl().unwrap();
        assert_eq!(sink.contents(), "INFO no endl\nINFO next\n");
    }

    #[test]
    fn test_untouched_stream_writes_nothing() {
        let (logger, sink) = plain_logger();
        drop(logger.record(LogLevel::Info).stream());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_endl_on_empty_stream_writes_prefix_line() {
        let (logger, sink) = plain_logger();
        logger.record(LogLevel::Info).stream().endl().unwrap();
        assert_eq!(sink.contents(), "INFO\n");
    }

    #[test]
    fn test_record_quiet_line_jump() {
        let (logger, sink) = plain_logger();
        (logger.record(LogLevel::Info).stream() << "open").end().unwrap();
        logger.record(LogLevel::Info).quiet_line_jump().unwrap();
        assert_eq!(sink.contents(), "INFO open\n");
    }
}
