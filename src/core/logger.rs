//! Main logger implementation

use super::{
    config::LoggerConfig,
    error::{LoggerError, Result},
    last_char::LastCharWriter,
    log_level::LogLevel,
    log_record::LogRecord,
    prefix::PrefixContext,
    prefix_level::PrefixLevel,
    state::LogState,
    string_utils::{file_name, split_string},
    terminal::{clear_line_sequence, terminal_width},
};
use crate::sinks::{ConsoleSink, Sink};
use parking_lot::Mutex;
use std::io::Write;
use std::panic::Location;
use std::sync::Arc;

/// Everything a log statement touches, guarded by one lock
struct LoggerInner {
    state: LogState,
    out: LastCharWriter<Box<dyn Sink>>,
    /// Level and call site of the last record that was emitted
    last_record: Option<(LogLevel, String, u32)>,
}

impl LoggerInner {
    /// Make sure the next byte lands at column 0.
    fn begin_line(&mut self) -> std::io::Result<()> {
        if self.out.at_line_start() {
            return Ok(());
        }
        if self.state.clean_line_before_print() && self.out.get_ref().is_terminal() {
            if let Some(width) = terminal_width() {
                return self.out.write_all(clear_line_sequence(width).as_bytes());
            }
        }
        self.out.write_all(b"\n")
    }

    /// Write `payload` line by line, each line carrying `prefix`.
    fn write_lines(&mut self, prefix: &str, payload: &str) -> std::io::Result<()> {
        let separator = if prefix.is_empty() { "" } else { " " };
        for (idx, line) in split_string(payload, "\n").iter().enumerate() {
            if idx > 0 {
                self.out.write_all(b"\n")?;
            }
            self.out.write_all(prefix.as_bytes())?;
            if !line.is_empty() {
                self.out.write_all(separator.as_bytes())?;
                self.out.write_all(line.as_bytes())?;
            }
        }
        Ok(())
    }

    fn emit(
        &mut self,
        level: LogLevel,
        file: &str,
        line: u32,
        payload: &str,
        line_jump: Option<bool>,
    ) -> Result<()> {
        if !self.state.is_enabled(level) {
            return Ok(());
        }

        // A trailing newline in the payload terminates the line itself
        let (payload, line_jump) = match payload.strip_suffix('\n') {
            Some(stripped) => (stripped, true),
            None => (
                payload,
                line_jump.unwrap_or(!self.state.disable_printf_line_jump()),
            ),
        };

        let ctx = PrefixContext::capture(level, file, line);
        let prefix = self.state.render_prefix(&ctx);

        self.write_record(&prefix, payload, line_jump).map_err(|e| {
            LoggerError::io_operation(
                "writing log record",
                format!("sink '{}' rejected the record", self.out.get_ref().name()),
                e,
            )
        })?;

        self.last_record = Some((level, file.to_string(), line));
        Ok(())
    }

    fn write_record(
        &mut self,
        prefix: &str,
        payload: &str,
        line_jump: bool,
    ) -> std::io::Result<()> {
        self.begin_line()?;
        self.write_lines(prefix, payload)?;
        if line_jump {
            self.out.write_all(b"\n")?;
        }
        self.out.flush()
    }
}

/// Report an emission failure on stderr; used where no caller can receive it
pub(crate) fn report_error(result: Result<()>) {
    if let Err(e) = result {
        eprintln!("[LOGGER ERROR] {}", e);
    }
}

/// Thread-safe handle to a shared logger.
///
/// Clones share the same settings, sink and line tracking. Every setter and
/// every log statement takes the same lock exactly once, so concurrent
/// statements never interleave their bytes.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Mutex<LoggerInner>>,
}

impl Logger {
    /// Logger writing to stdout with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LoggerConfig::default(), ConsoleSink::stdout())
    }

    #[must_use]
    pub fn with_sink(sink: impl Sink + 'static) -> Self {
        Self::with_config(LoggerConfig::default(), sink)
    }

    #[must_use]
    pub fn with_config(config: LoggerConfig, sink: impl Sink + 'static) -> Self {
        Self::from_parts(config, Box::new(sink))
    }

    fn from_parts(config: LoggerConfig, sink: Box<dyn Sink>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LoggerInner {
                state: LogState::new(&config),
                out: LastCharWriter::new(sink),
                last_record: None,
            })),
        }
    }

    /// Create a builder for fluent configuration
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    // ---------------------------------------------------------------------
    // Setters
    // ---------------------------------------------------------------------

    pub fn set_max_log_level(&self, level: LogLevel) {
        self.inner.lock().state.set_max_log_level(level);
    }

    /// Set the maximum level from its raw value; out-of-range values are clamped
    pub fn set_max_log_level_int(&self, level: i64) {
        self.inner.lock().state.set_max_log_level_int(level);
    }

    pub fn set_prefix_level(&self, level: PrefixLevel) {
        self.inner.lock().state.set_prefix_level(level);
    }

    pub fn set_enable_colors(&self, enable: bool) {
        self.inner.lock().state.set_enable_colors(enable);
    }

    pub fn set_propagate_colors_on_user_header(&self, propagate: bool) {
        self.inner
            .lock()
            .state
            .set_propagate_colors_on_user_header(propagate);
    }

    pub fn set_clean_line_before_print(&self, clean: bool) {
        self.inner.lock().state.set_clean_line_before_print(clean);
    }

    pub fn set_disable_printf_line_jump(&self, disable: bool) {
        self.inner.lock().state.set_disable_printf_line_jump(disable);
    }

    pub fn set_user_header(&self, header: impl Into<String>) {
        self.inner.lock().state.set_user_header(header);
    }

    pub fn set_prefix_format(&self, format: impl Into<String>) {
        self.inner.lock().state.set_prefix_format(format);
    }

    pub fn set_time_format(&self, format: impl Into<String>) {
        self.inner.lock().state.set_time_format(format);
    }

    /// Replace every setting at once
    pub fn apply_config(&self, config: &LoggerConfig) {
        self.inner.lock().state.apply_config(config);
    }

    // ---------------------------------------------------------------------
    // Getters
    // ---------------------------------------------------------------------

    pub fn max_log_level(&self) -> LogLevel {
        self.inner.lock().state.max_log_level()
    }

    pub fn max_log_level_int(&self) -> i64 {
        self.max_log_level().as_int()
    }

    pub fn prefix_level(&self) -> PrefixLevel {
        self.inner.lock().state.prefix_level()
    }

    pub fn enable_colors(&self) -> bool {
        self.inner.lock().state.enable_colors()
    }

    pub fn user_header(&self) -> String {
        self.inner.lock().state.user_header().to_string()
    }

    pub fn prefix_format(&self) -> String {
        self.inner.lock().state.prefix_format().to_string()
    }

    /// Snapshot of the current settings
    pub fn config(&self) -> LoggerConfig {
        self.inner.lock().state.to_config()
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.inner.lock().state.is_enabled(level)
    }

    /// Last byte written to the sink, `None` before any output
    pub fn last_char(&self) -> Option<u8> {
        self.inner.lock().out.last_char()
    }

    /// Prefix the last emitted record would get if it were logged now.
    ///
    /// Before the first record this renders an INFO prefix with an empty
    /// call site.
    pub fn prefix_string(&self) -> String {
        let mut inner = self.inner.lock();
        let (level, file, line) = inner
            .last_record
            .clone()
            .unwrap_or((LogLevel::Info, String::new(), 0));
        let ctx = PrefixContext::capture(level, &file, line);
        inner.state.render_prefix(&ctx)
    }

    /// Prefix for an explicit record
    pub fn prefix_string_for(&self, level: LogLevel, file: &str, line: u32) -> String {
        let ctx = PrefixContext::capture(level, file, line);
        self.inner.lock().state.render_prefix(&ctx)
    }

    // ---------------------------------------------------------------------
    // Emission
    // ---------------------------------------------------------------------

    /// Start a record at an explicit call site
    pub fn record_at<'a>(&'a self, level: LogLevel, file: &'a str, line: u32) -> LogRecord<'a> {
        LogRecord::new(self, level, file, line)
    }

    /// Start a record at the caller's location
    #[track_caller]
    pub fn record(&self, level: LogLevel) -> LogRecord<'_> {
        let location = Location::caller();
        LogRecord::new(self, level, file_name(location.file()), location.line())
    }

    /// Emit one complete statement under the lock.
    ///
    /// `line_jump` overrides the configured trailing-newline policy.
    pub fn emit(
        &self,
        level: LogLevel,
        file: &str,
        line: u32,
        payload: &str,
        line_jump: Option<bool>,
    ) -> Result<()> {
        self.inner.lock().emit(level, file, line, payload, line_jump)
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        let location = Location::caller();
        report_error(self.emit(
            level,
            file_name(location.file()),
            location.line(),
            message.as_ref(),
            Some(true),
        ));
    }

    #[track_caller]
    pub fn fatal(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Fatal, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    #[track_caller]
    pub fn alert(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Alert, message);
    }

    #[track_caller]
    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[track_caller]
    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Trace, message);
    }

    /// Move to the start of a fresh line without printing any prefix.
    ///
    /// Does nothing when the output already sits at the start of a line.
    pub fn quiet_line_jump(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.out.at_line_start() {
            return Ok(());
        }
        inner
            .out
            .write_all(b"\n")
            .and_then(|_| inner.out.flush())
            .map_err(|e| LoggerError::io_operation("jumping to a new line", "sink write failed", e))
    }

    pub fn flush(&self) -> Result<()> {
        self.inner.lock().out.flush()?;
        Ok(())
    }

    /// Terminate a pending partial line and flush the sink
    pub fn shutdown(&self) -> Result<()> {
        self.quiet_line_jump()?;
        self.flush()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Logger")
            .field("sink", &inner.out.get_ref().name())
            .field("state", &inner.state)
            .finish()
    }
}

/// Builder for creating a Logger with fluent configuration
///
/// # Example
///
/// ```
/// use prefix_logger::{Logger, LogLevel, MemorySink, PrefixLevel};
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder()
///     .max_log_level(LogLevel::Info)
///     .prefix_level(PrefixLevel::Minimal)
///     .enable_colors(false)
///     .user_header("[demo]")
///     .sink(sink.clone())
///     .build();
///
/// logger.debug("hidden");
/// logger.warning("shown");
/// assert_eq!(sink.contents(), "[demo] WARNING shown\n");
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    sink: Option<Box<dyn Sink>>,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            sink: None,
        }
    }

    /// Start from a complete configuration
    #[must_use]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn max_log_level(mut self, level: LogLevel) -> Self {
        self.config.max_log_level = level;
        self
    }

    #[must_use]
    pub fn prefix_level(mut self, level: PrefixLevel) -> Self {
        self.config.prefix_level = level;
        self
    }

    #[must_use]
    pub fn enable_colors(mut self, enable: bool) -> Self {
        self.config.enable_colors = enable;
        self
    }

    #[must_use]
    pub fn propagate_colors_on_user_header(mut self, propagate: bool) -> Self {
        self.config.propagate_colors_on_user_header = propagate;
        self
    }

    #[must_use]
    pub fn clean_line_before_print(mut self, clean: bool) -> Self {
        self.config.clean_line_before_print = clean;
        self
    }

    #[must_use]
    pub fn disable_printf_line_jump(mut self, disable: bool) -> Self {
        self.config.disable_printf_line_jump = disable;
        self
    }

    #[must_use]
    pub fn user_header(mut self, header: impl Into<String>) -> Self {
        self.config.user_header = header.into();
        self
    }

    #[must_use]
    pub fn prefix_format(mut self, format: impl Into<String>) -> Self {
        self.config.prefix_format = format.into();
        self
    }

    #[must_use]
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.config.time_format = format.into();
        self
    }

    /// Output destination; stdout when not set
    #[must_use]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    #[must_use]
    pub fn build(self) -> Logger {
        let sink = self
            .sink
            .unwrap_or_else(|| Box::new(ConsoleSink::stdout()));
        Logger::from_parts(self.config, sink)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
