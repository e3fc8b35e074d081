//! Mutable logger settings shared by every log statement.
//!
//! A `LogState` lives inside the logger's mutex; all reads and writes happen
//! with that lock held, so a setter is never observed half-applied.

use super::config::LoggerConfig;
use super::log_level::LogLevel;
use super::prefix::{self, PrefixContext};
use super::prefix_level::PrefixLevel;

#[derive(Debug, Clone)]
pub struct LogState {
    max_log_level: LogLevel,
    prefix_level: PrefixLevel,
    enable_colors: bool,
    propagate_colors_on_user_header: bool,
    clean_line_before_print: bool,
    disable_printf_line_jump: bool,
    user_header: String,
    prefix_format: String,
    time_format: String,
    /// Prefix template with disabled tokens already removed.
    /// Cleared by every setter.
    cached_template: Option<String>,
}

impl LogState {
    pub fn new(config: &LoggerConfig) -> Self {
        Self {
            max_log_level: config.max_log_level,
            prefix_level: config.prefix_level,
            enable_colors: config.enable_colors,
            propagate_colors_on_user_header: config.propagate_colors_on_user_header,
            clean_line_before_print: config.clean_line_before_print,
            disable_printf_line_jump: config.disable_printf_line_jump,
            user_header: config.user_header.clone(),
            prefix_format: config.prefix_format.clone(),
            time_format: config.time_format.clone(),
            cached_template: None,
        }
    }

    pub fn to_config(&self) -> LoggerConfig {
        LoggerConfig {
            max_log_level: self.max_log_level,
            prefix_level: self.prefix_level,
            enable_colors: self.enable_colors,
            propagate_colors_on_user_header: self.propagate_colors_on_user_header,
            clean_line_before_print: self.clean_line_before_print,
            disable_printf_line_jump: self.disable_printf_line_jump,
            user_header: self.user_header.clone(),
            prefix_format: self.prefix_format.clone(),
            time_format: self.time_format.clone(),
        }
    }

    pub fn max_log_level(&self) -> LogLevel {
        self.max_log_level
    }

    pub fn prefix_level(&self) -> PrefixLevel {
        self.prefix_level
    }

    pub fn enable_colors(&self) -> bool {
        self.enable_colors
    }

    pub fn propagate_colors_on_user_header(&self) -> bool {
        self.propagate_colors_on_user_header
    }

    pub fn clean_line_before_print(&self) -> bool {
        self.clean_line_before_print
    }

    pub fn disable_printf_line_jump(&self) -> bool {
        self.disable_printf_line_jump
    }

    pub fn user_header(&self) -> &str {
        &self.user_header
    }

    pub fn prefix_format(&self) -> &str {
        &self.prefix_format
    }

    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    /// Whether a record at `level` passes the filter
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.is_enabled_for(self.max_log_level)
    }

    pub fn set_max_log_level(&mut self, level: LogLevel) {
        self.max_log_level = level;
        self.invalidate();
    }

    /// Raw integer variant; values outside `[0, 6]` are clamped
    pub fn set_max_log_level_int(&mut self, level: i64) {
        self.set_max_log_level(LogLevel::from_int(level));
    }

    pub fn set_prefix_level(&mut self, level: PrefixLevel) {
        self.prefix_level = level;
        self.invalidate();
    }

    pub fn set_enable_colors(&mut self, enable: bool) {
        self.enable_colors = enable;
        self.invalidate();
    }

    pub fn set_propagate_colors_on_user_header(&mut self, propagate: bool) {
        self.propagate_colors_on_user_header = propagate;
        self.invalidate();
    }

    pub fn set_clean_line_before_print(&mut self, clean: bool) {
        self.clean_line_before_print = clean;
        self.invalidate();
    }

    pub fn set_disable_printf_line_jump(&mut self, disable: bool) {
        self.disable_printf_line_jump = disable;
        self.invalidate();
    }

    pub fn set_user_header(&mut self, header: impl Into<String>) {
        self.user_header = header.into();
        self.invalidate();
    }

    pub fn set_prefix_format(&mut self, format: impl Into<String>) {
        self.prefix_format = format.into();
        self.invalidate();
    }

    pub fn set_time_format(&mut self, format: impl Into<String>) {
        self.time_format = format.into();
        self.invalidate();
    }

    pub fn apply_config(&mut self, config: &LoggerConfig) {
        *self = Self::new(config);
    }

    /// Render the prefix for one record, reusing the cached template.
    pub fn render_prefix(&mut self, ctx: &PrefixContext<'_>) -> String {
        if self.prefix_level == PrefixLevel::None {
            return prefix::header_only(self, ctx.level);
        }
        if self.cached_template.is_none() {
            self.cached_template = Some(prefix::static_template(self));
        }
        let template = self.cached_template.as_deref().unwrap_or_default();
        prefix::render_template(template, self, ctx)
    }

    pub fn has_cached_template(&self) -> bool {
        self.cached_template.is_some()
    }

    fn invalidate(&mut self) {
        self.cached_template = None;
    }
}

impl Default for LogState {
    fn default() -> Self {
        Self::new(&LoggerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_round_trip() {
        let config = LoggerConfig {
            max_log_level: LogLevel::Alert,
            user_header: "[unit]".to_string(),
            ..Default::default()
        };
        let state = LogState::new(&config);
        assert_eq!(state.to_config(), config);
    }

    #[test]
    fn test_int_setter_clamps() {
        let mut state = LogState::default();
        state.set_max_log_level_int(4);
        assert_eq!(state.max_log_level(), LogLevel::Info);
        state.set_max_log_level_int(100);
        assert_eq!(state.max_log_level(), LogLevel::Trace);
        state.set_max_log_level_int(-5);
        assert_eq!(state.max_log_level(), LogLevel::Fatal);
    }

    #[test]
    fn test_setters_invalidate_cached_template() {
        let mut state = LogState::default();
        let ctx = PrefixContext::new(LogLevel::Info, "main.rs", 1, "ThreadId(1)");

        state.render_prefix(&ctx);
        assert!(state.has_cached_template());

        state.set_enable_colors(false);
        assert!(!state.has_cached_template());

        state.render_prefix(&ctx);
        state.set_user_header("[x]");
        assert!(!state.has_cached_template());

        state.render_prefix(&ctx);
        state.set_max_log_level(LogLevel::Debug);
        assert!(!state.has_cached_template());
    }

    #[test]
    fn test_render_prefix_follows_prefix_format_changes() {
        let mut state = LogState::default();
        state.set_enable_colors(false);
        state.set_prefix_level(PrefixLevel::Minimal);
        let ctx = PrefixContext::new(LogLevel::Warning, "main.rs", 1, "ThreadId(1)");

        assert_eq!(state.render_prefix(&ctx), "WARNING");
        state.set_prefix_format("<{SEVERITY}>");
        assert_eq!(state.render_prefix(&ctx), "<WARNING>");
    }

    #[test]
    fn test_filter() {
        let mut state = LogState::default();
        state.set_max_log_level(LogLevel::Info);
        assert!(state.is_enabled(LogLevel::Warning));
        assert!(state.is_enabled(LogLevel::Info));
        assert!(!state.is_enabled(LogLevel::Debug));
    }
}
