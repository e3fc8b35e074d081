//! Prefix rendering.
//!
//! A prefix format is a template holding any of the tokens `{TIME}`,
//! `{USER_HEADER}`, `{SEVERITY}`, `{FILELINE}` and `{THREAD}`. Tokens the
//! current [`PrefixLevel`] does not allow are removed together with one
//! adjacent space; the remaining tokens are substituted per record.

use super::config::DEFAULT_TIME_FORMAT;
use super::log_level::LogLevel;
use super::prefix_level::PrefixLevel;
use super::state::LogState;
use super::string_utils::{remove_repeated_characters, strip_ansi};
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt::Write;

pub const TOKEN_TIME: &str = "{TIME}";
pub const TOKEN_USER_HEADER: &str = "{USER_HEADER}";
pub const TOKEN_SEVERITY: &str = "{SEVERITY}";
pub const TOKEN_FILELINE: &str = "{FILELINE}";
pub const TOKEN_THREAD: &str = "{THREAD}";

pub const TOKENS: [&str; 5] = [
    TOKEN_TIME,
    TOKEN_USER_HEADER,
    TOKEN_SEVERITY,
    TOKEN_FILELINE,
    TOKEN_THREAD,
];

thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Textual id of the calling thread, cached per thread
pub fn current_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

/// Per-record values substituted into the prefix
#[derive(Debug, Clone)]
pub struct PrefixContext<'a> {
    pub level: LogLevel,
    pub file: &'a str,
    pub line: u32,
    pub thread: Cow<'a, str>,
    pub time: DateTime<Local>,
}

impl<'a> PrefixContext<'a> {
    pub fn new(level: LogLevel, file: &'a str, line: u32, thread: impl Into<Cow<'a, str>>) -> Self {
        Self {
            level,
            file,
            line,
            thread: thread.into(),
            time: Local::now(),
        }
    }

    /// Context for a record emitted now from the calling thread
    pub fn capture(level: LogLevel, file: &'a str, line: u32) -> Self {
        Self::new(level, file, line, current_thread_id())
    }

    #[must_use]
    pub fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }
}

fn token_enabled(token: &str, state: &LogState) -> bool {
    let level = state.prefix_level();
    match token {
        TOKEN_TIME => level >= PrefixLevel::Production,
        TOKEN_USER_HEADER => level >= PrefixLevel::Minimal && !state.user_header().is_empty(),
        TOKEN_SEVERITY => level >= PrefixLevel::Minimal,
        TOKEN_FILELINE => level >= PrefixLevel::Debug,
        TOKEN_THREAD => level >= PrefixLevel::Full,
        _ => false,
    }
}

fn has_known_token(template: &str) -> bool {
    TOKENS.iter().any(|token| template.contains(token))
}

/// The part of the prefix that only depends on the settings: the format
/// with disabled tokens and their separators removed.
///
/// A format without any recognized token is returned verbatim.
pub fn static_template(state: &LogState) -> String {
    let format = state.prefix_format();
    if !has_known_token(format) {
        return format.to_string();
    }

    // Disabled tokens drop one adjacent space, preferring the following one
    let mut template = String::with_capacity(format.len());
    let mut rest = format;
    while let Some(c) = rest.chars().next() {
        let disabled = TOKENS
            .iter()
            .find(|token| rest.starts_with(**token) && !token_enabled(token, state));
        match disabled {
            Some(token) => {
                rest = &rest[token.len()..];
                if let Some(after) = rest.strip_prefix(' ') {
                    rest = after;
                } else if template.ends_with(' ') {
                    template.pop();
                }
            }
            None => {
                template.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    remove_repeated_characters(&template, " ")
}

/// Severity tag for `level`, painted when `colored` is set
pub fn severity_tag(level: LogLevel, colored: bool) -> String {
    if colored {
        level.paint(level.to_str())
    } else {
        level.to_str().to_string()
    }
}

fn header_segment(state: &LogState, level: LogLevel) -> String {
    let header = state.user_header();
    if !state.propagate_colors_on_user_header() {
        strip_ansi(header)
    } else if state.enable_colors() {
        level.paint(header)
    } else {
        header.to_string()
    }
}

fn format_time(time: &DateTime<Local>, time_format: &str) -> String {
    let mut rendered = String::new();
    if write!(rendered, "{}", time.format(time_format)).is_err() {
        // invalid strftime pattern
        rendered.clear();
        let _ = write!(rendered, "{}", time.format(DEFAULT_TIME_FORMAT));
    }
    rendered
}

fn finish(rendered: String, state: &LogState) -> String {
    if state.enable_colors() {
        rendered
    } else {
        strip_ansi(&rendered)
    }
}

/// Prefix used at [`PrefixLevel::None`]: the user header alone
pub fn header_only(state: &LogState, level: LogLevel) -> String {
    finish(header_segment(state, level), state)
}

/// Substitute the per-record tokens of a template built by [`static_template`].
///
/// The template is scanned once, so substituted values are never
/// re-interpreted as tokens.
pub fn render_template(template: &str, state: &LogState, ctx: &PrefixContext<'_>) -> String {
    let mut rendered = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        rest = &rest[open..];

        let token = TOKENS.iter().find(|token| rest.starts_with(**token));
        match token {
            Some(&TOKEN_TIME) => {
                rendered.push_str(&format_time(&ctx.time, state.time_format()));
            }
            Some(&TOKEN_USER_HEADER) => {
                rendered.push_str(&header_segment(state, ctx.level));
            }
            Some(&TOKEN_SEVERITY) => {
                rendered.push_str(&severity_tag(ctx.level, state.enable_colors()));
            }
            Some(&TOKEN_FILELINE) => {
                let _ = write!(rendered, "{}:{}", ctx.file, ctx.line);
            }
            Some(&TOKEN_THREAD) => {
                rendered.push_str(&ctx.thread);
            }
            _ => {
                rendered.push('{');
                rest = &rest[1..];
                continue;
            }
        }
        rest = &rest[token.map_or(1, |t| t.len())..];
    }
    rendered.push_str(rest);

    finish(rendered, state)
}

/// Build the full prefix for one record without touching any cache.
pub fn build_prefix(state: &LogState, ctx: &PrefixContext<'_>) -> String {
    if state.prefix_level() == PrefixLevel::None {
        return header_only(state, ctx.level);
    }
    render_template(&static_template(state), state, ctx)
}
