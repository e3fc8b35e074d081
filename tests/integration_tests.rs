//! Integration tests for prefix_logger
//!
//! These tests verify:
//! - Prefix composition at every verbosity tier
//! - Color handling of severity tags and user headers
//! - Line tracking across partial lines and streams
//! - Configuration from environment lookups and JSON
//! - File output

use prefix_logger::prelude::*;
use prefix_logger::{alert, debug, error, fatal, info, log_printf, log_stream, trace, warning};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn memory_logger(prefix_level: PrefixLevel) -> (Logger, MemorySink) {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .prefix_level(prefix_level)
        .enable_colors(false)
        .sink(sink.clone())
        .build();
    (logger, sink)
}

#[test]
fn test_minimal_prefix_for_every_level() {
    let (logger, sink) = memory_logger(PrefixLevel::Minimal);

    fatal!(logger, "-> Is a FATAL");
    error!(logger, "-> Is an ERROR");
    alert!(logger, "-> Is an ALERT");
    warning!(logger, "-> Is a WARNING");
    info!(logger, "-> Is an INFO");
    debug!(logger, "-> Is a DEBUG");
    trace!(logger, "-> Is a TRACE");

    assert_eq!(
        sink.contents(),
        "FATAL -> Is a FATAL\n\
         ERROR -> Is an ERROR\n\
         ALERT -> Is an ALERT\n\
         WARNING -> Is a WARNING\n\
         INFO -> Is an INFO\n\
         DEBUG -> Is a DEBUG\n\
         TRACE -> Is a TRACE\n"
    );
}

#[test]
fn test_max_level_filters_less_severe_records() {
    let (logger, sink) = memory_logger(PrefixLevel::Minimal);
    logger.set_max_log_level(LogLevel::Info);

    warning!(logger, "-> You can see me");
    info!(logger, "-> You can see me too");
    debug!(logger, "-> You cannot see me");
    trace!(logger, "-> You cannot see me either");

    assert_eq!(
        sink.contents(),
        "WARNING -> You can see me\nINFO -> You can see me too\n"
    );

    logger.set_max_log_level(LogLevel::Fatal);
    error!(logger, "hidden");
    fatal!(logger, "still shown");
    assert!(sink.contents().ends_with("FATAL still shown\n"));
}

#[test]
fn test_debug_prefix_shows_call_site() {
    let (logger, sink) = memory_logger(PrefixLevel::Debug);
    logger.set_prefix_format("{SEVERITY} {FILELINE}");

    let line = line!() + 1;
    info!(logger, "located");

    assert_eq!(
        sink.contents(),
        format!("INFO integration_tests.rs:{} located\n", line)
    );
}

#[test]
fn test_full_prefix_shows_thread() {
    let (logger, sink) = memory_logger(PrefixLevel::Full);
    logger.set_prefix_format("{SEVERITY} {THREAD}");

    info!(logger, "threaded");

    let expected = format!("INFO {:?} threaded\n", std::thread::current().id());
    assert_eq!(sink.contents(), expected);
}

#[test]
fn test_disabled_tokens_leave_no_double_spaces() {
    let (logger, sink) = memory_logger(PrefixLevel::Minimal);
    logger.set_prefix_format("[{TIME} {SEVERITY} {FILELINE}]");

    warning!(logger, "tight");

    assert_eq!(sink.contents(), "[WARNING] tight\n");
}

#[test]
fn test_user_header_position_follows_format() {
    let (logger, sink) = memory_logger(PrefixLevel::Minimal);
    logger.set_user_header("[svc]");
    logger.set_prefix_format("{SEVERITY} {USER_HEADER}");

    info!(logger, "header last");

    assert_eq!(sink.contents(), "INFO [svc] header last\n");
}

#[test]
fn test_prefix_level_none_prints_only_header() {
    let (logger, sink) = memory_logger(PrefixLevel::None);
    info!(logger, "bare");
    logger.set_user_header("[hdr]");
    error!(logger, "with header");

    assert_eq!(sink.contents(), "bare\n[hdr] with header\n");
}

#[test]
fn test_format_without_tokens_is_used_verbatim() {
    let (logger, sink) = memory_logger(PrefixLevel::Full);
    logger.set_prefix_format(">>");

    info!(logger, "arrow");

    assert_eq!(sink.contents(), ">> arrow\n");
}

#[test]
fn test_colored_severity_tag() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .prefix_level(PrefixLevel::Minimal)
        .sink(sink.clone())
        .build();

    error!(logger, "red");
    fatal!(logger, "red background");

    let contents = sink.contents();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], format!("{} red", LogLevel::Error.paint("ERROR")));
    assert_eq!(
        lines[1],
        format!("{} red background", LogLevel::Fatal.paint("FATAL"))
    );
    assert!(lines[1].starts_with("\x1b[1;"));
}

#[test]
fn test_user_header_colors() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .prefix_level(PrefixLevel::Minimal)
        .prefix_format("{USER_HEADER}")
        .user_header("\x1b[34m[blue]\x1b[0m")
        .sink(sink.clone())
        .build();

    // Escapes in the header are stripped unless propagation is on
    info!(logger, "plain");
    assert_eq!(sink.contents(), "[blue] plain\n");
    sink.clear();

    logger.set_propagate_colors_on_user_header(true);
    logger.set_user_header("[svc]");
    warning!(logger, "painted");
    assert_eq!(
        sink.contents(),
        format!("{} painted\n", LogLevel::Warning.paint("[svc]"))
    );
    sink.clear();

    logger.set_enable_colors(false);
    warning!(logger, "uncolored");
    assert_eq!(sink.contents(), "[svc] uncolored\n");
}

#[test]
fn test_partial_lines_are_pushed_down() {
    let (logger, sink) = memory_logger(PrefixLevel::Minimal);

    (log_stream!(logger, LogLevel::Info) << "downloading").end().unwrap();
    (log_stream!(logger, LogLevel::Info) << "resuming").end().unwrap();
    error!(logger, "network lost");

    assert_eq!(
        sink.contents(),
        "INFO downloading\nINFO resuming\nERROR network lost\n"
    );
    assert_eq!(logger.last_char(), Some(b'\n'));
}

#[test]
fn test_stream_mixed_values() {
    let (logger, sink) = memory_logger(PrefixLevel::Minimal);

    (log_stream!(logger, LogLevel::Debug) << "id=" << 7 << " ratio=" << 0.5 << " ok=" << true)
        .endl()
        .unwrap();

    assert_eq!(sink.contents(), "DEBUG id=7 ratio=0.5 ok=true\n");
}

#[test]
fn test_printf_templates() {
    let (logger, sink) = memory_logger(PrefixLevel::Minimal);

    log_printf!(logger, LogLevel::Info, "%-6s|%4d|%x|%c", "left", 42, 255, 'z').unwrap();
    log_printf!(logger, LogLevel::Info, "100%% done").unwrap();

    assert_eq!(sink.contents(), "INFO left  |  42|ff|z\nINFO 100% done\n");
}

#[test]
fn test_printf_mismatch_is_an_error() {
    let (logger, sink) = memory_logger(PrefixLevel::Minimal);

    let err = log_printf!(logger, LogLevel::Info, "%d items", "many").unwrap_err();
    assert!(matches!(err, LoggerError::FormatError { .. }));
    assert!(sink.is_empty());
}

#[test]
fn test_disable_printf_line_jump() {
    let (logger, sink) = memory_logger(PrefixLevel::Minimal);
    logger.set_disable_printf_line_jump(true);

    log_printf!(logger, LogLevel::Info, "step %d", 1).unwrap();
    log_printf!(logger, LogLevel::Info, "step %d\n", 2).unwrap();
    info!(logger, "step 3");
    logger.quiet_line_jump().unwrap();

    assert_eq!(sink.contents(), "INFO step 1\nINFO step 2\nINFO step 3\n");
}

#[test]
fn test_multiline_payload() {
    let (logger, sink) = memory_logger(PrefixLevel::Minimal);
    warning!(logger, "first\nsecond");

    assert_eq!(sink.contents(), "WARNING first\nWARNING second\n");
}

#[test]
fn test_time_token_uses_time_format() {
    let (logger, sink) = memory_logger(PrefixLevel::Production);
    logger.set_prefix_format("{TIME}|{SEVERITY}");
    logger.set_time_format("static");

    info!(logger, "clock");

    assert_eq!(sink.contents(), "static|INFO clock\n");
}

#[test]
fn test_config_from_env_lookup() {
    let vars: HashMap<&str, &str> = [
        ("LOGGER_MAX_LOG_LEVEL_PRINTED", "3"),
        ("LOGGER_PREFIX_LEVEL", "1"),
        ("LOGGER_ENABLE_COLORS", "0"),
        ("LOGGER_USER_HEADER", "[env]"),
    ]
    .into_iter()
    .collect();

    let config =
        LoggerConfig::from_env_with(|key| vars.get(key).map(|value| value.to_string())).unwrap();
    assert_eq!(config.max_log_level, LogLevel::Warning);
    assert_eq!(config.prefix_level, PrefixLevel::Minimal);
    assert!(!config.enable_colors);

    let sink = MemorySink::new();
    let logger = Logger::with_config(config, sink.clone());
    info!(logger, "filtered");
    warning!(logger, "kept");

    assert_eq!(sink.contents(), "[env] WARNING kept\n");
}

#[test]
fn test_config_from_json() {
    let config = LoggerConfig::from_json_str(
        r#"{ "max_log_level": "DEBUG", "prefix_level": "MINIMAL", "enable_colors": false }"#,
    )
    .unwrap();
    assert_eq!(config.max_log_level, LogLevel::Debug);
    assert_eq!(config.prefix_level, PrefixLevel::Minimal);
    assert_eq!(config.prefix_format, prefix_logger::core::DEFAULT_PREFIX_FORMAT);

    let json = config.to_json_string().unwrap();
    assert_eq!(LoggerConfig::from_json_str(&json).unwrap(), config);
}

#[test]
fn test_apply_config_at_runtime() {
    let (logger, sink) = memory_logger(PrefixLevel::Full);
    let config = LoggerConfig {
        prefix_level: PrefixLevel::Minimal,
        enable_colors: false,
        user_header: "[reloaded]".to_string(),
        ..Default::default()
    };
    logger.apply_config(&config);

    alert!(logger, "after reload");
    assert_eq!(sink.contents(), "[reloaded] ALERT after reload\n");
    assert_eq!(logger.config(), config);
}

#[test]
fn test_file_sink_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    {
        let sink = FileSink::new(&log_file).expect("Failed to create sink");
        let logger = Logger::builder()
            .prefix_level(PrefixLevel::Minimal)
            .enable_colors(false)
            .sink(sink)
            .build();

        info!(logger, "written to disk");
        (log_stream!(logger, LogLevel::Error) << "pending").end().unwrap();
        logger.shutdown().expect("Failed to shut down");
    }

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content, "INFO written to disk\nERROR pending\n");
}

#[test]
fn test_file_sink_appends() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("append.log");

    for run in 0..2 {
        let sink = FileSink::new(&log_file).expect("Failed to create sink");
        let logger = Logger::builder()
            .prefix_level(PrefixLevel::None)
            .sink(sink)
            .build();
        info!(logger, "run {}", run);
    }

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content, "run 0\nrun 1\n");
}

#[test]
fn test_file_sink_missing_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = FileSink::new(temp_dir.path().join("missing").join("app.log"));
    assert!(matches!(result, Err(LoggerError::IoOperation { .. })));
}
