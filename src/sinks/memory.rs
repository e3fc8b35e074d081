//! In-memory sink

use super::Sink;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Captures output in a shared buffer.
///
/// Clones share the same buffer, so one clone can be handed to a
/// [`Logger`](crate::Logger) while another reads what was written.
///
/// # Examples
///
/// ```
/// use prefix_logger::{Logger, LoggerConfig, MemorySink, PrefixLevel};
///
/// let sink = MemorySink::new();
/// let config = LoggerConfig {
///     prefix_level: PrefixLevel::Minimal,
///     enable_colors: false,
///     ..Default::default()
/// };
/// let logger = Logger::with_config(config, sink.clone());
///
/// logger.info("ready");
/// assert_eq!(sink.contents(), "INFO ready\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Sink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }
}
