//! Console sink implementation

use super::Sink;
use std::io::{self, IsTerminal, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleTarget {
    #[default]
    Stdout,
    Stderr,
}

/// Writes to the process's standard output or standard error
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    target: ConsoleTarget,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::stdout()
    }

    pub fn stdout() -> Self {
        Self {
            target: ConsoleTarget::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            target: ConsoleTarget::Stderr,
        }
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }
}

impl Write for ConsoleSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.target {
            ConsoleTarget::Stdout => io::stdout().lock().write(buf),
            ConsoleTarget::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.target {
            ConsoleTarget::Stdout => io::stdout().flush(),
            ConsoleTarget::Stderr => io::stderr().flush(),
        }
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        match self.target {
            ConsoleTarget::Stdout => "stdout",
            ConsoleTarget::Stderr => "stderr",
        }
    }

    fn is_terminal(&self) -> bool {
        match self.target {
            ConsoleTarget::Stdout => io::stdout().is_terminal(),
            ConsoleTarget::Stderr => io::stderr().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets() {
        assert_eq!(ConsoleSink::new().target(), ConsoleTarget::Stdout);
        assert_eq!(ConsoleSink::stderr().name(), "stderr");
        assert_eq!(ConsoleSink::stdout().name(), "stdout");
    }

    #[test]
    fn test_write_and_flush() {
        let mut sink = ConsoleSink::stderr();
        assert_eq!(sink.write(b"").unwrap(), 0);
        sink.flush().unwrap();
    }
}
