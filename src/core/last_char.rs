//! Output wrapper that remembers the last byte it forwarded.

use std::io::{self, Write};

/// Forwards every write to the wrapped sink unbuffered and records the last
/// byte the sink actually accepted.
///
/// The logger consults [`LastCharWriter::at_line_start`] to decide whether a
/// new prefix needs a leading line jump.
#[derive(Debug)]
pub struct LastCharWriter<W: Write> {
    inner: W,
    last_char: Option<u8>,
}

impl<W: Write> LastCharWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            last_char: None,
        }
    }

    /// Last byte forwarded downstream, `None` before the first write
    pub fn last_char(&self) -> Option<u8> {
        self.last_char
    }

    /// True when nothing was written yet or the last byte ended a line
    pub fn at_line_start(&self) -> bool {
        matches!(self.last_char, None | Some(b'\n'))
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for LastCharWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        if written > 0 {
            self.last_char = Some(buf[written - 1]);
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink that accepts at most `limit` bytes per call
    struct Trickle {
        data: Vec<u8>,
        limit: usize,
    }

    impl Write for Trickle {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.limit);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tracks_last_byte() {
        let mut writer = LastCharWriter::new(Vec::new());
        assert_eq!(writer.last_char(), None);
        assert!(writer.at_line_start());

        writer.write_all(b"hello").unwrap();
        assert_eq!(writer.last_char(), Some(b'o'));
        assert!(!writer.at_line_start());

        writer.write_all(b" world\n").unwrap();
        assert!(writer.at_line_start());
        assert_eq!(writer.get_ref().as_slice(), b"hello world\n");
    }

    #[test]
    fn test_empty_write_keeps_state() {
        let mut writer = LastCharWriter::new(Vec::new());
        writer.write_all(b"x").unwrap();
        writer.write_all(b"").unwrap();
        assert_eq!(writer.last_char(), Some(b'x'));
    }

    #[test]
    fn test_partial_writes_track_accepted_bytes() {
        let mut writer = LastCharWriter::new(Trickle {
            data: Vec::new(),
            limit: 2,
        });
        let n = writer.write(b"abc").unwrap();
        assert_eq!(n, 2);
        assert_eq!(writer.last_char(), Some(b'b'));

        writer.write_all(b"cd\n").unwrap();
        assert_eq!(writer.last_char(), Some(b'\n'));
        assert_eq!(writer.into_inner().data, b"abcd\n");
    }
}
