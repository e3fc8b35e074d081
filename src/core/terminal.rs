//! Terminal geometry queries

use super::string_utils::repeat_string;
use crossterm::terminal;

/// Current width of the controlling terminal in columns.
///
/// Returns `None` when no terminal is attached or the OS query fails.
pub fn terminal_width() -> Option<u16> {
    match terminal::size() {
        Ok((width, _)) if width > 0 => Some(width),
        _ => None,
    }
}

/// Sequence that blanks the current line of a `width`-column terminal and
/// leaves the cursor at column 0.
pub fn clear_line_sequence(width: u16) -> String {
    format!("\r{}\r", repeat_string(" ", width as usize))
}
