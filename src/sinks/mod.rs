//! Output sinks
//!
//! A sink is the writable destination a [`Logger`](crate::Logger) forwards
//! every formatted byte to.

pub mod console;
pub mod file;
pub mod memory;

pub use console::{ConsoleSink, ConsoleTarget};
pub use file::FileSink;
pub use memory::MemorySink;

use std::io::Write;

pub trait Sink: Write + Send {
    fn name(&self) -> &str;

    /// Whether the sink is an interactive terminal.
    ///
    /// Line clearing is only attempted on terminals.
    fn is_terminal(&self) -> bool {
        false
    }
}
