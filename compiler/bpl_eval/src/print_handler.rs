//! Output sink for the print builtin.
//!
//! Program output never goes through `tracing`. It is written to a print
//! handler chosen when the interpreter is built:
//! - `Stdout`: the default for the command line
//! - `Buffer`: captured in memory for tests and embedding
//! - `Silent`: discarded

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Print handler using enum dispatch.
pub enum PrintHandler {
    /// Writes to stdout.
    Stdout,
    /// Captures to an in-memory buffer.
    Buffer(Mutex<String>),
    /// Discards all output.
    Silent,
}

impl PrintHandler {
    /// Write one line of program output.
    pub fn println(&self, line: &str) {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                // A closed stdout (e.g. `| head`) must not abort evaluation.
                if writeln!(out, "{line}").is_err() {
                    tracing::debug!("stdout closed; dropping program output");
                }
            }
            Self::Buffer(buffer) => {
                let mut buf = buffer.lock();
                buf.push_str(line);
                buf.push('\n');
            }
            Self::Silent => {}
        }
    }

    /// Captured output. Empty for handlers that don't capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(buffer) => buffer.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    /// Return the captured output and empty the buffer.
    pub fn take_output(&self) -> String {
        match self {
            Self::Buffer(buffer) => std::mem::take(&mut *buffer.lock()),
            Self::Stdout | Self::Silent => String::new(),
        }
    }
}

/// Shared print handler that can be passed around.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn buffer_captures_lines() {
        let handler = buffer_handler();
        handler.println("১");
        handler.println("দুই");
        assert_eq!(handler.output(), "১\nদুই\n");
    }

    #[test]
    fn take_output_empties_buffer() {
        let handler = buffer_handler();
        handler.println("x");
        assert_eq!(handler.take_output(), "x\n");
        assert_eq!(handler.output(), "");
    }

    #[test]
    fn silent_discards() {
        let handler = silent_handler();
        handler.println("hello");
        assert_eq!(handler.output(), "");
    }

    #[test]
    fn buffer_is_shared_across_threads() {
        let handler = buffer_handler();
        let other = Arc::clone(&handler);
        let worker = std::thread::spawn(move || {
            for _ in 0..50 {
                other.println("a");
            }
        });
        for _ in 0..50 {
            handler.println("b");
        }
        worker.join().unwrap();
        assert_eq!(handler.output().lines().count(), 100);
    }
}
