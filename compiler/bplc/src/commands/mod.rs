//! Command implementations for the `bplc` binary.
//!
//! Each command reads one file, reports failures as rendered diagnostics on
//! stderr and exits with status 1.

mod debug;
mod run;

pub use debug::{lex_file, parse_file};
pub use run::{parse_run_options, run_file, RunOptions};

use crate::Error;

/// Read a source file, exiting with a message if it cannot be read.
pub(super) fn read_file(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: {}", describe_read_error(path, &e));
        std::process::exit(1);
    })
}

fn describe_read_error(path: &str, err: &std::io::Error) -> String {
    match err.kind() {
        std::io::ErrorKind::NotFound => format!("no such file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("cannot open '{path}': permission denied"),
        std::io::ErrorKind::InvalidData => format!("'{path}' is not valid UTF-8"),
        _ => format!("cannot read '{path}': {err}"),
    }
}

/// Print `err` as a diagnostic against `source` and exit.
pub(super) fn report_and_exit(err: &Error, source: &str, path: &str) -> ! {
    eprint!("{}", err.to_diagnostic().render(source, path));
    std::process::exit(1);
}

/// Create a session or exit with the configuration error.
pub(super) fn open_session(path: &str) -> crate::Session {
    match crate::Session::new() {
        Ok(session) => session,
        Err(err) => report_and_exit(&err, "", path),
    }
}
