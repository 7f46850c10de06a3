//! Shared helpers: run a program with captured output.

use bpl_eval::{buffer_handler, Value};
use bplc::{Error, Session};

pub fn session() -> Session {
    Session::new().unwrap().with_print_handler(buffer_handler())
}

/// Run `source` in `session`, returning the result and everything printed.
pub fn run_in(session: &Session, source: &str) -> (Result<Value, Error>, String) {
    let result = session.run(source);
    let output = session.print_handler().take_output();
    (result, output)
}

pub fn run(source: &str) -> (Result<Value, Error>, String) {
    run_in(&session(), source)
}

/// Output of a program that must succeed.
pub fn output_of(source: &str) -> String {
    let (result, output) = run(source);
    result.unwrap();
    output
}
