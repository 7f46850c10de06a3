//! The `run` command.

use super::{open_session, read_file, report_and_exit};
use crate::DEFAULT_MAX_CALL_DEPTH;
use bpl_eval::silent_handler;

/// Options accepted after `bplc run`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub max_call_depth: usize,
    /// Discard program output.
    pub quiet: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            quiet: false,
        }
    }
}

/// Split `run` arguments into options and the file path.
///
/// Returns an error message for an unknown flag or a malformed depth.
pub fn parse_run_options(args: &[String]) -> Result<(RunOptions, Option<&str>), String> {
    let mut options = RunOptions::default();
    let mut path = None;

    for arg in args {
        if let Some(depth) = arg.strip_prefix("--max-depth=") {
            options.max_call_depth = depth
                .parse()
                .map_err(|_| format!("invalid value for --max-depth: '{depth}'"))?;
        } else if arg == "--quiet" || arg == "-q" {
            options.quiet = true;
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else if path.is_none() {
            path = Some(arg.as_str());
        }
    }

    Ok((options, path))
}

/// Evaluate a file, printing program output to stdout unless `quiet` is set.
pub fn run_file(path: &str, options: &RunOptions) {
    let source = read_file(path);
    let mut session = open_session(path).with_max_call_depth(options.max_call_depth);
    if options.quiet {
        session = session.with_print_handler(silent_handler());
    }

    if let Err(err) = session.run(&source) {
        report_and_exit(&err, &source, path);
    }
}
