//! BPL interpreter CLI.

use bplc::commands::{lex_file, parse_file, parse_run_options, run_file};

fn main() {
    bplc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let (options, path) = match parse_run_options(&args[2..]) {
                Ok(parsed) => parsed,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    eprintln!("Usage: bplc run [--max-depth=N] [--quiet] <file.bpl>");
                    std::process::exit(1);
                }
            };

            let Some(path) = path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: bplc run [--max-depth=N] [--quiet] <file.bpl>");
                std::process::exit(1);
            };

            run_file(path, &options);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: bplc lex <file.bpl>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: bplc parse <file.bpl>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("BPL interpreter {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare `.bpl` path runs the file.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("bpl"))
            {
                match parse_run_options(&args[2..]) {
                    Ok((options, _)) => run_file(command, &options),
                    Err(msg) => {
                        eprintln!("error: {msg}");
                        std::process::exit(1);
                    }
                }
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("BPL interpreter");
    println!();
    println!("Usage: bplc <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.bpl>       Run a BPL program");
    println!("  lex <file.bpl>       Tokenize and display tokens");
    println!("  parse <file.bpl>     Parse and display program info");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --max-depth=<n>      Maximum user-function call depth (default: 10000)");
    println!("  -q, --quiet          Discard program output; errors are still reported");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=bpl_eval=trace) to log interpreter internals.");
}
