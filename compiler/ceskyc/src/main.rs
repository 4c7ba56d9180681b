//! cesky CLI
//!
//! CESK-machine interpreter for a small Scheme-family kernel language.

use ceskyc::commands::{eval_expr, repl, run_file, DriverOptions};
use ceskyc::init_tracing;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let (options, rest) = match DriverOptions::parse(&args[2..]) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };
    init_tracing(options.trace);

    let code = match command.as_str() {
        "run" => {
            let Some(path) = rest.first() else {
                eprintln!("Usage: cesky run <file> [--fuel=<n>] [--trace]");
                std::process::exit(1);
            };
            run_file(path, &options)
        }
        "eval" => {
            if rest.is_empty() {
                eprintln!("Usage: cesky eval <expr> [--fuel=<n>] [--trace]");
                std::process::exit(1);
            }
            eval_expr(&rest.join(" "), &options)
        }
        "repl" => repl(&options),
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        "version" | "--version" | "-v" => {
            println!("cesky {}", env!("CARGO_PKG_VERSION"));
            0
        }
        _ => {
            // A bare path runs the file.
            if std::path::Path::new(command).is_file() {
                run_file(command, &options)
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                1
            }
        }
    };
    std::process::exit(code);
}

fn print_usage() {
    println!("cesky - CESK machine interpreter");
    println!();
    println!("Usage: cesky <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>       Evaluate every form in a file");
    println!("  eval <expr>      Evaluate forms and print the last value");
    println!("  repl             Start an interactive session");
    println!("  help             Show this help message");
    println!("  version          Show version information");
    println!();
    println!("Options:");
    println!("  --fuel=<n>       Abort any top-level form after n machine steps");
    println!("  --trace          Debug logging (same as CESKY_LOG=cesky_eval=debug)");
    println!();
    println!("Environment:");
    println!("  CESKY_LOG        tracing filter, e.g. cesky_eval=trace (falls back to RUST_LOG)");
    println!("  CESKY_LOG_TREE   set to 1 for hierarchical log output");
    println!();
    println!("Examples:");
    println!("  cesky run program.scm");
    println!("  cesky eval \"(+ 1 2)\"");
    println!("  cesky eval --fuel=100000 \"(define (f) (f)) (f)\"");
}
