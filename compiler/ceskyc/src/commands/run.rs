//! The `run` command: evaluate every form in a file.

use super::{eval_source, read_file, DriverOptions};

/// Run a source file. Output comes only from the program itself; top-level
/// results are not printed. Returns the process exit code.
pub fn run_file(path: &str, options: &DriverOptions) -> i32 {
    let src = match read_file(path) {
        Ok(src) => src,
        Err(msg) => {
            eprintln!("{msg}");
            return 1;
        }
    };
    let mut machine = options.stdio_machine();
    match eval_source(&mut machine, path, &src) {
        Ok(_) => 0,
        Err(msg) => {
            eprintln!("{msg}");
            1
        }
    }
}
