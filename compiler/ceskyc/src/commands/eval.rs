//! The `eval` command: evaluate forms given on the command line.

use super::{eval_source, DriverOptions};
use cesky_value::Value;

/// Evaluate `expr` and print the last value (unless it is void).
/// Returns the process exit code.
pub fn eval_expr(expr: &str, options: &DriverOptions) -> i32 {
    let mut machine = options.stdio_machine();
    match eval_source(&mut machine, "<eval>", expr) {
        Ok(Value::Void) => 0,
        Ok(value) => {
            println!("{value}");
            0
        }
        Err(msg) => {
            eprintln!("{msg}");
            1
        }
    }
}
