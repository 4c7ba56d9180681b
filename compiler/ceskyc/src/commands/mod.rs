//! Driver commands: `run`, `eval` and `repl`.

mod eval;
mod repl;
mod run;

pub use eval::eval_expr;
pub use repl::{repl, run_repl};
pub use run::run_file;

use cesky_eval::{stdio_handler, Machine, SharedPrintHandler};
use cesky_ir::Span;
use cesky_reader::{read_all, ReadError};
use cesky_value::{EvalError, Value};
use tracing::debug;

/// Flags shared by every command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DriverOptions {
    /// Step limit per top-level form.
    pub fuel: Option<u64>,
    /// Debug logging without setting `CESKY_LOG`.
    pub trace: bool,
}

impl DriverOptions {
    /// Split `--fuel=<n>` and `--trace` out of `args`, returning the
    /// options and the remaining positional arguments.
    pub fn parse(args: &[String]) -> Result<(DriverOptions, Vec<String>), String> {
        let mut options = DriverOptions::default();
        let mut rest = Vec::new();
        for arg in args {
            if let Some(value) = arg.strip_prefix("--fuel=") {
                let steps = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid --fuel value '{value}'"))?;
                options.fuel = Some(steps);
            } else if arg == "--trace" {
                options.trace = true;
            } else if arg.starts_with("--") {
                return Err(format!("unknown option '{arg}'"));
            } else {
                rest.push(arg.clone());
            }
        }
        Ok((options, rest))
    }

    pub fn build_machine(&self, print: SharedPrintHandler) -> Machine {
        let builder = Machine::builder().print_handler(print);
        match self.fuel {
            Some(steps) => builder.fuel(steps).build(),
            None => builder.build(),
        }
    }

    fn stdio_machine(&self) -> Machine {
        self.build_machine(stdio_handler())
    }
}

/// `path:line:col` for the start of `span`.
pub fn location(path: &str, src: &str, span: Span) -> String {
    let (line, col) = span.line_col(src);
    format!("{path}:{line}:{col}")
}

pub fn format_read_error(path: &str, src: &str, err: &ReadError) -> String {
    format!("{}: read error: {}", location(path, src, err.span), err.kind)
}

/// An evaluation error reported against the top-level form that raised it.
pub fn format_eval_error(path: &str, src: &str, span: Span, err: &EvalError) -> String {
    format!("{}: {err}", location(path, src, span))
}

/// Read and evaluate every form in `src`, stopping at the first error.
/// Returns the last value, or a formatted error message.
pub fn eval_source(machine: &mut Machine, path: &str, src: &str) -> Result<Value, String> {
    let forms = read_all(src).map_err(|err| format_read_error(path, src, &err))?;
    debug!(path, forms = forms.len(), "evaluating source");
    let mut last = Value::Void;
    for form in forms {
        last = machine
            .eval(form.value)
            .map_err(|err| format_eval_error(path, src, form.span, &err))?;
    }
    Ok(last)
}

pub(crate) fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {e}"),
    })
}
