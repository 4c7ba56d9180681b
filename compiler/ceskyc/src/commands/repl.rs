//! The `repl` command.

use super::DriverOptions;
use cesky_eval::Machine;
use cesky_reader::{read_all, ReadErrorKind};
use cesky_value::Value;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "> ";
const CONTINUE_PROMPT: &str = ". ";

/// Interactive loop on stdin/stdout. Returns the process exit code.
pub fn repl(options: &DriverOptions) -> i32 {
    let mut machine = options.stdio_machine();
    let stdin = io::stdin();
    let stdout = io::stdout();
    match run_repl(&mut machine, stdin.lock(), stdout.lock()) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("repl: {err}");
            1
        }
    }
}

/// Read forms from `input` until end of input, evaluating each complete
/// group of lines and printing non-void results to `output`. Input that
/// ends mid-form keeps accumulating; errors are reported and the loop
/// continues with the definitions made so far.
pub fn run_repl<R: BufRead, W: Write>(
    machine: &mut Machine,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    let mut pending = String::new();
    loop {
        let prompt = if pending.is_empty() {
            PROMPT
        } else {
            CONTINUE_PROMPT
        };
        output.write_all(prompt.as_bytes())?;
        output.flush()?;

        let mut line = String::new();
        let at_end = input.read_line(&mut line)? == 0;
        pending.push_str(&line);

        let forms = match read_all(&pending) {
            Ok(forms) => forms,
            Err(err) if !at_end && is_incomplete(&err.kind) => continue,
            Err(err) => {
                writeln!(output, "read error: {}", err.kind)?;
                pending.clear();
                if at_end {
                    return Ok(());
                }
                continue;
            }
        };
        pending.clear();

        for form in forms {
            match machine.eval(form.value) {
                Ok(Value::Void) => {}
                Ok(value) => writeln!(output, "{value}")?,
                Err(err) => {
                    writeln!(output, "error: {err}")?;
                    break;
                }
            }
        }

        if at_end {
            writeln!(output)?;
            return Ok(());
        }
    }
}

fn is_incomplete(kind: &ReadErrorKind) -> bool {
    matches!(
        kind,
        ReadErrorKind::UnexpectedEof | ReadErrorKind::UnterminatedString
    )
}
