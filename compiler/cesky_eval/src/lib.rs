//! CESK machine evaluator for cesky.
//!
//! # Architecture
//!
//! - `machine`: the state registers and the two transitions (`step` for
//!   expressions, `resume` for values), plus the application protocol
//! - `primitives`: native procedures, grouped by family
//! - `print_handler`: where `alert` and `fd-write` output goes
//!
//! The evaluator never recurses on the native stack to evaluate a
//! subexpression. Proper tail calls, `call/cc` and `call/prompt` fall out of
//! the explicit continuation.
//!
//! # Example
//!
//! ```
//! use cesky_eval::Machine;
//! use cesky_value::Value;
//!
//! let mut machine = Machine::new();
//! let result = machine.eval_str("(define (sq x) (* x x)) (sq 12)");
//! assert!(matches!(result, Ok(Value::Number(n)) if n == 144.0));
//! ```

mod machine;
mod primitives;
mod print_handler;

pub use machine::{Control, Machine, MachineBuilder, MetaFrame, Status, Store, TopLevel};
pub use print_handler::{
    buffer_handler, silent_handler, stdio_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdioPrintHandler,
};

/// Names bound in the kernel environment, in primitive-table order followed
/// by the control operators and constants.
pub fn kernel_names() -> Vec<&'static str> {
    primitives::kernel_bindings()
        .into_iter()
        .map(|(name, _)| name.name())
        .collect()
}
