//! Builder for [`Machine`] instances.

use super::Machine;
use crate::print_handler::{stdio_handler, SharedPrintHandler};

/// Configures a machine before construction.
///
/// # Example
///
/// ```
/// use cesky_eval::{buffer_handler, Machine};
///
/// let output = buffer_handler();
/// let mut machine = Machine::builder()
///     .print_handler(output.clone())
///     .fuel(1_000_000)
///     .build();
/// let _ = machine.eval_str("(alert \"hi\")");
/// assert_eq!(output.get_output(), "hi\n");
/// ```
#[derive(Default)]
pub struct MachineBuilder {
    print_handler: Option<SharedPrintHandler>,
    fuel: Option<u64>,
}

impl MachineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where `alert` and `fd-write` output goes. Defaults to the process's
    /// standard streams.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Limit each evaluation to `steps` transitions. Unlimited by default.
    #[must_use]
    pub fn fuel(mut self, steps: u64) -> Self {
        self.fuel = Some(steps);
        self
    }

    pub fn build(self) -> Machine {
        let print = self.print_handler.unwrap_or_else(stdio_handler);
        Machine::from_parts(print, self.fuel)
    }
}
