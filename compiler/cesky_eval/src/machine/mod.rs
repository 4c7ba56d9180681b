//! The CESK machine.
//!
//! State is a control string (an expression to evaluate or a value to
//! return), an environment, a store, a continuation `k`, and a
//! meta-continuation: the stack of continuations suspended by
//! `call/prompt` and `kernel-eval`. Each transition either steps an
//! expression ([`step`](Machine::step)) or delivers a value to the top
//! continuation frame ([`resume`](Machine::resume)). Neither recurses into
//! the evaluator, so the native stack stays flat regardless of program
//! depth; all pending work lives in `k` and `meta`.

mod apply;
mod builder;
mod resume;
mod step;

pub use builder::MachineBuilder;

use crate::primitives;
use crate::print_handler::SharedPrintHandler;
use cesky_ir::Symbol;
use cesky_reader::read_all;
use cesky_trie::Trie;
use cesky_value::errors::{read_error, step_limit_exceeded};
use cesky_value::{Env, EvalError, EvalResult, Kont, Value};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// Process-lifetime bindings created by top-level `define`.
pub type TopLevel = FxHashMap<Symbol, Value>;

/// What the machine does next.
#[derive(Clone, Debug)]
pub enum Control {
    /// Evaluate an expression in the current environment.
    Eval(Value),
    /// Deliver a value to the current continuation.
    Return(Value),
}

/// A continuation suspended on the meta stack.
#[derive(Clone)]
pub struct MetaFrame {
    pub k: Kont,
    /// Prompt tag; `None` for frames pushed by `kernel-eval`.
    pub tag: Option<Symbol>,
}

/// Mutable cells. Pairs, variables and closures own their state through
/// `Rc`, so the store currently holds nothing; it is kept as a distinct
/// register so the state tuple stays complete.
#[derive(Clone, Copy, Debug, Default)]
pub struct Store;

/// Outcome of a single transition.
#[derive(Clone, Debug)]
pub enum Status {
    Running,
    Halted(Value),
}

struct State {
    control: Control,
    env: Env,
    #[expect(dead_code, reason = "register reserved for mutable cells")]
    store: Store,
    k: Kont,
    meta: Vec<MetaFrame>,
}

impl State {
    fn idle() -> Self {
        Self::injecting(Value::Void)
    }

    fn injecting(expr: Value) -> Self {
        State {
            control: Control::Eval(expr),
            env: Env::empty(),
            store: Store,
            k: Kont::Terminal,
            meta: Vec::new(),
        }
    }
}

/// A CESK machine with its top-level table and kernel environment.
pub struct Machine {
    state: State,
    top_level: TopLevel,
    kernel_env: Trie<Value>,
    print: SharedPrintHandler,
    fuel: Option<u64>,
}

impl Machine {
    /// A machine writing to the process's standard streams.
    pub fn new() -> Self {
        MachineBuilder::new().build()
    }

    pub fn builder() -> MachineBuilder {
        MachineBuilder::new()
    }

    fn from_parts(print: SharedPrintHandler, fuel: Option<u64>) -> Self {
        let bindings = primitives::kernel_bindings();
        let kernel_env: Trie<Value> = bindings.iter().cloned().collect();
        let top_level = bindings.into_iter().collect();
        Machine {
            state: State::idle(),
            top_level,
            kernel_env,
            print,
            fuel,
        }
    }

    /// Load `expr` as the initial control with an empty environment and
    /// continuation, discarding any state left from a previous run.
    pub fn inject(&mut self, expr: Value) {
        self.state = State::injecting(expr);
    }

    /// Perform one transition.
    pub fn advance(&mut self) -> Result<Status, EvalError> {
        let control = std::mem::replace(&mut self.state.control, Control::Return(Value::Void));
        match control {
            Control::Eval(expr) => {
                self.step(expr)?;
                Ok(Status::Running)
            }
            Control::Return(value) => Ok(match self.resume(value)? {
                Some(value) => Status::Halted(value),
                None => Status::Running,
            }),
        }
    }

    /// Run the injected program to completion.
    ///
    /// Errors abandon the computation: the control state is cleared, while
    /// top-level definitions made before the error persist.
    pub fn run(&mut self) -> EvalResult {
        let mut steps: u64 = 0;
        let result = loop {
            if let Some(limit) = self.fuel {
                if steps >= limit {
                    break Err(step_limit_exceeded(limit));
                }
            }
            steps += 1;
            match self.advance() {
                Ok(Status::Running) => {}
                Ok(Status::Halted(value)) => break Ok(value),
                Err(err) => break Err(err),
            }
        };
        match &result {
            Ok(value) => debug!(steps, result = %value, "halted"),
            Err(err) => {
                debug!(steps, error = %err, "evaluation failed");
                self.state = State::idle();
            }
        }
        result
    }

    /// Evaluate one expression to a value.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn eval(&mut self, expr: Value) -> EvalResult {
        trace!(expr = %expr, "inject");
        self.inject(expr);
        self.run()
    }

    /// Read every form in `src` and evaluate them in order. Returns the
    /// last value, or void for empty input.
    pub fn eval_str(&mut self, src: &str) -> EvalResult {
        let forms = read_all(src).map_err(|err| read_error("read", err.to_string()))?;
        let mut last = Value::Void;
        for form in forms {
            last = self.eval(form.value)?;
        }
        Ok(last)
    }

    /// Bind `name` at top level.
    pub fn define(&mut self, name: Symbol, value: Value) {
        self.top_level.insert(name, value);
    }

    pub fn top_level_get(&self, name: Symbol) -> Option<&Value> {
        self.top_level.get(&name)
    }

    /// Drop every user definition, restoring the kernel bindings.
    pub fn reset_top_level(&mut self) {
        self.top_level = self.kernel_env.iter().map(|(k, v)| (k, v.clone())).collect();
    }

    /// The kernel environment as a persistent table.
    pub fn kernel_env(&self) -> &Trie<Value> {
        &self.kernel_env
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    /// Frames in the current continuation.
    pub fn kont_depth(&self) -> usize {
        self.state.k.depth()
    }

    /// Continuations suspended on the meta stack.
    pub fn meta_depth(&self) -> usize {
        self.state.meta.len()
    }

    pub fn control(&self) -> &Control {
        &self.state.control
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
