//! Application protocol.
//!
//! `apply`, `call/cc` and `call/prompt` rewrite the operator/argument pair
//! instead of producing a value, so application is a loop that re-resolves
//! the operator until it reaches something that does real work.

use super::resume::Args;
use super::{Control, Machine, MetaFrame};
use crate::primitives::{self, PrimContext};
use cesky_value::errors::{arity_mismatch, not_a_procedure, protocol_error, type_error};
use cesky_value::{Closure, Env, EvalError, Kont, MetaOp, Primitive, Value};
use smallvec::smallvec;
use std::rc::Rc;
use tracing::trace;

/// How an operator value is applied.
enum OperatorResolution {
    Apply,
    CallCc,
    CallPrompt,
    PromptQuery,
    KernelEval,
    Primitive(Primitive),
    Closure(Rc<Closure>),
    Continuation(Kont),
    Invalid,
}

impl OperatorResolution {
    fn of(operator: &Value) -> Self {
        match operator {
            Value::MetaOp(MetaOp::Apply) => Self::Apply,
            Value::MetaOp(MetaOp::CallCc) => Self::CallCc,
            Value::MetaOp(MetaOp::CallPrompt) => Self::CallPrompt,
            Value::MetaOp(MetaOp::PromptAvailable) => Self::PromptQuery,
            Value::MetaOp(MetaOp::KernelEval) => Self::KernelEval,
            Value::Primitive(prim) => Self::Primitive(*prim),
            Value::Closure(closure) => Self::Closure(Rc::clone(closure)),
            Value::Continuation(k) => Self::Continuation(k.clone()),
            _ => Self::Invalid,
        }
    }
}

fn expect_count(who: &str, expected: usize, args: &[Value]) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(arity_mismatch(who, expected, args))
    }
}

impl Machine {
    /// Apply `operator` to `args`. The continuation register already holds
    /// the application's return point.
    pub(super) fn apply(&mut self, mut operator: Value, mut args: Args) -> Result<(), EvalError> {
        loop {
            match OperatorResolution::of(&operator) {
                OperatorResolution::Apply => {
                    expect_count("apply", 2, &args)?;
                    let items = args[1]
                        .list_to_vec()
                        .ok_or_else(|| type_error("apply", "a list", &args[1]))?;
                    operator = args.swap_remove(0);
                    args = items.into_iter().collect();
                }
                OperatorResolution::CallCc => {
                    expect_count("call/cc", 1, &args)?;
                    let k = Value::Continuation(self.state.k.clone());
                    operator = args.swap_remove(0);
                    args = smallvec![k];
                }
                OperatorResolution::CallPrompt => {
                    expect_count("call/prompt", 2, &args)?;
                    let tag = args[1].as_symbol().ok_or_else(|| {
                        protocol_error("call/prompt", "prompt tag is not a symbol", &args[1])
                    })?;
                    let k = std::mem::take(&mut self.state.k);
                    self.state.meta.push(MetaFrame { k, tag: Some(tag) });
                    trace!(tag = %tag, depth = self.state.meta.len(), "prompt push");
                    operator = args.swap_remove(0);
                    args = Args::new();
                }
                OperatorResolution::PromptQuery => {
                    expect_count("continuation-prompt-available?", 1, &args)?;
                    let tag = args[0].as_symbol().ok_or_else(|| {
                        protocol_error(
                            "continuation-prompt-available?",
                            "prompt tag is not a symbol",
                            &args[0],
                        )
                    })?;
                    let available = self.state.meta.last().and_then(|m| m.tag) == Some(tag);
                    self.state.control = Control::Return(Value::Bool(available));
                    return Ok(());
                }
                OperatorResolution::KernelEval => {
                    expect_count("kernel-eval", 1, &args)?;
                    let k = std::mem::take(&mut self.state.k);
                    self.state.meta.push(MetaFrame { k, tag: None });
                    trace!(depth = self.state.meta.len(), "kernel-eval push");
                    self.state.env = Env::empty();
                    self.state.control = Control::Eval(args.swap_remove(0));
                    return Ok(());
                }
                OperatorResolution::Primitive(prim) => {
                    return self.apply_primitive(prim, &args);
                }
                OperatorResolution::Closure(closure) => {
                    self.state.env = bind_formals(&closure, &args)?;
                    self.state.control = Control::Eval(closure.body.clone());
                    return Ok(());
                }
                OperatorResolution::Continuation(k) => {
                    expect_count("continuation", 1, &args)?;
                    self.state.k = k;
                    self.state.control = Control::Return(args.swap_remove(0));
                    return Ok(());
                }
                OperatorResolution::Invalid => return Err(not_a_procedure(&operator)),
            }
        }
    }

    fn apply_primitive(&mut self, prim: Primitive, args: &[Value]) -> Result<(), EvalError> {
        if !prim.arity.accepts(args.len()) {
            return Err(arity_mismatch(prim.name, prim.arity, args));
        }
        let Some(def) = primitives::lookup(prim) else {
            return Err(not_a_procedure(&Value::Primitive(prim)));
        };
        let ctx = PrimContext {
            top_level: &self.top_level,
            kernel_env: &self.kernel_env,
            print: &self.print,
        };
        let result = (def.func)(&ctx, args)?;
        self.state.control = Control::Return(result);
        Ok(())
    }
}

/// The closure's environment extended with its formals bound to `args`.
fn bind_formals(closure: &Closure, args: &[Value]) -> Result<Env, EvalError> {
    let mut env = closure.env.clone();
    let mut formals = closure.formals.clone();
    let mut rest = args.iter();
    let mut required = 0usize;
    loop {
        match formals {
            Value::Pair(pair) => {
                let Some(arg) = rest.next() else {
                    let expected = required + count_required(&pair.cdr()) + 1;
                    return Err(closure_arity(closure, expected, args));
                };
                if let Value::Symbol(name) = pair.car() {
                    env = env.extend(name, arg.clone());
                }
                required += 1;
                formals = pair.cdr();
            }
            Value::Symbol(name) => {
                env = env.extend(name, Value::list(rest.cloned()));
                return Ok(env);
            }
            _ => {
                if rest.next().is_some() {
                    return Err(closure_arity(closure, required, args));
                }
                return Ok(env);
            }
        }
    }
}

fn count_required(formals: &Value) -> usize {
    formals.iter_list().count()
}

/// Describes the expected count as "N" or "at least N".
#[cold]
fn closure_arity(closure: &Closure, required: usize, args: &[Value]) -> EvalError {
    let mut tail = closure.formals.iter_list();
    tail.by_ref().for_each(drop);
    let expected = match tail.rest() {
        Value::Symbol(_) => format!("at least {required}"),
        _ => required.to_string(),
    };
    let who = closure.name.as_deref().unwrap_or("#<procedure>");
    arity_mismatch(who, expected, args)
}
