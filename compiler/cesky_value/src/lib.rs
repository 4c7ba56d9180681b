//! Value model for the cesky machine.
//!
//! Everything the evaluator and the primitives exchange lives here:
//! [`Value`], lexical environments ([`Env`]), continuation frames ([`Kont`]),
//! argument-count masks ([`ArityMask`]), evaluation errors and the printer.

mod arity;
mod env;
pub mod errors;
mod kont;
pub mod printer;
mod value;

pub use arity::ArityMask;
pub use env::Env;
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use kont::{Frame, FrameKind, Kont};
pub use printer::PrintMode;
pub use value::{
    Closure, Handle, HandleKind, ListIter, MetaOp, Opaque, Pair, Primitive, Value, Variable,
};
