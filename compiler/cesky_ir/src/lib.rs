//! Shared leaf types for the cesky runtime.
//!
//! - [`Symbol`]: interned (and uninterned) identifiers with stable integer ids
//! - [`Span`]: byte ranges into source text, produced by the reader
//! - [`ensure_sufficient_stack`]: stack growth for the few recursive walkers
//!   (reader, printer) that are allowed to recurse on input depth

mod span;
mod stack;
mod symbol;

pub use span::Span;
pub use stack::ensure_sufficient_stack;
pub use symbol::{keywords, Symbol};
