//! Native procedures available in the kernel environment.
//!
//! Each family lives in its own submodule and contributes a static slice of
//! [`PrimitiveDef`]s. The concatenation of those slices is the primitive
//! table; a [`Primitive`] value carries its index into it. Arity is checked
//! by the machine against [`PrimitiveDef::arity`] before the native function
//! runs, so natives may index their argument slice directly.

mod args;
mod hashes;
mod io;
mod lists;
mod misc;
mod numbers;
mod strings;

use crate::print_handler::PrintHandlerImpl;
use crate::TopLevel;
use cesky_ir::Symbol;
use cesky_trie::Trie;
use cesky_value::{ArityMask, EvalResult, MetaOp, Primitive, Value};
use std::sync::OnceLock;

/// Machine state visible to natives.
pub(crate) struct PrimContext<'m> {
    pub top_level: &'m TopLevel,
    pub kernel_env: &'m Trie<Value>,
    pub print: &'m PrintHandlerImpl,
}

pub(crate) type NativeFn = fn(&PrimContext<'_>, &[Value]) -> EvalResult;

pub(crate) struct PrimitiveDef {
    pub name: &'static str,
    pub arity: ArityMask,
    pub func: NativeFn,
}

impl PrimitiveDef {
    pub(crate) const fn new(name: &'static str, arity: ArityMask, func: NativeFn) -> Self {
        PrimitiveDef { name, arity, func }
    }
}

static FAMILIES: [&[PrimitiveDef]; 6] = [
    lists::PRIMITIVES,
    numbers::PRIMITIVES,
    strings::PRIMITIVES,
    hashes::PRIMITIVES,
    misc::PRIMITIVES,
    io::PRIMITIVES,
];

/// The primitive table, in id order.
pub(crate) fn table() -> &'static [&'static PrimitiveDef] {
    static TABLE: OnceLock<Vec<&'static PrimitiveDef>> = OnceLock::new();
    TABLE.get_or_init(|| FAMILIES.iter().flat_map(|family| family.iter()).collect())
}

/// Definition behind a primitive value.
pub(crate) fn lookup(prim: Primitive) -> Option<&'static PrimitiveDef> {
    table().get(usize::from(prim.id)).copied()
}

/// Every name bound in the kernel environment.
pub(crate) fn kernel_bindings() -> Vec<(Symbol, Value)> {
    let mut bindings = Vec::with_capacity(table().len() + MetaOp::ALL.len() + 2);
    for (index, def) in table().iter().enumerate() {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "the primitive table is far smaller than u16::MAX"
        )]
        let id = index as u16;
        let prim = Primitive {
            name: def.name,
            arity: def.arity,
            id,
        };
        bindings.push((Symbol::intern(def.name), Value::Primitive(prim)));
    }
    for op in MetaOp::ALL {
        bindings.push((Symbol::intern(op.name()), Value::MetaOp(op)));
    }
    bindings.push((Symbol::intern("null"), Value::Null));
    bindings.push((Symbol::intern("eof"), Value::Eof));
    bindings
}
