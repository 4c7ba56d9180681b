//! Runtime values for the cesky machine.
//!
//! `Value` is a closed enum. Scalars (`Bool`, `Number`, `Symbol`) and the
//! singletons are stored inline; everything with identity lives behind an
//! `Rc` so that `eq?` can compare pointers.
//!
//! Pairs and variables are the only mutable values. Their cells use
//! `RefCell`, which keeps `Value` `!Send` and confines a machine to the
//! thread that built it.

use crate::{ArityMask, Env, Kont};
use cesky_ir::Symbol;
use cesky_trie::Trie;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A runtime value.
#[derive(Clone, Default)]
pub enum Value {
    /// The empty list.
    Null,
    /// Result of side-effecting primitives and `define`.
    #[default]
    Void,
    /// Placeholder for "no value"; never produced by user code directly.
    Undefined,
    /// End-of-file marker.
    Eof,
    Bool(bool),
    Number(f64),
    /// Immutable string.
    Str(Rc<str>),
    Symbol(Symbol),
    Pair(Rc<Pair>),
    Closure(Rc<Closure>),
    Primitive(Primitive),
    /// `apply`, `call/cc` and the other operators the machine handles itself.
    MetaOp(MetaOp),
    Continuation(Kont),
    Hash(Trie<Value>),
    Variable(Rc<Variable>),
    Opaque(Rc<Opaque>),
    Handle(Rc<Handle>),
}

/// A mutable cons cell.
pub struct Pair {
    car: RefCell<Value>,
    cdr: RefCell<Value>,
}

impl Pair {
    pub fn new(car: Value, cdr: Value) -> Self {
        Pair {
            car: RefCell::new(car),
            cdr: RefCell::new(cdr),
        }
    }

    #[inline]
    pub fn car(&self) -> Value {
        self.car.borrow().clone()
    }

    #[inline]
    pub fn cdr(&self) -> Value {
        self.cdr.borrow().clone()
    }

    pub fn set_car(&self, value: Value) {
        drop(self.car.replace(value));
    }

    pub fn set_cdr(&self, value: Value) {
        drop(self.cdr.replace(value));
    }
}

impl Drop for Pair {
    // Uniquely owned child cells are moved onto a worklist and released one
    // at a time, so neither long lists nor deep nesting recurse.
    fn drop(&mut self) {
        let mut work: Vec<Pair> = Vec::new();
        detach_children(self, &mut work);
        while let Some(mut cell) = work.pop() {
            detach_children(&mut cell, &mut work);
        }
    }
}

fn detach_children(pair: &mut Pair, work: &mut Vec<Pair>) {
    for slot in [pair.car.get_mut(), pair.cdr.get_mut()] {
        if !matches!(slot, Value::Pair(_)) {
            continue;
        }
        if let Value::Pair(rc) = std::mem::take(slot) {
            if let Ok(cell) = Rc::try_unwrap(rc) {
                work.push(cell);
            }
        }
    }
}

/// A `lambda` closed over its defining environment.
pub struct Closure {
    /// Proper list, dotted list, or a single symbol.
    pub formals: Value,
    /// Body expression; multi-form bodies are wrapped in `begin`.
    pub body: Value,
    pub name: Option<Rc<str>>,
    pub env: Env,
}

/// A native procedure, identified by its index in the primitive table.
#[derive(Copy, Clone, Debug)]
pub struct Primitive {
    pub name: &'static str,
    pub arity: ArityMask,
    pub id: u16,
}

/// Operators that rewrite the machine state rather than compute a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MetaOp {
    Apply,
    CallCc,
    CallPrompt,
    PromptAvailable,
    KernelEval,
}

impl MetaOp {
    pub const ALL: [MetaOp; 5] = [
        MetaOp::Apply,
        MetaOp::CallCc,
        MetaOp::CallPrompt,
        MetaOp::PromptAvailable,
        MetaOp::KernelEval,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            MetaOp::Apply => "apply",
            MetaOp::CallCc => "call/cc",
            MetaOp::CallPrompt => "call/prompt",
            MetaOp::PromptAvailable => "continuation-prompt-available?",
            MetaOp::KernelEval => "kernel-eval",
        }
    }
}

/// A named cell that can be assigned exactly once.
pub struct Variable {
    pub name: Value,
    cell: RefCell<Option<Value>>,
}

impl Variable {
    pub fn new(name: Value) -> Self {
        Variable {
            name,
            cell: RefCell::new(None),
        }
    }

    pub fn get(&self) -> Option<Value> {
        self.cell.borrow().clone()
    }

    /// Store `value` unless the variable already has one. Returns whether
    /// the assignment happened.
    pub fn try_set(&self, value: Value) -> bool {
        let mut cell = self.cell.borrow_mut();
        if cell.is_some() {
            return false;
        }
        *cell = Some(value);
        true
    }
}

/// A payload that can only be retrieved by presenting the same key.
pub struct Opaque {
    pub key: Value,
    pub payload: Value,
}

/// Output destination for `fd-write`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HandleKind {
    Stdout,
    Stderr,
}

pub struct Handle {
    pub kind: HandleKind,
}

impl Handle {
    pub const fn name(&self) -> &'static str {
        match self.kind {
            HandleKind::Stdout => "stdout",
            HandleKind::Stderr => "stderr",
        }
    }
}

// Factory methods

impl Value {
    #[inline]
    pub fn string(s: &str) -> Value {
        Value::Str(Rc::from(s))
    }

    #[inline]
    pub fn symbol(name: &str) -> Value {
        Value::Symbol(Symbol::intern(name))
    }

    #[inline]
    pub fn cons(car: Value, cdr: Value) -> Value {
        Value::Pair(Rc::new(Pair::new(car, cdr)))
    }

    /// Build a proper list.
    pub fn list<I>(items: I) -> Value
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: DoubleEndedIterator,
    {
        Self::list_with_tail(items, Value::Null)
    }

    /// Build a list ending in `tail` instead of `()`.
    pub fn list_with_tail<I>(items: I, tail: Value) -> Value
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: DoubleEndedIterator,
    {
        items
            .into_iter()
            .rev()
            .fold(tail, |acc, item| Value::cons(item, acc))
    }

    pub fn closure(formals: Value, body: Value, name: Option<Rc<str>>, env: Env) -> Value {
        Value::Closure(Rc::new(Closure {
            formals,
            body,
            name,
            env,
        }))
    }

    pub fn hash(trie: Trie<Value>) -> Value {
        Value::Hash(trie)
    }

    pub fn variable(name: Value) -> Value {
        Value::Variable(Rc::new(Variable::new(name)))
    }

    pub fn opaque(key: Value, payload: Value) -> Value {
        Value::Opaque(Rc::new(Opaque { key, payload }))
    }

    pub fn handle(kind: HandleKind) -> Value {
        Value::Handle(Rc::new(Handle { kind }))
    }
}

// Predicates and accessors

impl Value {
    /// Only `#f` is false.
    #[inline]
    pub fn is_false(&self) -> bool {
        matches!(self, Value::Bool(false))
    }

    #[inline]
    pub fn is_truthy(&self) -> bool {
        !self.is_false()
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_procedure(&self) -> bool {
        matches!(
            self,
            Value::Closure(_) | Value::Primitive(_) | Value::MetaOp(_) | Value::Continuation(_)
        )
    }

    pub fn as_symbol(&self) -> Option<Symbol> {
        match self {
            Value::Symbol(sym) => Some(*sym),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<&Rc<Pair>> {
        match self {
            Value::Pair(pair) => Some(pair),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// `car` of a pair, `None` for anything else.
    pub fn car(&self) -> Option<Value> {
        self.as_pair().map(|p| p.car())
    }

    /// `cdr` of a pair, `None` for anything else.
    pub fn cdr(&self) -> Option<Value> {
        self.as_pair().map(|p| p.cdr())
    }

    /// Walk the elements of a (possibly improper) list.
    pub fn iter_list(&self) -> ListIter {
        ListIter { rest: self.clone() }
    }

    /// Collect a proper list; `None` if the list is improper.
    pub fn list_to_vec(&self) -> Option<Vec<Value>> {
        let mut iter = self.iter_list();
        let items: Vec<Value> = iter.by_ref().collect();
        iter.rest().is_null().then_some(items)
    }

    pub fn is_list(&self) -> bool {
        let mut iter = self.iter_list();
        iter.by_ref().for_each(drop);
        iter.rest().is_null()
    }

    /// Identity comparison, the semantics of `eq?`.
    ///
    /// Numbers compare by bit pattern, so `0.0` and `-0.0` differ and a NaN
    /// is `eq?` to itself.
    pub fn is_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null)
            | (Value::Void, Value::Void)
            | (Value::Undefined, Value::Undefined)
            | (Value::Eof, Value::Eof) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => Rc::ptr_eq(a, b),
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Pair(a), Value::Pair(b)) => Rc::ptr_eq(a, b),
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Primitive(a), Value::Primitive(b)) => a.id == b.id,
            (Value::MetaOp(a), Value::MetaOp(b)) => a == b,
            (Value::Continuation(a), Value::Continuation(b)) => a.ptr_eq(b),
            (Value::Hash(a), Value::Hash(b)) => a.ptr_eq(b),
            (Value::Variable(a), Value::Variable(b)) => Rc::ptr_eq(a, b),
            (Value::Opaque(a), Value::Opaque(b)) => Rc::ptr_eq(a, b),
            (Value::Handle(a), Value::Handle(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Short type description for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Void => "void",
            Value::Undefined => "undefined",
            Value::Eof => "eof",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Pair(_) => "pair",
            Value::Closure(_) | Value::Primitive(_) | Value::MetaOp(_) => "procedure",
            Value::Continuation(_) => "continuation",
            Value::Hash(_) => "hash",
            Value::Variable(_) => "variable",
            Value::Opaque(_) => "opaque",
            Value::Handle(_) => "handle",
        }
    }
}

/// Iterator over the `car`s of a list. After exhaustion, [`ListIter::rest`]
/// is `()` for a proper list and the final non-pair tail otherwise.
pub struct ListIter {
    rest: Value,
}

impl ListIter {
    pub fn rest(&self) -> &Value {
        &self.rest
    }
}

impl Iterator for ListIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let (car, cdr) = match &self.rest {
            Value::Pair(pair) => (pair.car(), pair.cdr()),
            _ => return None,
        };
        self.rest = cdr;
        Some(car)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::printer::write_string(self))
    }
}

#[cfg(test)]
mod tests;
