//! Lexical environments.
//!
//! An environment is an immutable chain of `(symbol, value)` bindings.
//! Extending allocates one link that points at the existing chain, so
//! closures capturing the same scope share it. Lookup walks innermost first.

use crate::Value;
use cesky_ir::Symbol;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct Env(Option<Rc<Binding>>);

struct Binding {
    name: Symbol,
    value: Value,
    rest: Env,
}

impl Env {
    /// The environment with no bindings.
    #[inline]
    pub fn empty() -> Self {
        Env(None)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// A new environment with `name` bound in front of `self`.
    #[must_use]
    pub fn extend(&self, name: Symbol, value: Value) -> Env {
        Env(Some(Rc::new(Binding {
            name,
            value,
            rest: self.clone(),
        })))
    }

    pub fn lookup(&self, name: Symbol) -> Option<&Value> {
        let mut link = self.0.as_deref();
        while let Some(binding) = link {
            if binding.name == name {
                return Some(&binding.value);
            }
            link = binding.rest.0.as_deref();
        }
        None
    }

    /// Number of links in the chain, shadowed bindings included.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut link = self.0.as_deref();
        while let Some(binding) = link {
            depth += 1;
            link = binding.rest.0.as_deref();
        }
        depth
    }
}

impl Drop for Binding {
    // Long scopes chain through `rest`, and closures built in a loop chain
    // through their captured environments. Both are unlinked onto a worklist
    // so neither recurses.
    fn drop(&mut self) {
        let mut work: Vec<Rc<Binding>> = Vec::new();
        detach_links(self, &mut work);
        while let Some(link) = work.pop() {
            if let Ok(mut binding) = Rc::try_unwrap(link) {
                detach_links(&mut binding, &mut work);
            }
        }
    }
}

fn detach_links(binding: &mut Binding, work: &mut Vec<Rc<Binding>>) {
    if let Some(rest) = binding.rest.0.take() {
        work.push(rest);
    }
    if !matches!(binding.value, Value::Closure(_)) {
        return;
    }
    if let Value::Closure(closure) = std::mem::take(&mut binding.value) {
        if let Ok(mut closure) = Rc::try_unwrap(closure) {
            if let Some(captured) = closure.env.0.take() {
                work.push(captured);
            }
        }
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut link = self.0.as_deref();
        while let Some(binding) = link {
            list.entry(&format_args!("{} = {:?}", binding.name, binding.value));
            link = binding.rest.0.as_deref();
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests;
