//! Process-wide symbol table.
//!
//! Every symbol, interned or not, gets a fresh `u32` id from one counter.
//! Interned symbols are also entered into a name map so that reading the same
//! text twice yields the same id; uninterned symbols never are, so two
//! uninterned symbols with the same name are distinct.
//!
//! The id doubles as the routing key of the persistent trie, so it must be
//! stable for the life of the process. Names are leaked to `&'static str`.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/// An identifier with a stable integer id.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Symbol(u32);

struct Entry {
    name: &'static str,
    interned: bool,
}

struct SymbolTable {
    by_name: FxHashMap<&'static str, u32>,
    entries: Vec<Entry>,
}

impl SymbolTable {
    fn new() -> Self {
        let mut table = SymbolTable {
            by_name: FxHashMap::default(),
            entries: Vec::with_capacity(512),
        };
        for name in keywords::ALL {
            table.push(name, true);
        }
        table
    }

    fn push(&mut self, name: &str, interned: bool) -> u32 {
        let leaked: &'static str = Box::leak(name.to_owned().into_boxed_str());
        let id = u32::try_from(self.entries.len())
            .unwrap_or_else(|_| panic!("symbol table exceeded {} entries", u32::MAX));
        self.entries.push(Entry {
            name: leaked,
            interned,
        });
        if interned {
            self.by_name.insert(leaked, id);
        }
        id
    }
}

fn table() -> &'static RwLock<SymbolTable> {
    static TABLE: OnceLock<RwLock<SymbolTable>> = OnceLock::new();
    TABLE.get_or_init(|| RwLock::new(SymbolTable::new()))
}

impl Symbol {
    /// Intern `name`, returning the existing symbol if it was seen before.
    pub fn intern(name: &str) -> Symbol {
        let table = table();
        if let Some(&id) = table.read().by_name.get(name) {
            return Symbol(id);
        }
        let mut guard = table.write();
        // Another writer may have won the race between the two locks.
        if let Some(&id) = guard.by_name.get(name) {
            return Symbol(id);
        }
        Symbol(guard.push(name, true))
    }

    /// Create a symbol that is never returned by [`Symbol::intern`].
    pub fn uninterned(name: &str) -> Symbol {
        Symbol(table().write().push(name, false))
    }

    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }

    pub fn name(self) -> &'static str {
        table().read().entries[self.0 as usize].name
    }

    pub fn is_interned(self) -> bool {
        table().read().entries[self.0 as usize].interned
    }

    /// Order by name, then by id so uninterned twins stay distinct.
    pub fn cmp_by_name(self, other: Symbol) -> Ordering {
        self.name()
            .cmp(other.name())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_interned() {
            write!(f, "Symbol({}#{})", self.name(), self.0)
        } else {
            write!(f, "Symbol(uninterned {}#{})", self.name(), self.0)
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Symbols the evaluator and reader recognize, pre-interned in a fixed order.
pub mod keywords {
    use super::Symbol;

    /// Names in id order. Id 0 is the empty symbol.
    pub(super) const ALL: [&str; 10] = [
        "",
        "quote",
        "quasiquote",
        "unquote",
        "unquote-splicing",
        "define",
        "if",
        "lambda",
        "begin",
        "let",
    ];

    pub const EMPTY: Symbol = Symbol(0);
    pub const QUOTE: Symbol = Symbol(1);
    pub const QUASIQUOTE: Symbol = Symbol(2);
    pub const UNQUOTE: Symbol = Symbol(3);
    pub const UNQUOTE_SPLICING: Symbol = Symbol(4);
    pub const DEFINE: Symbol = Symbol(5);
    pub const IF: Symbol = Symbol(6);
    pub const LAMBDA: Symbol = Symbol(7);
    pub const BEGIN: Symbol = Symbol(8);
    pub const LET: Symbol = Symbol(9);
}

#[cfg(test)]
mod tests;
