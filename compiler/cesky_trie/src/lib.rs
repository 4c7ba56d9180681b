//! Persistent symbol-keyed map.
//!
//! [`Trie`] backs the runtime's immutable `hash` values. It is a 16-ary trie
//! routed by the 4-bit digits of a symbol's id, least significant digit
//! first. Every update copies only the nodes on the root-to-key path and
//! shares the rest, so older versions stay valid and cheap to keep.

mod trie;

pub use trie::{Iter, Trie};
