//! Trie nodes and the persistent operations over them.

use cesky_ir::Symbol;
use std::fmt;
use std::rc::Rc;

const FANOUT: usize = 16;
const DIGIT_BITS: u32 = 4;
const DIGIT_MASK: u32 = (1 << DIGIT_BITS) - 1;

#[inline]
fn digit(id: u32) -> usize {
    (id & DIGIT_MASK) as usize
}

/// One trie level.
///
/// `count` is the number of bound keys in this node and all of its
/// descendants. A non-root node whose count drops to zero is pruned.
#[derive(Clone)]
struct Node<V> {
    count: u32,
    key: Option<Symbol>,
    value: Option<V>,
    children: [Option<Rc<Node<V>>>; FANOUT],
}

impl<V> Node<V> {
    fn empty() -> Self {
        Node {
            count: 0,
            key: None,
            value: None,
            children: std::array::from_fn(|_| None),
        }
    }
}

/// Immutable map from [`Symbol`] to `V`.
///
/// Cloning a `Trie` is a reference-count bump. `extend` and `remove` return a
/// new trie and leave `self` untouched.
pub struct Trie<V> {
    root: Rc<Node<V>>,
}

impl<V> Clone for Trie<V> {
    fn clone(&self) -> Self {
        Trie {
            root: Rc::clone(&self.root),
        }
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    pub fn new() -> Self {
        Trie {
            root: Rc::new(Node::empty()),
        }
    }

    /// Number of bound keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.root.count as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.count == 0
    }

    /// Whether both tries share the same root node.
    #[inline]
    pub fn ptr_eq(&self, other: &Trie<V>) -> bool {
        Rc::ptr_eq(&self.root, &other.root)
    }

    /// Find the value bound to `key`.
    ///
    /// Walks one node per 4-bit digit of the id; the walk ends at the node
    /// where the remaining id is zero.
    pub fn lookup(&self, key: Symbol) -> Option<&V> {
        let mut node: &Node<V> = &self.root;
        let mut id = key.id();
        while id != 0 {
            node = node.children[digit(id)].as_deref()?;
            id >>= DIGIT_BITS;
        }
        node.value.as_ref()
    }

    /// All bound keys, sorted by symbol name.
    pub fn keys(&self) -> Vec<Symbol> {
        let mut keys: Vec<Symbol> = self.iter().map(|(key, _)| key).collect();
        keys.sort_by(|a, b| a.cmp_by_name(*b));
        keys
    }

    /// Pre-order traversal of the bindings. The order follows the symbol
    /// ids, not the names; use [`Trie::keys`] for a deterministic listing.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            stack: vec![&*self.root],
        }
    }

    /// Whether every key of `self` is also bound in `other`.
    pub fn is_keys_subset(&self, other: &Trie<V>) -> bool {
        keys_subset(&self.root, &other.root)
    }
}

impl<V: Clone> Trie<V> {
    /// Bind `key` to `value`, replacing any previous binding.
    pub fn extend(&self, key: Symbol, value: V) -> Trie<V> {
        let mut added = false;
        let root = extend_node(Some(&*self.root), key, key.id(), value, &mut added);
        Trie {
            root: Rc::new(root),
        }
    }

    /// Drop the binding for `key`. Removing an absent key returns a trie
    /// sharing the original root.
    pub fn remove(&self, key: Symbol) -> Trie<V> {
        match remove_node(&self.root, key.id(), true) {
            Removal::Absent => self.clone(),
            Removal::Pruned => Trie::new(),
            Removal::Replaced(root) => Trie {
                root: Rc::new(root),
            },
        }
    }
}

fn extend_node<V: Clone>(
    node: Option<&Node<V>>,
    key: Symbol,
    id: u32,
    value: V,
    added: &mut bool,
) -> Node<V> {
    let mut copy = node.map_or_else(Node::empty, Node::clone);
    if id == 0 {
        *added = copy.value.is_none();
        copy.key = Some(key);
        copy.value = Some(value);
    } else {
        let slot = digit(id);
        let child = extend_node(
            copy.children[slot].as_deref(),
            key,
            id >> DIGIT_BITS,
            value,
            added,
        );
        copy.children[slot] = Some(Rc::new(child));
    }
    if *added {
        copy.count += 1;
    }
    copy
}

enum Removal<V> {
    /// Key not bound below this node; nothing was copied.
    Absent,
    /// The node became empty and should be dropped from its parent.
    Pruned,
    Replaced(Node<V>),
}

fn remove_node<V: Clone>(node: &Node<V>, id: u32, is_root: bool) -> Removal<V> {
    let mut copy = if id == 0 {
        if node.value.is_none() {
            return Removal::Absent;
        }
        let mut copy = node.clone();
        copy.key = None;
        copy.value = None;
        copy
    } else {
        let slot = digit(id);
        let Some(child) = node.children[slot].as_deref() else {
            return Removal::Absent;
        };
        let replacement = match remove_node(child, id >> DIGIT_BITS, false) {
            Removal::Absent => return Removal::Absent,
            Removal::Pruned => None,
            Removal::Replaced(child) => Some(Rc::new(child)),
        };
        let mut copy = node.clone();
        copy.children[slot] = replacement;
        copy
    };
    copy.count -= 1;
    if copy.count == 0 && !is_root {
        Removal::Pruned
    } else {
        Removal::Replaced(copy)
    }
}

fn keys_subset<V>(a: &Rc<Node<V>>, b: &Rc<Node<V>>) -> bool {
    if Rc::ptr_eq(a, b) || a.count == 0 {
        return true;
    }
    if a.count > b.count || (a.value.is_some() && b.value.is_none()) {
        return false;
    }
    a.children
        .iter()
        .zip(&b.children)
        .all(|pair| match pair {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(a), Some(b)) => keys_subset(a, b),
        })
}

/// Borrowing iterator over `(key, value)` bindings.
pub struct Iter<'a, V> {
    stack: Vec<&'a Node<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Symbol, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            self.stack
                .extend(node.children.iter().rev().filter_map(Option::as_deref));
            if let (Some(key), Some(value)) = (node.key, node.value.as_ref()) {
                return Some((key, value));
            }
        }
        None
    }
}

impl<'a, V> IntoIterator for &'a Trie<V> {
    type Item = (Symbol, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: Clone> FromIterator<(Symbol, V)> for Trie<V> {
    fn from_iter<I: IntoIterator<Item = (Symbol, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Trie::new(), |trie, (key, value)| trie.extend(key, value))
    }
}

impl<V: fmt::Debug> fmt::Debug for Trie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests;
