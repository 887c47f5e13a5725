//! Dense element and node storage for the pairing heap
//!
//! The heap keeps two parallel arenas:
//!
//! - the **element store**, a dense `Vec<T>` of live values indexed by
//!   *element position*
//! - the **node store**, a `Vec<Node>` of tree records whose links are
//!   [`NodeId`]s into the same vector
//!
//! All tree relationships are expressed as indices into the node store, never
//! as references, so growth and removal cannot leave dangling links.
//!
//! Removing a value swap-compacts the element store: the tail value moves into
//! the hole and its node's `position` is repointed. Node slots are never
//! compacted; a vacated slot is cleared and parked on a free list for the next
//! allocation.

use nonmax::NonMaxUsize;
use std::fmt;

/// Index of a node slot in the node store
///
/// `Option<NodeId>` is the "no link" value and has the same size as `usize`.
/// The largest addressable slot is `usize::MAX - 1`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(NonMaxUsize);

impl NodeId {
    /// Wraps a raw slot index
    ///
    /// # Panics
    /// Panics if `slot == usize::MAX`, which is past the node store's capacity ceiling.
    #[inline]
    pub fn new(slot: usize) -> Self {
        match NonMaxUsize::new(slot) {
            Some(raw) => NodeId(raw),
            None => panic!("node store exhausted: slot {slot} is past the capacity ceiling"),
        }
    }

    /// Returns the raw slot index
    #[inline]
    pub fn index(self) -> usize {
        self.0.get()
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.index())
    }
}

/// A tree record in the node store
///
/// A live node always has a `position`. A vacated node has every field `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Node {
    pub parent: Option<NodeId>,
    /// Leftmost child
    pub child: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    /// Element store position of this node's value
    pub position: Option<usize>,
}

impl Node {
    #[inline]
    fn singleton(position: usize) -> Self {
        Node {
            position: Some(position),
            ..Node::default()
        }
    }

    /// Returns true if this slot currently owns a value
    #[inline]
    pub fn is_live(&self) -> bool {
        self.position.is_some()
    }
}

/// Paired element and node arenas
#[derive(Debug, Clone)]
pub struct Store<T> {
    elements: Vec<T>,
    nodes: Vec<Node>,
    free: Vec<NodeId>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            nodes: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<T> Store<T> {
    /// Number of live values
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of values the element store can hold without reallocating
    #[inline]
    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    /// Total node slots, live and vacated
    #[inline]
    pub fn slots(&self) -> usize {
        self.nodes.len()
    }

    /// Grows both arenas so that `additional` more values fit
    pub fn reserve(&mut self, additional: usize) {
        self.elements.reserve(additional);
        let spare = self.free.len();
        self.nodes.reserve(additional.saturating_sub(spare));
    }

    /// Drops every value and node
    pub fn clear(&mut self) {
        self.elements.clear();
        self.nodes.clear();
        self.free.clear();
    }

    /// Appends `value` as a singleton node, returning its slot and element position
    pub fn allocate(&mut self, value: T) -> (NodeId, usize) {
        let position = self.elements.len();
        self.elements.push(value);

        let node = Node::singleton(position);
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = node;
                id
            }
            None => {
                let id = NodeId::new(self.nodes.len());
                self.nodes.push(node);
                id
            }
        };
        (id, position)
    }

    /// Removes the value owned by `id`, swap-compacting the element store
    ///
    /// `tail_owner` must be the node owning the last element position. If it
    /// differs from `id`, the tail value moves into the vacated position and
    /// `tail_owner` is repointed there. The slot `id` is cleared and recycled.
    ///
    /// Returns the removed value and its former position.
    pub fn release(&mut self, id: NodeId, tail_owner: NodeId) -> (T, usize) {
        let position = self.position(id);
        let value = self.elements.swap_remove(position);
        if tail_owner != id {
            self.nodes[tail_owner.index()].position = Some(position);
        }
        self.nodes[id.index()] = Node::default();
        self.free.push(id);
        (value, position)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Looks up a slot that may be out of range or vacated
    #[inline]
    pub fn get_live(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).filter(|node| node.is_live())
    }

    /// Element position of a live node
    ///
    /// # Panics
    /// Panics if `id` is vacated.
    #[inline]
    pub fn position(&self, id: NodeId) -> usize {
        match self.nodes[id.index()].position {
            Some(position) => position,
            None => panic!("{id:?} does not own a value"),
        }
    }

    /// Value owned by a live node
    #[inline]
    pub fn value(&self, id: NodeId) -> &T {
        &self.elements[self.position(id)]
    }

    /// Mutable value owned by a live node
    #[inline]
    pub fn value_mut(&mut self, id: NodeId) -> &mut T {
        let position = self.position(id);
        &mut self.elements[position]
    }

    #[inline]
    pub fn element(&self, position: usize) -> &T {
        &self.elements[position]
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Iterates over every node slot, including vacated ones
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| (NodeId::new(slot), node))
    }
}
