//! Mutable Pairing Heap implementation
//!
//! A pairing heap is a heap-ordered multi-way tree with:
//! - O(1) amortized insert
//! - O(log n) amortized delete-min (two-pass pairing)
//! - O(log n) amortized decrease-key
//!
//! This implementation is array-backed. Values live in a dense element store,
//! tree links live in a parallel node store (see [`crate::storage`]), and a
//! pluggable [`PositionIndex`] maps a value back to the node that owns it.
//! One generic core serves every indexing strategy:
//!
//! | Alias | Index | `update` |
//! |-------|-------|----------|
//! | [`MutablePairingHeap`] | [`HashIndex`] | yes |
//! | [`ExternalPairingHeap`] | [`ExternalIndex`] | yes |
//! | [`PlainPairingHeap`] | [`ReverseIndex`] | no |
//!
//! # Comparator failure
//!
//! A panicking comparator propagates out of the heap immediately. No rollback
//! is attempted, so a heap whose comparator panicked mid-operation must be
//! considered invalid and dropped. It stays memory safe; it may give wrong
//! answers or panic on later calls.
//!
//! # Example
//!
//! ```rust
//! use mutable_pairing_heap::MutablePairingHeap;
//!
//! let mut heap: MutablePairingHeap<u32> = MutablePairingHeap::new();
//! for value in [5, 3, 8, 1] {
//!     heap.push(value).unwrap();
//! }
//! assert_eq!(heap.into_sorted_vec(), vec![1, 3, 5, 8]);
//! ```

use crate::compare::{Compare, MinOrder};
use crate::index::{ExternalIndex, HashIndex, Locate, PositionIndex, ReverseIndex};
use crate::storage::{Node, NodeId, Store};
use crate::traits::{HeapError, MutablePriorityQueue, PriorityQueue};
use log::{debug, trace};
use smallvec::SmallVec;
use std::fmt;

/// Pairing heap that owns a hash map from value identity to node slot
pub type MutablePairingHeap<T, C = MinOrder> = PairingHeap<T, C, HashIndex<T>>;

/// Pairing heap that resolves values through a caller-supplied oracle
pub type ExternalPairingHeap<T, M, C = MinOrder> = PairingHeap<T, C, ExternalIndex<M>>;

/// Pairing heap without identity lookup; push and pop only
pub type PlainPairingHeap<T, C = MinOrder> = PairingHeap<T, C, ReverseIndex>;

/// Array-backed pairing heap, generic over comparator and position index
///
/// The value for which no other value is `less` sits at the root.
#[derive(Debug, Clone)]
pub struct PairingHeap<T, C = MinOrder, I = HashIndex<T>> {
    store: Store<T>,
    root: Option<NodeId>,
    compare: C,
    index: I,
}

/// A structural invariant found broken by [`PairingHeap::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root is set while the heap is empty, or missing while it is not
    RootMismatch,
    /// The root has a parent or siblings
    RootHasLinks(NodeId),
    /// A vacated node is linked into the tree
    VacatedNode(NodeId),
    /// A node is reachable twice from the root
    Cycle(NodeId),
    /// A child does not point back to its parent
    ParentMismatch { parent: NodeId, child: NodeId },
    /// Left and right sibling links disagree
    SiblingMismatch(NodeId),
    /// A child goes strictly before its parent
    HeapOrder { parent: NodeId, child: NodeId },
    /// A live node cannot be reached from the root
    Unreachable(NodeId),
    /// A node's element position is out of range or shared
    BadPosition(NodeId),
    /// The position index does not resolve a value to its owning node
    IndexMismatch(NodeId),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::RootMismatch => write!(f, "root disagrees with heap size"),
            InvariantViolation::RootHasLinks(id) => write!(f, "root {id:?} has parent or siblings"),
            InvariantViolation::VacatedNode(id) => write!(f, "vacated {id:?} is linked into the tree"),
            InvariantViolation::Cycle(id) => write!(f, "{id:?} is reachable more than once"),
            InvariantViolation::ParentMismatch { parent, child } => {
                write!(f, "child {child:?} does not point back to parent {parent:?}")
            }
            InvariantViolation::SiblingMismatch(id) => {
                write!(f, "sibling links around {id:?} disagree")
            }
            InvariantViolation::HeapOrder { parent, child } => {
                write!(f, "child {child:?} goes before parent {parent:?}")
            }
            InvariantViolation::Unreachable(id) => write!(f, "{id:?} is not reachable from the root"),
            InvariantViolation::BadPosition(id) => {
                write!(f, "{id:?} has an out-of-range or shared element position")
            }
            InvariantViolation::IndexMismatch(id) => {
                write!(f, "position index does not resolve the value of {id:?}")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl<T, C: Compare<T> + Default, I: PositionIndex<T> + Default> PairingHeap<T, C, I> {
    /// Creates an empty heap with the default comparator and index
    pub fn new() -> Self {
        Self::with_index(C::default(), I::default())
    }

    /// Creates an empty heap with room for `capacity` values
    pub fn with_capacity(capacity: usize) -> Self {
        let mut heap = Self::new();
        heap.reserve(capacity);
        heap
    }
}

impl<T, C: Compare<T> + Default, I: PositionIndex<T> + Default> Default for PairingHeap<T, C, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Compare<T>, I: PositionIndex<T> + Default> PairingHeap<T, C, I> {
    /// Creates an empty heap ordered by `compare`
    pub fn with_comparator(compare: C) -> Self {
        Self::with_index(compare, I::default())
    }

    /// Bulk-loads a heap by repeated push
    ///
    /// # Errors
    /// Returns `HeapError::DuplicateValue` if the index detects a repeated identity.
    pub fn from_iter_with<It>(values: It, compare: C) -> Result<Self, HeapError>
    where
        It: IntoIterator<Item = T>,
    {
        let mut heap = Self::with_comparator(compare);
        heap.push_all(values)?;
        Ok(heap)
    }

    /// Builds a heap from a fixed list of values
    pub fn from_values<const N: usize>(values: [T; N], compare: C) -> Result<Self, HeapError> {
        Self::from_iter_with(values, compare)
    }
}

impl<T, C: Compare<T>, I: PositionIndex<T>> PairingHeap<T, C, I> {
    /// Creates an empty heap with an explicit comparator and index
    pub fn with_index(compare: C, index: I) -> Self {
        Self {
            store: Store::default(),
            root: None,
            compare,
            index,
        }
    }

    /// Returns true if the heap is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the number of values in the heap
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Number of values the heap can hold without reallocating
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Reserves room for at least `additional` more values
    ///
    /// Never changes the contents or the pop order.
    pub fn reserve(&mut self, additional: usize) {
        self.store.reserve(additional);
        self.index.reserve(additional);
        debug!("pairing heap reserved {additional} slots, capacity {}", self.capacity());
    }

    /// The comparator ordering this heap
    pub fn comparator(&self) -> &C {
        &self.compare
    }

    /// The position index strategy
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Consumes the heap, returning its position index
    pub fn into_index(self) -> I {
        self.index
    }

    /// Removes every value, leaving capacity untouched
    pub fn clear(&mut self) {
        self.index.clear(self.store.elements());
        self.store.clear();
        self.root = None;
    }

    /// Returns the value at the root
    ///
    /// The reference is invalidated by any later `push`, `pop` or `update`;
    /// priority changes must go through `update`.
    #[inline]
    pub fn top(&self) -> Option<&T> {
        self.root.map(|root| self.store.value(root))
    }

    /// Inserts a value
    ///
    /// # Errors
    /// Returns `HeapError::DuplicateValue` if the index already tracks the
    /// value's identity. Strategies without identity lookup never fail.
    pub fn push(&mut self, value: T) -> Result<(), HeapError> {
        if self.resolve(&value).is_some() {
            return Err(HeapError::DuplicateValue);
        }
        self.insert(value);
        Ok(())
    }

    /// Removes and returns the value at the root
    ///
    /// # Panics
    /// Panics if the position index cannot resolve the last stored value to
    /// its node, which only a broken external oracle can cause.
    pub fn pop(&mut self) -> Option<T> {
        let root = self.root?;

        let last = self.store.len() - 1;
        let tail_owner = if self.store.position(root) == last {
            root
        } else {
            match self.index.owner(self.store.element(last), last) {
                Some(id) => id,
                None => panic!("position index lost track of the value at element position {last}"),
            }
        };

        let children = self.store.node_mut(root).child.take();
        self.root = self.consolidate(children);

        let (value, position) = self.store.release(root, tail_owner);
        let moved = (tail_owner != root).then(|| (self.store.element(position), tail_owner));
        self.index.swap_remove(&value, position, moved);

        self.check_invariants();
        Some(value)
    }

    /// Pops every value into a vector, in pop order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(value) = self.pop() {
            sorted.push(value);
        }
        sorted
    }

    /// Values in element store order, which is unrelated to heap order
    pub fn as_slice(&self) -> &[T] {
        self.store.elements()
    }

    /// Pre-order parenthesized rendering of the tree, for debugging
    ///
    /// A node with children renders as `value(child child ...)`. The format is
    /// not stable.
    pub fn dump(&self) -> Dump<'_, T, C, I> {
        Dump { heap: self }
    }

    /// Checks every structural invariant, reporting the first broken one
    ///
    /// Walks the whole tree; O(n).
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let len = self.store.len();
        let root = match self.root {
            None if len == 0 => return Ok(()),
            Some(root) if len > 0 => root,
            _ => return Err(InvariantViolation::RootMismatch),
        };

        let root_node = self
            .store
            .get_live(root)
            .ok_or(InvariantViolation::VacatedNode(root))?;
        if root_node.parent.is_some() || root_node.left.is_some() || root_node.right.is_some() {
            return Err(InvariantViolation::RootHasLinks(root));
        }

        let mut seen = vec![false; self.store.slots()];
        let mut stack = vec![root];
        seen[root.index()] = true;
        while let Some(parent) = stack.pop() {
            let mut previous = None;
            let mut cursor = self.store.node(parent).child;
            while let Some(child) = cursor {
                let node = self
                    .store
                    .get_live(child)
                    .ok_or(InvariantViolation::VacatedNode(child))?;
                if std::mem::replace(&mut seen[child.index()], true) {
                    return Err(InvariantViolation::Cycle(child));
                }
                if node.parent != Some(parent) {
                    return Err(InvariantViolation::ParentMismatch { parent, child });
                }
                if node.left != previous {
                    return Err(InvariantViolation::SiblingMismatch(child));
                }
                if self.less(child, parent) {
                    return Err(InvariantViolation::HeapOrder { parent, child });
                }
                stack.push(child);
                previous = Some(child);
                cursor = node.right;
            }
        }

        let mut positions = vec![false; len];
        for (id, node) in self.store.nodes() {
            let Some(position) = node.position else {
                continue;
            };
            if !seen[id.index()] {
                return Err(InvariantViolation::Unreachable(id));
            }
            if position >= len || std::mem::replace(&mut positions[position], true) {
                return Err(InvariantViolation::BadPosition(id));
            }
            if self.index.owner(self.store.element(position), position) != Some(id) {
                return Err(InvariantViolation::IndexMismatch(id));
            }
        }
        Ok(())
    }

    /// Pushes every value, reserving by the iterator's size hint first
    fn push_all<It>(&mut self, values: It) -> Result<(), HeapError>
    where
        It: IntoIterator<Item = T>,
    {
        let values = values.into_iter();
        self.reserve(values.size_hint().0);
        for value in values {
            self.push(value)?;
        }
        Ok(())
    }

    /// Live node owning this value's identity, if the index can tell
    fn resolve(&self, value: &T) -> Option<NodeId> {
        self.index
            .locate(value)
            .filter(|&id| self.store.get_live(id).is_some())
    }

    /// Pushes without the duplicate check
    fn insert(&mut self, value: T) {
        let (id, position) = self.store.allocate(value);
        self.index.insert(self.store.element(position), position, id);

        self.root = Some(match self.root {
            None => id,
            Some(root) => self.link(id, root),
        });
        self.check_invariants();
    }

    #[inline]
    fn less(&self, a: NodeId, b: NodeId) -> bool {
        self.compare.less(self.store.value(a), self.store.value(b))
    }

    /// Makes the tree rooted at `x` the leftmost child of `y`
    ///
    /// No ordering check; the caller passes the winner as `y`.
    fn merge(&mut self, x: NodeId, y: NodeId) {
        let first = self.store.node(y).child;
        let node = self.store.node_mut(x);
        node.parent = Some(y);
        node.right = first;
        if let Some(first) = first {
            self.store.node_mut(first).left = Some(x);
        }
        self.store.node_mut(y).child = Some(x);
    }

    /// Merges two detached roots, returning the winner
    ///
    /// `a` wins only if it goes strictly before `b`.
    fn link(&mut self, a: NodeId, b: NodeId) -> NodeId {
        if self.less(a, b) {
            self.merge(b, a);
            a
        } else {
            self.merge(a, b);
            b
        }
    }

    /// Clears a node's parent and sibling links, returning its old right sibling
    fn detach(&mut self, id: NodeId) -> Option<NodeId> {
        let node = self.store.node_mut(id);
        node.parent = None;
        node.left = None;
        node.right.take()
    }

    /// Two-pass pairing of a detached sibling list into one tree
    fn consolidate(&mut self, first: Option<NodeId>) -> Option<NodeId> {
        // Pass 1, left to right: link adjacent pairs.
        let mut pending: SmallVec<[NodeId; 32]> = SmallVec::new();
        let mut cursor = first;
        while let Some(a) = cursor {
            match self.detach(a) {
                Some(b) => {
                    cursor = self.detach(b);
                    let winner = self.link(a, b);
                    pending.push(winner);
                }
                None => {
                    pending.push(a);
                    cursor = None;
                }
            }
        }
        trace!("consolidating {} subtrees", pending.len());

        // Pass 2, right to left: fold into the rightmost tree.
        let mut result = pending.pop()?;
        while let Some(left) = pending.pop() {
            result = self.link(left, result);
        }
        Some(result)
    }

    /// Splices a non-root node out of its parent's child list
    fn cut(&mut self, id: NodeId) {
        let Node {
            parent,
            left,
            right,
            ..
        } = *self.store.node(id);

        match left {
            Some(left) => self.store.node_mut(left).right = right,
            None => {
                if let Some(parent) = parent {
                    self.store.node_mut(parent).child = right;
                }
            }
        }
        if let Some(right) = right {
            self.store.node_mut(right).left = left;
        }
        self.detach(id);
    }

    #[cfg(feature = "invariant-checks")]
    fn check_invariants(&self) {
        if let Err(violation) = self.validate() {
            panic!("pairing heap invariant broken: {violation}");
        }
    }

    #[cfg(not(feature = "invariant-checks"))]
    #[inline(always)]
    fn check_invariants(&self) {}
}

impl<T, C: Compare<T>, I: Locate<T>> PairingHeap<T, C, I> {
    /// Replaces a queued value with an improved one of the same identity
    ///
    /// The new value must not go after the one it replaces. This is not
    /// checked; a worse value silently breaks the heap order.
    ///
    /// # Errors
    /// Returns `HeapError::UntrackedValue` if the value's identity is not queued.
    pub fn update(&mut self, value: T) -> Result<(), HeapError> {
        let (id, root) = match (self.resolve(&value), self.root) {
            (Some(id), Some(root)) => (id, root),
            _ => return Err(HeapError::UntrackedValue),
        };
        *self.store.value_mut(id) = value;
        if id == root {
            return Ok(());
        }

        trace!("decrease-key cuts {id:?} from its parent");
        self.cut(id);
        self.root = Some(self.link(id, root));
        self.check_invariants();
        Ok(())
    }

    /// Returns true if a value with this identity is queued
    pub fn contains(&self, value: &T) -> bool {
        self.resolve(value).is_some()
    }
}

impl<T, C: Compare<T>, I: PositionIndex<T>> PriorityQueue<T> for PairingHeap<T, C, I> {
    fn is_empty(&self) -> bool {
        PairingHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        PairingHeap::len(self)
    }

    fn push(&mut self, value: T) -> Result<(), HeapError> {
        PairingHeap::push(self, value)
    }

    fn top(&self) -> Option<&T> {
        PairingHeap::top(self)
    }

    fn pop(&mut self) -> Option<T> {
        PairingHeap::pop(self)
    }
}

impl<T, C: Compare<T>, I: Locate<T>> MutablePriorityQueue<T> for PairingHeap<T, C, I> {
    fn update(&mut self, value: T) -> Result<(), HeapError> {
        PairingHeap::update(self, value)
    }

    fn contains(&self, value: &T) -> bool {
        PairingHeap::contains(self, value)
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for PairingHeap<T, C, ReverseIndex> {
    fn from_iter<It: IntoIterator<Item = T>>(values: It) -> Self {
        let mut heap = Self::new();
        heap.extend(values);
        heap
    }
}

impl<T, C: Compare<T>> Extend<T> for PairingHeap<T, C, ReverseIndex> {
    fn extend<It: IntoIterator<Item = T>>(&mut self, values: It) {
        let values = values.into_iter();
        self.reserve(values.size_hint().0);
        for value in values {
            self.insert(value);
        }
    }
}

/// Display adapter returned by [`PairingHeap::dump`]
pub struct Dump<'a, T, C, I> {
    heap: &'a PairingHeap<T, C, I>,
}

enum Step {
    Node(NodeId),
    Text(&'static str),
}

impl<T: fmt::Display, C: Compare<T>, I: PositionIndex<T>> fmt::Display for Dump<'_, T, C, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = &self.heap.store;
        let mut stack: Vec<Step> = self.heap.root.map(Step::Node).into_iter().collect();
        let mut children: SmallVec<[NodeId; 8]> = SmallVec::new();

        while let Some(step) = stack.pop() {
            let id = match step {
                Step::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Step::Node(id) => id,
            };
            write!(f, "{}", store.value(id))?;

            children.clear();
            children.extend(std::iter::successors(store.node(id).child, |&c| {
                store.node(c).right
            }));
            if children.is_empty() {
                continue;
            }
            f.write_str("(")?;
            stack.push(Step::Text(")"));
            for (i, &child) in children.iter().enumerate().rev() {
                stack.push(Step::Node(child));
                if i > 0 {
                    stack.push(Step::Text(" "));
                }
            }
        }
        Ok(())
    }
}

impl<T: fmt::Display, C: Compare<T>, I: PositionIndex<T>> fmt::Display for PairingHeap<T, C, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.dump(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::MaxOrder;

    /// Value whose identity is `id` and whose priority is `cost`
    #[derive(Debug, Clone, Copy)]
    struct Item {
        id: u32,
        cost: i64,
    }

    impl PartialEq for Item {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    impl Eq for Item {}

    impl std::hash::Hash for Item {
        fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
            self.id.hash(state);
        }
    }

    fn by_cost(a: &Item, b: &Item) -> bool {
        a.cost < b.cost
    }

    type ItemHeap = MutablePairingHeap<Item, fn(&Item, &Item) -> bool>;

    fn item_heap() -> ItemHeap {
        PairingHeap::with_comparator(by_cost as fn(&Item, &Item) -> bool)
    }

    #[test]
    fn test_basic_operations() {
        let mut heap: MutablePairingHeap<i32> = MutablePairingHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.top(), None);
        assert_eq!(heap.pop(), None);

        heap.push(5).unwrap();
        heap.push(3).unwrap();
        heap.push(7).unwrap();

        assert_eq!(heap.top(), Some(&3));
        assert_eq!(heap.pop(), Some(3));
        assert_eq!(heap.top(), Some(&5));
        assert_eq!(heap.len(), 2);
        assert!(heap.validate().is_ok());
    }

    #[test]
    fn test_sort_correctness() {
        let heap = MutablePairingHeap::<i32>::from_values([5, 3, 8, 1], MinOrder).unwrap();
        assert_eq!(heap.into_sorted_vec(), vec![1, 3, 5, 8]);
    }

    #[test]
    fn test_decrease_key() {
        let mut heap = item_heap();
        heap.push(Item { id: 1, cost: 10 }).unwrap();
        heap.push(Item { id: 2, cost: 20 }).unwrap();
        heap.push(Item { id: 3, cost: 30 }).unwrap();
        assert_eq!(heap.top().map(|item| item.cost), Some(10));

        heap.update(Item { id: 3, cost: 5 }).unwrap();
        assert_eq!(heap.top().map(|item| (item.id, item.cost)), Some((3, 5)));
        assert!(heap.validate().is_ok());
    }

    #[test]
    fn test_decrease_key_of_root() {
        let mut heap = item_heap();
        heap.push(Item { id: 1, cost: 10 }).unwrap();
        heap.push(Item { id: 2, cost: 20 }).unwrap();

        heap.update(Item { id: 1, cost: 1 }).unwrap();
        assert_eq!(heap.top().map(|item| item.cost), Some(1));
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn test_decrease_key_inside_child_list() {
        let mut heap = item_heap();
        for id in 0..6 {
            heap.push(Item { id, cost: 100 + id as i64 }).unwrap();
        }
        // Root 0 has children 5 4 3 2 1; cut a middle one and the leftmost one.
        heap.update(Item { id: 3, cost: 50 }).unwrap();
        assert!(heap.validate().is_ok());
        heap.update(Item { id: 5, cost: 101 }).unwrap();
        assert!(heap.validate().is_ok());

        let order: Vec<u32> = heap.into_sorted_vec().iter().map(|item| item.id).collect();
        assert_eq!(order, vec![3, 0, 1, 5, 2, 4]);
    }

    #[test]
    fn test_duplicate_push_rejected() {
        let mut heap = item_heap();
        heap.push(Item { id: 7, cost: 1 }).unwrap();
        assert_eq!(
            heap.push(Item { id: 7, cost: 2 }),
            Err(HeapError::DuplicateValue)
        );
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_update_untracked_rejected() {
        let mut heap = item_heap();
        assert_eq!(
            heap.update(Item { id: 1, cost: 0 }),
            Err(HeapError::UntrackedValue)
        );
        heap.push(Item { id: 1, cost: 5 }).unwrap();
        heap.pop();
        assert_eq!(
            heap.update(Item { id: 1, cost: 0 }),
            Err(HeapError::UntrackedValue)
        );
        assert!(!heap.contains(&Item { id: 1, cost: 0 }));

        // A rejected update leaves the queued values untouched.
        heap.push(Item { id: 2, cost: 7 }).unwrap();
        assert_eq!(
            heap.update(Item { id: 3, cost: 0 }),
            Err(HeapError::UntrackedValue)
        );
        assert_eq!(heap.top().map(|item| (item.id, item.cost)), Some((2, 7)));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_popped_value_can_be_pushed_again() {
        let mut heap = item_heap();
        heap.push(Item { id: 1, cost: 5 }).unwrap();
        heap.push(Item { id: 2, cost: 6 }).unwrap();
        assert_eq!(heap.pop().map(|item| item.id), Some(1));
        heap.push(Item { id: 1, cost: 9 }).unwrap();
        assert_eq!(heap.len(), 2);
        assert!(heap.validate().is_ok());
    }

    #[test]
    fn test_pop_compacts_element_store() {
        let mut heap: MutablePairingHeap<i32> = MutablePairingHeap::new();
        for value in [4, 1, 3, 2] {
            heap.push(value).unwrap();
        }
        // 1 sits at element position 1; the tail value 2 must move into it.
        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.as_slice(), &[4, 2, 3]);
        assert!(heap.validate().is_ok());
        assert_eq!(heap.into_sorted_vec(), vec![2, 3, 4]);
    }

    #[test]
    fn test_dump_format() {
        let mut heap: PlainPairingHeap<i32> = PlainPairingHeap::new();
        assert_eq!(heap.dump().to_string(), "");
        for value in [1, 4, 3, 2] {
            heap.push(value).unwrap();
        }
        // Later pushes become the leftmost children of the root.
        assert_eq!(heap.to_string(), "1(2 3 4)");

        heap.pop();
        // Pass 1 links (2,3) -> 2(3) and leaves 4; pass 2 links 2(3) with 4.
        assert_eq!(heap.to_string(), "2(4 3)");
    }

    #[test]
    fn test_max_order() {
        let heap: PlainPairingHeap<i32, MaxOrder> = [3, 9, 1, 4].into_iter().collect();
        assert_eq!(heap.top(), Some(&9));
        assert_eq!(heap.into_sorted_vec(), vec![9, 4, 3, 1]);
    }

    #[test]
    fn test_plain_heap_accepts_equal_values() {
        let mut heap: PlainPairingHeap<i32> = PlainPairingHeap::new();
        heap.extend([2, 2, 1, 1]);
        assert_eq!(heap.len(), 4);
        assert_eq!(heap.into_sorted_vec(), vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_clear_and_reserve() {
        let mut heap: MutablePairingHeap<i32> = MutablePairingHeap::with_capacity(16);
        assert!(heap.capacity() >= 16);
        heap.push(1).unwrap();
        heap.push(2).unwrap();
        heap.clear();
        assert!(heap.is_empty());
        assert!(heap.index().is_empty());
        heap.push(1).unwrap();
        assert_eq!(heap.top(), Some(&1));
    }

    #[test]
    fn test_validate_detects_heap_order_breach() {
        let mut heap = item_heap();
        heap.push(Item { id: 1, cost: 1 }).unwrap();
        heap.push(Item { id: 2, cost: 2 }).unwrap();
        // Raising a key is a caller bug; validate must notice it.
        let child = heap.resolve(&Item { id: 2, cost: 0 }).unwrap();
        heap.store.value_mut(child).cost = -1;
        assert!(matches!(
            heap.validate(),
            Err(InvariantViolation::HeapOrder { .. })
        ));
    }

    /// Oracle that can be told to stop resolving one value
    #[derive(Default)]
    struct Forgetful {
        slots: rustc_hash::FxHashMap<u32, NodeId>,
        blind: std::cell::Cell<Option<u32>>,
    }

    impl crate::index::PositionMap<u32> for Forgetful {
        fn get(&self, value: &u32) -> Option<NodeId> {
            if self.blind.get() == Some(*value) {
                return None;
            }
            self.slots.get(value).copied()
        }

        fn set(&mut self, value: &u32, node: Option<NodeId>) {
            match node {
                Some(node) => self.slots.insert(*value, node),
                None => self.slots.remove(value),
            };
        }
    }

    #[test]
    #[should_panic(expected = "lost track")]
    fn test_pop_panics_when_oracle_loses_tail() {
        let mut heap: ExternalPairingHeap<u32, Forgetful> = PairingHeap::new();
        for value in [1, 2, 3] {
            heap.push(value).unwrap();
        }
        // 3 is the element tail; pop must relocate it and cannot.
        heap.index().inner().blind.set(Some(3));
        heap.pop();
    }

    #[test]
    fn test_comparator_panic_propagates() {
        use std::panic::{catch_unwind, AssertUnwindSafe};

        let armed = std::cell::Cell::new(false);
        let less = |a: &i32, b: &i32| {
            if armed.get() {
                panic!("comparator failure");
            }
            a < b
        };
        let mut heap: PlainPairingHeap<i32, _> = PairingHeap::with_comparator(less);
        for value in 0..8 {
            heap.push(value).unwrap();
        }

        armed.set(true);
        let result = catch_unwind(AssertUnwindSafe(|| heap.pop()));
        assert!(result.is_err());
        armed.set(false);

        // The root lost its children mid-consolidation; the heap is invalid
        // but every call stays memory safe.
        assert_eq!(heap.len(), 8);
        assert_eq!(heap.top(), Some(&0));
        assert!(matches!(
            heap.validate(),
            Err(InvariantViolation::Unreachable(_))
        ));

        #[cfg(not(feature = "invariant-checks"))]
        {
            assert_eq!(heap.pop(), Some(0));
            assert_eq!(heap.pop(), None);
            assert_eq!(heap.len(), 7);
        }
    }
}
