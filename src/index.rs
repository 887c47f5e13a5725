//! Position index strategies
//!
//! The heap must be able to find the node that owns a given value: to
//! decrease its key, to reject duplicate pushes, and to repoint the tail value
//! when `pop` swap-compacts the element store. Three strategies satisfy the
//! [`PositionIndex`] seam:
//!
//! - [`ExternalIndex`]: delegates to a caller-owned [`PositionMap`] oracle
//! - [`HashIndex`]: owns an `FxHashMap` from value identity to node slot
//! - [`ReverseIndex`]: owns a dense `Vec` from element position to node slot
//!
//! Only the first two can resolve a value without knowing where it is
//! stored, so only they implement [`Locate`] and support `update`.

use crate::storage::NodeId;
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Strategy seam between the heap core and its position bookkeeping
pub trait PositionIndex<T> {
    /// Node slot owning `value`, which is stored at element `position`
    fn owner(&self, value: &T, position: usize) -> Option<NodeId>;

    /// Records a freshly pushed `value` stored at the element tail `position`
    fn insert(&mut self, value: &T, position: usize, node: NodeId);

    /// Forgets `removed`, which was stored at `position`
    ///
    /// When the element store was compacted, `moved` holds the former tail
    /// value (now stored at `position`) and the node that still owns it.
    fn swap_remove(&mut self, removed: &T, position: usize, moved: Option<(&T, NodeId)>);

    /// Forgets every value in `live`
    fn clear(&mut self, live: &[T]);

    fn reserve(&mut self, _additional: usize) {}

    /// Node slot owning the value with this identity
    ///
    /// Strategies that cannot resolve a value by identity return `None`.
    fn locate(&self, _value: &T) -> Option<NodeId> {
        None
    }
}

/// Strategies whose [`PositionIndex::locate`] is authoritative
///
/// Heaps over these strategies reject duplicate pushes and support `update`.
pub trait Locate<T>: PositionIndex<T> {}

/// Caller-supplied oracle mapping value identity to node slot
///
/// The heap calls `set(value, Some(node))` on push and `set(value, None)` when
/// the value is popped or cleared. `get` must return exactly what was last set.
pub trait PositionMap<T> {
    fn get(&self, value: &T) -> Option<NodeId>;
    fn set(&mut self, value: &T, node: Option<NodeId>);
}

impl<T, M: PositionMap<T> + ?Sized> PositionMap<T> for &mut M {
    #[inline]
    fn get(&self, value: &T) -> Option<NodeId> {
        (**self).get(value)
    }

    #[inline]
    fn set(&mut self, value: &T, node: Option<NodeId>) {
        (**self).set(value, node)
    }
}

/// Position index backed by a caller-owned oracle
///
/// Lend the oracle with `ExternalIndex::new(&mut oracle)` to keep ownership,
/// or move it in and take it back with [`ExternalIndex::into_inner`].
#[derive(Debug, Clone, Default)]
pub struct ExternalIndex<M> {
    map: M,
}

impl<M> ExternalIndex<M> {
    pub fn new(map: M) -> Self {
        Self { map }
    }

    pub fn inner(&self) -> &M {
        &self.map
    }

    pub fn into_inner(self) -> M {
        self.map
    }
}

impl<T, M: PositionMap<T>> PositionIndex<T> for ExternalIndex<M> {
    fn owner(&self, value: &T, _position: usize) -> Option<NodeId> {
        self.locate(value)
    }

    fn insert(&mut self, value: &T, _position: usize, node: NodeId) {
        self.map.set(value, Some(node));
    }

    fn swap_remove(&mut self, removed: &T, _position: usize, _moved: Option<(&T, NodeId)>) {
        // The moved value keeps its node, so its entry is already right.
        self.map.set(removed, None);
    }

    fn clear(&mut self, live: &[T]) {
        for value in live {
            self.map.set(value, None);
        }
    }

    fn locate(&self, value: &T) -> Option<NodeId> {
        self.map.get(value)
    }
}

impl<T, M: PositionMap<T>> Locate<T> for ExternalIndex<M> {}

/// Position index owning a hash map keyed by value identity
///
/// Identity is the value's `Hash`/`Eq`. Both must ignore whatever part of the
/// value `update` is allowed to change.
#[derive(Debug, Clone)]
pub struct HashIndex<T> {
    map: FxHashMap<T, NodeId>,
}

impl<T> Default for HashIndex<T> {
    fn default() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }
}

impl<T: Hash + Eq> HashIndex<T> {
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<T: Hash + Eq + Clone> PositionIndex<T> for HashIndex<T> {
    fn owner(&self, value: &T, _position: usize) -> Option<NodeId> {
        self.locate(value)
    }

    fn insert(&mut self, value: &T, _position: usize, node: NodeId) {
        self.map.insert(value.clone(), node);
    }

    fn swap_remove(&mut self, removed: &T, _position: usize, _moved: Option<(&T, NodeId)>) {
        self.map.remove(removed);
    }

    fn clear(&mut self, _live: &[T]) {
        self.map.clear();
    }

    fn reserve(&mut self, additional: usize) {
        self.map.reserve(additional);
    }

    fn locate(&self, value: &T) -> Option<NodeId> {
        self.map.get(value).copied()
    }
}

impl<T: Hash + Eq + Clone> Locate<T> for HashIndex<T> {}

/// Position index owning a dense array from element position to node slot
///
/// No hashing and no requirements on `T`, but a value can only be resolved
/// once its element position is known, so heaps using this strategy support
/// push and pop only.
#[derive(Debug, Clone, Default)]
pub struct ReverseIndex {
    owners: Vec<NodeId>,
}

impl ReverseIndex {
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl<T> PositionIndex<T> for ReverseIndex {
    fn owner(&self, _value: &T, position: usize) -> Option<NodeId> {
        self.owners.get(position).copied()
    }

    fn insert(&mut self, _value: &T, position: usize, node: NodeId) {
        debug_assert_eq!(position, self.owners.len());
        self.owners.push(node);
    }

    fn swap_remove(&mut self, _removed: &T, position: usize, _moved: Option<(&T, NodeId)>) {
        self.owners.swap_remove(position);
    }

    fn clear(&mut self, _live: &[T]) {
        self.owners.clear();
    }

    fn reserve(&mut self, additional: usize) {
        self.owners.reserve(additional);
    }
}
