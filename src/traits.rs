//! Common traits for the pairing heap facade
//!
//! This module provides a two-tier trait hierarchy for priority queues:
//!
//! - [`PriorityQueue`]: push / top / pop over values ordered by a comparator
//! - [`MutablePriorityQueue`]: adds `update` (decrease-key) for queues that can
//!   resolve a value back to its position inside the heap
//!
//! The base trait mirrors the shape of `std::collections::BinaryHeap`, except
//! that the queue is ordered by an injected comparator and the value itself is
//! the priority.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `push` was given a value whose identity is already tracked
    DuplicateValue,
    /// `update` was given a value whose identity is not tracked
    UntrackedValue,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::DuplicateValue => {
                write!(f, "value is already tracked by the heap")
            }
            HeapError::UntrackedValue => {
                write!(f, "value is not tracked by the heap")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Base trait for priority queues ordered by a comparator
///
/// # Example
///
/// ```rust
/// use mutable_pairing_heap::{PlainPairingHeap, PriorityQueue};
///
/// let mut heap: PlainPairingHeap<i32> = PlainPairingHeap::new();
/// heap.push(3).unwrap();
/// heap.push(1).unwrap();
/// heap.push(2).unwrap();
///
/// assert_eq!(heap.top(), Some(&1));
/// assert_eq!(heap.pop(), Some(1));
/// ```
pub trait PriorityQueue<T> {
    /// Returns true if the queue is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the queue
    fn len(&self) -> usize;

    /// Inserts a value
    ///
    /// # Errors
    /// Returns `HeapError::DuplicateValue` if the queue can tell that the
    /// value's identity is already queued.
    ///
    /// # Time Complexity
    /// O(1) amortized
    fn push(&mut self, value: T) -> Result<(), HeapError>;

    /// Returns the value that goes first under the comparator
    ///
    /// The reference is invalidated by any later `push`, `pop` or `update`.
    ///
    /// # Time Complexity
    /// O(1)
    fn top(&self) -> Option<&T>;

    /// Removes and returns the value that goes first under the comparator
    ///
    /// # Time Complexity
    /// O(log n) amortized
    fn pop(&mut self) -> Option<T>;
}

/// Extended queue trait with decrease-key support
///
/// # Example
///
/// ```rust
/// use mutable_pairing_heap::{MutablePairingHeap, MutablePriorityQueue, PairingHeap, PriorityQueue};
///
/// #[derive(Clone, Debug)]
/// struct Task { id: u32, cost: u32 }
///
/// impl PartialEq for Task {
///     fn eq(&self, other: &Self) -> bool { self.id == other.id }
/// }
/// impl Eq for Task {}
/// impl std::hash::Hash for Task {
///     fn hash<H: std::hash::Hasher>(&self, h: &mut H) { self.id.hash(h) }
/// }
///
/// let mut heap: MutablePairingHeap<Task, _> =
///     PairingHeap::with_comparator(|a: &Task, b: &Task| a.cost < b.cost);
/// heap.push(Task { id: 1, cost: 10 }).unwrap();
/// heap.push(Task { id: 2, cost: 20 }).unwrap();
/// heap.update(Task { id: 2, cost: 5 }).unwrap();
/// assert_eq!(heap.top().map(|t| t.id), Some(2));
/// ```
pub trait MutablePriorityQueue<T>: PriorityQueue<T> {
    /// Replaces a queued value with an improved one of the same identity
    ///
    /// The new value must not go after the old one under the comparator.
    /// This is not checked; violating it silently breaks the heap order.
    ///
    /// # Errors
    /// Returns `HeapError::UntrackedValue` if the value's identity is not queued.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    fn update(&mut self, value: T) -> Result<(), HeapError>;

    /// Returns true if a value with this identity is queued
    fn contains(&self, value: &T) -> bool;
}
