//! Mutable Pairing Heap for Rust
//!
//! This crate provides an array-backed pairing heap with an in-place
//! decrease-key (`update`) operation, built for graph searches such as
//! Dijkstra's and Prim's algorithms that need to lower the priority of an
//! element already in the queue.
//!
//! # Features
//!
//! - **Dense storage**: values and tree nodes live in two parallel vectors;
//!   all links are indices, never references
//! - **Pluggable position index**: a caller-owned oracle, an owned hash map,
//!   or an owned position array, behind one generic heap core
//! - **Injected comparator**: min-heap, max-heap, or any closure
//! - O(1) amortized push; O(log n) amortized pop and update
//!
//! # Example
//!
//! ```rust
//! use mutable_pairing_heap::{MutablePairingHeap, PairingHeap};
//!
//! #[derive(Clone, Debug)]
//! struct Vertex { id: usize, distance: u64 }
//!
//! impl PartialEq for Vertex {
//!     fn eq(&self, other: &Self) -> bool { self.id == other.id }
//! }
//! impl Eq for Vertex {}
//! impl std::hash::Hash for Vertex {
//!     fn hash<H: std::hash::Hasher>(&self, h: &mut H) { self.id.hash(h) }
//! }
//!
//! let mut heap: MutablePairingHeap<Vertex, _> = PairingHeap::with_comparator(
//!     |a: &Vertex, b: &Vertex| a.distance < b.distance,
//! );
//! heap.push(Vertex { id: 0, distance: 10 }).unwrap();
//! heap.push(Vertex { id: 1, distance: 20 }).unwrap();
//! heap.push(Vertex { id: 2, distance: 30 }).unwrap();
//!
//! heap.update(Vertex { id: 2, distance: 5 }).unwrap();
//! assert_eq!(heap.top().map(|v| v.id), Some(2));
//! ```

pub mod compare;
pub mod index;
pub mod pairing;
pub mod pathfinding;
pub mod storage;
pub mod traits;

pub use compare::{Compare, MaxOrder, MinOrder};
pub use index::{ExternalIndex, HashIndex, Locate, PositionIndex, PositionMap, ReverseIndex};
pub use pairing::{
    ExternalPairingHeap, InvariantViolation, MutablePairingHeap, PairingHeap, PlainPairingHeap,
};
pub use storage::NodeId;
pub use traits::{HeapError, MutablePriorityQueue, PriorityQueue};
