//! Dijkstra's shortest paths over the mutable pairing heap
//!
//! The search keeps one frontier entry per discovered vertex and lowers its
//! distance in place with `update` instead of pushing duplicates. The heap
//! resolves entries through an external oracle: a per-vertex slot table that
//! the search owns and lends to the heap for the duration of the run.
//!
//! # Example
//!
//! ```rust
//! use mutable_pairing_heap::pathfinding::dijkstra;
//!
//! // 0 -> 1 (4), 0 -> 2 (1), 2 -> 1 (2)
//! let graph = vec![vec![(1, 4), (2, 1)], vec![], vec![(1, 2)]];
//! let paths = dijkstra(&graph, 0).unwrap();
//! assert_eq!(paths.distance(1), Some(3));
//! assert_eq!(paths.path_to(1), Some(vec![0, 2, 1]));
//! ```

use crate::index::{ExternalIndex, PositionMap};
use crate::pairing::{ExternalPairingHeap, PairingHeap};
use crate::storage::NodeId;
use crate::traits::HeapError;
use log::trace;

/// Adjacency list: `graph[u]` holds `(v, weight)` for every edge `u -> v`
pub type Graph = [Vec<(usize, u64)>];

/// A queued vertex and its tentative distance
///
/// Identity is the vertex alone.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    vertex: usize,
    distance: u64,
}

fn closer(a: &Frontier, b: &Frontier) -> bool {
    a.distance < b.distance
}

/// Slot table indexed by vertex
struct VertexSlots(Vec<Option<NodeId>>);

impl PositionMap<Frontier> for VertexSlots {
    fn get(&self, value: &Frontier) -> Option<NodeId> {
        self.0[value.vertex]
    }

    fn set(&mut self, value: &Frontier, node: Option<NodeId>) {
        self.0[value.vertex] = node;
    }
}

type FrontierOrder = fn(&Frontier, &Frontier) -> bool;
type FrontierHeap<'a> = ExternalPairingHeap<Frontier, &'a mut VertexSlots, FrontierOrder>;

/// Result of a single-source search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    source: usize,
    distances: Vec<Option<u64>>,
    predecessors: Vec<Option<usize>>,
}

impl ShortestPaths {
    pub fn source(&self) -> usize {
        self.source
    }

    /// Shortest distance from the source, or `None` if unreachable
    pub fn distance(&self, vertex: usize) -> Option<u64> {
        self.distances.get(vertex).copied().flatten()
    }

    pub fn distances(&self) -> &[Option<u64>] {
        &self.distances
    }

    /// Vertices on a shortest path from the source to `vertex`, inclusive
    pub fn path_to(&self, vertex: usize) -> Option<Vec<usize>> {
        self.distance(vertex)?;
        let mut path = vec![vertex];
        let mut current = vertex;
        while let Some(previous) = self.predecessors[current] {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Some(path)
    }
}

/// Single-source shortest paths with non-negative edge weights
///
/// Distances saturate at `u64::MAX`. A source outside the graph reaches nothing.
///
/// # Errors
/// Propagates a `HeapError` if the frontier loses track of a vertex, which
/// indicates a bug in the heap rather than bad input.
///
/// # Panics
/// Panics if an edge targets a vertex outside the graph.
pub fn dijkstra(graph: &Graph, source: usize) -> Result<ShortestPaths, HeapError> {
    let n = graph.len();
    let mut paths = ShortestPaths {
        source,
        distances: vec![None; n],
        predecessors: vec![None; n],
    };
    if source >= n {
        return Ok(paths);
    }

    let mut slots = VertexSlots(vec![None; n]);
    let mut frontier: FrontierHeap<'_> =
        PairingHeap::with_index(closer as FrontierOrder, ExternalIndex::new(&mut slots));

    paths.distances[source] = Some(0);
    frontier.push(Frontier {
        vertex: source,
        distance: 0,
    })?;

    let mut settled = 0usize;
    while let Some(Frontier { vertex, distance }) = frontier.pop() {
        settled += 1;
        for &(next, weight) in &graph[vertex] {
            let candidate = distance.saturating_add(weight);
            if paths.distances[next].is_some_and(|known| known <= candidate) {
                continue;
            }
            paths.distances[next] = Some(candidate);
            paths.predecessors[next] = Some(vertex);

            let entry = Frontier {
                vertex: next,
                distance: candidate,
            };
            if frontier.contains(&entry) {
                frontier.update(entry)?;
            } else {
                frontier.push(entry)?;
            }
        }
    }
    trace!("dijkstra from {source} settled {settled} of {n} vertices");
    Ok(paths)
}
