//! Shared fixtures for the integration tests

#![allow(dead_code)]

use mutable_pairing_heap::{
    ExternalIndex, ExternalPairingHeap, MutablePairingHeap, NodeId, PairingHeap, PositionMap,
};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Value whose identity is `id` and whose priority is `cost`
#[derive(Debug, Clone, Copy)]
pub struct Item {
    pub id: u32,
    pub cost: i64,
}

impl Item {
    pub fn new(id: u32, cost: i64) -> Self {
        Item { id, cost }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

pub type ItemOrder = fn(&Item, &Item) -> bool;

pub fn by_cost(a: &Item, b: &Item) -> bool {
    a.cost < b.cost
}

/// External oracle keyed by item id, grown on demand
#[derive(Debug, Default)]
pub struct ItemSlots(Vec<Option<NodeId>>);

impl PositionMap<Item> for ItemSlots {
    fn get(&self, value: &Item) -> Option<NodeId> {
        self.0.get(value.id as usize).copied().flatten()
    }

    fn set(&mut self, value: &Item, node: Option<NodeId>) {
        let slot = value.id as usize;
        if self.0.len() <= slot {
            self.0.resize(slot + 1, None);
        }
        self.0[slot] = node;
    }
}

impl ItemSlots {
    pub fn tracked(&self) -> usize {
        self.0.iter().filter(|slot| slot.is_some()).count()
    }
}

/// External oracle keyed by the whole value
#[derive(Debug)]
pub struct TreeOracle<T>(pub BTreeMap<T, NodeId>);

impl<T> Default for TreeOracle<T> {
    fn default() -> Self {
        TreeOracle(BTreeMap::new())
    }
}

impl<T: Ord + Clone> PositionMap<T> for TreeOracle<T> {
    fn get(&self, value: &T) -> Option<NodeId> {
        self.0.get(value).copied()
    }

    fn set(&mut self, value: &T, node: Option<NodeId>) {
        match node {
            Some(node) => {
                self.0.insert(value.clone(), node);
            }
            None => {
                self.0.remove(value);
            }
        }
    }
}

pub fn hashed_items() -> MutablePairingHeap<Item, ItemOrder> {
    PairingHeap::with_comparator(by_cost as ItemOrder)
}

pub fn external_items() -> ExternalPairingHeap<Item, ItemSlots, ItemOrder> {
    PairingHeap::with_index(by_cost as ItemOrder, ExternalIndex::new(ItemSlots::default()))
}

pub fn external_ints() -> ExternalPairingHeap<i32, TreeOracle<i32>> {
    PairingHeap::new()
}
