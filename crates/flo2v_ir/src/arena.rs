//! Dense, ID-indexed storage for graph nodes and operations.
//!
//! Items are appended in source order and never removed, so an [`Arena`]
//! iterates in exactly the order the IR was read.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::Index;

/// A graph ID that indexes an [`Arena`].
pub trait ArenaId: Copy {
    /// Creates an ID from a raw `u32` index.
    fn from_raw(index: u32) -> Self;

    /// Returns the raw `u32` index.
    fn as_raw(self) -> u32;
}

/// Append-only storage addressed by [`NodeId`](crate::NodeId) or [`OpId`](crate::OpId).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arena<I: ArenaId, T> {
    items: Vec<T>,
    #[serde(skip)]
    _marker: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates a new, empty arena.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Appends an item and returns its ID.
    pub fn alloc(&mut self, item: T) -> I {
        let id = I::from_raw(self.items.len() as u32);
        self.items.push(item);
        id
    }

    /// Returns the item with the given ID, or `None` for an ID minted by another graph.
    pub fn get(&self, id: I) -> Option<&T> {
        self.items.get(id.as_raw() as usize)
    }

    pub(crate) fn get_mut(&mut self, id: I) -> &mut T {
        &mut self.items[id.as_raw() as usize]
    }

    /// Returns `true` if `id` addresses an item of this arena.
    pub fn contains(&self, id: I) -> bool {
        (id.as_raw() as usize) < self.items.len()
    }

    /// Returns the number of items in the arena.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the arena contains no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over `(ID, &T)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (I::from_raw(i as u32), item))
    }

    /// Iterates over references to items in allocation order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    /// Panics if `id` is out of range. Graphs that passed
    /// [`Graph::validate`](crate::Graph::validate) never are.
    fn index(&self, id: I) -> &T {
        &self.items[id.as_raw() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{NodeId, OpId};

    #[test]
    fn alloc_preserves_order() {
        let mut arena: Arena<NodeId, &str> = Arena::new();
        let a = arena.alloc("Top:a");
        let b = arena.alloc("Top:b");
        assert_eq!(arena[a], "Top:a");
        assert_eq!(arena[b], "Top:b");
        let names: Vec<_> = arena.values().copied().collect();
        assert_eq!(names, vec!["Top:a", "Top:b"]);
    }

    #[test]
    fn iter_ids_are_sequential() {
        let mut arena: Arena<OpId, u32> = Arena::new();
        arena.alloc(100);
        arena.alloc(200);
        let ids: Vec<u32> = arena.iter().map(|(id, _)| id.as_raw()).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn get_out_of_range() {
        let mut arena: Arena<NodeId, u32> = Arena::new();
        arena.alloc(1);
        assert_eq!(arena.get(NodeId::from_raw(0)), Some(&1));
        assert!(arena.get(NodeId::from_raw(1)).is_none());
        assert!(!arena.contains(NodeId::from_raw(7)));
    }

    #[test]
    fn default_is_empty() {
        let arena: Arena<NodeId, u32> = Arena::default();
        assert!(arena.is_empty());
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn serializes_as_plain_list() {
        let mut arena: Arena<NodeId, String> = Arena::new();
        arena.alloc("first".to_string());
        arena.alloc("second".to_string());
        let json = serde_json::to_string(&arena).unwrap();
        assert_eq!(json, r#"["first","second"]"#);
        let restored: Arena<NodeId, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored[NodeId::from_raw(1)], "second");
    }
}
