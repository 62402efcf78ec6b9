//! Partition identifiers and dense node-indexed maps
//!
//! Both the partition assignment and the old-to-new correspondence built
//! during reintegration are keyed by node identity in a network that grows
//! as nodes are cloned. `NodeMap` keeps those lookups O(1) over the whole
//! clone loop: a plain `Vec` indexed by `NodeId`, grown explicitly with
//! `grow_for` before any write to a freshly created node's slot, with no
//! hashing or rehashing involved.

use crate::network::NodeId;
use serde::{Deserialize, Serialize};

/// Identifier of one partition of a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartitionId(pub u32);

/// Dense node-indexed map backed by a `Vec`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeMap<T> {
    slots: Vec<T>,
}

impl<T: Clone + Default> NodeMap<T> {
    /// Empty map
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Map with default-valued slots for `node_count` nodes
    pub fn with_capacity_for(node_count: usize) -> Self {
        Self {
            slots: vec![T::default(); node_count],
        }
    }

    /// Ensure slots exist for `node_count` nodes, filling new slots with the
    /// default value. Never shrinks.
    pub fn grow_for(&mut self, node_count: usize) {
        if node_count > self.slots.len() {
            self.slots.resize(node_count, T::default());
        }
    }

    /// Number of slots currently allocated
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Write a node's slot, growing the map if the node is new
    pub fn set(&mut self, node: NodeId, value: T) {
        self.grow_for(node.index() + 1);
        self.slots[node.index()] = value;
    }
}

impl<T: Clone + Default> Default for NodeMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::ops::Index<NodeId> for NodeMap<T> {
    type Output = T;

    fn index(&self, node: NodeId) -> &T {
        &self.slots[node.index()]
    }
}

/// Assignment of non-constant nodes to partitions.
///
/// Total over the non-constant nodes of the network it was built for; grows
/// monotonically as reintegration clones new nodes, and is never shrunk.
/// Constant nodes have no assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartitionMap {
    ids: NodeMap<Option<PartitionId>>,
}

impl PartitionMap {
    /// Empty assignment
    pub fn new() -> Self {
        Self {
            ids: NodeMap::new(),
        }
    }

    /// Empty assignment with slots for `node_count` nodes
    pub fn with_capacity_for(node_count: usize) -> Self {
        Self {
            ids: NodeMap::with_capacity_for(node_count),
        }
    }

    /// Build an assignment from (node, partition) pairs
    pub fn from_assignments(pairs: impl IntoIterator<Item = (NodeId, PartitionId)>) -> Self {
        let mut map = Self::new();
        for (node, id) in pairs {
            map.assign(node, id);
        }
        map
    }

    /// Assign a node to a partition, growing the map if the node is new
    pub fn assign(&mut self, node: NodeId, id: PartitionId) {
        self.ids.set(node, Some(id));
    }

    /// The partition a node belongs to, `None` if it has no assignment
    /// (constants, or nodes outside the map)
    pub fn get(&self, node: NodeId) -> Option<PartitionId> {
        if node.index() < self.ids.len() {
            self.ids[node]
        } else {
            None
        }
    }

    /// Whether a node is assigned to `id`
    pub fn is_member(&self, node: NodeId, id: PartitionId) -> bool {
        self.get(node) == Some(id)
    }

    /// Ensure slots exist for `node_count` nodes
    pub fn grow_for(&mut self, node_count: usize) {
        self.ids.grow_for(node_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_map_grows_on_write() {
        let mut map: NodeMap<Option<u32>> = NodeMap::new();
        assert!(map.is_empty());
        map.set(NodeId(5), Some(7));
        assert_eq!(map.len(), 6);
        assert_eq!(map[NodeId(5)], Some(7));
        assert_eq!(map[NodeId(2)], None);
    }

    #[test]
    fn node_map_grow_never_shrinks() {
        let mut map: NodeMap<u8> = NodeMap::with_capacity_for(10);
        map.grow_for(4);
        assert_eq!(map.len(), 10);
        map.grow_for(12);
        assert_eq!(map.len(), 12);
    }

    #[test]
    fn partition_map_lookup() {
        let map = PartitionMap::from_assignments([
            (NodeId(1), PartitionId(0)),
            (NodeId(2), PartitionId(1)),
        ]);
        assert_eq!(map.get(NodeId(1)), Some(PartitionId(0)));
        assert_eq!(map.get(NodeId(2)), Some(PartitionId(1)));
        // Constant node 0 was never assigned.
        assert_eq!(map.get(NodeId(0)), None);
        // Out-of-range lookups are simply unassigned.
        assert_eq!(map.get(NodeId(99)), None);
        assert!(map.is_member(NodeId(2), PartitionId(1)));
        assert!(!map.is_member(NodeId(2), PartitionId(0)));
    }
}
