//! Partition manager
//!
//! `PartitionManager` owns the parent network and its partition assignment
//! and exposes the two halves of the crate's contract: extracting any one
//! partition as a self-contained window, and reintegrating an externally
//! optimized replacement for it. The driver loop it serves looks like:
//!
//! ```text
//! window = manager.partition(id)        -> hand to external optimizer
//! manager.integrate_with_window(id, &window, &optimized)
//! ```
//!
//! Execution is single-threaded by construction: reintegration takes `&mut
//! self`, so callers optimizing partitions in parallel must serialize their
//! `integrate` calls against one manager.

use crate::error::{PartitionError, Result};
use crate::network::{Network, NetworkMut, NodeId};
use crate::partition::{PartitionId, PartitionMap};
use crate::reintegrate;
use crate::window::{self, Window};

/// Owner of a network and its partition assignment
#[derive(Debug, Clone)]
pub struct PartitionManager<N: NetworkMut> {
    network: N,
    partitions: PartitionMap,
    partition_count: u32,
}

impl<N: NetworkMut> PartitionManager<N> {
    /// Take ownership of a network, its partition assignment, and the total
    /// number of partitions the assignment uses
    pub fn new(network: N, partitions: PartitionMap, partition_count: u32) -> Self {
        Self {
            network,
            partitions,
            partition_count,
        }
    }

    /// Extract the window of one partition.
    ///
    /// Recomputed from the live network on every call; an id with no
    /// members yields an empty window.
    pub fn partition(&self, id: PartitionId) -> Window {
        window::extract(&self.network, &self.partitions, id)
    }

    /// Extract the partition's current window, then reintegrate `optimized`
    /// in its place
    pub fn integrate<O: Network>(&mut self, id: PartitionId, optimized: &O) -> Result<()> {
        let win = self.partition(id);
        self.integrate_with_window(id, &win, optimized)
    }

    /// Reintegrate `optimized` in place of a previously extracted window.
    ///
    /// The i-th primary input/output of `optimized` must correspond to the
    /// i-th window input/output; only the counts are validated here.
    pub fn integrate_with_window<O: Network>(
        &mut self,
        id: PartitionId,
        window: &Window,
        optimized: &O,
    ) -> Result<()> {
        reintegrate::integrate(&mut self.network, &mut self.partitions, id, window, optimized)
    }

    /// The partition a node is assigned to
    pub fn node_partition(&self, node: NodeId) -> Result<PartitionId> {
        self.partitions
            .get(node)
            .ok_or(PartitionError::Unassigned(node))
    }

    /// Total number of partitions
    pub fn count(&self) -> u32 {
        self.partition_count
    }

    /// Shared access to the owned network
    pub fn network(&self) -> &N {
        &self.network
    }

    /// Exclusive access to the owned network. Mutations made through this
    /// handle must keep the partition assignment total over non-constant
    /// nodes.
    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    /// Give the network back, dropping the partition bookkeeping
    pub fn into_network(self) -> N {
        self.network
    }
}
