//! Partition window extraction
//!
//! A `Window` is the induced sub-network of one partition: its boundary
//! inputs, boundary outputs, and internal gates. It is a derived value -
//! recomputed from the live network and partition map on every request,
//! never cached - and read as a stand-alone sub-network whose primary
//! inputs are `inputs` (in order) and primary outputs are `outputs` (in
//! order).

use crate::network::{Network, NodeId, Signal};
use crate::partition::{PartitionId, PartitionMap};
use serde::{Deserialize, Serialize};

/// Boundary view of one partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Boundary-input nodes: the partition's own primary inputs plus every
    /// node outside the partition feeding a gate inside it. Sorted by node
    /// id, deduplicated.
    pub inputs: Vec<NodeId>,
    /// Boundary-output signals: members whose signal is consumed outside
    /// the partition or drives a parent primary output. Sorted, deduplicated.
    pub outputs: Vec<Signal>,
    /// Internal gates of the partition, in scan order
    pub gates: Vec<NodeId>,
}

impl Window {
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// Whether the window has no members and no boundary
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty() && self.gates.is_empty()
    }

    /// Check the closure invariant: every fanin of every window gate is a
    /// window input, another window gate, or a constant (constants are
    /// globally shared and never cross a boundary).
    pub fn is_self_contained<N: Network>(&self, ntk: &N) -> bool {
        self.gates.iter().all(|&g| {
            ntk.fanins(g).iter().all(|f| {
                ntk.is_constant(f.node)
                    || self.inputs.binary_search(&f.node).is_ok()
                    || self.gates.contains(&f.node)
            })
        })
    }
}

/// Extract the window of partition `id` with a single scan over all nodes.
///
/// An id with no members yields an empty window; extraction never fails.
pub fn extract<N: Network>(ntk: &N, partitions: &PartitionMap, id: PartitionId) -> Window {
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    let mut gates = Vec::new();

    for idx in 0..ntk.node_count() {
        let n = NodeId(idx as u32);
        if ntk.is_constant(n) || !partitions.is_member(n, id) {
            continue;
        }
        if ntk.is_input(n) {
            inputs.push(n);
        } else {
            gates.push(n);
            // Every fanin reaching across the boundary becomes a window input.
            for f in ntk.fanins(n) {
                let fin = f.node;
                if !partitions.is_member(fin, id) && !ntk.is_constant(fin) {
                    inputs.push(fin);
                }
            }
        }
        // A member consumed outside the partition is a boundary output.
        if ntk
            .fanouts(n)
            .iter()
            .any(|&consumer| !partitions.is_member(consumer, id))
        {
            outputs.push(Signal::from_node(n));
        }
        // So is a member driving a parent primary output.
        if ntk.outputs().iter().any(|s| s.node == n) {
            outputs.push(Signal::from_node(n));
        }
    }

    inputs.sort_unstable();
    inputs.dedup();
    outputs.sort_unstable();
    outputs.dedup();

    Window {
        inputs,
        outputs,
        gates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate_network::GateNetwork;
    use crate::network::GateFn;

    #[test]
    fn empty_partition_yields_empty_window() {
        let mut ntk = GateNetwork::new("empty");
        let a = ntk.add_input();
        let g = ntk.add_gate(GateFn::Inv, vec![Signal::from_node(a)]);
        ntk.mark_output(Signal::from_node(g));
        let partitions = PartitionMap::from_assignments([
            (a, PartitionId(0)),
            (g, PartitionId(0)),
        ]);

        let window = extract(&ntk, &partitions, PartitionId(7));
        assert!(window.is_empty());
    }

    #[test]
    fn boundary_inputs_are_sorted_and_deduplicated() {
        let mut ntk = GateNetwork::new("dedup");
        let a = ntk.add_input();
        let b = ntk.add_input();
        // Two partition-1 gates both read b, which lives outside.
        let g1 = ntk.add_gate(GateFn::And, vec![Signal::from_node(a), Signal::from_node(b)]);
        let g2 = ntk.add_gate(GateFn::Or, vec![Signal::from_node(g1), Signal::from_node(b)]);
        ntk.mark_output(Signal::from_node(g2));
        let partitions = PartitionMap::from_assignments([
            (a, PartitionId(1)),
            (b, PartitionId(0)),
            (g1, PartitionId(1)),
            (g2, PartitionId(1)),
        ]);

        let window = extract(&ntk, &partitions, PartitionId(1));
        assert_eq!(window.inputs, vec![a, b]);
        assert_eq!(window.gates, vec![g1, g2]);
        assert_eq!(window.outputs, vec![Signal::from_node(g2)]);
        assert!(window.is_self_contained(&ntk));
    }

    #[test]
    fn constant_fanins_stay_out_of_the_boundary() {
        let mut ntk = GateNetwork::new("const_fanin");
        let a = ntk.add_input();
        let tie = ntk.constant(true);
        let g = ntk.add_gate(GateFn::And, vec![Signal::from_node(a), tie]);
        ntk.mark_output(Signal::from_node(g));
        let partitions =
            PartitionMap::from_assignments([(a, PartitionId(0)), (g, PartitionId(0))]);

        let window = extract(&ntk, &partitions, PartitionId(0));
        assert_eq!(window.inputs, vec![a]);
        assert_eq!(window.gates, vec![g]);
        assert!(window.is_self_contained(&ntk));
    }
}
