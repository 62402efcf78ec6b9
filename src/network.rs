//! Core network abstractions
//!
//! This module defines the vocabulary shared by every network representation
//! the crate works with:
//! - `NodeId` - dense arena index identifying a node
//! - `Signal` - a node reference with polarity
//! - `GateFn` - technology-independent combinational gate function
//! - `Network` - read capabilities (parent networks and optimized
//!   replacements alike)
//! - `NetworkMut` - mutation capabilities (parent networks only)
//!
//! Partition extraction and reintegration are generic over these traits, so
//! any netlist representation that can answer the queries below can be
//! partitioned and patched in place.

use serde::{Deserialize, Serialize};

// ============================================================================
// Identities
// ============================================================================

/// Unique identifier for a node within one network.
///
/// Node ids are dense arena indices: a network hands out exactly the ids
/// `0..node_count()`, and id 0 is the network's constant-false node. Ids are
/// only meaningful within the network that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The arena slot this id addresses
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node reference with polarity.
///
/// `complement` inverts the node's logical value at the point of use, so a
/// single AND node can be consumed as AND by one gate and as NAND by another
/// without any extra inverter node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Signal {
    /// The node whose value this signal carries
    pub node: NodeId,
    /// Invert the node's value at the point of use
    pub complement: bool,
}

impl Signal {
    pub fn new(node: NodeId, complement: bool) -> Self {
        Self { node, complement }
    }

    /// The plain, uncomplemented signal of a node
    pub fn from_node(node: NodeId) -> Self {
        Self {
            node,
            complement: false,
        }
    }
}

impl std::ops::Not for Signal {
    type Output = Signal;

    fn not(self) -> Signal {
        Signal {
            node: self.node,
            complement: !self.complement,
        }
    }
}

// ============================================================================
// Gate Functions
// ============================================================================

/// Combinational gate function, independent of any network.
///
/// The variadic functions (`And`, `Or`, `Nand`, `Nor`) take their arity from
/// the fanin list of the gate that carries them. Because `GateFn` carries no
/// node references it can be copied from one network into another, which is
/// what reintegration does when it clones an optimized replacement into the
/// parent network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateFn {
    /// N-input AND
    And,
    /// N-input OR
    Or,
    /// N-input NAND
    Nand,
    /// N-input NOR
    Nor,
    /// 2-input XOR
    Xor,
    /// 2-input XNOR
    Xnor,
    /// Inverter
    Inv,
    /// Buffer (non-inverting)
    Buf,
    /// 2:1 multiplexer (fanins: [sel, d0, d1], output: sel ? d1 : d0)
    Mux2,
}

impl GateFn {
    /// Evaluate the function on already-resolved fanin values
    pub fn eval(&self, inputs: &[bool]) -> bool {
        match self {
            GateFn::And => inputs.iter().all(|&x| x),
            GateFn::Or => inputs.iter().any(|&x| x),
            GateFn::Nand => !inputs.iter().all(|&x| x),
            GateFn::Nor => !inputs.iter().any(|&x| x),
            GateFn::Xor => {
                let a = inputs.first().copied().unwrap_or(false);
                let b = inputs.get(1).copied().unwrap_or(false);
                a ^ b
            }
            GateFn::Xnor => {
                let a = inputs.first().copied().unwrap_or(false);
                let b = inputs.get(1).copied().unwrap_or(false);
                !(a ^ b)
            }
            GateFn::Inv => !inputs.first().copied().unwrap_or(false),
            GateFn::Buf => inputs.first().copied().unwrap_or(false),
            GateFn::Mux2 => {
                let sel = inputs.first().copied().unwrap_or(false);
                let d0 = inputs.get(1).copied().unwrap_or(false);
                let d1 = inputs.get(2).copied().unwrap_or(false);
                if sel {
                    d1
                } else {
                    d0
                }
            }
        }
    }

    /// Short mnemonic for diagnostics
    pub fn short_name(&self) -> &'static str {
        match self {
            GateFn::And => "and",
            GateFn::Or => "or",
            GateFn::Nand => "nand",
            GateFn::Nor => "nor",
            GateFn::Xor => "xor",
            GateFn::Xnor => "xnor",
            GateFn::Inv => "inv",
            GateFn::Buf => "buf",
            GateFn::Mux2 => "mux2",
        }
    }
}

// ============================================================================
// Capability Traits
// ============================================================================

/// Read capabilities of a combinational logic network.
///
/// Node ids are dense (`0..node_count()`) and node 0 is the constant-false
/// node. Every node is exactly one of constant, primary input, or internal
/// gate.
pub trait Network {
    /// Total number of nodes, including the constant node
    fn node_count(&self) -> usize;

    /// Primary inputs, in declaration order
    fn inputs(&self) -> &[NodeId];

    /// Primary outputs, in declaration order, with polarity
    fn outputs(&self) -> &[Signal];

    /// Fanin signals of a node (empty for constants and primary inputs)
    fn fanins(&self, node: NodeId) -> &[Signal];

    /// Nodes that consume `node`'s signal as a fanin
    fn fanouts(&self, node: NodeId) -> &[NodeId];

    /// Whether `node` is the constant node
    fn is_constant(&self, node: NodeId) -> bool;

    /// Whether `node` is a primary input
    fn is_input(&self, node: NodeId) -> bool;

    /// The signal carrying a constant value
    fn constant(&self, value: bool) -> Signal;

    /// The gate function of an internal gate, `None` for constants and
    /// primary inputs
    fn gate_fn(&self, node: NodeId) -> Option<GateFn>;

    /// The name attached to a node, if any
    fn name(&self, node: NodeId) -> Option<&str>;

    /// Internal gates in topological order: every gate appears after all
    /// gates in its transitive fanin. Constants and primary inputs are
    /// excluded. Unreachable gates are included, so a full pass over the
    /// result visits every gate of the network exactly once.
    fn topo_gates(&self) -> Vec<NodeId> {
        const UNSEEN: u8 = 0;
        const OPEN: u8 = 1;
        const DONE: u8 = 2;

        let mut state = vec![UNSEEN; self.node_count()];
        let mut order = Vec::new();
        for idx in 0..self.node_count() {
            let root = NodeId(idx as u32);
            if self.is_constant(root) || self.is_input(root) || state[root.index()] == DONE {
                continue;
            }
            // Iterative post-order DFS over gate fanins.
            state[root.index()] = OPEN;
            let mut stack = vec![(root, 0usize)];
            while let Some((node, fanin_pos)) = stack.pop() {
                if let Some(&f) = self.fanins(node).get(fanin_pos) {
                    stack.push((node, fanin_pos + 1));
                    let child = f.node;
                    if state[child.index()] == UNSEEN
                        && !self.is_constant(child)
                        && !self.is_input(child)
                    {
                        state[child.index()] = OPEN;
                        stack.push((child, 0));
                    }
                } else {
                    state[node.index()] = DONE;
                    order.push(node);
                }
            }
        }
        order
    }
}

/// Mutation capabilities of a combinational logic network.
///
/// Holding `&mut` on an implementation is what gives reintegration its
/// exclusive-access guarantee: no other reader can observe the network while
/// a batch of clones and substitutions is in flight.
pub trait NetworkMut: Network {
    /// Insert a new gate with the given function and fanins, returning the
    /// new node's id
    fn insert_gate(&mut self, func: GateFn, fanins: Vec<Signal>) -> NodeId;

    /// Attach a name to a node, replacing any previous one
    fn set_name(&mut self, node: NodeId, name: String);

    /// Rewire every consumer of `old` (gate fanins and primary outputs) to
    /// `new`, preserving polarity: a consumer that read `!old` reads the
    /// complement of `new` afterwards. `old` itself is left in place with
    /// its fanins intact.
    fn substitute(&mut self, old: NodeId, new: Signal);
}
