//! Arena-backed gate network
//!
//! `GateNetwork` is the crate's reference implementation of the `Network` /
//! `NetworkMut` traits: a flat arena of nodes with incrementally maintained
//! fanout lists, ordered primary inputs and outputs, and an
//! insertion-ordered name table. It is what the tests partition and
//! reintegrate, and what a driver uses when it does not bring its own
//! netlist representation.
//!
//! Node 0 is always the constant-false node; constant true is its
//! complemented signal. Every other node is created through `add_input` or
//! `add_gate` and keeps its id for the lifetime of the network (substitution
//! rewires consumers, it never deletes).

use crate::network::{GateFn, Network, NetworkMut, NodeId, Signal};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What a node is: constant, primary input, or internal gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// The constant-false node (id 0)
    Constant,
    /// Primary input of the network
    Input,
    /// Internal gate computing a function of its fanins
    Gate(GateFn),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeData {
    kind: NodeKind,
    fanins: Vec<Signal>,
}

/// A mutable combinational gate-level network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateNetwork {
    /// Design name
    name: String,
    /// Node arena; index is the `NodeId`
    nodes: Vec<NodeData>,
    /// Consumers of each node's signal, kept in sync with `nodes`
    fanouts: Vec<Vec<NodeId>>,
    /// Primary inputs, in declaration order
    inputs: Vec<NodeId>,
    /// Primary outputs, in declaration order
    outputs: Vec<Signal>,
    /// Optional node names
    names: IndexMap<NodeId, String>,
}

impl GateNetwork {
    /// Create an empty network holding only the constant node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: vec![NodeData {
                kind: NodeKind::Constant,
                fanins: Vec::new(),
            }],
            fanouts: vec![Vec::new()],
            inputs: Vec::new(),
            outputs: Vec::new(),
            names: IndexMap::new(),
        }
    }

    /// Design name
    pub fn design_name(&self) -> &str {
        &self.name
    }

    /// Add a primary input
    pub fn add_input(&mut self) -> NodeId {
        let id = self.alloc(NodeKind::Input, Vec::new());
        self.inputs.push(id);
        id
    }

    /// Add an internal gate with the given function and fanins
    pub fn add_gate(&mut self, func: GateFn, fanins: Vec<Signal>) -> NodeId {
        let id = self.alloc(NodeKind::Gate(func), fanins);
        for pos in 0..self.nodes[id.index()].fanins.len() {
            let src = self.nodes[id.index()].fanins[pos].node;
            let consumers = &mut self.fanouts[src.index()];
            if !consumers.contains(&id) {
                consumers.push(id);
            }
        }
        id
    }

    /// Mark a signal as a primary output
    pub fn mark_output(&mut self, signal: Signal) {
        self.outputs.push(signal);
    }

    /// Number of internal gates
    pub fn gate_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Gate(_)))
            .count()
    }

    fn alloc(&mut self, kind: NodeKind, fanins: Vec<Signal>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData { kind, fanins });
        self.fanouts.push(Vec::new());
        id
    }

    /// Evaluate the network on one input assignment, returning the primary
    /// output values in declaration order.
    ///
    /// # Panics
    ///
    /// Panics if `input_values` does not provide exactly one value per
    /// primary input.
    pub fn evaluate(&self, input_values: &[bool]) -> Vec<bool> {
        assert_eq!(
            input_values.len(),
            self.inputs.len(),
            "one value per primary input required"
        );
        let mut values = vec![false; self.nodes.len()];
        for (&pi, &v) in self.inputs.iter().zip(input_values) {
            values[pi.index()] = v;
        }
        for gate in self.topo_gates() {
            let data = &self.nodes[gate.index()];
            let NodeKind::Gate(func) = data.kind else {
                continue;
            };
            let fanin_values: Vec<bool> = data
                .fanins
                .iter()
                .map(|f| values[f.node.index()] ^ f.complement)
                .collect();
            values[gate.index()] = func.eval(&fanin_values);
        }
        self.outputs
            .iter()
            .map(|s| values[s.node.index()] ^ s.complement)
            .collect()
    }
}

impl Network for GateNetwork {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    fn outputs(&self) -> &[Signal] {
        &self.outputs
    }

    fn fanins(&self, node: NodeId) -> &[Signal] {
        &self.nodes[node.index()].fanins
    }

    fn fanouts(&self, node: NodeId) -> &[NodeId] {
        &self.fanouts[node.index()]
    }

    fn is_constant(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.index()].kind, NodeKind::Constant)
    }

    fn is_input(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.index()].kind, NodeKind::Input)
    }

    fn constant(&self, value: bool) -> Signal {
        Signal::new(NodeId(0), value)
    }

    fn gate_fn(&self, node: NodeId) -> Option<GateFn> {
        match self.nodes[node.index()].kind {
            NodeKind::Gate(func) => Some(func),
            _ => None,
        }
    }

    fn name(&self, node: NodeId) -> Option<&str> {
        self.names.get(&node).map(String::as_str)
    }
}

impl NetworkMut for GateNetwork {
    fn insert_gate(&mut self, func: GateFn, fanins: Vec<Signal>) -> NodeId {
        self.add_gate(func, fanins)
    }

    fn set_name(&mut self, node: NodeId, name: String) {
        self.names.insert(node, name);
    }

    fn substitute(&mut self, old: NodeId, new: Signal) {
        if new.node == old {
            return;
        }
        let consumers = std::mem::take(&mut self.fanouts[old.index()]);
        for &consumer in &consumers {
            for fanin in &mut self.nodes[consumer.index()].fanins {
                if fanin.node == old {
                    *fanin = Signal::new(new.node, fanin.complement ^ new.complement);
                }
            }
            let rewired = &mut self.fanouts[new.node.index()];
            if !rewired.contains(&consumer) {
                rewired.push(consumer);
            }
        }
        for output in &mut self.outputs {
            if output.node == old {
                *output = Signal::new(new.node, output.complement ^ new.complement);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_mux_network() -> GateNetwork {
        let mut ntk = GateNetwork::new("mux");
        let sel = ntk.add_input();
        let d0 = ntk.add_input();
        let d1 = ntk.add_input();
        let mux = ntk.add_gate(
            GateFn::Mux2,
            vec![
                Signal::from_node(sel),
                Signal::from_node(d0),
                Signal::from_node(d1),
            ],
        );
        ntk.mark_output(Signal::from_node(mux));
        ntk
    }

    #[test]
    fn evaluate_mux() {
        let ntk = make_mux_network();
        assert_eq!(ntk.evaluate(&[false, true, false]), vec![true]);
        assert_eq!(ntk.evaluate(&[false, false, true]), vec![false]);
        assert_eq!(ntk.evaluate(&[true, false, true]), vec![true]);
        assert_eq!(ntk.evaluate(&[true, true, false]), vec![false]);
    }

    #[test]
    fn evaluate_complemented_fanin_and_output() {
        let mut ntk = GateNetwork::new("nand_as_and");
        let a = ntk.add_input();
        let b = ntk.add_input();
        let nand = ntk.add_gate(GateFn::Nand, vec![Signal::from_node(a), Signal::from_node(b)]);
        // Output reads the NAND complemented, so it computes AND.
        ntk.mark_output(!Signal::from_node(nand));
        assert_eq!(ntk.evaluate(&[true, true]), vec![true]);
        assert_eq!(ntk.evaluate(&[true, false]), vec![false]);
        assert_eq!(ntk.evaluate(&[false, false]), vec![false]);
    }

    #[test]
    fn constant_signals_evaluate() {
        let mut ntk = GateNetwork::new("const");
        let a = ntk.add_input();
        let tie_high = ntk.constant(true);
        let g = ntk.add_gate(GateFn::And, vec![Signal::from_node(a), tie_high]);
        ntk.mark_output(Signal::from_node(g));
        assert_eq!(ntk.evaluate(&[true]), vec![true]);
        assert_eq!(ntk.evaluate(&[false]), vec![false]);
    }

    #[test]
    fn topo_order_respects_fanins() {
        let mut ntk = GateNetwork::new("chain");
        let a = ntk.add_input();
        let g1 = ntk.add_gate(GateFn::Inv, vec![Signal::from_node(a)]);
        let g2 = ntk.add_gate(GateFn::Inv, vec![Signal::from_node(g1)]);
        let g3 = ntk.add_gate(GateFn::And, vec![Signal::from_node(g1), Signal::from_node(g2)]);
        ntk.mark_output(Signal::from_node(g3));

        let order = ntk.topo_gates();
        assert_eq!(order.len(), 3);
        let pos = |n: NodeId| order.iter().position(|&x| x == n).unwrap();
        assert!(pos(g1) < pos(g2));
        assert!(pos(g2) < pos(g3));
    }

    #[test]
    fn substitute_rewires_consumers_and_outputs() {
        let mut ntk = GateNetwork::new("subst");
        let a = ntk.add_input();
        let b = ntk.add_input();
        let old = ntk.add_gate(GateFn::And, vec![Signal::from_node(a), Signal::from_node(b)]);
        let consumer = ntk.add_gate(GateFn::Inv, vec![Signal::from_node(old)]);
        ntk.mark_output(Signal::from_node(consumer));
        ntk.mark_output(!Signal::from_node(old));

        let replacement = ntk.add_gate(GateFn::Or, vec![Signal::from_node(a), Signal::from_node(b)]);
        ntk.substitute(old, Signal::from_node(replacement));

        assert_eq!(ntk.fanins(consumer), &[Signal::from_node(replacement)]);
        assert_eq!(ntk.outputs()[1], !Signal::from_node(replacement));
        assert!(ntk.fanouts(old).is_empty());
        assert!(ntk.fanouts(replacement).contains(&consumer));
        // Consumers now see OR instead of AND.
        assert_eq!(ntk.evaluate(&[true, false]), vec![false, false]);
    }

    #[test]
    fn substitute_preserves_consumer_polarity() {
        let mut ntk = GateNetwork::new("subst_polarity");
        let a = ntk.add_input();
        let old = ntk.add_gate(GateFn::Buf, vec![Signal::from_node(a)]);
        let consumer = ntk.add_gate(GateFn::Buf, vec![!Signal::from_node(old)]);
        ntk.mark_output(Signal::from_node(consumer));

        let replacement = ntk.add_gate(GateFn::Inv, vec![Signal::from_node(a)]);
        // Substituting with a complemented signal must fold into the
        // consumer's own complement.
        ntk.substitute(old, !Signal::from_node(replacement));

        assert_eq!(ntk.fanins(consumer)[0], Signal::from_node(replacement));
        // consumer = !(!inv(a)) = inv(a) = !a
        assert_eq!(ntk.evaluate(&[true]), vec![false]);
        assert_eq!(ntk.evaluate(&[false]), vec![true]);
    }
}
