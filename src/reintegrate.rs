//! Reintegration of optimized replacement sub-networks
//!
//! Takes a partition's window, an externally optimized replacement with the
//! same boundary, and splices the replacement into the parent network:
//! replacement gates are cloned in topological order with correct polarity,
//! the partition map is extended over the clones, and every consumer of the
//! original partition outputs is rewired to the new logic. The original
//! gates become dead but are not deleted; cleanup is an external pass.
//!
//! The i-th primary input of the replacement corresponds to the i-th window
//! input, and likewise for outputs, purely by position. That positional
//! contract is established by whoever produced the replacement and is not
//! re-validated here beyond the boundary counts.

use crate::error::{PartitionError, Result};
use crate::network::{Network, NetworkMut, NodeId, Signal};
use crate::partition::{NodeMap, PartitionId, PartitionMap};
use crate::window::Window;
use tracing::{debug, trace};

/// Resolve a replacement-network signal to its parent-network counterpart.
///
/// Constants resolve through the parent's own constant node; everything else
/// must already be seeded or cloned, which topological order guarantees.
fn resolve<N: Network, O: Network>(
    ntk: &N,
    opt: &O,
    old_to_new: &NodeMap<Option<Signal>>,
    f: Signal,
) -> Signal {
    let resolved = if opt.is_constant(f.node) {
        ntk.constant(false)
    } else {
        old_to_new[f.node].expect("fanin resolved before use in topological order")
    };
    if f.complement {
        !resolved
    } else {
        resolved
    }
}

/// Splice `opt` into `ntk` in place of the partition described by `window`.
///
/// Fails with `BoundaryMismatch`, before any mutation, if the replacement's
/// primary input/output counts differ from the window's. Assuming `opt` is
/// logically equivalent to the window under the positional correspondence,
/// the parent network's observable input-to-output function is unchanged.
pub fn integrate<N: NetworkMut, O: Network>(
    ntk: &mut N,
    partitions: &mut PartitionMap,
    id: PartitionId,
    window: &Window,
    opt: &O,
) -> Result<()> {
    if opt.inputs().len() != window.num_inputs() || opt.outputs().len() != window.num_outputs() {
        return Err(PartitionError::BoundaryMismatch {
            id,
            window_inputs: window.num_inputs(),
            window_outputs: window.num_outputs(),
            opt_inputs: opt.inputs().len(),
            opt_outputs: opt.outputs().len(),
        });
    }
    debug!(
        partition = id.0,
        inputs = window.num_inputs(),
        outputs = window.num_outputs(),
        "reintegrating optimized replacement"
    );

    // Seed the correspondence: i-th replacement input maps to the i-th
    // window input's parent signal.
    let mut old_to_new: NodeMap<Option<Signal>> = NodeMap::with_capacity_for(opt.node_count());
    for (i, &n) in window.inputs.iter().enumerate() {
        old_to_new.set(opt.inputs()[i], Some(Signal::from_node(n)));
    }

    // Clone replacement gates into the parent, predecessors first.
    let order = opt.topo_gates();
    for &g in &order {
        let Some(func) = opt.gate_fn(g) else {
            continue;
        };
        let fanins: Vec<Signal> = opt
            .fanins(g)
            .iter()
            .map(|&f| resolve(ntk, opt, &old_to_new, f))
            .collect();
        let cloned = ntk.insert_gate(func, fanins);
        old_to_new.set(g, Some(Signal::from_node(cloned)));
        if let Some(name) = opt.name(g) {
            ntk.set_name(cloned, name.to_string());
        }
        // The clone inherits the slot it fills.
        partitions.assign(cloned, id);
    }
    debug!(partition = id.0, cloned = order.len(), "cloned replacement gates");

    // Stage substitutions from the replacement's outputs. Parent primary
    // inputs and constants are never substitution targets; they can only be
    // consumed, not replaced.
    let mut substitutions: Vec<(NodeId, Signal)> = Vec::with_capacity(window.num_outputs());
    for (i, &out) in opt.outputs().iter().enumerate() {
        let new_signal = resolve(ntk, opt, &old_to_new, out);
        let target = window.outputs[i].node;
        if ntk.is_input(target) || ntk.is_constant(target) {
            trace!(node = target.0, "skipping substitution of non-gate target");
            continue;
        }
        substitutions.push((target, new_signal));
    }

    // Commit. The &mut borrow over the whole call keeps the batch atomic
    // with respect to any external observer.
    let count = substitutions.len();
    for (old, new) in substitutions {
        ntk.substitute(old, new);
    }
    debug!(partition = id.0, substitutions = count, "substituted partition outputs");
    Ok(())
}
