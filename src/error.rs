//! Error types for partition management

use crate::network::NodeId;
use crate::partition::PartitionId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PartitionError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// The optimized replacement's boundary does not match the window it is
    /// meant to replace. Nothing was mutated.
    #[error(
        "boundary mismatch for partition {id:?}: replacement has \
         {opt_inputs} inputs / {opt_outputs} outputs, window has \
         {window_inputs} / {window_outputs}"
    )]
    BoundaryMismatch {
        id: PartitionId,
        window_inputs: usize,
        window_outputs: usize,
        opt_inputs: usize,
        opt_outputs: usize,
    },

    /// The node has no partition assignment (constants never have one)
    #[error("node {0:?} has no partition assignment")]
    Unassigned(NodeId),
}
