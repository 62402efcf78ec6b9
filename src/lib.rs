//! netpart - partition extraction and reintegration for gate-level logic
//! networks
//!
//! This crate handles:
//! - Decomposing a combinational logic network into disjoint partitions
//! - Extracting any one partition as a self-contained window with explicit
//!   boundary inputs and outputs
//! - Cloning an externally optimized replacement sub-network back into the
//!   parent, with correct polarity
//! - Rewiring every downstream consumer of the replaced logic in one batch
//!
//! The flow is:
//!
//! ```text
//! PartitionMap + Network -> PartitionManager::partition(id) -> Window
//!                                          |
//!                        external optimizer (out of scope)
//!                                          |
//!               PartitionManager::integrate(id, window, optimized)
//! ```
//!
//! Key types:
//! - `PartitionManager` - owns the network and assignment, public contract
//! - `Window` - one partition's boundary inputs/outputs and internal gates
//! - `Network` / `NetworkMut` - capability traits any netlist can implement
//! - `GateNetwork` - the built-in arena network implementation
//!
//! What the crate deliberately does not do: decide partition membership
//! (that assignment is an input), optimize the extracted logic, or delete
//! the dead gates left behind after reintegration.

pub mod error;
pub mod gate_network;
pub mod manager;
pub mod network;
pub mod partition;
pub mod reintegrate;
pub mod window;

pub use error::{PartitionError, Result};
pub use gate_network::GateNetwork;
pub use manager::PartitionManager;
pub use network::{GateFn, Network, NetworkMut, NodeId, Signal};
pub use partition::{NodeMap, PartitionId, PartitionMap};
pub use window::Window;
