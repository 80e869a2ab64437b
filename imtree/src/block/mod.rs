//! The double-tree block layer: per-owner state trees composed under an
//! outer address tree.

#[allow(clippy::module_inception)]
pub mod block;
pub mod state_tree;

pub use block::{AddressGroup, Block, DoubleInclusionProof};
pub use state_tree::{state_update_leaf, StateTree};
