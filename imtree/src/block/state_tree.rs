//! Per-owner state trees: interval trees over one owner's state updates.

use crate::error::TreeError;
use crate::merkletree::{IntervalMerkleTree, TreeNode};
use crate::state::StateUpdate;
use crate::utils::hasher;

/// Derives a state tree leaf from an update: the hash of the update's
/// encoding, indexed by its 16-byte big-endian range start.
pub fn state_update_leaf(update: &StateUpdate) -> TreeNode {
    TreeNode::new(
        hasher::hash(update.encoded()).to_vec(),
        update.index_bytes(),
    )
}

/// The inner tree of the double layer: one owner's updates, ordered by
/// range start.
///
/// Updates must be supplied sorted ascending by `range.start`;
/// construction defers the ordering check to the engine's sibling
/// combination.
#[derive(Clone, Debug)]
pub struct StateTree {
    tree: IntervalMerkleTree,
}

impl StateTree {
    /// Builds the tree over the given updates.
    pub fn build(updates: &[StateUpdate]) -> Result<Self, TreeError> {
        let tree = IntervalMerkleTree::build_from_records(updates, state_update_leaf)?;
        Ok(Self { tree })
    }

    /// The subtree root committed into the outer address tree.
    pub fn root(&self) -> &TreeNode {
        self.tree.root()
    }

    /// Number of updates committed.
    pub fn leaf_count(&self) -> usize {
        self.tree.leaf_count()
    }

    /// Inclusion proof for the update at `position`.
    pub fn get_inclusion_proof(&self, position: usize) -> Result<Vec<TreeNode>, TreeError> {
        self.tree.get_inclusion_proof(position)
    }

    /// The underlying engine, for consistency checks.
    pub fn tree(&self) -> &IntervalMerkleTree {
        &self.tree
    }
}
