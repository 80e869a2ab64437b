//! Block commitments: the double interval Merkle tree.
//!
//! A block partitions its state updates by owner address, builds one
//! [`StateTree`] per owner, and commits the subtree roots into an outer
//! interval tree indexed by address. A single root hash then attests to
//! every update in the block, and a double proof shows both that an
//! update's range is committed under its owner and that the owner's
//! address slot is disjoint from every other owner's.

use log::debug;
use serde::{Deserialize, Serialize};

use super::state_tree::{state_update_leaf, StateTree};
use crate::def::Address;
use crate::error::{DecodeError, TreeError};
use crate::merkletree::{get_root_and_bounds, verify, ImplicitBounds, IntervalMerkleTree, TreeNode};
use crate::state::StateUpdate;

/// One owner's contribution to a block: the owner address and its state
/// updates, sorted ascending by range start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressGroup {
    pub address: Address,
    pub updates: Vec<StateUpdate>,
}

/// A combined proof across both tree layers: the inner (state) proof
/// locating the update within its owner's subtree, and the outer
/// (address) proof locating that subtree within the block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoubleInclusionProof {
    /// Position of the update within its owner's state tree.
    pub state_leaf_position: u64,
    /// Sibling sequence of the state tree, leaf-level first.
    pub state_tree_inclusion_proof: Vec<TreeNode>,
    /// Position of the owner within the address tree.
    pub address_leaf_position: u64,
    /// Sibling sequence of the address tree, leaf-level first.
    pub address_tree_inclusion_proof: Vec<TreeNode>,
}

impl DoubleInclusionProof {
    /// Serializes the proof to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).unwrap()
    }

    /// Recovers a proof from bytes.
    pub fn from_bytes(bz: &[u8]) -> Result<Self, DecodeError> {
        Ok(bincode::deserialize(bz)?)
    }
}

/// A built block: the per-owner subtrees and the outer address tree over
/// their roots.
///
/// The block exclusively owns its trees; nothing is shared or mutated
/// after construction, so a block may serve proof generation and
/// verification from any number of callers concurrently.
#[derive(Clone, Debug)]
pub struct Block {
    subtrees: Vec<StateTree>,
    addresses: Vec<Address>,
    tree: IntervalMerkleTree,
}

impl Block {
    /// Builds the double tree over the given address groups.
    ///
    /// Groups are sorted ascending by address bytes before the outer
    /// tree is built; a duplicated address therefore surfaces as
    /// `OutOfOrder` when the outer leaves are combined.
    ///
    /// # Errors
    /// * `EmptyTree` when there are no groups or a group has no updates
    /// * `OutOfOrder` when any group's updates are not strictly
    ///   increasing by range start
    pub fn build(mut groups: Vec<AddressGroup>) -> Result<Self, TreeError> {
        groups.sort_by(|a, b| a.address.cmp(&b.address));

        let mut subtrees = Vec::with_capacity(groups.len());
        let mut addresses = Vec::with_capacity(groups.len());
        let mut outer_leaves = Vec::with_capacity(groups.len());
        for group in &groups {
            let subtree = StateTree::build(&group.updates)?;
            outer_leaves.push(TreeNode::new(
                subtree.root().hash.clone(),
                group.address.to_vec(),
            ));
            subtrees.push(subtree);
            addresses.push(group.address);
        }
        debug!("built {} subtrees, building address tree", subtrees.len());

        let tree = IntervalMerkleTree::build(outer_leaves)?;
        Ok(Self {
            subtrees,
            addresses,
            tree,
        })
    }

    /// The block root. Its hash commits to every update of every owner.
    pub fn root(&self) -> &TreeNode {
        self.tree.root()
    }

    /// Number of owner addresses committed.
    pub fn address_count(&self) -> usize {
        self.subtrees.len()
    }

    /// The owner address at `position` in the sorted outer order.
    pub fn address(&self, position: usize) -> Option<&Address> {
        self.addresses.get(position)
    }

    /// The state tree at `position` in the sorted outer order.
    pub fn subtree(&self, position: usize) -> Option<&StateTree> {
        self.subtrees.get(position)
    }

    /// The outer address tree, for consistency checks.
    pub fn address_tree(&self) -> &IntervalMerkleTree {
        &self.tree
    }

    /// Generates the combined proof for the update at `state_position`
    /// within the owner at `address_position`.
    ///
    /// # Errors
    /// `PositionOutOfRange` when either position is absent.
    pub fn get_inclusion_proof(
        &self,
        address_position: usize,
        state_position: usize,
    ) -> Result<DoubleInclusionProof, TreeError> {
        let subtree =
            self.subtrees
                .get(address_position)
                .ok_or(TreeError::PositionOutOfRange {
                    position: address_position,
                    leaf_count: self.subtrees.len(),
                })?;
        Ok(DoubleInclusionProof {
            state_leaf_position: state_position as u64,
            state_tree_inclusion_proof: subtree.get_inclusion_proof(state_position)?,
            address_leaf_position: address_position as u64,
            address_tree_inclusion_proof: self.tree.get_inclusion_proof(address_position)?,
        })
    }

    /// Verifies a combined proof against an expected block root.
    ///
    /// The inner leaf is recomputed from the update itself, walked to
    /// the subtree root, and that root is re-wrapped as the outer leaf
    /// under the update's owner address. Failure at either stage aborts
    /// the whole verification; there is no partial-success state.
    ///
    /// # Returns
    /// The implicit bounds of the owner's address slot: the half-open
    /// address range `[owner, next greater owner)` this subtree
    /// exclusively covers. Callers needing per-range uniqueness within
    /// the owner's subtree verify the inner proof directly.
    pub fn verify_double_proof(
        update: &StateUpdate,
        proof: &DoubleInclusionProof,
        expected_block_root: &[u8],
    ) -> Result<ImplicitBounds, TreeError> {
        let state_leaf = state_update_leaf(update);
        let inner = get_root_and_bounds(
            &state_leaf,
            proof.state_leaf_position,
            &proof.state_tree_inclusion_proof,
        )?;

        let address_leaf = TreeNode::new(inner.root.hash.clone(), update.owner.to_vec());
        verify(
            &address_leaf,
            proof.address_leaf_position,
            &proof.address_tree_inclusion_proof,
            expected_block_root,
        )
    }
}
