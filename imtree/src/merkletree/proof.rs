//! Proof walking: root recomputation and implicit bounds reconstruction.
//!
//! Verifying an inclusion proof recomputes the root from the leaf and
//! its siblings, and reconstructs the half-open range
//! `[implicit_start, implicit_end)` the committed leaf exclusively owns.
//! Any other leaf committed under the same root is guaranteed disjoint
//! from that range; a proof that would contradict this fails with
//! `IntersectionDetected` instead of verifying.

use log::debug;
use serde::{Deserialize, Serialize};

use super::node::{parent, TreeNode};
use crate::error::{DecodeError, TreeError};

/// The half-open range `[implicit_start, implicit_end)` a verifier can
/// derive from a leaf and its inclusion proof alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplicitBounds {
    /// Zero when the leaf is leftmost in the tree, else the leaf's own
    /// index.
    pub implicit_start: Vec<u8>,
    /// The first right sibling's index, or the maximum index value when
    /// the leaf is rightmost in the tree.
    pub implicit_end: Vec<u8>,
}

/// A recomputed root together with the bounds reconstructed on the way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootAndBounds {
    pub root: TreeNode,
    pub bounds: ImplicitBounds,
}

/// Reads bit `level` of the leaf position. The path through the tree is
/// the position's bits least-significant first: bit `i` set means the
/// known node is the right child at level `i`. This exact bit order is
/// load-bearing; reading most-significant first would pair the leaf with
/// the wrong sibling at every level.
fn path_bit(position: u64, level: usize) -> bool {
    position.checked_shr(level as u32).unwrap_or(0) & 1 == 1
}

/// Recomputes the root reached from `leaf` through `proof`, and
/// reconstructs the leaf's implicit bounds.
///
/// The first proof entry sitting to the right of the climbing path (the
/// "first right sibling") carries the tightest known upper bound on the
/// leaf's range: it is the closest committed index above the leaf's own.
/// Every later right sibling must carry an index at least that large; a
/// smaller one proves the committed leaf indices were not strictly
/// increasing, i.e. two committed ranges overlap.
///
/// # Errors
/// * `InvalidPosition` when `leaf_position` does not fit in
///   `proof.len()` path bits
/// * `IntersectionDetected` on the overlap evidence described above
/// * `OutOfOrder` when any combined sibling pair is not strictly
///   index-increasing
pub fn get_root_and_bounds(
    leaf: &TreeNode,
    leaf_position: u64,
    proof: &[TreeNode],
) -> Result<RootAndBounds, TreeError> {
    if leaf_position.checked_shr(proof.len() as u32).unwrap_or(0) != 0 {
        return Err(TreeError::InvalidPosition {
            position: leaf_position,
            depth: proof.len(),
        });
    }
    debug!(
        "walking proof of {} levels from position {}",
        proof.len(),
        leaf_position
    );

    // The first level where the known node is a left child. Absent when
    // the leaf is the rightmost in the tree.
    let first_right_sibling = (0..proof.len())
        .find(|&i| !path_bit(leaf_position, i))
        .map(|i| &proof[i]);

    let mut computed = leaf.clone();
    for (i, sibling) in proof.iter().enumerate() {
        if path_bit(leaf_position, i) {
            computed = parent(sibling, &computed)?;
        } else {
            // If some right node further up the tree is less than the
            // first right node, the tree construction must be invalid.
            if let Some(first_right) = first_right_sibling {
                if sibling.index < first_right.index {
                    return Err(TreeError::IntersectionDetected {
                        right: sibling.index.clone(),
                        first_right: first_right.index.clone(),
                    });
                }
            }
            computed = parent(&computed, sibling)?;
        }
    }

    let width = leaf.index.len();
    let bounds = ImplicitBounds {
        implicit_start: if leaf_position == 0 {
            vec![0; width]
        } else {
            leaf.index.clone()
        },
        implicit_end: match first_right_sibling {
            Some(node) => node.index.clone(),
            None => TreeNode::empty(width).index,
        },
    };
    Ok(RootAndBounds {
        root: computed,
        bounds,
    })
}

/// Checks an inclusion proof against an expected root hash.
///
/// # Errors
/// Everything `get_root_and_bounds` raises, plus `RootMismatch` when the
/// recomputed root hash differs from `expected_root_hash`.
///
/// # Returns
/// The implicit bounds covered by the leaf if the proof is valid.
pub fn verify(
    leaf: &TreeNode,
    leaf_position: u64,
    proof: &[TreeNode],
    expected_root_hash: &[u8],
) -> Result<ImplicitBounds, TreeError> {
    let root_and_bounds = get_root_and_bounds(leaf, leaf_position, proof)?;
    if root_and_bounds.root.hash != expected_root_hash {
        return Err(TreeError::RootMismatch {
            expected: expected_root_hash.to_vec(),
            computed: root_and_bounds.root.hash,
        });
    }
    Ok(root_and_bounds.bounds)
}

/// Serializes a proof's sibling sequence to bytes.
pub fn proof_to_bytes(proof: &[TreeNode]) -> Vec<u8> {
    bincode::serialize(proof).unwrap()
}

/// Recovers a proof's sibling sequence from bytes.
pub fn proof_from_bytes(bz: &[u8]) -> Result<Vec<TreeNode>, DecodeError> {
    Ok(bincode::deserialize(bz)?)
}
