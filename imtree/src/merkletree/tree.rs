//! The generic interval Merkle tree engine.
//!
//! The engine builds a binary tree bottom-up from an ordered sequence of
//! leaf nodes and serves inclusion proofs over it. It is ignorant of the
//! domain records behind the leaves: specializations inject a
//! leaf-derivation function through [`IntervalMerkleTree::build_from_records`]
//! instead of wrapping the engine in their own types' construction code.
//!
//! Leaves are accepted in caller-supplied order. Callers are responsible
//! for presenting them index-ascending; the engine validates this lazily
//! through [`parent`](super::node::parent), which rejects any sibling
//! pair whose indices are not strictly increasing.

use log::debug;
use rayon::prelude::*;

use super::node::{parent, TreeNode};
use crate::def::PARALLEL_BUILD_THRESHOLD;
use crate::error::TreeError;

/// An immutable interval Merkle tree.
///
/// `levels[0]` holds the leaves in the order given at construction;
/// each subsequent level pairs adjacent nodes of the previous one, and
/// the last level holds exactly one node, the root. A tree is built once
/// and never mutated; a changed leaf set requires building a new tree.
#[derive(Clone, Debug)]
pub struct IntervalMerkleTree {
    levels: Vec<Vec<TreeNode>>,
}

impl IntervalMerkleTree {
    /// Builds a tree over the given leaves.
    ///
    /// Levels are generated iteratively, pairing `(children[2i],
    /// children[2i+1])` and padding an odd-length level with a sentinel
    /// sized to the last real node's index width, until a level holds a
    /// single node. A single-leaf tree's root is the leaf itself; no
    /// hashing is performed for it.
    ///
    /// # Errors
    /// * `EmptyTree` when `leaves` is empty
    /// * `OutOfOrder` when two adjacent nodes anywhere in the tree are
    ///   not strictly index-increasing
    pub fn build(leaves: Vec<TreeNode>) -> Result<Self, TreeError> {
        if leaves.is_empty() {
            return Err(TreeError::EmptyTree);
        }
        let mut levels = vec![leaves];
        while levels[levels.len() - 1].len() > 1 {
            let next = Self::generate_level(&levels[levels.len() - 1])?;
            debug!("generated level {} with {} nodes", levels.len(), next.len());
            levels.push(next);
        }
        Ok(Self { levels })
    }

    /// Builds a tree over domain records through an injected
    /// leaf-derivation function.
    ///
    /// This is the specialization seam: per-owner state trees and the
    /// outer address tree both reuse the identical engine by supplying
    /// their own `to_leaf`.
    pub fn build_from_records<T>(
        records: &[T],
        to_leaf: impl Fn(&T) -> TreeNode,
    ) -> Result<Self, TreeError> {
        Self::build(records.iter().map(to_leaf).collect())
    }

    /// Pairs one level's nodes into the next level up.
    ///
    /// Every pair is independent of every other pair, so large levels
    /// are paired in parallel; the result is identical to the
    /// sequential build.
    fn generate_level(children: &[TreeNode]) -> Result<Vec<TreeNode>, TreeError> {
        let pair_up = |pair: &[TreeNode]| match pair {
            [left, right] => parent(left, right),
            [left] => parent(left, &TreeNode::empty(left.index.len())),
            _ => unreachable!("chunks(2) yields one or two nodes"),
        };
        if children.len() >= PARALLEL_BUILD_THRESHOLD {
            children.par_chunks(2).map(pair_up).collect()
        } else {
            children.chunks(2).map(pair_up).collect()
        }
    }

    /// The root node. Its hash commits to every leaf and its index is
    /// the smallest leaf index.
    pub fn root(&self) -> &TreeNode {
        &self.levels[self.levels.len() - 1][0]
    }

    /// Number of levels, leaves included: `ceil(log2(leaf_count)) + 1`.
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    /// Number of leaves the tree commits to.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// The leaf at `position`, if present.
    pub fn leaf(&self, position: usize) -> Option<&TreeNode> {
        self.levels[0].get(position)
    }

    /// All levels, leaves first. Exposed for consistency checking.
    pub fn levels(&self) -> &[Vec<TreeNode>] {
        &self.levels
    }

    /// Generates the inclusion proof for the leaf at `leaf_position`.
    ///
    /// The proof is an ordered sequence of sibling nodes, leaf-level
    /// sibling first, one entry per level except the root level
    /// (`height - 1` entries). A sibling missing off the right edge of a
    /// level is represented by a sentinel sized to that level's index
    /// width.
    ///
    /// # Errors
    /// `PositionOutOfRange` when `leaf_position` is not a valid index
    /// into the bottom level.
    pub fn get_inclusion_proof(&self, leaf_position: usize) -> Result<Vec<TreeNode>, TreeError> {
        if leaf_position >= self.leaf_count() {
            return Err(TreeError::PositionOutOfRange {
                position: leaf_position,
                leaf_count: self.leaf_count(),
            });
        }

        let mut proof = Vec::with_capacity(self.levels.len() - 1);
        let mut sibling_index = leaf_position ^ 1;
        for level in &self.levels[..self.levels.len() - 1] {
            let node = match level.get(sibling_index) {
                Some(node) => node.clone(),
                None => TreeNode::empty(level[0].index.len()),
            };
            proof.push(node);

            // Figure out the parent and then the parent's sibling.
            let parent_index = sibling_index / 2;
            sibling_index = parent_index ^ 1;
        }
        Ok(proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkletree::proof;
    use crate::utils::hasher;

    fn leaves(indices: &[u8]) -> Vec<TreeNode> {
        indices
            .iter()
            .map(|&i| TreeNode::new(hasher::hash([i]).to_vec(), vec![i]))
            .collect()
    }

    #[test]
    fn test_build_rejects_empty() {
        assert!(matches!(
            IntervalMerkleTree::build(Vec::new()),
            Err(TreeError::EmptyTree)
        ));
    }

    #[test]
    fn test_single_leaf_root_is_leaf() {
        let tree = IntervalMerkleTree::build(leaves(&[7])).unwrap();
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.root(), &leaves(&[7])[0]);
    }

    #[test]
    fn test_heights() {
        // height = ceil(log2(n)) + 1
        for (n, height) in [(1usize, 1usize), (2, 2), (3, 3), (4, 3), (5, 4), (8, 4), (9, 5)] {
            let idx: Vec<u8> = (0..n as u8).collect();
            let tree = IntervalMerkleTree::build(leaves(&idx)).unwrap();
            assert_eq!(tree.height(), height, "n = {}", n);
        }
    }

    #[test]
    fn test_odd_level_padded_with_sentinel() {
        let tree = IntervalMerkleTree::build(leaves(&[1, 2, 3])).unwrap();
        // level 1 pairs (1,2) and (3, sentinel)
        assert_eq!(tree.levels()[1].len(), 2);
        assert_eq!(tree.levels()[1][1].index, vec![3]);
        let expected = parent(&tree.levels()[0][2], &TreeNode::empty(1)).unwrap();
        assert_eq!(tree.levels()[1][1], expected);
    }

    #[test]
    fn test_build_rejects_unsorted_leaves() {
        assert!(matches!(
            IntervalMerkleTree::build(leaves(&[2, 1])),
            Err(TreeError::OutOfOrder { .. })
        ));
        // an inversion across a pair boundary surfaces one level up
        assert!(matches!(
            IntervalMerkleTree::build(leaves(&[5, 6, 1, 2])),
            Err(TreeError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let a = IntervalMerkleTree::build(leaves(&[1, 5, 9, 200])).unwrap();
        let b = IntervalMerkleTree::build(leaves(&[1, 5, 9, 200])).unwrap();
        assert_eq!(a.root(), b.root());
    }

    #[test]
    fn test_proof_length_and_position_check() {
        let tree = IntervalMerkleTree::build(leaves(&[0, 1, 2, 3])).unwrap();
        let proof = tree.get_inclusion_proof(3).unwrap();
        assert_eq!(proof.len(), tree.height() - 1);
        assert!(matches!(
            tree.get_inclusion_proof(4),
            Err(TreeError::PositionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_every_position_verifies_against_own_root() {
        for n in 1..=9u8 {
            let idx: Vec<u8> = (0..n).map(|i| i * 3 + 1).collect();
            let tree = IntervalMerkleTree::build(leaves(&idx)).unwrap();
            for p in 0..n as usize {
                let pf = tree.get_inclusion_proof(p).unwrap();
                let leaf = tree.leaf(p).unwrap();
                let bounds =
                    proof::verify(leaf, p as u64, &pf, &tree.root().hash).unwrap();
                // implicit_start <= leaf.index < implicit_end
                assert!(bounds.implicit_start <= leaf.index);
                assert!(leaf.index < bounds.implicit_end);
            }
        }
    }
}
