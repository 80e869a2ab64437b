//! Tree nodes: the atomic unit of the interval Merkle tree.
//!
//! A node carries a hash and a fixed-width big-endian index (the lower
//! bound of the range its subtree covers). The concatenation
//! `hash ++ index` is the node's contribution to its parent's hash.

use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::utils::hasher::{self, ZERO_HASH32};

/// A single node of an interval Merkle tree.
///
/// Interior nodes always carry a 32-byte digest; the node itself does
/// not constrain the hash width, so callers may commit to pre-hashed
/// payloads of any length. All nodes of one tree share one index width,
/// chosen when the leaves are derived (16 bytes for range starts, 20
/// bytes for owner addresses).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// The node's hash: for a leaf, the hash of the committed payload;
    /// for an interior node, the hash of both children's `data`.
    pub hash: Vec<u8>,
    /// Big-endian index: the minimum range start covered by this node's
    /// subtree.
    pub index: Vec<u8>,
}

impl TreeNode {
    /// Creates a node from a hash and an index.
    pub fn new(hash: Vec<u8>, index: Vec<u8>) -> Self {
        Self { hash, index }
    }

    /// Returns the sentinel node for the given index width: an all-zero
    /// 32-byte hash and an all-ones index, the maximum value
    /// representable in `index_len` bytes. It pads an odd level's
    /// missing right sibling and stands for "+infinity" during bounds
    /// reconstruction.
    ///
    /// Pure function of the width; sentinel nodes for different widths
    /// never share state.
    pub fn empty(index_len: usize) -> Self {
        Self {
            hash: ZERO_HASH32.to_vec(),
            index: vec![0xFF; index_len],
        }
    }

    /// The byte string hashed into this node's parent: `hash ++ index`.
    pub fn data(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.hash.len() + self.index.len());
        data.extend_from_slice(&self.hash);
        data.extend_from_slice(&self.index);
        data
    }
}

/// Combines two sibling nodes into their parent.
///
/// The parent's hash is the hash of `left.data ++ right.data`, and the
/// parent inherits the left child's index: every node's index is the
/// minimum range start covered by its subtree.
///
/// # Errors
/// `OutOfOrder` if `left.index` is not strictly less than `right.index`
/// under unsigned byte-wise comparison. Equal indices are rejected the
/// same way as inverted ones.
pub fn parent(left: &TreeNode, right: &TreeNode) -> Result<TreeNode, TreeError> {
    if left.index >= right.index {
        return Err(TreeError::OutOfOrder {
            left: left.index.clone(),
            right: right.index.clone(),
        });
    }
    let hash = hasher::hash2(left.data(), right.data());
    Ok(TreeNode::new(hash.to_vec(), left.index.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_concatenates_hash_and_index() {
        let node = TreeNode::new(vec![255], vec![0]);
        assert_eq!(node.data(), vec![255, 0]);
    }

    #[test]
    fn test_parent_vector() {
        let left = TreeNode::new(vec![13], vec![10]);
        let right = TreeNode::new(vec![31], vec![15]);
        let parent = parent(&left, &right).unwrap();
        assert_eq!(
            hex::encode(parent.data()),
            "69b053cd194c51ff15ac9db85fc581c4457a7160c78d878e7c5b84f4c1fbb9140a"
        );
        assert_eq!(parent.index, vec![10]);
    }

    #[test]
    fn test_parent_rejects_out_of_order() {
        let left = TreeNode::new(vec![13], vec![15]);
        let right = TreeNode::new(vec![31], vec![10]);
        let err = parent(&left, &right).unwrap_err();
        assert!(matches!(err, TreeError::OutOfOrder { .. }));
    }

    #[test]
    fn test_parent_rejects_equal_indices() {
        let left = TreeNode::new(vec![13], vec![10]);
        let right = TreeNode::new(vec![31], vec![10]);
        assert!(matches!(
            parent(&left, &right),
            Err(TreeError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_empty_node_is_max_index() {
        let node = TreeNode::empty(16);
        assert_eq!(node.hash, ZERO_HASH32.to_vec());
        assert_eq!(node.index, vec![0xFF; 16]);
        // an empty node sorts after every real index of the same width
        assert!(vec![0xFE; 16] < node.index);
    }
}
