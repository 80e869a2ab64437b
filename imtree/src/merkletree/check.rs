//! Verification utilities for tree consistency checking.
//!
//! These checks re-derive every interior node of a built tree from its
//! children and panic on the first mismatch. They exist for tests and
//! debugging; proof verification never relies on them.

use super::node::{parent, TreeNode};
use super::tree::IntervalMerkleTree;

/// Verifies the consistency of a built tree.
///
/// This function checks, level by level, that:
/// 1. Each level holds `ceil(len(children) / 2)` nodes
/// 2. Each parent equals the combination of its two children (with a
///    sentinel standing in for a missing right child)
/// 3. Every sibling pair satisfies the strict index ordering
/// 4. The final level holds exactly the root
///
/// # Panics
/// Panics if any relationship is violated.
pub fn check_tree(tree: &IntervalMerkleTree) {
    let levels = tree.levels();
    let top = &levels[levels.len() - 1];
    if top.len() != 1 {
        panic!("top level has {} nodes, want 1", top.len());
    }

    for l in 1..levels.len() {
        let children = &levels[l - 1];
        let level = &levels[l];
        let want_len = children.len().div_ceil(2);
        if level.len() != want_len {
            panic!("level {} has {} nodes, want {}", l, level.len(), want_len);
        }
        for (i, node) in level.iter().enumerate() {
            let left = &children[2 * i];
            let right = match children.get(2 * i + 1) {
                Some(node) => node.clone(),
                None => TreeNode::empty(left.index.len()),
            };
            let expected = match parent(left, &right) {
                Ok(node) => node,
                Err(e) => panic!("level {} pair {}: {}", l - 1, i, e),
            };
            if *node != expected {
                panic!("Mismatch {}-{} {} {}", l, i, 2 * i, 2 * i + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::hasher;

    fn leaves(indices: &[u8]) -> Vec<TreeNode> {
        indices
            .iter()
            .map(|&i| TreeNode::new(hasher::hash([i]).to_vec(), vec![i]))
            .collect()
    }

    #[test]
    fn test_built_trees_are_consistent() {
        for n in 1..=9u8 {
            let idx: Vec<u8> = (0..n).map(|i| i * 2).collect();
            let tree = IntervalMerkleTree::build(leaves(&idx)).unwrap();
            check_tree(&tree);
        }
    }
}
