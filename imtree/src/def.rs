//! Core definitions and constants for the interval Merkle tree.
//!
//! This module contains the fixed parameters shared by the tree engine
//! and its two specializations:
//! - Index widths for the state (range) trees and the address tree
//! - The level size above which construction pairs nodes in parallel

/// Width in bytes of a state tree index: a range start encoded as a
/// big-endian unsigned 128-bit integer.
pub const STATE_INDEX_LENGTH: usize = 16;

/// Width in bytes of an address tree index: an owner address.
pub const ADDRESS_LENGTH: usize = 20;

/// Minimum number of nodes in a level before construction pairs the
/// level's nodes with rayon instead of sequentially. Pairs are
/// independent, so the parallel build produces identical levels.
pub const PARALLEL_BUILD_THRESHOLD: usize = 1024;

/// An owner address, the leaf index of the outer (address) tree.
pub type Address = [u8; ADDRESS_LENGTH];
