//! Hashing utilities for the interval Merkle tree.
//!
//! This module provides keccak-256 based hashing functions for:
//! - Leaf payloads (encoded state updates)
//! - Pairs of node byte strings (for parent computation)
//!
//! The rest of the crate treats the digest as an opaque pure function
//! from bytes to 32 bytes; nothing outside this module names the
//! underlying algorithm.

use sha3::{Digest, Keccak256};

/// Type alias for a 32-byte hash value.
/// Used throughout the crate for cryptographic hashes.
pub type Hash32 = [u8; 32];

/// A constant representing a hash of all zeros.
/// Used as the hash of sentinel (empty) tree nodes.
pub const ZERO_HASH32: Hash32 = [0u8; 32];

/// Computes the keccak-256 hash of a single value.
///
/// # Arguments
/// * `a` - Value to hash
///
/// # Returns
/// The 32-byte hash of the input
pub fn hash<T: AsRef<[u8]>>(a: T) -> Hash32 {
    let mut hasher = Keccak256::new();
    hasher.update(a);
    hasher.finalize().into()
}

/// Computes the keccak-256 hash of two concatenated values.
///
/// This is used for Merkle tree nodes where two child byte strings are
/// combined to form a parent hash.
///
/// # Arguments
/// * `a` - First value to hash
/// * `b` - Second value to hash
///
/// # Returns
/// The 32-byte hash of both values
pub fn hash2<T: AsRef<[u8]>>(a: T, b: T) -> Hash32 {
    let mut hasher = Keccak256::new();
    hasher.update(a);
    hasher.update(b);
    hasher.finalize().into()
}
