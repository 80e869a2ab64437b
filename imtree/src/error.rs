//! Error types surfaced by tree construction, proof generation and
//! proof verification.
//!
//! Every failure here is a deterministic pure-computation error: nothing
//! is transient, nothing is retried, and a verification failure must
//! reach the caller as an `Err` rather than being treated as "inclusion
//! not proven but otherwise fine".

use thiserror::Error;

/// Errors raised while building a tree, generating a proof, or walking a
/// proof during verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A tree must commit to at least one leaf.
    #[error("tree must contain at least one leaf")]
    EmptyTree,

    /// Two sibling nodes were combined whose indices are not strictly
    /// increasing left to right. At build time this is a data error; during
    /// a proof walk it is evidence of an invalid or malicious tree.
    #[error(
        "left index (0x{}) not less than right index (0x{})",
        hex::encode(.left),
        hex::encode(.right)
    )]
    OutOfOrder { left: Vec<u8>, right: Vec<u8> },

    /// An inclusion proof was requested for a leaf position that is not
    /// present in the bottom level of the tree.
    #[error("leaf position {position} not in bottom level of tree ({leaf_count} leaves)")]
    PositionOutOfRange { position: usize, leaf_count: usize },

    /// A leaf position that cannot be addressed by the proof's path bits.
    /// The position's binary representation must fit in one bit per proof
    /// entry; a wider position would silently drop path bits.
    #[error("leaf position {position} not addressable by a proof of {depth} levels")]
    InvalidPosition { position: u64, depth: usize },

    /// While walking a proof, a right sibling above the first right
    /// sibling carried a smaller index. The committed leaf indices were
    /// therefore not strictly increasing: two committed ranges overlap.
    #[error(
        "potential intersection detected: right sibling index 0x{} below first right sibling index 0x{}",
        hex::encode(.right),
        hex::encode(.first_right)
    )]
    IntersectionDetected { right: Vec<u8>, first_right: Vec<u8> },

    /// The root recomputed from a leaf and its proof does not match the
    /// expected root hash. The proof is rejected.
    #[error(
        "root hash mismatch: expected 0x{}, computed 0x{}",
        hex::encode(.expected),
        hex::encode(.computed)
    )]
    RootMismatch { expected: Vec<u8>, computed: Vec<u8> },
}

/// Errors raised while decoding records or proofs from bytes.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The input ended before a fixed-width field could be read.
    #[error("unexpected end of input: need {need} bytes, have {have}")]
    UnexpectedEnd { need: usize, have: usize },

    /// A serialized proof could not be deserialized.
    #[error("malformed proof bytes: {0}")]
    Proof(#[from] bincode::Error),
}
