//! imtree is a double-layer interval Merkle tree: a commitment structure
//! that lets a single root hash attest to a collection of non-overlapping
//! state ranges grouped by owner, with compact proofs of inclusion and
//! range disjointness.
//!
//! # Overview
//! imtree provides:
//! - An interval Merkle tree engine whose nodes carry a range-start index
//!   next to their hash, ordered strictly left to right
//! - Inclusion proofs that additionally reconstruct the "implicit bounds"
//!   a committed leaf exclusively owns, from the leaf and proof alone
//! - A double-tree block commitment: one subtree per owner address, with
//!   the subtree roots committed under an outer address tree
//! - Combined proof generation and verification across both layers
//!
//! # Architecture
//! The crate is built around several key components:
//!
//! - [`merkletree`]: the generic engine. [`TreeNode`],
//!   [`IntervalMerkleTree`], proof walking and consistency checks. The
//!   engine is ignorant of domain record shapes; specializations inject a
//!   leaf-derivation function.
//! - [`state`]: the committed records. [`StateUpdate`] ranges resolving
//!   to [`StateObject`]s, with deterministic byte codecs.
//! - [`block`]: the double tree. [`StateTree`] per owner, [`Block`] over
//!   all owners, [`DoubleInclusionProof`] across both layers.
//!
//! # Example Usage
//! ```
//! use imtree::{AddressGroup, Block, Range, StateObject, StateUpdate};
//!
//! let owner = [0x11u8; 20];
//! let update = StateUpdate::new(
//!     Range::new(0, 100),
//!     1,
//!     owner,
//!     StateObject::new([0x22u8; 20], vec![]),
//! );
//! let block = Block::build(vec![AddressGroup {
//!     address: owner,
//!     updates: vec![update.clone()],
//! }])?;
//!
//! let proof = block.get_inclusion_proof(0, 0)?;
//! let bounds = Block::verify_double_proof(&update, &proof, &block.root().hash)?;
//! assert!(bounds.implicit_start <= owner.to_vec());
//! # Ok::<(), imtree::TreeError>(())
//! ```
//!
//! # Note on Thread Safety
//! Every tree and block is immutable after construction: proof
//! generation and verification are read-only and may be called from any
//! number of threads without synchronization.

pub mod block;
pub mod def;
pub mod error;
pub mod merkletree;
pub mod state;
pub mod utils;

pub use block::{AddressGroup, Block, DoubleInclusionProof, StateTree};
pub use error::{DecodeError, TreeError};
pub use merkletree::{ImplicitBounds, IntervalMerkleTree, TreeNode};
pub use state::{Range, StateObject, StateUpdate};
