//! State updates: the range-to-state assignments a block commits to.

use serde::{Deserialize, Serialize};

use super::object::StateObject;
use crate::def::{Address, ADDRESS_LENGTH, STATE_INDEX_LENGTH};
use crate::error::DecodeError;
use crate::utils::codec;

/// A half-open range `[start, end)` of state identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: u128,
    pub end: u128,
}

impl Range {
    pub fn new(start: u128, end: u128) -> Self {
        Self { start, end }
    }
}

/// A state update: one owner's assignment of a new state object to a
/// range of state identifiers, committed at a given block.
///
/// Byte layout (all integers big-endian):
///
/// +--------------+--------------+-------------------+
/// | start (16B)  | end (16B)    | block number (8B) |
/// +--------------+--------------+-------------------+
/// | owner (20B)  | state object (var)               |
/// +--------------+----------------------------------+
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateUpdate {
    /// The range of state identifiers this update covers.
    pub range: Range,
    /// Height of the block the update is committed in.
    pub block_number: u64,
    /// The depositing owner; also the update's leaf index in the outer
    /// address tree.
    pub owner: Address,
    /// The state object the range transitions to.
    pub new_state: StateObject,
}

/// Fixed prefix length of an encoded state update: everything before the
/// variable-length state object.
const UPDATE_PREFIX_LENGTH: usize = 2 * STATE_INDEX_LENGTH + 8 + ADDRESS_LENGTH;

impl StateUpdate {
    pub fn new(range: Range, block_number: u64, owner: Address, new_state: StateObject) -> Self {
        Self {
            range,
            block_number,
            owner,
            new_state,
        }
    }

    /// The update's encoding: the byte string the state tree hashes into
    /// its leaf for this update.
    pub fn encoded(&self) -> Vec<u8> {
        let new_state = self.new_state.encoded();
        let mut bz = Vec::with_capacity(UPDATE_PREFIX_LENGTH + new_state.len());
        bz.extend_from_slice(&codec::encode_be_u128(self.range.start));
        bz.extend_from_slice(&codec::encode_be_u128(self.range.end));
        bz.extend_from_slice(&codec::encode_be_u64(self.block_number));
        bz.extend_from_slice(&self.owner);
        bz.extend_from_slice(&new_state);
        bz
    }

    /// Decodes a state update from its encoding.
    pub fn from_bytes(bz: &[u8]) -> Result<Self, DecodeError> {
        if bz.len() < UPDATE_PREFIX_LENGTH {
            return Err(DecodeError::UnexpectedEnd {
                need: UPDATE_PREFIX_LENGTH,
                have: bz.len(),
            });
        }
        let start = codec::decode_be_u128(&bz[0..16]);
        let end = codec::decode_be_u128(&bz[16..32]);
        let block_number = codec::decode_be_u64(&bz[32..40]);
        let mut owner = [0u8; ADDRESS_LENGTH];
        owner.copy_from_slice(&bz[40..40 + ADDRESS_LENGTH]);
        let new_state = StateObject::from_bytes(&bz[UPDATE_PREFIX_LENGTH..])?;
        Ok(Self {
            range: Range::new(start, end),
            block_number,
            owner,
            new_state,
        })
    }

    /// The update's leaf index in its owner's state tree: the range
    /// start as a 16-byte big-endian string.
    pub fn index_bytes(&self) -> Vec<u8> {
        codec::encode_be_u128(self.range.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StateUpdate {
        StateUpdate::new(
            Range::new(9, 100),
            1,
            [0xBD; 20],
            StateObject::new([0xA6; 20], vec![0x12, 0x34, 0x56]),
        )
    }

    #[test]
    fn test_encoding_roundtrip() {
        let update = sample();
        assert_eq!(StateUpdate::from_bytes(&update.encoded()).unwrap(), update);
    }

    #[test]
    fn test_layout_offsets() {
        let update = sample();
        let bz = update.encoded();
        assert_eq!(&bz[0..16], codec::encode_be_u128(9).as_slice());
        assert_eq!(&bz[16..32], codec::encode_be_u128(100).as_slice());
        assert_eq!(&bz[32..40], codec::encode_be_u64(1).as_slice());
        assert_eq!(&bz[40..60], [0xBD; 20]);
        assert_eq!(&bz[60..], update.new_state.encoded().as_slice());
    }

    #[test]
    fn test_index_bytes_width() {
        let update = sample();
        assert_eq!(update.index_bytes().len(), STATE_INDEX_LENGTH);
        assert_eq!(update.index_bytes()[15], 9);
    }

    #[test]
    fn test_truncated_input_rejected() {
        let bz = sample().encoded();
        assert!(StateUpdate::from_bytes(&bz[..UPDATE_PREFIX_LENGTH - 1]).is_err());
    }
}
