//! State objects: the committed payload a range resolves to.

use serde::{Deserialize, Serialize};

use crate::def::{Address, ADDRESS_LENGTH};
use crate::error::DecodeError;

/// A state object: the predicate contract that governs a range and the
/// parameters handed to it.
///
/// Packed byte layout (no length prefixes; the parameters run to the end
/// of the enclosing record):
///
/// +-----------------+-------------------+
/// | predicate (20B) | parameters (var)  |
/// +-----------------+-------------------+
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateObject {
    /// Address of the predicate contract.
    pub predicate: Address,
    /// Opaque parameters interpreted by the predicate.
    pub parameters: Vec<u8>,
}

impl StateObject {
    pub fn new(predicate: Address, parameters: Vec<u8>) -> Self {
        Self {
            predicate,
            parameters,
        }
    }

    /// The packed encoding: `predicate ++ parameters`.
    pub fn encoded(&self) -> Vec<u8> {
        let mut bz = Vec::with_capacity(ADDRESS_LENGTH + self.parameters.len());
        bz.extend_from_slice(&self.predicate);
        bz.extend_from_slice(&self.parameters);
        bz
    }

    /// Decodes a state object from its packed encoding. Everything after
    /// the predicate address is taken as parameters.
    pub fn from_bytes(bz: &[u8]) -> Result<Self, DecodeError> {
        if bz.len() < ADDRESS_LENGTH {
            return Err(DecodeError::UnexpectedEnd {
                need: ADDRESS_LENGTH,
                have: bz.len(),
            });
        }
        let mut predicate = [0u8; ADDRESS_LENGTH];
        predicate.copy_from_slice(&bz[..ADDRESS_LENGTH]);
        Ok(Self {
            predicate,
            parameters: bz[ADDRESS_LENGTH..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_roundtrip() {
        let object = StateObject::new([0xAB; 20], vec![0x12, 0x34, 0x56]);
        let decoded = StateObject::from_bytes(&object.encoded()).unwrap();
        assert_eq!(decoded, object);
    }

    #[test]
    fn test_empty_parameters() {
        let object = StateObject::new([1; 20], Vec::new());
        assert_eq!(object.encoded().len(), 20);
        assert_eq!(StateObject::from_bytes(&object.encoded()).unwrap(), object);
    }

    #[test]
    fn test_short_input_rejected() {
        assert!(matches!(
            StateObject::from_bytes(&[0u8; 19]),
            Err(DecodeError::UnexpectedEnd { .. })
        ));
    }
}
