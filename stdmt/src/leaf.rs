//! Leaf typing, validation and canonical encoding.
//!
//! A leaf is a tuple of typed values together with a declared Solidity
//! type signature (for example `["address", "uint256"]`). Before hashing,
//! the tuple is ABI-encoded against that signature, so the digest depends
//! only on the values and their types, never on runtime representation
//! details such as leading zeros or display format.

use alloy::dyn_abi::{DynSolType, DynSolValue};

use crate::error::MerkleError;
use crate::hasher::{self, Hash32};

/// The declared type signature shared by every leaf of one tree.
///
/// Parsed once at construction; all leaf rows are validated and encoded
/// against it. Rows that do not conform fail with
/// [`MerkleError::Encoding`].
#[derive(Debug, Clone)]
pub struct LeafEncoder {
    types: Vec<DynSolType>,
    signature: Vec<String>,
}

impl LeafEncoder {
    /// Parses a type signature such as `["uint256"]` or
    /// `["address", "uint256"]`.
    ///
    /// # Arguments
    /// * `signature` - One Solidity type string per leaf column
    ///
    /// # Returns
    /// * `Ok(LeafEncoder)` - If every type string parses
    /// * `Err(MerkleError)` - On an empty signature or an unknown type
    pub fn new(signature: &[&str]) -> Result<Self, MerkleError> {
        if signature.is_empty() {
            return Err(MerkleError::InvalidInput {
                reason: "leaf encoding must declare at least one column".to_owned(),
            });
        }
        let mut types = Vec::with_capacity(signature.len());
        for s in signature {
            let ty = s
                .parse::<DynSolType>()
                .map_err(|e| MerkleError::Encoding {
                    signature: (*s).to_owned(),
                    reason: e.to_string(),
                })?;
            types.push(ty);
        }
        Ok(Self {
            types,
            signature: signature.iter().map(|s| (*s).to_owned()).collect(),
        })
    }

    /// Number of columns in each leaf row.
    pub fn width(&self) -> usize {
        self.types.len()
    }

    /// The raw type strings this encoder was built from.
    pub fn signature(&self) -> &[String] {
        &self.signature
    }

    /// Parses one row of textual columns into typed values.
    ///
    /// Accepts the formats Solidity tooling accepts: decimal or `0x`
    /// literals for integers, checksummed or plain hex for addresses.
    ///
    /// # Arguments
    /// * `columns` - One string per declared column
    pub fn coerce(&self, columns: &[&str]) -> Result<Vec<DynSolValue>, MerkleError> {
        self.check_width(columns.len())?;
        let mut row = Vec::with_capacity(columns.len());
        for (column, (ty, sig)) in columns
            .iter()
            .zip(self.types.iter().zip(self.signature.iter()))
        {
            let value = ty.coerce_str(column).map_err(|e| MerkleError::Encoding {
                signature: sig.clone(),
                reason: e.to_string(),
            })?;
            row.push(value);
        }
        Ok(row)
    }

    /// ABI-encodes a leaf row against the declared signature.
    ///
    /// # Arguments
    /// * `values` - One typed value per declared column
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - The canonical encoding
    /// * `Err(MerkleError)` - If the row width or any value's type does
    ///   not match the declaration
    pub fn encode(&self, values: &[DynSolValue]) -> Result<Vec<u8>, MerkleError> {
        self.check_width(values.len())?;
        for ((ty, sig), value) in self
            .types
            .iter()
            .zip(self.signature.iter())
            .zip(values.iter())
        {
            if !ty.matches(value) {
                return Err(MerkleError::Encoding {
                    signature: sig.clone(),
                    reason: format!("value {value:?} does not conform to the declared type"),
                });
            }
        }
        Ok(DynSolValue::Tuple(values.to_vec()).abi_encode_params())
    }

    /// Computes the standard leaf digest: a double keccak-256 over the
    /// ABI encoding of the row.
    pub fn leaf_hash(&self, values: &[DynSolValue]) -> Result<Hash32, MerkleError> {
        Ok(hasher::leaf_hash(self.encode(values)?))
    }

    fn check_width(&self, got: usize) -> Result<(), MerkleError> {
        if got != self.types.len() {
            return Err(MerkleError::InvalidInput {
                reason: format!(
                    "leaf row has {} columns but the encoding declares {}",
                    got,
                    self.types.len()
                ),
            });
        }
        Ok(())
    }
}
