use thiserror::Error;

/// Errors reported by tree construction, proof generation and verification.
///
/// All of these are synchronous input-validation failures. Nothing here is
/// transient or retryable, and a failed operation leaves no partial state
/// behind.
#[derive(Error, Debug)]
pub enum MerkleError {
    /// A leaf value is incompatible with its declared type signature.
    #[error("value cannot be encoded as {signature}: {reason}")]
    Encoding { signature: String, reason: String },

    /// A request is malformed: empty leaf set, duplicate indices, or an
    /// inconsistent multiproof descriptor.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A single-proof index does not name a leaf of the tree.
    #[error("leaf index {index} is out of range for a tree of {len} leaves")]
    IndexOutOfRange { index: usize, len: usize },
}

impl From<MerkleError> for String {
    fn from(error: MerkleError) -> Self {
        error.to_string()
    }
}
