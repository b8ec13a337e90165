//! Hashing rules for the standard Merkle tree.
//!
//! This module provides keccak-256 based hashing functions for:
//! - Raw byte strings
//! - ABI-encoded leaf values (double-hashed)
//! - Pairs of child hashes (sorted before concatenation)
//!
//! The two combining rules defined here are what make roots and proofs
//! portable across independent implementations, including on-chain
//! verifiers: leaves are hashed twice while internal nodes are hashed
//! once over their byte-sorted children.

use alloy::primitives::keccak256;

/// Type alias for a 32-byte hash value.
/// Used throughout the tree for node and leaf digests.
pub type Hash32 = [u8; 32];

/// A constant representing a hash of all zeros.
/// Used as a placeholder while a tree is under construction.
pub const ZERO_HASH32: Hash32 = [0u8; 32];

/// Computes the keccak-256 hash of a single value.
///
/// # Arguments
/// * `a` - Value to hash
///
/// # Returns
/// The 32-byte hash of the input
pub fn hash<T: AsRef<[u8]>>(a: T) -> Hash32 {
    keccak256(a.as_ref()).0
}

/// Computes the digest of an ABI-encoded leaf.
///
/// The encoding is hashed twice. A single-hashed 64-byte preimage is how
/// internal nodes are formed, so the extra hash keeps an attacker from
/// presenting an internal node as a leaf (second-preimage hardening).
///
/// # Arguments
/// * `encoded` - Canonical ABI encoding of the leaf's value tuple
///
/// # Returns
/// The 32-byte leaf digest
pub fn leaf_hash<T: AsRef<[u8]>>(encoded: T) -> Hash32 {
    hash(hash(encoded))
}

/// Combines two child hashes into their parent's hash.
///
/// The children are ordered by byte value before concatenation, so the
/// result is the same whichever side each child sat on. Proofs therefore
/// never need to record left/right orientation.
///
/// # Arguments
/// * `a` - One child hash
/// * `b` - The other child hash
///
/// # Returns
/// The 32-byte parent hash
pub fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(lo);
    buf[32..].copy_from_slice(hi);
    hash(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_known_value() {
        assert_eq!(
            hex::encode(hash(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_pair_order_invariance() {
        let a = hash(b"a");
        let b = hash(b"b");
        assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));
        assert_ne!(hash_pair(&a, &b), hash_pair(&a, &a));
    }

    #[test]
    fn test_leaf_domain_differs_from_node_domain() {
        let encoded = [7u8; 32];
        assert_ne!(leaf_hash(encoded), hash(encoded));
    }
}
