//! Standard Merkle tree commitments over ABI-encoded typed leaves.
//!
//! # Overview
//! This crate builds a binary hash tree over an ordered list of typed
//! leaf values and produces:
//! - The root: a single digest committing to the whole leaf set
//! - Single-leaf inclusion proofs (sibling-digest paths)
//! - Multiproofs: one compact proof covering several leaves at once,
//!   smaller than concatenating individual proofs
//!
//! The byte-level conventions interoperate with verifiers built against
//! the same rules, including on-chain ones:
//! - Leaves are ABI-encoded against a declared Solidity type signature,
//!   then hashed twice with keccak-256 (leaf/node domain separation)
//! - Leaf digests are sorted ascending before placement, and the tree is
//!   a complete binary tree in a flat `2n-1` array, so no padding node is
//!   ever fabricated
//! - Internal nodes hash their children sorted by byte value, making the
//!   tree invariant to left/right orientation
//!
//! # Components
//! - [`StandardMerkleTree`]: builds the commitment and answers proof
//!   queries, indexed by input order
//! - [`MultiProof`]: digest list plus the boolean combination-order
//!   descriptor a verifier replays
//! - [`LeafEncoder`]: parses a type signature and validates/encodes rows
//! - [`verify_proof`] / [`verify_multi_proof`]: pure verification against
//!   a root, no tree required
//!
//! # Example
//! ```
//! use stdmt::StandardMerkleTree;
//!
//! let rows: Vec<Vec<&str>> = ["8", "14", "64"].iter().map(|v| vec![*v]).collect();
//! let tree = StandardMerkleTree::of_strings(&rows, &["uint256"]).unwrap();
//! let proof = tree.get_proof(0).unwrap();
//! let row = tree.entries().next().unwrap().1.to_vec();
//! assert!(tree.verify(&row, &proof).unwrap());
//! ```
//!
//! # Note on Thread Safety
//! A finished tree is immutable; every query method is a pure function
//! over it, so a shared reference may be used from any number of threads
//! without locking.

pub mod error;
pub mod hasher;
pub mod leaf;
pub mod proof;
pub mod tree;

pub use error::MerkleError;
pub use hasher::Hash32;
pub use leaf::LeafEncoder;
pub use proof::{verify_multi_proof, verify_proof, MultiProof};
pub use tree::StandardMerkleTree;
