//! Proof generation and verification.
//!
//! Single-leaf proofs are plain sibling-digest paths. Multiproofs carry
//! the minimal digest set for several leaves at once plus a boolean
//! descriptor recording, per pairing step, whether the second operand
//! comes from the proof list or from a hash already derived in this
//! verification. Verifiers replay the descriptor without any knowledge
//! of the full tree.

use std::collections::VecDeque;

use alloy::dyn_abi::DynSolValue;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::MerkleError;
use crate::hasher::{self, Hash32};
use crate::leaf::LeafEncoder;
use crate::tree::{is_leaf_node, parent_index, sibling_index};

/// A compact combined proof for several leaves.
///
/// `leaves` sit in descending tree-slot order. `proof_flags` has one
/// entry per pairing step: `true` pairs with the next unconsumed
/// leaf/derived digest, `false` pairs with the next entry of `proof`.
/// A digest is never requested twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiProof<T> {
    pub leaves: Vec<T>,
    pub proof: Vec<Hash32>,
    pub proof_flags: Vec<bool>,
}

/// Collects the sibling-digest path from a leaf slot up to the root.
///
/// # Arguments
/// * `tree` - Flat node array
/// * `tree_index` - Slot of the target leaf in the node array
///
/// # Returns
/// * `Ok(Vec<Hash32>)` - Sibling digests, leaf level first
/// * `Err(MerkleError)` - If the slot does not name a leaf
pub fn get_proof(tree: &[Hash32], mut tree_index: usize) -> Result<Vec<Hash32>, MerkleError> {
    if !is_leaf_node(tree.len(), tree_index) {
        return Err(MerkleError::InvalidInput {
            reason: format!("tree slot {tree_index} does not name a leaf node"),
        });
    }
    let mut proof = Vec::new();
    while tree_index > 0 {
        proof.push(tree[sibling_index(tree_index)]);
        tree_index = parent_index(tree_index);
    }
    Ok(proof)
}

/// Folds a leaf digest with its sibling path using sorted-pair hashing.
pub fn process_proof(leaf: &Hash32, proof: &[Hash32]) -> Hash32 {
    proof
        .iter()
        .fold(*leaf, |acc, sibling| hasher::hash_pair(&acc, sibling))
}

/// Walks the tree level by level and collects the minimal digest set for
/// the given leaf slots, recording the combination order as it goes.
///
/// A sibling digest is emitted into the proof list only when it is not
/// itself derived from another target in the same call, so no digest is
/// ever requested twice. Worst case (all leaves targeted) degenerates to
/// a full tree walk; for k targets out of n leaves the typical cost is
/// O(k log n).
///
/// # Arguments
/// * `tree` - Flat node array
/// * `tree_indices` - Distinct leaf slots, at least one
pub fn get_multi_proof(
    tree: &[Hash32],
    tree_indices: &[usize],
) -> Result<MultiProof<Hash32>, MerkleError> {
    if tree_indices.is_empty() {
        return Err(MerkleError::InvalidInput {
            reason: "expected at least one leaf slot".to_owned(),
        });
    }
    if !tree_indices.iter().all_unique() {
        return Err(MerkleError::InvalidInput {
            reason: "duplicate leaf slots in multiproof request".to_owned(),
        });
    }
    for &i in tree_indices {
        if !is_leaf_node(tree.len(), i) {
            return Err(MerkleError::InvalidInput {
                reason: format!("tree slot {i} does not name a leaf node"),
            });
        }
    }
    let mut sorted: Vec<usize> = tree_indices.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    // Pending slots, deepest first. Each step either consumes a sibling
    // that is itself pending ("derived", flag true) or pulls it from the
    // tree into the proof list ("known", flag false), then enqueues the
    // parent.
    let mut stack: VecDeque<usize> = sorted.iter().copied().collect();
    let mut proof = Vec::new();
    let mut proof_flags = Vec::new();
    while let Some(&j) = stack.front() {
        if j == 0 {
            break;
        }
        stack.pop_front();
        let s = sibling_index(j);
        if stack.front() == Some(&s) {
            proof_flags.push(true);
            stack.pop_front();
        } else {
            proof_flags.push(false);
            proof.push(tree[s]);
        }
        stack.push_back(parent_index(j));
    }

    Ok(MultiProof {
        leaves: sorted.iter().map(|&i| tree[i]).collect(),
        proof,
        proof_flags,
    })
}

/// Reconstructs the root committed to by a multiproof.
///
/// Replays the descriptor: each step pops the next unconsumed digest and
/// pairs it with either another unconsumed digest (`true`) or the next
/// proof entry (`false`).
///
/// # Returns
/// * `Ok(Hash32)` - The reconstructed root
/// * `Err(MerkleError)` - If the descriptor is inconsistent with the
///   number of supplied digests
pub fn process_multi_proof(multiproof: &MultiProof<Hash32>) -> Result<Hash32, MerkleError> {
    let MultiProof {
        leaves,
        proof,
        proof_flags,
    } = multiproof;
    if leaves.len() + proof.len() != proof_flags.len() + 1 {
        return Err(MerkleError::InvalidInput {
            reason: "proof flags are inconsistent with the number of supplied digests".to_owned(),
        });
    }
    let mut stack: VecDeque<Hash32> = leaves.iter().copied().collect();
    let mut proof_iter = proof.iter();
    for &flag in proof_flags {
        let a = stack.pop_front().ok_or_else(|| MerkleError::InvalidInput {
            reason: "multiproof descriptor ran out of leaf digests".to_owned(),
        })?;
        let b = if flag {
            stack.pop_front()
        } else {
            proof_iter.next().copied()
        }
        .ok_or_else(|| MerkleError::InvalidInput {
            reason: "multiproof descriptor ran out of digests".to_owned(),
        })?;
        stack.push_back(hasher::hash_pair(&a, &b));
    }
    // The length invariant guarantees exactly one digest is left, either
    // derived on the stack or, for an empty leaf set, given in the proof.
    match stack.pop_back() {
        Some(root) => Ok(root),
        None => proof_iter
            .next()
            .copied()
            .ok_or_else(|| MerkleError::InvalidInput {
                reason: "multiproof contains no digests".to_owned(),
            }),
    }
}

/// Checks a single-leaf inclusion proof against `root`.
///
/// # Arguments
/// * `root` - The committed root
/// * `encoder` - Leaf encoding the tree was built with
/// * `values` - The claimed leaf row
/// * `proof` - Sibling-digest path for that row
///
/// # Returns
/// * `Ok(true)` - The row is committed under `root`
/// * `Ok(false)` - The path does not reach `root`
/// * `Err(MerkleError)` - The row cannot be encoded at all
pub fn verify_proof(
    root: &Hash32,
    encoder: &LeafEncoder,
    values: &[DynSolValue],
    proof: &[Hash32],
) -> Result<bool, MerkleError> {
    let leaf = encoder.leaf_hash(values)?;
    Ok(process_proof(&leaf, proof) == *root)
}

/// Checks a multi-leaf proof against `root`.
///
/// An inconsistent descriptor is reported as `Ok(false)`, the same as a
/// tampered digest; only rows that cannot be encoded raise an error.
pub fn verify_multi_proof(
    root: &Hash32,
    encoder: &LeafEncoder,
    multiproof: &MultiProof<Vec<DynSolValue>>,
) -> Result<bool, MerkleError> {
    let mut leaves = Vec::with_capacity(multiproof.leaves.len());
    for row in &multiproof.leaves {
        leaves.push(encoder.leaf_hash(row)?);
    }
    let digests = MultiProof {
        leaves,
        proof: multiproof.proof.clone(),
        proof_flags: multiproof.proof_flags.clone(),
    };
    match process_multi_proof(&digests) {
        Ok(reconstructed) => Ok(reconstructed == *root),
        Err(_) => Ok(false),
    }
}
