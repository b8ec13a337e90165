//! Tree construction and the typed [`StandardMerkleTree`] wrapper.
//!
//! The tree is a complete binary tree stored as a flat array of `2n-1`
//! nodes for `n` leaves. Leaf digests are sorted ascending by byte value
//! and fill the tail of the array (the smallest digest lands on the last
//! slot); internal node `i` hashes its children at `2i+1` and `2i+2`
//! with the sorted-pair rule. No node is ever duplicated, so every leaf
//! count >= 1 yields a well-formed tree without a padding step.
//!
//! [`StandardMerkleTree`] keeps, for every input row, the tree slot its
//! digest landed on after sorting, so the public API stays indexed by
//! input order while proofs remain positionally exact.

use std::collections::HashMap;

use alloy::dyn_abi::DynSolValue;
use itertools::Itertools;
use log::debug;

use crate::error::MerkleError;
use crate::hasher::{self, Hash32, ZERO_HASH32};
use crate::leaf::LeafEncoder;
use crate::proof::{self, MultiProof};

pub(crate) const fn left_child_index(i: usize) -> usize {
    2 * i + 1
}

pub(crate) const fn right_child_index(i: usize) -> usize {
    2 * i + 2
}

/// Panics if called on the root; callers check `i > 0` first.
pub(crate) const fn parent_index(i: usize) -> usize {
    (i - 1) / 2
}

pub(crate) const fn sibling_index(i: usize) -> usize {
    if i % 2 == 0 {
        i - 1
    } else {
        i + 1
    }
}

/// A node is a leaf iff it has no children in the flat layout.
pub(crate) const fn is_leaf_node(tree_len: usize, i: usize) -> bool {
    i < tree_len && right_child_index(i) >= tree_len
}

/// Builds the flat node array over pre-hashed, pre-sorted leaf digests.
///
/// # Arguments
/// * `leaves` - Leaf digests in canonical (ascending) order
///
/// # Returns
/// * `Ok(Vec<Hash32>)` - All `2n-1` nodes, root at index 0
/// * `Err(MerkleError)` - If `leaves` is empty
pub fn make_merkle_tree(leaves: &[Hash32]) -> Result<Vec<Hash32>, MerkleError> {
    if leaves.is_empty() {
        return Err(MerkleError::InvalidInput {
            reason: "expected a non-empty list of leaf digests".to_owned(),
        });
    }
    let tree_len = 2 * leaves.len() - 1;
    let mut tree = vec![ZERO_HASH32; tree_len];
    for (i, leaf) in leaves.iter().enumerate() {
        tree[tree_len - 1 - i] = *leaf;
    }
    for i in (0..tree_len - leaves.len()).rev() {
        tree[i] = hasher::hash_pair(&tree[left_child_index(i)], &tree[right_child_index(i)]);
    }
    Ok(tree)
}

/// Recomputes every internal node and checks it against the stored value.
///
/// # Arguments
/// * `tree` - A flat node array as produced by [`make_merkle_tree`]
pub fn is_valid_merkle_tree(tree: &[Hash32]) -> bool {
    if tree.is_empty() || tree.len() % 2 != 1 {
        return false;
    }
    for i in 0..tree.len() {
        if is_leaf_node(tree.len(), i) {
            continue;
        }
        let expected =
            hasher::hash_pair(&tree[left_child_index(i)], &tree[right_child_index(i)]);
        if tree[i] != expected {
            return false;
        }
    }
    true
}

/// One committed row together with the tree slot its digest landed on.
#[derive(Debug, Clone)]
struct IndexedValue {
    value: Vec<DynSolValue>,
    tree_index: usize,
}

/// A commitment to an ordered list of ABI-encoded leaf rows.
///
/// Built once from an immutable input list; never mutated afterwards.
/// Adding or removing a leaf means building a new tree. All query methods
/// are pure and safe to call concurrently through a shared reference.
#[derive(Debug, Clone)]
pub struct StandardMerkleTree {
    tree: Vec<Hash32>,
    values: Vec<IndexedValue>,
    encoder: LeafEncoder,
    hash_lookup: HashMap<Hash32, usize>,
}

impl StandardMerkleTree {
    /// Builds a tree committing to `values`, each row encoded against
    /// `signature`.
    ///
    /// # Arguments
    /// * `values` - One row of typed values per leaf, in caller order
    /// * `signature` - Solidity type strings shared by every row
    ///
    /// # Returns
    /// * `Ok(StandardMerkleTree)` - The finished commitment
    /// * `Err(MerkleError)` - On an empty list or a row that does not
    ///   conform to the signature; nothing is constructed on failure
    pub fn of(values: &[Vec<DynSolValue>], signature: &[&str]) -> Result<Self, MerkleError> {
        Self::with_encoder(values, LeafEncoder::new(signature)?)
    }

    /// Convenience over [`StandardMerkleTree::of`]: rows given as text
    /// columns, coerced against the signature before hashing.
    pub fn of_strings(rows: &[Vec<&str>], signature: &[&str]) -> Result<Self, MerkleError> {
        let encoder = LeafEncoder::new(signature)?;
        let mut values = Vec::with_capacity(rows.len());
        for row in rows {
            values.push(encoder.coerce(row)?);
        }
        Self::with_encoder(&values, encoder)
    }

    /// Builds a tree with an already-parsed [`LeafEncoder`].
    pub fn with_encoder(
        values: &[Vec<DynSolValue>],
        encoder: LeafEncoder,
    ) -> Result<Self, MerkleError> {
        if values.is_empty() {
            return Err(MerkleError::InvalidInput {
                reason: "cannot commit to an empty list of leaves".to_owned(),
            });
        }
        let mut hashed: Vec<(Hash32, usize)> = Vec::with_capacity(values.len());
        for (value_index, row) in values.iter().enumerate() {
            hashed.push((encoder.leaf_hash(row)?, value_index));
        }
        // Canonical leaf order: ascending by digest byte value.
        hashed.sort();

        let leaf_digests: Vec<Hash32> = hashed.iter().map(|(h, _)| *h).collect();
        let tree = make_merkle_tree(&leaf_digests)?;
        let tree_len = tree.len();

        let mut indexed: Vec<IndexedValue> = values
            .iter()
            .map(|row| IndexedValue {
                value: row.clone(),
                tree_index: 0,
            })
            .collect();
        let mut hash_lookup = HashMap::with_capacity(values.len());
        for (leaf_index, (hash, value_index)) in hashed.iter().enumerate() {
            indexed[*value_index].tree_index = tree_len - 1 - leaf_index;
            hash_lookup.insert(*hash, *value_index);
        }
        debug!(
            "committed {} leaves, root 0x{}",
            values.len(),
            hex::encode(tree[0])
        );
        Ok(Self {
            tree,
            values: indexed,
            encoder,
            hash_lookup,
        })
    }

    /// The root digest committing to the entire leaf set.
    pub fn root(&self) -> Hash32 {
        self.tree[0]
    }

    /// Number of committed leaves.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The encoder shared by every leaf of this tree.
    pub fn encoder(&self) -> &LeafEncoder {
        &self.encoder
    }

    /// Iterates the committed rows in input order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &[DynSolValue])> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, iv)| (i, iv.value.as_slice()))
    }

    /// Digest of one row under this tree's encoding.
    pub fn leaf_hash(&self, values: &[DynSolValue]) -> Result<Hash32, MerkleError> {
        self.encoder.leaf_hash(values)
    }

    /// Finds the input index of a committed row, by value.
    ///
    /// # Returns
    /// * `Ok(usize)` - Input index of the row
    /// * `Err(MerkleError)` - If the row is not part of this tree
    pub fn leaf_lookup(&self, values: &[DynSolValue]) -> Result<usize, MerkleError> {
        let hash = self.encoder.leaf_hash(values)?;
        self.hash_lookup
            .get(&hash)
            .copied()
            .ok_or_else(|| MerkleError::InvalidInput {
                reason: "leaf is not part of this tree".to_owned(),
            })
    }

    /// Sibling-digest path for the leaf at input position `index`, ordered
    /// from the leaf's level up to (but excluding) the root.
    ///
    /// # Arguments
    /// * `index` - Position of the leaf in the input list
    pub fn get_proof(&self, index: usize) -> Result<Vec<Hash32>, MerkleError> {
        let iv = self
            .values
            .get(index)
            .ok_or(MerkleError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })?;
        proof::get_proof(&self.tree, iv.tree_index)
    }

    /// Compact combined proof for several leaves at once.
    ///
    /// The returned rows sit in descending tree-slot order, which is the
    /// order [`crate::proof::process_multi_proof`] consumes them in.
    ///
    /// # Arguments
    /// * `indices` - Distinct input positions, at least one
    pub fn get_multi_proof(
        &self,
        indices: &[usize],
    ) -> Result<MultiProof<Vec<DynSolValue>>, MerkleError> {
        if indices.is_empty() {
            return Err(MerkleError::InvalidInput {
                reason: "expected at least one leaf index".to_owned(),
            });
        }
        if !indices.iter().all_unique() {
            return Err(MerkleError::InvalidInput {
                reason: "duplicate leaf indices in multiproof request".to_owned(),
            });
        }
        let mut order: Vec<(usize, usize)> = Vec::with_capacity(indices.len());
        for &index in indices {
            let iv = self
                .values
                .get(index)
                .ok_or_else(|| MerkleError::InvalidInput {
                    reason: format!(
                        "leaf index {} is out of range for a tree of {} leaves",
                        index,
                        self.values.len()
                    ),
                })?;
            order.push((iv.tree_index, index));
        }
        order.sort_unstable_by(|a, b| b.0.cmp(&a.0));

        let tree_indices: Vec<usize> = order.iter().map(|(ti, _)| *ti).collect();
        let digests = proof::get_multi_proof(&self.tree, &tree_indices)?;
        let leaves = order
            .iter()
            .map(|&(_, value_index)| self.values[value_index].value.clone())
            .collect();
        Ok(MultiProof {
            leaves,
            proof: digests.proof,
            proof_flags: digests.proof_flags,
        })
    }

    /// Checks one committed-shaped row against this tree's root.
    pub fn verify(&self, values: &[DynSolValue], proof: &[Hash32]) -> Result<bool, MerkleError> {
        proof::verify_proof(&self.root(), &self.encoder, values, proof)
    }

    /// Full self-check: node consistency plus provability of every leaf.
    pub fn validate(&self) -> Result<(), MerkleError> {
        if !is_valid_merkle_tree(&self.tree) {
            return Err(MerkleError::InvalidInput {
                reason: "merkle tree node array is inconsistent".to_owned(),
            });
        }
        for index in 0..self.values.len() {
            let path = self.get_proof(index)?;
            let leaf = self.encoder.leaf_hash(&self.values[index].value)?;
            if proof::process_proof(&leaf, &path) != self.root() {
                return Err(MerkleError::InvalidInput {
                    reason: format!("leaf {index} is not provable against the root"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    fn uint_rows(values: &[u64]) -> Vec<Vec<DynSolValue>> {
        values
            .iter()
            .map(|v| vec![DynSolValue::Uint(U256::from(*v), 256)])
            .collect()
    }

    #[test]
    fn test_make_merkle_tree_rejects_empty() {
        assert!(matches!(
            make_merkle_tree(&[]),
            Err(MerkleError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_single_leaf_tree_is_its_own_root() {
        let leaf = hasher::hash(b"only");
        let tree = make_merkle_tree(&[leaf]).unwrap();
        assert_eq!(tree, vec![leaf]);
        assert!(is_valid_merkle_tree(&tree));
    }

    #[test]
    fn test_corrupted_node_is_detected() {
        let leaves = [hasher::hash(b"a"), hasher::hash(b"b"), hasher::hash(b"c")];
        let mut tree = make_merkle_tree(&leaves).unwrap();
        assert!(is_valid_merkle_tree(&tree));
        tree[1][0] ^= 0x01;
        assert!(!is_valid_merkle_tree(&tree));
    }

    #[test]
    fn test_even_length_array_is_invalid() {
        let leaves = [hasher::hash(b"a"), hasher::hash(b"b")];
        let tree = make_merkle_tree(&leaves).unwrap();
        assert!(!is_valid_merkle_tree(&tree[..2]));
    }

    #[test]
    fn test_build_rejects_empty_values() {
        assert!(matches!(
            StandardMerkleTree::of(&[], &["uint256"]),
            Err(MerkleError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_build_is_deterministic() {
        let rows = uint_rows(&[5, 17, 9, 3]);
        let a = StandardMerkleTree::of(&rows, &["uint256"]).unwrap();
        let b = StandardMerkleTree::of(&rows, &["uint256"]).unwrap();
        assert_eq!(a.root(), b.root());
        for i in 0..rows.len() {
            assert_eq!(a.get_proof(i).unwrap(), b.get_proof(i).unwrap());
        }
    }

    #[test]
    fn test_every_small_size_builds_and_validates() {
        for n in [1usize, 2, 3, 5, 7, 8] {
            let rows = uint_rows(&(1..=n as u64).collect::<Vec<_>>());
            let tree = StandardMerkleTree::of(&rows, &["uint256"]).unwrap();
            tree.validate().unwrap();
            assert_eq!(tree.len(), n);
        }
    }

    #[test]
    fn test_get_proof_index_out_of_range() {
        let rows = uint_rows(&[1, 2, 3]);
        let tree = StandardMerkleTree::of(&rows, &["uint256"]).unwrap();
        assert!(matches!(
            tree.get_proof(3),
            Err(MerkleError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_multi_proof_rejects_duplicates_and_bad_indices() {
        let rows = uint_rows(&[1, 2, 3]);
        let tree = StandardMerkleTree::of(&rows, &["uint256"]).unwrap();
        assert!(matches!(
            tree.get_multi_proof(&[1, 1]),
            Err(MerkleError::InvalidInput { .. })
        ));
        assert!(matches!(
            tree.get_multi_proof(&[0, 9]),
            Err(MerkleError::InvalidInput { .. })
        ));
        assert!(matches!(
            tree.get_multi_proof(&[]),
            Err(MerkleError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_leaf_lookup_roundtrip() {
        let rows = uint_rows(&[11, 22, 33]);
        let tree = StandardMerkleTree::of(&rows, &["uint256"]).unwrap();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(tree.leaf_lookup(row).unwrap(), i);
        }
        let absent = vec![DynSolValue::Uint(U256::from(44u64), 256)];
        assert!(tree.leaf_lookup(&absent).is_err());
    }
}
