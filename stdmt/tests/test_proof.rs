use alloy::dyn_abi::DynSolValue;
use alloy::primitives::U256;
use stdmt::{
    verify_multi_proof, verify_proof, Hash32, MerkleError, MultiProof, StandardMerkleTree,
};

fn h32(s: &str) -> Hash32 {
    let mut out = [0u8; 32];
    out.copy_from_slice(&hex::decode(s).unwrap());
    out
}

fn uint_row(v: u64) -> Vec<DynSolValue> {
    vec![DynSolValue::Uint(U256::from(v), 256)]
}

fn airdrop_tree() -> StandardMerkleTree {
    let rows: Vec<Vec<&str>> = ["9878", "9785", "9592", "9107", "8064", "8038", "7754"]
        .iter()
        .map(|v| vec![*v])
        .collect();
    StandardMerkleTree::of_strings(&rows, &["uint256"]).unwrap()
}

#[test]
fn test_seven_leaf_root() {
    let tree = airdrop_tree();
    assert_eq!(
        tree.root(),
        h32("08f3eb3db4c2471f4f86ffafecd871a4e98a451613c9f437c1e8b7ffd54647cb")
    );
    tree.validate().unwrap();
}

#[test]
fn test_every_entry_is_provable() {
    let tree = airdrop_tree();
    for (i, row) in tree.entries() {
        let proof = tree.get_proof(i).unwrap();
        assert!(verify_proof(&tree.root(), tree.encoder(), row, &proof).unwrap());
    }
}

#[test]
fn test_known_proof_for_first_entry() {
    let tree = airdrop_tree();
    assert_eq!(
        tree.get_proof(0).unwrap(),
        vec![
            h32("f019af0ece816f6833bb9ca5ab92834e21b0ad56f2216bff481dec6c4aeb00eb"),
            h32("bcb758f687068fbd0a6859b68fedd31cd7ad5fc77a0a22dddfd95fc65eeab932"),
            h32("3c32056362232dfd0408e9bed4d65f6748bed405e6ed90eabca03c961eb4a6b9"),
        ]
    );
}

#[test]
fn test_tampered_proof_fails() {
    let tree = airdrop_tree();
    let mut proof = tree.get_proof(0).unwrap();
    proof[1][7] ^= 0x01;
    assert!(!verify_proof(&tree.root(), tree.encoder(), &uint_row(9878), &proof).unwrap());
}

#[test]
fn test_substituted_leaf_fails() {
    let tree = airdrop_tree();
    let proof = tree.get_proof(0).unwrap();
    assert!(!verify_proof(&tree.root(), tree.encoder(), &uint_row(9879), &proof).unwrap());
}

#[test]
fn test_multi_proof_for_three_entries() {
    let tree = airdrop_tree();
    // Entries 2, 3 and 6 are the values 9592, 9107 and 7754. In the
    // combined proof they sit in descending tree-slot order.
    let mp = tree.get_multi_proof(&[2, 3, 6]).unwrap();
    assert_eq!(
        mp.leaves,
        vec![uint_row(9592), uint_row(7754), uint_row(9107)]
    );
    assert_eq!(
        mp.proof,
        vec![h32(
            "0db851939cf734f5e0f3eafe70ccfbcb5509e5a8ade8c6ace7c1d1d1cfc841a5"
        )]
    );
    assert_eq!(mp.proof_flags, vec![true, true, false]);
    assert!(verify_multi_proof(&tree.root(), tree.encoder(), &mp).unwrap());
}

#[test]
fn test_multi_proof_tampering_any_value_fails() {
    let tree = airdrop_tree();
    let mp = tree.get_multi_proof(&[2, 3, 6]).unwrap();
    for i in 0..mp.leaves.len() {
        let mut tampered = mp.clone();
        tampered.leaves[i] = uint_row(1234);
        assert!(!verify_multi_proof(&tree.root(), tree.encoder(), &tampered).unwrap());
    }
}

#[test]
fn test_small_set_multi_proof() {
    let rows: Vec<Vec<&str>> = ["8", "14", "64"].iter().map(|v| vec![*v]).collect();
    let tree = StandardMerkleTree::of_strings(&rows, &["uint256"]).unwrap();
    assert_eq!(
        tree.root(),
        h32("23dccdb06adb5c64caf600b3476f3036e612ad58436f2a5de84d447c165bae38")
    );

    let mp = tree.get_multi_proof(&[0, 1]).unwrap();
    assert_eq!(mp.leaves, vec![uint_row(14), uint_row(8)]);
    assert_eq!(mp.proof_flags, vec![false, true]);
    assert!(verify_multi_proof(&tree.root(), tree.encoder(), &mp).unwrap());

    // Substituting the remaining value 64 for either proven one fails.
    for i in 0..2 {
        let mut tampered = mp.clone();
        tampered.leaves[i] = uint_row(64);
        assert!(!verify_multi_proof(&tree.root(), tree.encoder(), &tampered).unwrap());
    }
}

#[test]
fn test_multi_proof_covering_everything() {
    let tree = airdrop_tree();
    let all: Vec<usize> = (0..tree.len()).collect();
    let mp = tree.get_multi_proof(&all).unwrap();
    assert!(mp.proof.is_empty());
    assert!(verify_multi_proof(&tree.root(), tree.encoder(), &mp).unwrap());
}

#[test]
fn test_malformed_descriptor_reads_as_invalid() {
    let tree = airdrop_tree();
    let mut mp = tree.get_multi_proof(&[2, 3, 6]).unwrap();
    mp.proof_flags = vec![false, false, false];
    assert!(!verify_multi_proof(&tree.root(), tree.encoder(), &mp).unwrap());
}

#[test]
fn test_roots_differ_across_leaf_sets() {
    let tree_a = airdrop_tree();
    let rows: Vec<Vec<&str>> = ["9878", "9785", "9592"].iter().map(|v| vec![*v]).collect();
    let tree_b = StandardMerkleTree::of_strings(&rows, &["uint256"]).unwrap();
    assert_ne!(tree_a.root(), tree_b.root());
}

#[test]
fn test_non_power_of_two_sizes_verify_end_to_end() {
    for n in [1u64, 2, 3, 5, 7, 8] {
        let rows: Vec<Vec<DynSolValue>> = (1..=n).map(uint_row).collect();
        let tree = StandardMerkleTree::of(&rows, &["uint256"]).unwrap();
        for (i, row) in tree.entries() {
            let proof = tree.get_proof(i).unwrap();
            assert!(
                verify_proof(&tree.root(), tree.encoder(), row, &proof).unwrap(),
                "size {n}, leaf {i}"
            );
        }
        let all: Vec<usize> = (0..tree.len()).collect();
        let mp = tree.get_multi_proof(&all).unwrap();
        assert!(verify_multi_proof(&tree.root(), tree.encoder(), &mp).unwrap());
    }
}

#[test]
fn test_build_rejects_bad_rows() {
    let rows: Vec<Vec<&str>> = vec![vec!["9878"], vec!["not-a-number"]];
    assert!(matches!(
        StandardMerkleTree::of_strings(&rows, &["uint256"]),
        Err(MerkleError::Encoding { .. })
    ));
}

#[test]
fn test_multi_proof_digests_roundtrip_through_bincode() {
    let tree = airdrop_tree();
    let mp = tree.get_multi_proof(&[2, 3, 6]).unwrap();
    let digests = MultiProof {
        leaves: mp
            .leaves
            .iter()
            .map(|row| tree.leaf_hash(row).unwrap())
            .collect::<Vec<Hash32>>(),
        proof: mp.proof.clone(),
        proof_flags: mp.proof_flags.clone(),
    };
    let bytes = bincode::serialize(&digests).unwrap();
    let decoded: MultiProof<Hash32> = bincode::deserialize(&bytes).unwrap();
    assert_eq!(decoded, digests);
    assert_eq!(
        stdmt::proof::process_multi_proof(&decoded).unwrap(),
        tree.root()
    );
}
