// Command-line counterpart of the original distribution script: commit a
// list of literal leaf values, then print the root, one inclusion proof
// per leaf, and a combined multiproof for a chosen subset.
use clap::Parser;
use log::info;
use proofgen::cli::ProofgenCli;
use proofgen::{addresses, utils};
use serde_json::json;
use stdmt::{verify_multi_proof, StandardMerkleTree};

fn main() -> anyhow::Result<()> {
    utils::init_logging("info");
    let args = ProofgenCli::parse();

    if args.list_contracts {
        for (name, addr) in addresses::all() {
            println!("{name}: {addr}");
        }
        return Ok(());
    }

    let values = args.leaf_values();
    let rows: Vec<Vec<&str>> = values.iter().map(|v| vec![v.as_str()]).collect();
    let tree = StandardMerkleTree::of_strings(&rows, &[args.leaf_type.as_str()])?;
    tree.validate()?;
    info!("committed {} leaves of type {}", tree.len(), args.leaf_type);

    let multi = args.multi_indices()?;
    if args.json {
        print_json(&tree, &values, &multi)?;
    } else {
        print_plain(&tree, &values, &multi)?;
    }
    Ok(())
}

fn print_plain(
    tree: &StandardMerkleTree,
    values: &[String],
    multi: &[usize],
) -> anyhow::Result<()> {
    println!("Merkle Root: {}", utils::fmt_hash(&tree.root()));
    for (i, _row) in tree.entries() {
        println!("Value: {}", values[i]);
        println!("Proof: {:?}", utils::fmt_hashes(&tree.get_proof(i)?));
    }
    if multi.is_empty() {
        return Ok(());
    }

    let mp = tree.get_multi_proof(multi)?;
    let covered: Vec<&str> = multi.iter().map(|&i| values[i].as_str()).collect();
    let mut ordered = Vec::with_capacity(mp.leaves.len());
    for row in &mp.leaves {
        ordered.push(values[tree.leaf_lookup(row)?].clone());
    }
    println!("Multi proof for {}:", covered.join(", "));
    println!("  Leaves (proof order): {}", ordered.join(", "));
    println!("  Proof: {:?}", utils::fmt_hashes(&mp.proof));
    println!("  Proof flags: {:?}", mp.proof_flags);

    let ok = verify_multi_proof(&tree.root(), tree.encoder(), &mp)?;
    info!("multiproof verification: {ok}");
    Ok(())
}

fn print_json(
    tree: &StandardMerkleTree,
    values: &[String],
    multi: &[usize],
) -> anyhow::Result<()> {
    let mut entries = Vec::new();
    for (i, _row) in tree.entries() {
        entries.push(json!({
            "value": values[i],
            "proof": utils::fmt_hashes(&tree.get_proof(i)?),
        }));
    }
    let mut doc = json!({
        "root": utils::fmt_hash(&tree.root()),
        "leafEncoding": tree.encoder().signature(),
        "entries": entries,
    });
    if !multi.is_empty() {
        let mp = tree.get_multi_proof(multi)?;
        let mut leaves = Vec::with_capacity(mp.leaves.len());
        for row in &mp.leaves {
            leaves.push(values[tree.leaf_lookup(row)?].clone());
        }
        doc["multiProof"] = json!({
            "leaves": leaves,
            "proof": utils::fmt_hashes(&mp.proof),
            "proofFlags": mp.proof_flags,
        });
    }
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
