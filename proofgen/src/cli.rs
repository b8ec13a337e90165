use anyhow::Context;
use clap::Parser;

/// Builds a standard Merkle tree from literal leaf values and prints the
/// root, one proof per leaf, and a combined multiproof.
#[derive(Parser, Debug, Clone)]
pub struct ProofgenCli {
    /// Comma-separated leaf values, one per leaf
    #[arg(long, default_value = "9878,9785,9592,9107,8064,8038,7754")]
    pub values: String,

    /// Solidity type of the leaf value
    #[arg(long, default_value = "uint256")]
    pub leaf_type: String,

    /// Comma-separated leaf indices to cover with one multiproof
    /// (pass an empty string to skip the multiproof section)
    #[arg(long, default_value = "2,3,6")]
    pub multi: String,

    /// Print the external contract address table and exit
    #[arg(long)]
    pub list_contracts: bool,

    /// Emit machine-readable JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

impl ProofgenCli {
    pub fn leaf_values(&self) -> Vec<String> {
        self.values
            .split(',')
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .collect()
    }

    pub fn multi_indices(&self) -> anyhow::Result<Vec<usize>> {
        self.multi
            .split(',')
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|v| {
                v.parse::<usize>()
                    .with_context(|| format!("invalid leaf index {v:?}"))
            })
            .collect()
    }
}
