//! Glue for the `proofgen` binary: CLI definitions, the static contract
//! address table, and small output helpers. The tree algorithm itself
//! lives in the `stdmt` crate.

pub mod addresses;
pub mod cli;
pub mod utils;
