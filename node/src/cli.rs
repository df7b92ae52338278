//! # CLI Interface
//!
//! Command-line arguments for `rail-nft-node`, via `clap` derive. Every
//! `run` flag can also come from a `RAIL_NFT_*` environment variable.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rail_nft_protocol::config::{
    DEFAULT_METRICS_PORT, DEFAULT_RPC_PORT, DEFAULT_TOKEN_NAME, DEFAULT_TOKEN_SYMBOL,
};
use rail_nft_protocol::{Address, Bytes32};

use crate::logging::LogFormat;

/// RAIL NFT devnet node.
///
/// Hosts the multi-claim and shape-shift contracts in memory behind a
/// JSON-RPC API, and offers offline helpers for leaf hashing and proof
/// checks.
#[derive(Parser, Debug)]
#[command(
    name = "rail-nft-node",
    about = "RAIL NFT devnet node",
    version,
    propagate_version = true
)]
pub struct RailNodeCli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy the contracts and serve the devnet API.
    Run(RunArgs),
    /// Print the leaf digest of a claim entry.
    HashLeaf(HashLeafArgs),
    /// Check a Merkle proof for a claim entry against a root.
    VerifyProof(VerifyProofArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for `run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Address that deploys and owns both contracts.
    #[arg(long, env = "RAIL_NFT_ADMIN")]
    pub admin: Address,

    /// Collection name.
    #[arg(long, env = "RAIL_NFT_NAME", default_value = DEFAULT_TOKEN_NAME)]
    pub name: String,

    /// Collection symbol.
    #[arg(long, env = "RAIL_NFT_SYMBOL", default_value = DEFAULT_TOKEN_SYMBOL)]
    pub symbol: String,

    /// Port for the JSON-RPC / WebSocket API.
    #[arg(long, env = "RAIL_NFT_RPC_PORT", default_value_t = DEFAULT_RPC_PORT)]
    pub rpc_port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "RAIL_NFT_METRICS_PORT", default_value_t = DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// Level for the RAIL crates when `RUST_LOG` is unset.
    #[arg(long, env = "RAIL_NFT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format.
    #[arg(
        long,
        env = "RAIL_NFT_LOG_FORMAT",
        value_enum,
        ignore_case = true,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// JSON snapshot restored on start and written on shutdown.
    #[arg(long, env = "RAIL_NFT_STATE_FILE")]
    pub state_file: Option<PathBuf>,
}

/// Arguments for `hash-leaf`.
#[derive(Parser, Debug)]
pub struct HashLeafArgs {
    /// Claimer address.
    #[arg(long)]
    pub claimer: Address,

    /// Allocated balance.
    #[arg(long)]
    pub balance: u64,
}

/// Arguments for `verify-proof`.
#[derive(Parser, Debug)]
pub struct VerifyProofArgs {
    /// Claimer address.
    #[arg(long)]
    pub claimer: Address,

    /// Allocated balance.
    #[arg(long)]
    pub balance: u64,

    /// Batch root.
    #[arg(long)]
    pub root: Bytes32,

    /// Proof siblings, leaf to root, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub proof: Vec<Bytes32>,
}
