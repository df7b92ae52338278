// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # RAIL NFT Devnet Node
//!
//! Entry point for the `rail-nft-node` binary.
//!
//! - `run`          — deploy the contracts and serve the JSON-RPC / WS API
//! - `hash-leaf`    — print the leaf digest of `(claimer, balance)`
//! - `verify-proof` — check a proof against a root, offline
//! - `version`      — print build version information

mod api;
mod cli;
mod devnet;
mod logging;
mod metrics;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::broadcast;

use rail_nft_contracts::{hash_leaf, ClaimEntry};
use rail_nft_protocol::config::{
    DEVNET_NETWORK, EVENT_CHANNEL_CAPACITY, PRIMARY_HASH_FUNCTION, PROTOCOL_VERSION,
};
use rail_nft_protocol::crypto::MerkleVerifier;

use cli::{Commands, RailNodeCli};
use devnet::Devnet;
use metrics::NodeMetrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = RailNodeCli::parse();

    match cli.command {
        Commands::Run(args) => run_node(args).await,
        Commands::HashLeaf(args) => {
            let entry = ClaimEntry::new(args.claimer, args.balance);
            println!("{}", hash_leaf(&entry));
            Ok(())
        }
        Commands::VerifyProof(args) => verify_proof(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Deploys (or restores) the devnet and serves the API and metrics until
/// a shutdown signal arrives.
async fn run_node(args: cli::RunArgs) -> Result<()> {
    logging::init_logging(&args.log_level, args.log_format)
        .context("installing log subscriber")?;

    tracing::info!(
        admin = %args.admin.to_checksum(),
        rpc_port = args.rpc_port,
        metrics_port = args.metrics_port,
        state_file = ?args.state_file,
        "starting rail-nft-node"
    );

    // --- Contracts ---
    let devnet = Devnet::load_or_deploy(
        args.state_file.as_deref(),
        args.admin,
        &args.name,
        &args.symbol,
    )?;
    let devnet = Arc::new(RwLock::new(devnet));

    // --- Metrics ---
    let node_metrics = Arc::new(NodeMetrics::new().context("failed to register metrics")?);

    // --- Event broadcast ---
    let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

    // --- Application state ---
    let app_state = api::AppState {
        version: format!(
            "{} (protocol {})",
            env!("CARGO_PKG_VERSION"),
            PROTOCOL_VERSION,
        ),
        network: DEVNET_NETWORK.to_string(),
        started_at: chrono::Utc::now(),
        devnet: Arc::clone(&devnet),
        event_tx,
        metrics: Arc::clone(&node_metrics),
    };

    // --- API server ---
    let api_router = api::create_router(app_state);
    let api_addr = format!("0.0.0.0:{}", args.rpc_port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("failed to bind RPC listener on {}", api_addr))?;
    tracing::info!("RPC/API server listening on {}", api_addr);

    // --- Metrics server ---
    let metrics_router = axum::Router::new()
        .route("/metrics", axum::routing::get(metrics::metrics_handler))
        .with_state(Arc::clone(&node_metrics));
    let metrics_addr = format!("0.0.0.0:{}", args.metrics_port);
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {}", metrics_addr))?;
    tracing::info!("Metrics server listening on {}", metrics_addr);

    // --- Serve ---
    tokio::select! {
        res = axum::serve(api_listener, api_router) => {
            if let Err(e) = res {
                tracing::error!("API server error: {}", e);
            }
        }
        res = axum::serve(metrics_listener, metrics_router) => {
            if let Err(e) = res {
                tracing::error!("Metrics server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received");
        }
    }

    if let Some(path) = &args.state_file {
        devnet.read().save(path)?;
    }

    tracing::info!("rail-nft-node stopped");
    Ok(())
}

/// Prints whether the proof holds and exits non-zero when it does not.
fn verify_proof(args: cli::VerifyProofArgs) -> Result<()> {
    let entry = ClaimEntry::new(args.claimer, args.balance);
    let leaf = hash_leaf(&entry);
    let valid = MerkleVerifier::verify(&leaf, &args.proof, &args.root);

    println!("leaf  {}", leaf);
    println!("root  {}", args.root);
    println!("valid {}", valid);

    if !valid {
        anyhow::bail!("proof does not reconstruct the root");
    }
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("rail-nft-node {}", env!("CARGO_PKG_VERSION"));
    println!("protocol      {}", PROTOCOL_VERSION);
    println!("hash          {}", PRIMARY_HASH_FUNCTION);
    println!("rustc         {}", rustc_version());
}

/// Rust compiler version used to build this binary, if the build set it.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported. If a handler cannot be
/// installed that branch never fires and the other one still does.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
