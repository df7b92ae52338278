// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # RAIL NFT Protocol — Core Primitives
//!
//! The building blocks underneath the RAIL NFT contracts. Nothing in here
//! knows what a claim batch is; it only knows how to encode, hash, prove
//! and own things the way the EVM does, so that trees and digests produced
//! by the standard off-chain tooling verify here bit-for-bit.
//!
//! ## Architecture
//!
//! - **config** — Constants: lengths, URI segments, defaults. One place.
//! - **types** — `Address` and `Bytes32`, the two fixed-width values
//!   everything else is made of.
//! - **abi** — Canonical `abi.encode` for the static types we need.
//! - **crypto** — Keccak-256 and Merkle proof verification.
//! - **token** — The base ownership ledger that contracts issue into.
//!
//! ## Design Philosophy
//!
//! 1. Compatibility is correctness: if a proof from the external tree
//!    builder doesn't verify, we are wrong, not the proof.
//! 2. Verification never panics. Bad input is a `false`, not a crash.
//! 3. State-changing ledger calls check every precondition before they
//!    touch state. A failed call leaves nothing behind.

pub mod abi;
pub mod config;
pub mod crypto;
pub mod token;
pub mod types;

pub use types::{Address, Bytes32, TypeError};
