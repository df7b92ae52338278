//! # Cryptographic Primitives for RAIL NFT
//!
//! Everything here has to agree with the EVM and with the off-chain tree
//! builder, byte for byte. That rules out choosing our own primitives:
//!
//! - **Keccak-256** for every hash: leaves, tree nodes, address checksums.
//!   Legacy Keccak padding, not NIST SHA3-256. They are not the same
//!   function and mixing them up rejects every proof.
//! - **Sorted-pair Merkle proofs**, the commutative pairing rule used by
//!   the standard Merkle tree tooling, so proofs carry no direction bits.
//!
//! Everything is a thin wrapper around `tiny-keccak`.

pub mod hash;
pub mod merkle;

// Re-export the things people actually need.
pub use hash::{double_keccak256, hash_pair, keccak256, keccak256_multi};
pub use merkle::MerkleVerifier;
