//! # Leaf Codec
//!
//! Turns a claim entry into the digest that sits at the bottom of a claim
//! tree:
//!
//! ```text
//! leaf = keccak256(keccak256(abi.encode(claimer, balance)))
//! ```
//!
//! The field order is fixed at `(claimer, balance)` and must stay that way.
//! This is the exact construction the external tree builder uses; any
//! change here invalidates every published root.

use serde::{Deserialize, Serialize};

use rail_nft_protocol::abi::{self, Token};
use rail_nft_protocol::crypto::double_keccak256;
use rail_nft_protocol::{Address, Bytes32};

/// Digest of a [`ClaimEntry`].
pub type LeafDigest = Bytes32;

/// One allocation: `claimer` may redeem `balance` tokens.
///
/// Never stored on its own; it exists to be hashed and checked against a
/// batch root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimEntry {
    pub claimer: Address,
    pub balance: u64,
}

impl ClaimEntry {
    pub fn new(claimer: Address, balance: u64) -> Self {
        Self { claimer, balance }
    }

    /// `abi.encode(address claimer, uint256 balance)`.
    pub fn encode(&self) -> Vec<u8> {
        abi::encode(&[Token::Address(self.claimer), Token::Uint(self.balance)])
    }

    /// The leaf digest. Same as [`hash_leaf`].
    pub fn digest(&self) -> LeafDigest {
        hash_leaf(self)
    }
}

/// Double-hashes the canonical encoding of `entry`.
pub fn hash_leaf(entry: &ClaimEntry) -> LeafDigest {
    double_keccak256(&entry.encode())
}
