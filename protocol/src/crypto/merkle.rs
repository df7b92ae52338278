//! # Merkle Proof Verification
//!
//! Checks that a leaf digest belongs to a tree, given the tree's root and
//! the ordered list of sibling hashes from the leaf up to the root.
//!
//! ## Pairing rule
//!
//! Each step replaces the accumulator with
//! [`hash_pair`](super::hash::hash_pair)`(acc, sibling)`, which sorts the two
//! inputs before hashing. This is the convention of the standard off-chain
//! Merkle tree builder, and it is why a proof needs no left/right flags.
//!
//! ## What "malformed" means here
//!
//! With sorted pairing every sibling list folds to *some* digest, so there
//! is no structural failure to report. A proof that is too short, too long,
//! reordered or for another tree simply folds to the wrong value and
//! [`MerkleVerifier::verify`] returns `false`. Verification never errors
//! and never panics.

use crate::crypto::hash::hash_pair;
use crate::types::Bytes32;

/// Stateless verifier for sorted-pair Merkle proofs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MerkleVerifier;

impl MerkleVerifier {
    /// Folds `leaf` with each sibling in `proof`, in order, and returns the
    /// reconstructed root.
    ///
    /// An empty proof returns the leaf itself: a single-leaf tree's root is
    /// its only leaf.
    pub fn process_proof(leaf: &Bytes32, proof: &[Bytes32]) -> Bytes32 {
        proof
            .iter()
            .fold(*leaf, |acc, sibling| hash_pair(&acc, sibling))
    }

    /// Returns `true` iff `proof` reconstructs `root` from `leaf`.
    pub fn verify(leaf: &Bytes32, proof: &[Bytes32], root: &Bytes32) -> bool {
        Self::process_proof(leaf, proof) == *root
    }
}
