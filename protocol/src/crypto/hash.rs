//! # Hashing Utilities
//!
//! Keccak-256 in the handful of shapes the claim system needs:
//!
//! - [`keccak256`] — one-shot digest of a byte slice.
//! - [`keccak256_multi`] — digest of several slices fed in sequence,
//!   without building a concatenation buffer.
//! - [`double_keccak256`] — `keccak256(keccak256(data))`, the leaf
//!   construction.
//! - [`hash_pair`] — the sorted-pair node rule of the Merkle tree.
//!
//! ## On double hashing
//!
//! A leaf is 64 bytes of ABI encoding; an internal node preimage is also 64
//! bytes (two digests). Single-hashing would let an attacker present an
//! internal node as if it were a leaf. Hashing the leaf twice puts leaves
//! and nodes in different preimage domains.

use tiny_keccak::{Hasher, Keccak};

use crate::config::HASH_OUTPUT_LENGTH;
use crate::types::Bytes32;

/// Compute the Keccak-256 digest of `data`.
///
/// # Example
///
/// ```
/// use rail_nft_protocol::crypto::keccak256;
///
/// let hash = keccak256(b"");
/// assert_eq!(hash[0], 0xc5);
/// ```
pub fn keccak256(data: &[u8]) -> [u8; HASH_OUTPUT_LENGTH] {
    let mut keccak = Keccak::v256();
    keccak.update(data);
    let mut out = [0u8; HASH_OUTPUT_LENGTH];
    keccak.finalize(&mut out);
    out
}

/// Hash multiple byte slices together without concatenation overhead.
///
/// Equivalent to `keccak256(parts[0] || parts[1] || ...)`.
pub fn keccak256_multi(parts: &[&[u8]]) -> [u8; HASH_OUTPUT_LENGTH] {
    let mut keccak = Keccak::v256();
    for part in parts {
        keccak.update(part);
    }
    let mut out = [0u8; HASH_OUTPUT_LENGTH];
    keccak.finalize(&mut out);
    out
}

/// `keccak256(keccak256(data))`.
pub fn double_keccak256(data: &[u8]) -> Bytes32 {
    Bytes32::from_bytes(keccak256(&keccak256(data)))
}

/// Parent of two tree nodes: `keccak256(min(a, b) || max(a, b))`.
///
/// Commutative by construction. Byte-wise lexicographic order, which is
/// what comparing the digests as big-endian integers gives you.
pub fn hash_pair(a: &Bytes32, b: &Bytes32) -> Bytes32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Bytes32::from_bytes(keccak256_multi(&[lo.as_bytes(), hi.as_bytes()]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(s: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&hex::decode(s).unwrap());
        out
    }

    #[test]
    fn keccak_empty_known_vector() {
        // Not SHA3-256("") (a7ffc6f8...). If this fails, someone swapped
        // in the NIST padding.
        assert_eq!(
            keccak256(b""),
            h("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
    }

    #[test]
    fn keccak_zero_word_known_vector() {
        // keccak256(HashZero), the root used by the batch registry scenarios.
        assert_eq!(
            keccak256(&[0u8; 32]),
            h("290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563")
        );
    }

    #[test]
    fn keccak_single_byte_known_vector() {
        assert_eq!(
            keccak256(&[0x01]),
            h("5fe7f977e71dba2ea1a68e21057beebb9be2ac30c6410aa38d4f3fbe41dcffd2")
        );
    }

    #[test]
    fn multi_equals_concatenation() {
        let multi = keccak256_multi(&[b"hello", b" world"]);
        assert_eq!(multi, keccak256(b"hello world"));
    }

    #[test]
    fn double_differs_from_single() {
        let single = keccak256(b"rail");
        let double = double_keccak256(b"rail");
        assert_ne!(double.as_bytes(), &single);
        assert_eq!(double.as_bytes(), &keccak256(&single));
    }

    #[test]
    fn hash_pair_is_commutative() {
        let a = Bytes32::from_bytes([1u8; 32]);
        let b = Bytes32::from_bytes([2u8; 32]);
        assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));
    }

    #[test]
    fn hash_pair_known_vector() {
        let a = Bytes32::from_bytes([1u8; 32]);
        let b = Bytes32::from_bytes([2u8; 32]);
        assert_eq!(
            hash_pair(&b, &a).as_bytes(),
            &h("346d8c96a2454213fcc0daff3c96ad0398148181b9fa6488f7ae2c0af5b20aa0")
        );
    }

    #[test]
    fn hash_pair_of_equal_nodes() {
        let a = Bytes32::from_bytes([7u8; 32]);
        let expected = keccak256(&[7u8; 64]);
        assert_eq!(hash_pair(&a, &a).as_bytes(), &expected);
    }
}
