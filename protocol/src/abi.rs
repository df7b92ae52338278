//! # Canonical ABI Encoding
//!
//! Just enough of the Solidity ABI to reproduce `abi.encode(...)` for the
//! static types a claim entry is made of. Every value is one 32-byte word:
//!
//! - `address` — 12 zero bytes, then the 20 address bytes.
//! - `uint256` — big-endian, left zero-padded.
//!
//! Dynamic types (bytes, strings, arrays) never appear in a leaf, so they
//! are not supported here.

use crate::config::{ABI_WORD_LENGTH, ADDRESS_LENGTH};
use crate::types::Address;

/// One ABI word.
pub type Word = [u8; ABI_WORD_LENGTH];

/// Encodes an address as a left-padded word.
pub fn encode_address(address: &Address) -> Word {
    let mut word = [0u8; ABI_WORD_LENGTH];
    word[ABI_WORD_LENGTH - ADDRESS_LENGTH..].copy_from_slice(address.as_bytes());
    word
}

/// Encodes an unsigned integer as a `uint256` word.
pub fn encode_uint(value: u64) -> Word {
    let mut word = [0u8; ABI_WORD_LENGTH];
    word[ABI_WORD_LENGTH - 8..].copy_from_slice(&value.to_be_bytes());
    word
}

/// A static ABI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `address`
    Address(Address),
    /// `uint256` (values beyond `u64` are not representable here)
    Uint(u64),
}

impl Token {
    fn to_word(self) -> Word {
        match self {
            Token::Address(a) => encode_address(&a),
            Token::Uint(v) => encode_uint(v),
        }
    }
}

/// `abi.encode(tokens...)` for static tokens: concatenated words, in order.
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let mut out = Vec::with_capacity(tokens.len() * ABI_WORD_LENGTH);
    for token in tokens {
        out.extend_from_slice(&token.to_word());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_is_left_padded() {
        let addr = Address::from_bytes([0x11; 20]);
        let word = encode_address(&addr);
        assert_eq!(&word[..12], &[0u8; 12]);
        assert_eq!(&word[12..], &[0x11; 20]);
    }

    #[test]
    fn uint_is_big_endian() {
        let word = encode_uint(1000);
        assert_eq!(&word[..30], &[0u8; 30]);
        assert_eq!(&word[30..], &[0x03, 0xe8]);
    }

    #[test]
    fn encode_address_uint_matches_known_encoding() {
        // abi.encode(address(0x1111..11), uint256(1000))
        let encoded = encode(&[
            Token::Address(Address::from_bytes([0x11; 20])),
            Token::Uint(1000),
        ]);
        let expected = hex::decode(concat!(
            "0000000000000000000000001111111111111111111111111111111111111111",
            "00000000000000000000000000000000000000000000000000000000000003e8",
        ))
        .unwrap();
        assert_eq!(encoded, expected);
    }

    #[test]
    fn encoding_order_is_positional() {
        let addr = Token::Address(Address::from_bytes([0x22; 20]));
        let value = Token::Uint(7);
        assert_ne!(encode(&[addr, value]), encode(&[value, addr]));
    }
}
