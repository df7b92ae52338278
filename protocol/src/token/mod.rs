//! # Base Ownership Ledger
//!
//! The non-fungible ownership layer the contracts are built on. Contracts
//! do not extend it; they hold one and talk to it through
//! [`OwnershipLedger`], which is the whole of what they need:
//! issue new tokens, ask who owns one, and move one.
//!
//! ```text
//! mod.rs  — the OwnershipLedger seam, LedgerError, TokenId
//! nft.rs  — NftLedger: in-memory ERC-721 core with approvals and events
//! ```

pub mod nft;

use std::ops::Range;
use thiserror::Error;

use crate::types::Address;

pub use nft::{LedgerEvent, NftLedger};

/// Sequential token identifier, starting at 0.
pub type TokenId = u64;

/// Errors raised by the ownership ledger.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// No token with this id has been issued.
    #[error("invalid token ID: {0}")]
    NonexistentToken(TokenId),

    /// The zero address cannot own, receive or be queried.
    #[error("zero address is not a valid owner")]
    ZeroAddress,

    /// The caller is neither the owner nor approved for the token.
    #[error("caller is not token owner or approved")]
    NotOwnerNorApproved,

    /// `from` is not the token's current owner.
    #[error("transfer from incorrect owner")]
    IncorrectOwner,

    /// An owner tried to make themselves their own operator.
    #[error("approve to caller")]
    ApproveToCaller,

    /// Approving the current owner for their own token.
    #[error("approval to current owner")]
    ApprovalToCurrentOwner,

    /// Issuing would overflow the id counter or a balance.
    #[error("supply overflow: issuing {quantity} would exceed u64::MAX")]
    SupplyOverflow {
        /// The quantity that was requested.
        quantity: u64,
    },
}

/// What a contract needs from the ownership layer.
pub trait OwnershipLedger {
    /// Mints `quantity` new tokens with consecutive ids to `to` and returns
    /// the id range. Either every token is minted or none is.
    /// `quantity == 0` is a successful no-op returning an empty range.
    fn issue(&mut self, to: Address, quantity: u64) -> Result<Range<TokenId>, LedgerError>;

    /// Current owner of `id`.
    fn owner_of(&self, id: TokenId) -> Result<Address, LedgerError>;

    /// Number of tokens held by `owner`.
    fn balance_of(&self, owner: &Address) -> Result<u64, LedgerError>;

    /// Moves `id` from `from` to `to` on behalf of `caller`.
    fn transfer(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        id: TokenId,
    ) -> Result<(), LedgerError>;
}
