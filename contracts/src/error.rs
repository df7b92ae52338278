//! Error types for the RAIL NFT contracts.
//!
//! Every contract call that can fail returns a [`ContractError`]. Failure
//! always means the call had no effect.

use thiserror::Error;

use rail_nft_protocol::token::LedgerError;

use crate::batch_registry::BatchId;

/// Errors that can occur during contract calls.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContractError {
    /// An owner-only operation was called by someone else.
    #[error("Ownable: caller is not the owner")]
    Unauthorized,

    /// A claim failed one of its preconditions. Which one is not reported.
    #[error("NFTMultiClaim: Invalid Claim")]
    InvalidClaim,

    /// The referenced batch does not exist.
    #[error("batch {id} out of range ({len} batches)")]
    OutOfRange {
        /// The requested batch id.
        id: BatchId,
        /// Number of batches that exist.
        len: u64,
    },

    /// Ownership cannot be transferred to the zero address.
    #[error("Ownable: new owner is the zero address")]
    ZeroAddressOwner,

    /// The underlying ownership ledger rejected the operation.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
