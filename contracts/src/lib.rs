//! # RAIL NFT Contracts
//!
//! On-chain logic for RAIL NFT. Two contracts, both built by composition
//! over the base ownership ledger from `rail_nft_protocol::token`:
//!
//! - **Multi Claim** ([`multi_claim::NftMultiClaim`]) — the owner publishes
//!   Merkle roots of `(claimer, balance)` allocations as claim batches;
//!   each allocation can be redeemed exactly once per batch by presenting
//!   a proof, and redeeming issues `balance` tokens to the claimer.
//! - **Shape Shift** ([`shape_shift::NftShapeShift`]) — a collection whose
//!   token URI flips between a `normal` and a `special` variant depending
//!   on whether the token currently sits with one designated address.
//!
//! ## Design Principles
//!
//! 1. Validate everything, then write. A call that returns `Err` leaves no
//!    trace: no state change, no event.
//! 2. Claim rejections are deliberately uninformative. Every failed
//!    precondition surfaces as the same [`ContractError::InvalidClaim`].
//! 3. Derived state stays derived. The shape-shift variant is computed
//!    from live ownership on every query and never stored.
//! 4. Every public type is serializable (serde) so the whole contract state
//!    can be snapshotted and restored.

pub mod access;
pub mod batch_registry;
pub mod claim_ledger;
pub mod error;
pub mod events;
pub mod leaf;
pub mod multi_claim;
pub mod shape_shift;

pub use error::ContractError;
pub use events::ContractEvent;
pub use leaf::{hash_leaf, ClaimEntry, LeafDigest};
pub use multi_claim::NftMultiClaim;
pub use shape_shift::{NftShapeShift, UriVariant};
