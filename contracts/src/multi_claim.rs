//! # Multi Claim Contract
//!
//! Batch airdrops of NFTs against published Merkle roots.
//!
//! ## Lifecycle
//!
//! 1. The owner publishes a root with [`NftMultiClaim::add_claim_batch`].
//!    The batch starts inactive.
//! 2. The owner switches it on with [`NftMultiClaim::set_active_status`].
//! 3. Anyone submits `(entry, proof, batch_id)` to [`NftMultiClaim::claim`].
//!    On success `entry.balance` tokens are issued to `entry.claimer`. The
//!    submitter does not have to be the claimer.
//!
//! ## Claim checks
//!
//! Evaluated in this order, stopping at the first failure:
//!
//! | # | Check                                    |
//! |---|------------------------------------------|
//! | 1 | batch exists and is active               |
//! | 2 | leaf not yet claimed in this batch       |
//! | 3 | proof folds to the batch root            |
//!
//! All three fail with the same [`ContractError::InvalidClaim`]. The cause
//! is only visible in `debug` logs on the host.
//!
//! The leaf is marked spent *before* tokens are issued, so anything that
//! observes the contract during issuance already sees the leaf as claimed.
//! If issuance fails the mark is removed again and the ledger's error is
//! returned.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::{debug, info};

use rail_nft_protocol::crypto::MerkleVerifier;
use rail_nft_protocol::token::{NftLedger, OwnershipLedger, TokenId};
use rail_nft_protocol::{Address, Bytes32};

use crate::access::Ownable;
use crate::batch_registry::{BatchId, BatchRegistry, ClaimBatch};
use crate::claim_ledger::ClaimLedger;
use crate::error::ContractError;
use crate::events::{ContractEvent, EventLog};
use crate::leaf::{hash_leaf, ClaimEntry, LeafDigest};

/// The multi-claim contract, generic over its ownership ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftMultiClaim<L = NftLedger> {
    ownable: Ownable,
    registry: BatchRegistry,
    claims: ClaimLedger,
    ledger: L,
    #[serde(skip)]
    events: EventLog,
}

impl<L: OwnershipLedger> NftMultiClaim<L> {
    /// Deploys the contract with `deployer` as owner.
    pub fn new(deployer: Address, ledger: L) -> Self {
        Self {
            ownable: Ownable::new(deployer),
            registry: BatchRegistry::new(),
            claims: ClaimLedger::new(),
            ledger,
            events: EventLog::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Ownership
    // -----------------------------------------------------------------------

    /// Current admin.
    pub fn owner(&self) -> Address {
        self.ownable.owner()
    }

    /// Hands admin rights to `new_owner`.
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        let previous_owner = self.ownable.transfer_ownership(caller, new_owner)?;
        self.events.emit(ContractEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        });
        Ok(())
    }

    /// Leaves the contract without an admin. No batch can be added or
    /// toggled afterwards; active batches stay claimable.
    pub fn renounce_ownership(&mut self, caller: &Address) -> Result<(), ContractError> {
        let previous_owner = self.ownable.renounce_ownership(caller)?;
        self.events.emit(ContractEvent::OwnershipTransferred {
            previous_owner,
            new_owner: Address::ZERO,
        });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Batch administration
    // -----------------------------------------------------------------------

    /// Publishes a new, inactive batch and returns its id.
    pub fn add_claim_batch(
        &mut self,
        caller: &Address,
        root: Bytes32,
    ) -> Result<BatchId, ContractError> {
        self.ownable.only_owner(caller)?;
        let id = self.registry.add(root);
        self.events.emit(ContractEvent::NewBatch { root, id });
        Ok(id)
    }

    /// Switches a batch on or off. Setting the value it already has writes
    /// nothing and emits nothing.
    pub fn set_active_status(
        &mut self,
        caller: &Address,
        id: BatchId,
        active: bool,
    ) -> Result<(), ContractError> {
        self.ownable.only_owner(caller)?;
        if self.registry.set_active(id, active)? {
            self.events
                .emit(ContractEvent::BatchStatusChange { id, active });
        }
        Ok(())
    }

    /// Root and status of a batch.
    pub fn claim_batch(&self, id: BatchId) -> Result<ClaimBatch, ContractError> {
        self.registry.get(id).copied()
    }

    /// Number of batches ever published.
    pub fn batch_count(&self) -> u64 {
        self.registry.len()
    }

    // -----------------------------------------------------------------------
    // Claims
    // -----------------------------------------------------------------------

    /// Leaf digest of `entry`.
    pub fn hash_leaf(&self, entry: &ClaimEntry) -> LeafDigest {
        hash_leaf(entry)
    }

    /// Whether `leaf` has been redeemed in `batch_id`.
    pub fn is_claimed(&self, batch_id: BatchId, leaf: &LeafDigest) -> bool {
        self.claims.is_claimed(batch_id, leaf)
    }

    /// Redeems `entry` from `batch_id` and returns the ids of the issued
    /// tokens. A zero balance redeems the leaf and issues nothing.
    ///
    /// # Errors
    ///
    /// - [`ContractError::InvalidClaim`] if any claim check fails.
    /// - [`ContractError::Ledger`] if the ledger refuses to issue; the leaf
    ///   stays unclaimed.
    pub fn claim(
        &mut self,
        entry: &ClaimEntry,
        proof: &[Bytes32],
        batch_id: BatchId,
    ) -> Result<Range<TokenId>, ContractError> {
        let leaf = hash_leaf(entry);

        let root = match self.registry.get(batch_id) {
            Ok(batch) if batch.active => batch.root,
            _ => {
                debug!(batch_id, %leaf, "claim rejected: batch missing or inactive");
                return Err(ContractError::InvalidClaim);
            }
        };
        if self.claims.is_claimed(batch_id, &leaf) {
            debug!(batch_id, %leaf, "claim rejected: already claimed");
            return Err(ContractError::InvalidClaim);
        }
        if !MerkleVerifier::verify(&leaf, proof, &root) {
            debug!(batch_id, %leaf, proof_len = proof.len(), "claim rejected: bad proof");
            return Err(ContractError::InvalidClaim);
        }

        self.claims.mark_claimed(batch_id, leaf);
        let issued = match self.ledger.issue(entry.claimer, entry.balance) {
            Ok(range) => range,
            Err(err) => {
                self.claims.unmark(batch_id, &leaf);
                debug!(batch_id, %leaf, error = %err, "claim rolled back: issuance failed");
                return Err(err.into());
            }
        };

        info!(
            batch_id,
            claimer = %entry.claimer,
            balance = entry.balance,
            "claim accepted"
        );
        self.events.emit(ContractEvent::Claim {
            batch_id,
            leaf,
            claimer: entry.claimer,
            balance: entry.balance,
        });
        Ok(issued)
    }

    // -----------------------------------------------------------------------
    // Ledger passthrough
    // -----------------------------------------------------------------------

    /// Tokens held by `owner`.
    pub fn balance_of(&self, owner: &Address) -> Result<u64, ContractError> {
        Ok(self.ledger.balance_of(owner)?)
    }

    /// Current owner of token `id`.
    pub fn owner_of(&self, id: TokenId) -> Result<Address, ContractError> {
        Ok(self.ledger.owner_of(id)?)
    }

    /// The underlying ownership ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the ledger, for transfers and draining its events.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Drains contract events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<ContractEvent> {
        self.events.take()
    }
}
