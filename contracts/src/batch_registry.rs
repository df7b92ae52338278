//! # Batch Registry
//!
//! An append-only list of claim batches. A batch is a published Merkle
//! root plus an on/off switch:
//!
//! 1. **Add** — the root is appended with the next id (dense, from 0),
//!    switched off.
//! 2. **Toggle** — the switch may be flipped any number of times.
//!
//! Roots never change and batches are never removed. Authorization and
//! event emission belong to the owning contract; the registry only keeps
//! the books and reports whether a toggle actually changed anything.

use serde::{Deserialize, Serialize};

use rail_nft_protocol::Bytes32;

use crate::error::ContractError;

/// Sequential batch identifier, starting at 0.
pub type BatchId = u64;

/// One published allocation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimBatch {
    /// Position in the registry.
    pub id: BatchId,
    /// Merkle root committing to the batch's `(claimer, balance)` entries.
    pub root: Bytes32,
    /// Whether claims against this batch are currently accepted.
    pub active: bool,
}

/// Append-only batch storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRegistry {
    batches: Vec<ClaimBatch>,
}

impl BatchRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an inactive batch and returns its id.
    pub fn add(&mut self, root: Bytes32) -> BatchId {
        let id = self.batches.len() as BatchId;
        self.batches.push(ClaimBatch {
            id,
            root,
            active: false,
        });
        id
    }

    /// Sets the active flag. Returns `true` if it changed, `false` if it
    /// already had the desired value (in which case nothing is written).
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::OutOfRange`] for an unknown id.
    pub fn set_active(&mut self, id: BatchId, desired: bool) -> Result<bool, ContractError> {
        let len = self.len();
        let batch = usize::try_from(id)
            .ok()
            .and_then(|idx| self.batches.get_mut(idx))
            .ok_or(ContractError::OutOfRange { id, len })?;

        if batch.active == desired {
            return Ok(false);
        }
        batch.active = desired;
        Ok(true)
    }

    /// Looks up a batch.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::OutOfRange`] for an unknown id.
    pub fn get(&self, id: BatchId) -> Result<&ClaimBatch, ContractError> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.batches.get(idx))
            .ok_or(ContractError::OutOfRange {
                id,
                len: self.len(),
            })
    }

    /// Number of batches ever added.
    pub fn len(&self) -> u64 {
        self.batches.len() as u64
    }

    /// Whether no batch has been added yet.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// All batches, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ClaimBatch> {
        self.batches.iter()
    }
}
