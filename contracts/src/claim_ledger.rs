//! # Claim Ledger
//!
//! Remembers which leaves have been redeemed, per batch. Membership is
//! scoped to a batch id: the same digest under two batches is two
//! independent allocations.
//!
//! Entries are only ever added by a successful claim. The one exception is
//! the rollback path in the coordinator, which removes a mark it placed
//! moments earlier in the same call when issuance fails.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::batch_registry::BatchId;
use crate::leaf::LeafDigest;

/// Per-batch sets of spent leaf digests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimLedger {
    claimed: BTreeMap<BatchId, BTreeSet<LeafDigest>>,
}

impl ClaimLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `leaf` has been redeemed in `batch_id`. False for anything
    /// never seen, including unknown batches.
    pub fn is_claimed(&self, batch_id: BatchId, leaf: &LeafDigest) -> bool {
        self.claimed
            .get(&batch_id)
            .map(|set| set.contains(leaf))
            .unwrap_or(false)
    }

    /// Number of leaves redeemed in `batch_id`.
    pub fn claimed_count(&self, batch_id: BatchId) -> usize {
        self.claimed.get(&batch_id).map(BTreeSet::len).unwrap_or(0)
    }

    /// Marks `leaf` as redeemed. Returns `false` if it already was.
    pub(crate) fn mark_claimed(&mut self, batch_id: BatchId, leaf: LeafDigest) -> bool {
        self.claimed.entry(batch_id).or_default().insert(leaf)
    }

    /// Undoes a [`mark_claimed`](Self::mark_claimed) from the current call.
    pub(crate) fn unmark(&mut self, batch_id: BatchId, leaf: &LeafDigest) {
        if let Some(set) = self.claimed.get_mut(&batch_id) {
            set.remove(leaf);
            if set.is_empty() {
                self.claimed.remove(&batch_id);
            }
        }
    }
}
