//! # Contract Events
//!
//! Notifications emitted by successful state changes. A contract appends to
//! its [`EventLog`] only after every check has passed, so a failed call never
//! leaves an event behind. Callers drain the log with `take_events()`.

use serde::{Deserialize, Serialize};

use rail_nft_protocol::{Address, Bytes32};

use crate::batch_registry::BatchId;

/// Events emitted by the RAIL NFT contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContractEvent {
    /// A claim batch was published.
    NewBatch { root: Bytes32, id: BatchId },
    /// A batch's active flag actually changed.
    BatchStatusChange { id: BatchId, active: bool },
    /// A leaf was redeemed and `balance` tokens issued to `claimer`.
    Claim {
        batch_id: BatchId,
        leaf: Bytes32,
        claimer: Address,
        balance: u64,
    },
    /// The address whose holdings render as `special` was replaced.
    RailgunAddressUpdated { railgun: Address },
    /// The token URI prefix was replaced.
    BaseUriUpdated { base_uri: String },
    /// Admin authority moved. `new_owner` is zero on renounce.
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
}

/// Append-only buffer of emitted events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<ContractEvent>,
}

impl EventLog {
    /// Records an event.
    pub fn emit(&mut self, event: ContractEvent) {
        tracing::info!(?event, "contract event");
        self.events.push(event);
    }

    /// Drains everything recorded since the last drain.
    pub fn take(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of undrained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether there are no undrained events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
