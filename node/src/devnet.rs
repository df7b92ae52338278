//! # Devnet
//!
//! The in-process "chain" the node hosts: one multi-claim contract and one
//! shape-shift contract, both deployed by the configured admin, each with
//! its own ownership ledger.
//!
//! The API layer wraps a [`Devnet`] in a `parking_lot::RwLock`. Every
//! state-changing RPC takes the write lock for the duration of one contract
//! call, so calls are applied one at a time and a failed call is fully
//! reverted before the next one starts. Lock sections never span an
//! `.await`.
//!
//! The whole devnet serializes to JSON. With `--state-file` the node
//! restores it on start and writes it back on shutdown.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use rail_nft_contracts::{NftMultiClaim, NftShapeShift};
use rail_nft_protocol::token::NftLedger;
use rail_nft_protocol::Address;

use crate::api::NodeEvent;

/// Both contracts plus the deployment parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Devnet {
    /// Address that deployed (and initially owns) both contracts.
    pub admin: Address,
    pub multi_claim: NftMultiClaim<NftLedger>,
    pub shape_shift: NftShapeShift<NftLedger>,
}

impl Devnet {
    /// Deploys fresh contracts owned by `admin`.
    pub fn deploy(admin: Address, name: &str, symbol: &str) -> Self {
        tracing::info!(admin = %admin.to_checksum(), name, symbol, "deploying contracts");
        Self {
            admin,
            multi_claim: NftMultiClaim::new(admin, NftLedger::new(name, symbol)),
            shape_shift: NftShapeShift::new(admin, NftLedger::new(name, symbol)),
        }
    }

    /// Restores a devnet from a JSON snapshot.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read state file {}", path.display()))?;
        let devnet: Devnet = serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse state file {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            batches = devnet.multi_claim.batch_count(),
            "devnet state restored"
        );
        Ok(devnet)
    }

    /// Restores from `path` if it exists, otherwise deploys.
    pub fn load_or_deploy(
        path: Option<&Path>,
        admin: Address,
        name: &str,
        symbol: &str,
    ) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            _ => Ok(Self::deploy(admin, name, symbol)),
        }
    }

    /// Writes a JSON snapshot. The file is replaced atomically via a
    /// sibling temp file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self).context("failed to serialize devnet state")?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, json)
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("failed to move snapshot into {}", path.display()))?;
        tracing::info!(path = %path.display(), "devnet state saved");
        Ok(())
    }

    /// Drains pending events from both contracts and both ledgers.
    pub fn drain_events(&mut self) -> Vec<NodeEvent> {
        let mut out = Vec::new();
        out.extend(
            self.multi_claim
                .take_events()
                .into_iter()
                .map(|event| NodeEvent::MultiClaim { event }),
        );
        out.extend(
            self.multi_claim
                .ledger_mut()
                .take_events()
                .into_iter()
                .map(|event| NodeEvent::MultiClaimLedger { event }),
        );
        out.extend(
            self.shape_shift
                .take_events()
                .into_iter()
                .map(|event| NodeEvent::ShapeShift { event }),
        );
        out.extend(
            self.shape_shift
                .ledger_mut()
                .take_events()
                .into_iter()
                .map(|event| NodeEvent::ShapeShiftLedger { event }),
        );
        out
    }
}
