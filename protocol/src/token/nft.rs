//! # In-Memory NFT Ledger
//!
//! The ERC-721 ownership core: owners, balances, per-token approvals and
//! operator approvals. No metadata, no receiver hooks, no enumeration.
//!
//! ## Atomicity
//!
//! Every mutating method validates first and writes second. When a call
//! returns `Err`, the ledger is exactly as it was before the call, and no
//! event was recorded.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use super::{LedgerError, OwnershipLedger, TokenId};
use crate::types::Address;

/// Events recorded by the ledger, drained with [`NftLedger::take_events`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Ownership of `token_id` moved. `from` is zero on mint.
    Transfer {
        from: Address,
        to: Address,
        token_id: TokenId,
    },
    /// `approved` may now transfer `token_id`.
    Approval {
        owner: Address,
        approved: Address,
        token_id: TokenId,
    },
    /// `operator` may (or may no longer) move all of `owner`'s tokens.
    ApprovalForAll {
        owner: Address,
        operator: Address,
        approved: bool,
    },
}

/// In-memory ERC-721 core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NftLedger {
    /// Collection name.
    name: String,
    /// Collection symbol.
    symbol: String,
    /// Id the next issued token will receive.
    next_id: TokenId,
    /// `token_id -> owner`. Absent means never issued.
    owners: BTreeMap<TokenId, Address>,
    /// `owner -> number of tokens held`.
    balances: BTreeMap<Address, u64>,
    /// `token_id -> single approved address`.
    token_approvals: BTreeMap<TokenId, Address>,
    /// `(owner, operator)` pairs with blanket approval.
    operator_approvals: BTreeSet<(Address, Address)>,
    /// Pending events. Not part of persisted state.
    #[serde(skip)]
    events: Vec<LedgerEvent>,
}

impl NftLedger {
    /// Creates an empty ledger for a collection.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Collection symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of tokens issued so far (there is no burn).
    pub fn total_supply(&self) -> u64 {
        self.next_id
    }

    /// Returns `true` if `id` has been issued.
    pub fn exists(&self, id: TokenId) -> bool {
        self.owners.contains_key(&id)
    }

    /// The single approved address for `id`, or zero if none.
    pub fn get_approved(&self, id: TokenId) -> Result<Address, LedgerError> {
        self.owner_of(id)?;
        Ok(self
            .token_approvals
            .get(&id)
            .copied()
            .unwrap_or(Address::ZERO))
    }

    /// Whether `operator` may move every token `owner` holds.
    pub fn is_approved_for_all(&self, owner: &Address, operator: &Address) -> bool {
        self.operator_approvals.contains(&(*owner, *operator))
    }

    /// Approves `to` to transfer `id`. Caller must be the owner or one of
    /// the owner's operators. Approving zero clears the approval.
    pub fn approve(
        &mut self,
        caller: Address,
        to: Address,
        id: TokenId,
    ) -> Result<(), LedgerError> {
        let owner = self.owner_of(id)?;
        if to == owner {
            return Err(LedgerError::ApprovalToCurrentOwner);
        }
        if caller != owner && !self.is_approved_for_all(&owner, &caller) {
            return Err(LedgerError::NotOwnerNorApproved);
        }

        if to.is_zero() {
            self.token_approvals.remove(&id);
        } else {
            self.token_approvals.insert(id, to);
        }
        self.events.push(LedgerEvent::Approval {
            owner,
            approved: to,
            token_id: id,
        });
        Ok(())
    }

    /// Grants or revokes blanket approval for `operator` over the caller's
    /// tokens.
    pub fn set_approval_for_all(
        &mut self,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), LedgerError> {
        if caller == operator {
            return Err(LedgerError::ApproveToCaller);
        }
        if approved {
            self.operator_approvals.insert((caller, operator));
        } else {
            self.operator_approvals.remove(&(caller, operator));
        }
        self.events.push(LedgerEvent::ApprovalForAll {
            owner: caller,
            operator,
            approved,
        });
        Ok(())
    }

    /// Drains the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    fn is_approved_or_owner(&self, spender: &Address, id: TokenId) -> Result<bool, LedgerError> {
        let owner = self.owner_of(id)?;
        Ok(*spender == owner
            || self.is_approved_for_all(&owner, spender)
            || self.token_approvals.get(&id) == Some(spender))
    }
}

impl OwnershipLedger for NftLedger {
    fn issue(&mut self, to: Address, quantity: u64) -> Result<Range<TokenId>, LedgerError> {
        let start = self.next_id;
        // Nothing is created, so there is no owner to validate.
        if quantity == 0 {
            return Ok(start..start);
        }
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        let end = start
            .checked_add(quantity)
            .ok_or(LedgerError::SupplyOverflow { quantity })?;
        let balance = self.balances.get(&to).copied().unwrap_or(0);
        let new_balance = balance
            .checked_add(quantity)
            .ok_or(LedgerError::SupplyOverflow { quantity })?;

        for id in start..end {
            self.owners.insert(id, to);
            self.events.push(LedgerEvent::Transfer {
                from: Address::ZERO,
                to,
                token_id: id,
            });
        }
        self.balances.insert(to, new_balance);
        self.next_id = end;

        tracing::debug!(to = %to, first = start, quantity, "tokens issued");
        Ok(start..end)
    }

    fn owner_of(&self, id: TokenId) -> Result<Address, LedgerError> {
        self.owners
            .get(&id)
            .copied()
            .ok_or(LedgerError::NonexistentToken(id))
    }

    fn balance_of(&self, owner: &Address) -> Result<u64, LedgerError> {
        if owner.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        Ok(self.balances.get(owner).copied().unwrap_or(0))
    }

    fn transfer(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        id: TokenId,
    ) -> Result<(), LedgerError> {
        if !self.is_approved_or_owner(&caller, id)? {
            return Err(LedgerError::NotOwnerNorApproved);
        }
        if self.owner_of(id)? != from {
            return Err(LedgerError::IncorrectOwner);
        }
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }

        self.token_approvals.remove(&id);
        if let Some(balance) = self.balances.get_mut(&from) {
            *balance = balance.saturating_sub(1);
        }
        *self.balances.entry(to).or_insert(0) += 1;
        self.owners.insert(id, to);
        self.events.push(LedgerEvent::Transfer {
            from,
            to,
            token_id: id,
        });

        tracing::debug!(from = %from, to = %to, token_id = id, "token transferred");
        Ok(())
    }
}
