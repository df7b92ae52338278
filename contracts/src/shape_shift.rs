//! # Shape Shift Contract
//!
//! A collection whose metadata URI depends on where each token sits right
//! now. Tokens held by the designated ("railgun") address resolve to the
//! `special` variant; every other holder gets `normal`:
//!
//! ```text
//! {base_uri}/normal/{id}     owner != railgun
//! {base_uri}/special/{id}    owner == railgun
//! ```
//!
//! The variant is never stored. [`NftShapeShift::token_uri`] reads the
//! live owner from the ledger on every call, so a transfer flips the URI
//! with no extra bookkeeping.
//!
//! The designated address defaults to zero. The zero address cannot hold
//! tokens, so until the owner sets one every token resolves to `normal`.

use serde::{Deserialize, Serialize};
use std::fmt;

use rail_nft_protocol::config::{URI_VARIANT_NORMAL, URI_VARIANT_SPECIAL};
use rail_nft_protocol::token::{NftLedger, OwnershipLedger, TokenId};
use rail_nft_protocol::Address;

use crate::access::Ownable;
use crate::error::ContractError;
use crate::events::{ContractEvent, EventLog};

/// Which face a token currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UriVariant {
    Normal,
    Special,
}

impl UriVariant {
    /// Path segment used in the resolved URI.
    pub fn as_str(&self) -> &'static str {
        match self {
            UriVariant::Normal => URI_VARIANT_NORMAL,
            UriVariant::Special => URI_VARIANT_SPECIAL,
        }
    }
}

impl fmt::Display for UriVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The shape-shift contract, generic over its ownership ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftShapeShift<L = NftLedger> {
    ownable: Ownable,
    ledger: L,
    railgun: Address,
    base_uri: String,
    #[serde(skip)]
    events: EventLog,
}

impl<L: OwnershipLedger> NftShapeShift<L> {
    /// Deploys with `deployer` as owner, no designated address and an
    /// empty base URI.
    pub fn new(deployer: Address, ledger: L) -> Self {
        Self {
            ownable: Ownable::new(deployer),
            ledger,
            railgun: Address::ZERO,
            base_uri: String::new(),
            events: EventLog::default(),
        }
    }

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

    /// Leaves the URI configuration frozen for good.
    pub fn renounce_ownership(&mut self, caller: &Address) -> Result<(), ContractError> {
        let previous_owner = self.ownable.renounce_ownership(caller)?;
        self.events.emit(ContractEvent::OwnershipTransferred {
            previous_owner,
            new_owner: Address::ZERO,
        });
        Ok(())
    }

    /// Sets the designated address. Zero is allowed and disables `special`.
    pub fn set_railgun_address(
        &mut self,
        caller: &Address,
        railgun: Address,
    ) -> Result<(), ContractError> {
        self.ownable.only_owner(caller)?;
        self.railgun = railgun;
        self.events.emit(ContractEvent::RailgunAddressUpdated { railgun });
        Ok(())
    }

    /// The designated address.
    pub fn railgun(&self) -> Address {
        self.railgun
    }

    /// Replaces the URI prefix.
    pub fn set_base_uri(
        &mut self,
        caller: &Address,
        base_uri: impl Into<String>,
    ) -> Result<(), ContractError> {
        self.ownable.only_owner(caller)?;
        self.base_uri = base_uri.into();
        self.events.emit(ContractEvent::BaseUriUpdated {
            base_uri: self.base_uri.clone(),
        });
        Ok(())
    }

    /// The URI prefix.
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Variant of token `id` given its current owner.
    pub fn variant(&self, id: TokenId) -> Result<UriVariant, ContractError> {
        let owner = self.ledger.owner_of(id)?;
        Ok(if owner == self.railgun {
            UriVariant::Special
        } else {
            UriVariant::Normal
        })
    }

    /// Resolved metadata URI of token `id`.
    ///
    /// # Errors
    ///
    /// Fails with a ledger error if the token was never minted.
    pub fn token_uri(&self, id: TokenId) -> Result<String, ContractError> {
        let variant = self.variant(id)?;
        Ok(format!("{}/{}/{}", self.base_uri, variant, id))
    }

    /// Mints one token to `caller` and returns its id. Open to anyone.
    pub fn mint(&mut self, caller: &Address) -> Result<TokenId, ContractError> {
        let range = self.ledger.issue(*caller, 1)?;
        Ok(range.start)
    }

    /// Moves token `id` from `from` to `to` on behalf of `caller`.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        from: Address,
        to: Address,
        id: TokenId,
    ) -> Result<(), ContractError> {
        self.ledger.transfer(*caller, from, to, id)?;
        Ok(())
    }

    /// Current owner of token `id`.
    pub fn owner_of(&self, id: TokenId) -> Result<Address, ContractError> {
        Ok(self.ledger.owner_of(id)?)
    }

    /// The underlying ownership ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the ledger.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Drains contract events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<ContractEvent> {
        self.events.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_nft_protocol::token::LedgerError;

    fn addr(n: u8) -> Address {
        Address::from_bytes([n; 20])
    }

    fn deploy() -> NftShapeShift {
        NftShapeShift::new(addr(1), NftLedger::new("Test NFT", "TEST"))
    }

    #[test]
    fn defaults_are_empty() {
        let c = deploy();
        assert!(c.railgun().is_zero());
        assert_eq!(c.base_uri(), "");
        assert_eq!(c.owner(), addr(1));
    }

    #[test]
    fn admin_setters_are_gated() {
        let mut c = deploy();
        assert_eq!(
            c.set_railgun_address(&addr(2), addr(3)),
            Err(ContractError::Unauthorized)
        );
        assert_eq!(c.set_base_uri(&addr(2), "abc"), Err(ContractError::Unauthorized));
        assert!(c.railgun().is_zero());
        assert_eq!(c.base_uri(), "");
    }

    #[test]
    fn mint_assigns_sequential_ids_to_caller() {
        let mut c = deploy();
        assert_eq!(c.mint(&addr(5)).unwrap(), 0);
        assert_eq!(c.mint(&addr(6)).unwrap(), 1);
        assert_eq!(c.owner_of(0).unwrap(), addr(5));
        assert_eq!(c.owner_of(1).unwrap(), addr(6));
    }

    #[test]
    fn uri_follows_current_owner() {
        let mut c = deploy();
        c.set_base_uri(&addr(1), "ipfs://123").unwrap();
        c.set_railgun_address(&addr(1), addr(9)).unwrap();
        c.mint(&addr(1)).unwrap();
        assert_eq!(c.token_uri(0).unwrap(), "ipfs://123/normal/0");

        c.transfer_from(&addr(1), addr(1), addr(9), 0).unwrap();
        assert_eq!(c.variant(0).unwrap(), UriVariant::Special);
        assert_eq!(c.token_uri(0).unwrap(), "ipfs://123/special/0");

        c.transfer_from(&addr(9), addr(9), addr(1), 0).unwrap();
        assert_eq!(c.token_uri(0).unwrap(), "ipfs://123/normal/0");
    }

    #[test]
    fn changing_railgun_reclassifies_existing_tokens() {
        let mut c = deploy();
        c.mint(&addr(4)).unwrap();
        assert_eq!(c.variant(0).unwrap(), UriVariant::Normal);
        c.set_railgun_address(&addr(1), addr(4)).unwrap();
        assert_eq!(c.variant(0).unwrap(), UriVariant::Special);
        c.set_railgun_address(&addr(1), Address::ZERO).unwrap();
        assert_eq!(c.variant(0).unwrap(), UriVariant::Normal);
    }

    #[test]
    fn unknown_token_uri_fails() {
        let c = deploy();
        assert_eq!(
            c.token_uri(7),
            Err(ContractError::Ledger(LedgerError::NonexistentToken(7)))
        );
    }

    #[test]
    fn mint_to_zero_rejected() {
        let mut c = deploy();
        assert_eq!(
            c.mint(&Address::ZERO),
            Err(ContractError::Ledger(LedgerError::ZeroAddress))
        );
    }

    #[test]
    fn variant_renders_path_segment() {
        assert_eq!(UriVariant::Normal.to_string(), "normal");
        assert_eq!(UriVariant::Special.as_str(), "special");
    }
}
