//! # Single-Owner Access Control
//!
//! One address may call the admin surface of a contract. It starts as the
//! deployer and only changes through [`Ownable::transfer_ownership`] or
//! [`Ownable::renounce_ownership`]. After renouncing, the owner is the zero
//! address and nobody can pass [`Ownable::only_owner`] again.

use serde::{Deserialize, Serialize};

use rail_nft_protocol::Address;

use crate::error::ContractError;

/// Owner identity plus the checks around it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ownable {
    owner: Address,
}

impl Ownable {
    /// Creates the guard with `owner` in charge.
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    /// Current owner. Zero after renouncing.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Fails with [`ContractError::Unauthorized`] unless `caller` is the owner.
    pub fn only_owner(&self, caller: &Address) -> Result<(), ContractError> {
        if self.owner.is_zero() || *caller != self.owner {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Hands ownership to `new_owner` and returns the previous owner.
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<Address, ContractError> {
        self.only_owner(caller)?;
        if new_owner.is_zero() {
            return Err(ContractError::ZeroAddressOwner);
        }
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }

    /// Gives up ownership for good and returns the previous owner.
    pub fn renounce_ownership(&mut self, caller: &Address) -> Result<Address, ContractError> {
        self.only_owner(caller)?;
        Ok(std::mem::replace(&mut self.owner, Address::ZERO))
    }
}
