//! Two-step ownership transfer.
//!
//! The current owner proposes a successor; the change only takes effect once
//! the successor accepts. Every owner-gated handler calls
//! [`Ownership::assert_owner`] before touching state.

use cosmwasm_std::{Addr, StdError, StdResult, Storage};
use cw_storage_plus::Item;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum OwnershipError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only owner can perform this action")]
    NotOwner,

    #[error("Unauthorized: only pending owner can accept")]
    NotPendingOwner,

    #[error("No pending owner change")]
    NoPendingOwner,
}

pub struct Ownership<'a> {
    owner: Item<'a, Addr>,
    pending: Item<'a, Addr>,
}

impl<'a> Ownership<'a> {
    pub const fn new(owner_namespace: &'a str, pending_namespace: &'a str) -> Self {
        Self {
            owner: Item::new(owner_namespace),
            pending: Item::new(pending_namespace),
        }
    }

    pub fn initialize(&self, store: &mut dyn Storage, owner: &Addr) -> StdResult<()> {
        self.owner.save(store, owner)
    }

    pub fn owner(&self, store: &dyn Storage) -> StdResult<Addr> {
        self.owner.load(store)
    }

    pub fn pending_owner(&self, store: &dyn Storage) -> StdResult<Option<Addr>> {
        self.pending.may_load(store)
    }

    pub fn is_owner(&self, store: &dyn Storage, caller: &Addr) -> StdResult<bool> {
        Ok(self.owner.load(store)? == *caller)
    }

    pub fn assert_owner(&self, store: &dyn Storage, caller: &Addr) -> Result<(), OwnershipError> {
        if !self.is_owner(store, caller)? {
            return Err(OwnershipError::NotOwner);
        }
        Ok(())
    }

    pub fn propose(
        &self,
        store: &mut dyn Storage,
        caller: &Addr,
        new_owner: &Addr,
    ) -> Result<(), OwnershipError> {
        self.assert_owner(store, caller)?;
        if new_owner == caller {
            return Err(StdError::generic_err("new owner must differ from current owner").into());
        }
        self.pending.save(store, new_owner)?;
        Ok(())
    }

    pub fn accept(&self, store: &mut dyn Storage, caller: &Addr) -> Result<(), OwnershipError> {
        let pending = self
            .pending
            .may_load(store)?
            .ok_or(OwnershipError::NoPendingOwner)?;
        if pending != *caller {
            return Err(OwnershipError::NotPendingOwner);
        }
        self.owner.save(store, &pending)?;
        self.pending.remove(store);
        Ok(())
    }

    pub fn cancel(&self, store: &mut dyn Storage, caller: &Addr) -> Result<(), OwnershipError> {
        self.assert_owner(store, caller)?;
        self.pending.remove(store);
        Ok(())
    }
}
