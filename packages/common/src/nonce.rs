//! Per-remote-chain nonce counters.
//!
//! Every remote chain has two independent sequences: one for packets
//! flagged for strict ordering and one for the rest. A packet's flag picks
//! its sequence on both ends, so unordered traffic never moves the ordered
//! counter.
//!
//! Outbound: the value handed to the next packet built for a remote chain.
//! Inbound: the next nonce expected from a remote chain. With ordering
//! enforced the packet nonce must equal it exactly; without ordering the
//! counter only moves forward, so duplicates and late packets never rewind
//! it.

use cosmwasm_std::{StdError, StdResult, Storage};
use cw_storage_plus::Map;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum NonceError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Out of order nonce from chain {chain_id}: expected {expected}, got {got}")]
    OutOfOrder { chain_id: u64, expected: u64, got: u64 },
}

/// Sequence a packet is numbered in, chosen by its `force_order` flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NonceStream {
    Unordered,
    Ordered,
}

impl NonceStream {
    pub fn of(force_order: bool) -> Self {
        if force_order {
            Self::Ordered
        } else {
            Self::Unordered
        }
    }

    fn tag(self) -> u8 {
        match self {
            Self::Unordered => 0,
            Self::Ordered => 1,
        }
    }
}

pub struct NonceLedger<'a> {
    outbound: Map<'a, (u64, u8), u64>,
    inbound: Map<'a, (u64, u8), u64>,
}

impl<'a> NonceLedger<'a> {
    pub const fn new(outbound_namespace: &'a str, inbound_namespace: &'a str) -> Self {
        Self {
            outbound: Map::new(outbound_namespace),
            inbound: Map::new(inbound_namespace),
        }
    }

    /// Nonce the next outbound packet to `chain_id` will carry.
    pub fn outbound(
        &self,
        store: &dyn Storage,
        chain_id: u64,
        stream: NonceStream,
    ) -> StdResult<u64> {
        Ok(self
            .outbound
            .may_load(store, (chain_id, stream.tag()))?
            .unwrap_or_default())
    }

    /// Next nonce expected from `chain_id`.
    pub fn inbound(
        &self,
        store: &dyn Storage,
        chain_id: u64,
        stream: NonceStream,
    ) -> StdResult<u64> {
        Ok(self
            .inbound
            .may_load(store, (chain_id, stream.tag()))?
            .unwrap_or_default())
    }

    /// Take the next outbound nonce for `chain_id` and advance the counter.
    pub fn next_outbound(
        &self,
        store: &mut dyn Storage,
        chain_id: u64,
        stream: NonceStream,
    ) -> StdResult<u64> {
        let nonce = self.outbound(store, chain_id, stream)?;
        let next = nonce
            .checked_add(1)
            .ok_or_else(|| StdError::generic_err("outbound nonce overflow"))?;
        self.outbound.save(store, (chain_id, stream.tag()), &next)?;
        Ok(nonce)
    }

    /// Accept an inbound nonce from `chain_id` in `stream`.
    ///
    /// `enforce` requires the exact next nonce; the receiving side may
    /// enforce an unordered stream through its own per-chain toggle.
    pub fn accept_inbound(
        &self,
        store: &mut dyn Storage,
        chain_id: u64,
        stream: NonceStream,
        nonce: u64,
        enforce: bool,
    ) -> Result<(), NonceError> {
        let expected = self.inbound(store, chain_id, stream)?;
        if enforce && nonce != expected {
            return Err(NonceError::OutOfOrder {
                chain_id,
                expected,
                got: nonce,
            });
        }
        if nonce >= expected {
            let next = nonce
                .checked_add(1)
                .ok_or_else(|| StdError::generic_err("inbound nonce overflow"))?;
            self.inbound.save(store, (chain_id, stream.tag()), &next)?;
        }
        Ok(())
    }
}
