//! State definitions for the initializer contract

use common::msg::TransportSendRequest;
use common::{ChainInfo, Ownership};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:asterizm-initializer";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cw_serde]
pub struct Config {
    /// Default translator and chain registry
    pub translator: Addr,
    pub local_chain: ChainInfo,
    pub fee_denom: String,
    /// Protocol fee sink, receives trusted relay system fees
    pub fee_collector: Addr,
}

/// Fee terms agreed with an external relay
#[cw_serde]
pub struct TrustedRelay {
    /// Kept by the relay owner
    pub external_fee: Uint128,
    /// Forwarded to the protocol fee sink
    pub system_fee: Uint128,
}

/// A dispatched transfer, kept so resends carry identical contents
#[cw_serde]
pub struct OutboundTransfer {
    pub client: Addr,
    /// Translator or trusted relay the transfer was sent through
    pub transport: Addr,
    pub request: TransportSendRequest,
}

pub const CONFIG: Item<Config> = Item::new("config");

pub const OWNERSHIP: Ownership = Ownership::new("owner", "pending_owner");

/// Registered local clients: wide address -> contract
pub const CLIENTS: Map<&[u8], Addr> = Map::new("clients");

/// Blocked accounts: (chain_id, wide address)
pub const BLOCKED: Map<(u64, &[u8]), bool> = Map::new("blocked");

pub const TRUSTED_RELAYS: Map<&Addr, TrustedRelay> = Map::new("trusted_relays");

/// Outbound transfers by hash
pub const OUTBOUND: Map<&[u8], OutboundTransfer> = Map::new("outbound");

/// Delivered transfer hashes
pub const PROCESSED: Map<&[u8], bool> = Map::new("processed");
