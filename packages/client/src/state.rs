//! Client storage
//!
//! Namespaces are prefixed with `asterizm_` so the embedding contract can
//! keep its own keys next to them.

use common::{Ownership, WideAddress};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary};
use cw_storage_plus::{Item, Map};

/// Protocol configuration of the embedding contract
#[cw_serde]
pub struct ClientConfig {
    /// Local initializer, the only account allowed to deliver payloads
    pub initializer: Addr,
    /// Default translator, also the chain registry
    pub translator: Addr,
    pub local_chain_id: u64,
    /// This contract as seen in packets
    pub local_address: WideAddress,
    /// Trusted relay named on every commit (default translator if None)
    pub external_relay: Option<Addr>,
    /// Ask transports to enforce strict delivery ordering
    pub force_order: bool,
}

/// One outbound intent. Written once by `send_message`, never changed.
#[cw_serde]
pub struct TransferRecord {
    pub tx_id: u64,
    pub dst_chain_id: u64,
    pub dst_address: WideAddress,
    pub payload: Binary,
    pub transfer_hash: Binary,
}

pub const CLIENT_CONFIG: Item<ClientConfig> = Item::new("asterizm_config");

pub const OWNERSHIP: Ownership = Ownership::new("asterizm_owner", "asterizm_pending_owner");

/// Trusted counterpart per remote chain: chain_id -> address
pub const TRUSTED_ADDRESSES: Map<u64, WideAddress> = Map::new("asterizm_trusted");

/// Next txId per destination chain
pub const TX_COUNTERS: Map<u64, u64> = Map::new("asterizm_tx_counter");

/// Transfer records by hash
pub const TRANSFERS: Map<&[u8], TransferRecord> = Map::new("asterizm_transfers");

/// (dst_chain_id, tx_id) -> transfer hash
pub const TRANSFER_INDEX: Map<(u64, u64), Binary> = Map::new("asterizm_transfer_index");

/// Hashes committed to the initializer
pub const DISPATCHED: Map<&[u8], bool> = Map::new("asterizm_dispatched");

/// Accounts besides the owner allowed to commit and resend
pub const SENDERS: Map<&Addr, bool> = Map::new("asterizm_senders");
