//! State definitions for the translator contract

use common::{ChainInfo, ChainType, NonceLedger, Ownership, PendingDeliveries};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:asterizm-translator";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default page size for chain listing
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 30;

// ============================================================================
// Core Configuration
// ============================================================================

#[cw_serde]
pub struct Config {
    /// Bound initializer; unset until `SetInitializer`
    pub initializer: Option<Addr>,
    pub local_chain: ChainInfo,
    /// Denom accepted as transport fee
    pub fee_denom: String,
    /// Receives every transport fee
    pub fee_collector: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");

pub const OWNERSHIP: Ownership = Ownership::new("owner", "pending_owner");

// ============================================================================
// Registry
// ============================================================================

/// Registered chains (the local chain included): chain_id -> type
pub const CHAINS: Map<u64, ChainType> = Map::new("chains");

/// Per remote chain strict-ordering toggle
pub const CHAIN_FORCE_ORDER: Map<u64, bool> = Map::new("chain_force_order");

/// Accounts allowed to submit inbound packets
pub const RELAYERS: Map<&Addr, bool> = Map::new("relayers");

pub const NONCES: NonceLedger = NonceLedger::new("outbound_nonce", "inbound_nonce");

/// Packets being delivered to the initializer, keyed by reply id
pub const PENDING_DELIVERIES: PendingDeliveries =
    PendingDeliveries::new("next_delivery_id", "pending_deliveries");
