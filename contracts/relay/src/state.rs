use common::{ChainInfo, NonceLedger, Ownership, PendingDeliveries};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:asterizm-relay";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cw_serde]
pub struct Config {
    pub initializer: Addr,
    /// Chain registry
    pub translator: Addr,
    pub local_chain: ChainInfo,
    pub fee_denom: String,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const OWNERSHIP: Ownership = Ownership::new("owner", "pending_owner");
pub const RELAYERS: Map<&Addr, bool> = Map::new("relayers");
pub const NONCES: NonceLedger = NonceLedger::new("outbound_nonce", "inbound_nonce");
pub const PENDING_DELIVERIES: PendingDeliveries =
    PendingDeliveries::new("next_delivery_id", "pending_deliveries");
