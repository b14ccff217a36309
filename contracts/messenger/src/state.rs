use common::WideAddress;
use cosmwasm_schema::cw_serde;
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:asterizm-messenger";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wire payload of one message
#[cw_serde]
pub struct TextPayload {
    pub text: String,
}

#[cw_serde]
pub struct ReceivedMessage {
    pub src_chain_id: u64,
    pub src_address: WideAddress,
    pub tx_id: u64,
    pub text: String,
}

pub const PAUSED: Item<bool> = Item::new("paused");
/// Inbox keyed by transfer hash
pub const MESSAGES: Map<&[u8], ReceivedMessage> = Map::new("messages");
