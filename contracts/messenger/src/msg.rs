use client::msg::{
    ClientConfigResponse, ClientExecuteMsg, NextTxIdResponse, SendersResponse, TransferResponse,
    TrustedAddressResponse, TrustedAddressesResponse,
};
use common::msg::ClientReceiveMsg;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;

use crate::state::ReceivedMessage;

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub initializer: String,
    pub external_relay: Option<String>,
    pub force_order: bool,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Send `text` to the trusted messenger on `dst_chain_id`.
    /// Attached funds are the transport fee.
    SendText { dst_chain_id: u64, text: String },
    /// Client base administration and transfer commands
    Client(ClientExecuteMsg),
    /// Delivery hook, called by the local initializer only
    AsterizmReceive(ClientReceiveMsg),
    Pause {},
    Unpause {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ClientConfigResponse)]
    ClientConfig {},
    #[returns(TrustedAddressResponse)]
    TrustedAddress { chain_id: u64 },
    #[returns(TrustedAddressesResponse)]
    TrustedAddresses {},
    #[returns(TransferResponse)]
    Transfer { transfer_hash: Binary },
    #[returns(TransferResponse)]
    TransferByTxId { dst_chain_id: u64, tx_id: u64 },
    #[returns(NextTxIdResponse)]
    NextTxId { dst_chain_id: u64 },
    #[returns(SendersResponse)]
    Senders {},

    #[returns(MessageResponse)]
    Message { transfer_hash: Binary },
    #[returns(MessagesResponse)]
    Messages {
        start_after: Option<Binary>,
        limit: Option<u32>,
    },
    #[returns(PausedResponse)]
    Paused {},
}

#[cw_serde]
pub struct MessageResponse {
    pub message: Option<ReceivedMessage>,
}

#[cw_serde]
pub struct MessageEntry {
    pub transfer_hash: Binary,
    pub message: ReceivedMessage,
}

#[cw_serde]
pub struct MessagesResponse {
    pub messages: Vec<MessageEntry>,
}

#[cw_serde]
pub struct PausedResponse {
    pub paused: bool,
}
