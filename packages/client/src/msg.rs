//! Client message types
//!
//! The embedding contract nests [`ClientExecuteMsg`] in its own `ExecuteMsg`
//! and mirrors the [`ClientQueryMsg`] variants in its `QueryMsg`.

use common::WideAddress;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary};

use crate::state::TransferRecord;

/// Protocol wiring supplied when the embedding contract is instantiated
#[cw_serde]
pub struct ClientInstantiateMsg {
    /// Local initializer; translator and chain id are read from it
    pub initializer: String,
    pub external_relay: Option<String>,
    pub force_order: bool,
}

#[cw_serde]
pub enum ClientExecuteMsg {
    // ========================================================================
    // Transfers
    // ========================================================================
    /// Commit a stored transfer to the initializer. Attached funds are the fee.
    InitTransfer {
        dst_chain_id: u64,
        tx_id: u64,
        transfer_hash: Binary,
    },
    /// Re-issue a committed transfer with the attached funds as the new fee.
    ResendTransfer {
        transfer_hash: Binary,
        refund_address: Option<String>,
    },

    // ========================================================================
    // Trust & Routing
    // ========================================================================
    /// Trust `address` (textual form for the chain's type) as the counterpart on `chain_id`
    AddTrustedAddress { chain_id: u64, address: String },
    RemoveTrustedAddress { chain_id: u64 },
    AddSender { address: String },
    RemoveSender { address: String },
    /// Route commits through a trusted relay, or back to the translator with None
    SetExternalRelay { relay: Option<String> },
    SetForceOrder { force_order: bool },

    // ========================================================================
    // Ownership
    // ========================================================================
    ProposeOwner { new_owner: String },
    AcceptOwnership {},
    CancelOwnershipProposal {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum ClientQueryMsg {
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
}

#[cw_serde]
pub struct ClientConfigResponse {
    pub owner: Addr,
    pub pending_owner: Option<Addr>,
    pub initializer: Addr,
    pub translator: Addr,
    pub local_chain_id: u64,
    pub local_address: WideAddress,
    pub external_relay: Option<Addr>,
    pub force_order: bool,
}

#[cw_serde]
pub struct TrustedAddressResponse {
    pub chain_id: u64,
    pub address: Option<WideAddress>,
}

#[cw_serde]
pub struct TrustedAddressesResponse {
    pub addresses: Vec<TrustedAddressResponse>,
}

#[cw_serde]
pub struct TransferResponse {
    pub transfer: Option<TransferRecord>,
    pub dispatched: bool,
}

#[cw_serde]
pub struct NextTxIdResponse {
    pub tx_id: u64,
}

#[cw_serde]
pub struct SendersResponse {
    pub senders: Vec<Addr>,
}
