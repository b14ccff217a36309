//! Cross-contract interface.
//!
//! Every contract's own `ExecuteMsg`/`QueryMsg` contains variants with the
//! same names and shapes as the enums below, so a caller only needs this
//! crate to talk to any translator, initializer or client.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{to_json_binary, Addr, Binary, CosmosMsg, StdResult, Uint128, WasmMsg};

use crate::address::WideAddress;
use crate::chain::{ChainInfo, ChainType};

// ============================================================================
// Transport (translator and trusted relays)
// ============================================================================

/// Packet fields handed to a transport by the initializer.
#[cw_serde]
pub struct TransportSendRequest {
    /// Wide address of the originating client
    pub src_address: WideAddress,
    pub dst_chain_id: u64,
    pub dst_address: WideAddress,
    pub tx_id: u64,
    /// 32-byte transfer hash
    pub transfer_hash: Binary,
    pub payload: Binary,
    /// Client asked for strict delivery ordering
    pub force_order: bool,
}

#[cw_serde]
pub enum TransportExecuteMsg {
    /// Build and emit a packet. Attached funds are the transport fee.
    SendMessage(TransportSendRequest),
    /// Re-emit an already dispatched transfer with a new fee.
    ResendMessage {
        request: TransportSendRequest,
        /// Account that asked for the resend
        sender: String,
        /// Receives whatever the attached funds exceed the transport's price by
        refund: Option<String>,
    },
    /// Inbound entrypoint for relayers.
    TransferMessage {
        gas_limit: Option<u64>,
        payload: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum ChainRegistryQueryMsg {
    #[returns(ChainInfo)]
    LocalChain {},
    #[returns(ChainResponse)]
    Chain { chain_id: u64 },
}

#[cw_serde]
pub struct ChainResponse {
    pub chain: Option<ChainInfo>,
}

// ============================================================================
// Initializer
// ============================================================================

/// Outbound commit sent by a client to the initializer.
#[cw_serde]
pub struct InitTransferRequest {
    pub dst_chain_id: u64,
    pub dst_address: WideAddress,
    pub tx_id: u64,
    pub transfer_hash: Binary,
    pub payload: Binary,
    pub force_order: bool,
    /// Trusted external relay to route through (default translator if None)
    pub relay: Option<String>,
}

/// Inbound delivery forwarded by a transport to the initializer.
#[cw_serde]
pub struct ReceivePayloadRequest {
    pub src_chain_id: u64,
    pub src_address: WideAddress,
    pub dst_address: WideAddress,
    pub tx_id: u64,
    pub transfer_hash: Binary,
    pub payload: Binary,
}

#[cw_serde]
pub enum InitializerExecuteMsg {
    InitTransfer(InitTransferRequest),
    ResendTransfer {
        transfer_hash: Binary,
        refund_address: Option<String>,
    },
    ReceivePayload(ReceivePayloadRequest),
    /// Called by a trusted relay to update its own external fee.
    UpdateTrustedRelayFee { external_fee: Uint128 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum InitializerQueryMsg {
    #[returns(InitializerConfigResponse)]
    Config {},
    #[returns(TrustedRelayResponse)]
    TrustedRelay { address: String },
}

#[cw_serde]
pub struct InitializerConfigResponse {
    pub owner: Addr,
    pub translator: Addr,
    pub local_chain_id: u64,
    pub local_chain_type: ChainType,
    pub fee_denom: String,
    /// Protocol fee sink
    pub fee_collector: Addr,
}

#[cw_serde]
pub struct TrustedRelayResponse {
    pub relay_address: Addr,
    pub external_fee: Uint128,
    pub system_fee: Uint128,
}

// ============================================================================
// Client receive hook
// ============================================================================

/// Delivery handed to a client by its local initializer.
#[cw_serde]
pub struct ClientReceiveMsg {
    pub src_chain_id: u64,
    pub src_address: WideAddress,
    pub tx_id: u64,
    pub transfer_hash: Binary,
    pub payload: Binary,
}

impl ClientReceiveMsg {
    /// Serializes the message wrapped as `{"asterizm_receive": {...}}`.
    pub fn into_json_binary(self) -> StdResult<Binary> {
        to_json_binary(&ClientExecuteMsg::AsterizmReceive(self))
    }

    pub fn into_cosmos_msg<T: Into<String>>(self, contract_addr: T) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: contract_addr.into(),
            msg: self.into_json_binary()?,
            funds: vec![],
        }
        .into())
    }
}

/// The variant every client contract must expose in its `ExecuteMsg`.
#[cw_serde]
enum ClientExecuteMsg {
    AsterizmReceive(ClientReceiveMsg),
}
