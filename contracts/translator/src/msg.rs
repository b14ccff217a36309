//! Message types for the translator contract
//!
//! `SendMessage`, `ResendMessage` and `TransferMessage` have the same shape
//! as `common::msg::TransportExecuteMsg`; `LocalChain` and `Chain` answer
//! `common::msg::ChainRegistryQueryMsg`.

use common::msg::{ChainResponse, TransportSendRequest};
use common::{ChainInfo, ChainType};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    /// Owner address for registry management
    pub owner: String,
    pub local_chain_id: u64,
    pub local_chain_type: ChainType,
    /// Denom accepted as transport fee
    pub fee_denom: String,
    /// Fee collector address (defaults to owner)
    pub fee_collector: Option<String>,
    /// Initial relayer addresses
    pub relayers: Vec<String>,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Transport
    // ========================================================================
    /// Build and emit a packet (initializer only). Attached funds are the fee.
    SendMessage(TransportSendRequest),
    /// Re-emit a dispatched transfer under a new nonce (initializer only)
    ResendMessage {
        request: TransportSendRequest,
        sender: String,
        /// Never paid out here: the whole attached fee is the price
        refund: Option<String>,
    },
    /// Submit an inbound packet (relayers only)
    TransferMessage {
        gas_limit: Option<u64>,
        payload: Binary,
    },

    // ========================================================================
    // Chain Registry
    // ========================================================================
    AddChain {
        chain_id: u64,
        chain_type: ChainType,
    },
    AddChains {
        chains: Vec<ChainInfo>,
    },
    RemoveChain {
        chain_id: u64,
    },
    /// Enforce strict ordering for every packet to and from `chain_id`
    SetForceOrder {
        chain_id: u64,
        force_order: bool,
    },

    // ========================================================================
    // Configuration
    // ========================================================================
    AddRelayer {
        relayer: String,
    },
    RemoveRelayer {
        relayer: String,
    },
    SetInitializer {
        initializer: String,
    },
    UpdateFeeCollector {
        fee_collector: String,
    },

    // ========================================================================
    // Ownership
    // ========================================================================
    ProposeOwner {
        new_owner: String,
    },
    AcceptOwnership {},
    CancelOwnershipProposal {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(ChainInfo)]
    LocalChain {},
    #[returns(ChainResponse)]
    Chain { chain_id: u64 },
    #[returns(ChainsResponse)]
    Chains {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(RelayersResponse)]
    Relayers {},
    #[returns(IsRelayerResponse)]
    IsRelayer { address: String },
    #[returns(NoncesResponse)]
    Nonces { chain_id: u64 },
    #[returns(ForceOrderResponse)]
    ForceOrder { chain_id: u64 },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub pending_owner: Option<Addr>,
    pub initializer: Option<Addr>,
    pub local_chain: ChainInfo,
    pub fee_denom: String,
    pub fee_collector: Addr,
}

#[cw_serde]
pub struct ChainsResponse {
    pub chains: Vec<ChainInfo>,
}

#[cw_serde]
pub struct RelayersResponse {
    pub relayers: Vec<Addr>,
}

#[cw_serde]
pub struct IsRelayerResponse {
    pub is_relayer: bool,
}

#[cw_serde]
pub struct NoncesResponse {
    pub chain_id: u64,
    /// Nonce the next unordered packet to `chain_id` will carry
    pub outbound: u64,
    /// Next unordered nonce expected from `chain_id`
    pub inbound: u64,
    /// Same counters for the strictly ordered stream
    pub ordered_outbound: u64,
    pub ordered_inbound: u64,
}

#[cw_serde]
pub struct ForceOrderResponse {
    pub chain_id: u64,
    pub force_order: bool,
}
