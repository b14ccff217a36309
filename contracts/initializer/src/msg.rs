//! Message types for the initializer contract
//!
//! `InitTransfer`, `ResendTransfer`, `ReceivePayload` and
//! `UpdateTrustedRelayFee` have the shape of
//! `common::msg::InitializerExecuteMsg`; `Config` and `TrustedRelay` answer
//! `common::msg::InitializerQueryMsg`.

use common::msg::{
    InitTransferRequest, InitializerConfigResponse, ReceivePayloadRequest, TrustedRelayResponse,
};
use common::WideAddress;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use crate::state::OutboundTransfer;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    /// Default translator; the local chain is read from it
    pub translator: String,
    /// Denom accepted as fee
    pub fee_denom: String,
    /// Protocol fee sink (defaults to owner)
    pub fee_collector: Option<String>,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Transfers
    // ========================================================================
    /// Commit a transfer (registered clients only). Attached funds are the fee.
    InitTransfer(InitTransferRequest),
    /// Re-emit a recorded transfer with a new fee (owning client or owner)
    ResendTransfer {
        transfer_hash: Binary,
        /// Passed to the transport, which pays back any fee above its price
        refund_address: Option<String>,
    },
    /// Deliver an inbound transfer (translator or trusted relay only)
    ReceivePayload(ReceivePayloadRequest),

    // ========================================================================
    // Trusted Relays
    // ========================================================================
    ManageTrustedRelay {
        relay: String,
        external_fee: Uint128,
        system_fee: Uint128,
    },
    RemoveTrustedRelay {
        relay: String,
    },
    /// Called by a trusted relay to update its own external fee
    UpdateTrustedRelayFee {
        external_fee: Uint128,
    },

    // ========================================================================
    // Blocklist
    // ========================================================================
    /// Block `address` (textual form for the chain's type) on `chain_id`
    AddBlockAddress {
        chain_id: u64,
        address: String,
    },
    RemoveBlockAddress {
        chain_id: u64,
        address: String,
    },

    // ========================================================================
    // Configuration
    // ========================================================================
    RegisterClient {
        client: String,
    },
    UnregisterClient {
        client: String,
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
    #[returns(InitializerConfigResponse)]
    Config {},
    #[returns(PendingOwnerResponse)]
    PendingOwner {},
    #[returns(TrustedRelayResponse)]
    TrustedRelay { address: String },
    #[returns(TrustedRelaysResponse)]
    TrustedRelays {},
    #[returns(IsBlockedResponse)]
    IsBlocked { chain_id: u64, address: String },
    #[returns(IsProcessedResponse)]
    IsProcessed { transfer_hash: Binary },
    #[returns(ClientResponse)]
    Client { address: String },
    #[returns(ClientsResponse)]
    Clients {},
    #[returns(OutboundTransferResponse)]
    OutboundTransfer { transfer_hash: Binary },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct PendingOwnerResponse {
    pub pending_owner: Option<Addr>,
}

#[cw_serde]
pub struct TrustedRelaysResponse {
    pub relays: Vec<TrustedRelayResponse>,
}

#[cw_serde]
pub struct IsBlockedResponse {
    pub blocked: bool,
}

#[cw_serde]
pub struct IsProcessedResponse {
    pub processed: bool,
}

#[cw_serde]
pub struct ClientResponse {
    pub address: Addr,
    pub wide_address: WideAddress,
    pub registered: bool,
}

#[cw_serde]
pub struct ClientsResponse {
    pub clients: Vec<Addr>,
}

#[cw_serde]
pub struct OutboundTransferResponse {
    pub transfer: Option<OutboundTransfer>,
}
