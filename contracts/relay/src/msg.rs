use common::msg::{TransportSendRequest, TrustedRelayResponse};
use common::ChainInfo;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    /// Local initializer; translator, chain and denom are read from it
    pub initializer: String,
    pub relayers: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Build and emit a packet (initializer only). Attached funds are the fee.
    SendMessage(TransportSendRequest),
    ResendMessage {
        request: TransportSendRequest,
        sender: String,
        /// Gets back what the attached fee exceeds `system_fee + external_fee` by
        refund: Option<String>,
    },
    /// Submit an inbound packet (relayers only)
    TransferMessage {
        gas_limit: Option<u64>,
        payload: Binary,
    },
    /// Change this relay's external fee in the initializer (owner only)
    UpdateFee {
        external_fee: Uint128,
    },
    AddRelayer {
        relayer: String,
    },
    RemoveRelayer {
        relayer: String,
    },
    ProposeOwner {
        new_owner: String,
    },
    AcceptOwnership {},
    CancelOwnershipProposal {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    /// Fee terms recorded for this relay in the initializer
    #[returns(TrustedRelayResponse)]
    Fee {},
    #[returns(RelayersResponse)]
    Relayers {},
    #[returns(NoncesResponse)]
    Nonces { chain_id: u64 },
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub initializer: Addr,
    pub translator: Addr,
    pub local_chain: ChainInfo,
    pub fee_denom: String,
}

#[cw_serde]
pub struct RelayersResponse {
    pub relayers: Vec<Addr>,
}

#[cw_serde]
pub struct NoncesResponse {
    pub chain_id: u64,
    pub outbound: u64,
    pub inbound: u64,
    pub ordered_outbound: u64,
    pub ordered_inbound: u64,
}
