//! Query handlers for the initializer contract.

use common::msg::{InitializerConfigResponse, TrustedRelayResponse};
use common::WideAddress;
use cosmwasm_std::{Binary, Deps, Order, StdError, StdResult};

use crate::msg::{
    ClientResponse, ClientsResponse, IsBlockedResponse, IsProcessedResponse,
    OutboundTransferResponse, PendingOwnerResponse, TrustedRelaysResponse,
};
use crate::registry::{is_blocked, parse_address};
use crate::state::{CLIENTS, CONFIG, OUTBOUND, OWNERSHIP, PROCESSED, TRUSTED_RELAYS};

pub fn query_config(deps: Deps) -> StdResult<InitializerConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(InitializerConfigResponse {
        owner: OWNERSHIP.owner(deps.storage)?,
        translator: config.translator,
        local_chain_id: config.local_chain.chain_id,
        local_chain_type: config.local_chain.chain_type,
        fee_denom: config.fee_denom,
        fee_collector: config.fee_collector,
    })
}

pub fn query_pending_owner(deps: Deps) -> StdResult<PendingOwnerResponse> {
    Ok(PendingOwnerResponse {
        pending_owner: OWNERSHIP.pending_owner(deps.storage)?,
    })
}

/// Fee terms of a trusted relay; fails for an untrusted address.
pub fn query_trusted_relay(deps: Deps, address: String) -> StdResult<TrustedRelayResponse> {
    let relay_address = deps.api.addr_validate(&address)?;
    let record = TRUSTED_RELAYS
        .may_load(deps.storage, &relay_address)?
        .ok_or_else(|| StdError::not_found(format!("trusted relay {}", address)))?;
    Ok(TrustedRelayResponse {
        relay_address,
        external_fee: record.external_fee,
        system_fee: record.system_fee,
    })
}

pub fn query_trusted_relays(deps: Deps) -> StdResult<TrustedRelaysResponse> {
    let relays = TRUSTED_RELAYS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            let (relay_address, record) = item?;
            Ok(TrustedRelayResponse {
                relay_address,
                external_fee: record.external_fee,
                system_fee: record.system_fee,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;
    Ok(TrustedRelaysResponse { relays })
}

pub fn query_is_blocked(
    deps: Deps,
    chain_id: u64,
    address: String,
) -> StdResult<IsBlockedResponse> {
    let config = CONFIG.load(deps.storage)?;
    let wide = parse_address(&deps.querier, &config, chain_id, &address)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    Ok(IsBlockedResponse {
        blocked: is_blocked(deps.storage, chain_id, &wide),
    })
}

pub fn query_is_processed(deps: Deps, transfer_hash: Binary) -> StdResult<IsProcessedResponse> {
    Ok(IsProcessedResponse {
        processed: PROCESSED.has(deps.storage, transfer_hash.as_slice()),
    })
}

pub fn query_client(deps: Deps, address: String) -> StdResult<ClientResponse> {
    let address = deps.api.addr_validate(&address)?;
    let wide_address = WideAddress::from_addr(&address);
    let registered =
        CLIENTS.may_load(deps.storage, wide_address.as_slice())?.as_ref() == Some(&address);
    Ok(ClientResponse {
        address,
        wide_address,
        registered,
    })
}

pub fn query_clients(deps: Deps) -> StdResult<ClientsResponse> {
    let clients = CLIENTS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, client)| client))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(ClientsResponse { clients })
}

pub fn query_outbound_transfer(
    deps: Deps,
    transfer_hash: Binary,
) -> StdResult<OutboundTransferResponse> {
    Ok(OutboundTransferResponse {
        transfer: OUTBOUND.may_load(deps.storage, transfer_hash.as_slice())?,
    })
}
