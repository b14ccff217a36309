//! Query handlers for the translator contract.

use common::msg::ChainResponse;
use common::{ChainInfo, NonceStream};
use cosmwasm_std::{Deps, Order, StdResult};
use cw_storage_plus::Bound;

use crate::msg::{
    ChainsResponse, ConfigResponse, ForceOrderResponse, IsRelayerResponse, NoncesResponse,
    RelayersResponse,
};
use crate::state::{
    CHAINS, CHAIN_FORCE_ORDER, CONFIG, DEFAULT_LIMIT, MAX_LIMIT, NONCES, OWNERSHIP, RELAYERS,
};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: OWNERSHIP.owner(deps.storage)?,
        pending_owner: OWNERSHIP.pending_owner(deps.storage)?,
        initializer: config.initializer,
        local_chain: config.local_chain,
        fee_denom: config.fee_denom,
        fee_collector: config.fee_collector,
    })
}

pub fn query_local_chain(deps: Deps) -> StdResult<ChainInfo> {
    Ok(CONFIG.load(deps.storage)?.local_chain)
}

pub fn query_chain(deps: Deps, chain_id: u64) -> StdResult<ChainResponse> {
    let chain = CHAINS
        .may_load(deps.storage, chain_id)?
        .map(|chain_type| ChainInfo {
            chain_id,
            chain_type,
        });
    Ok(ChainResponse { chain })
}

/// Registered chains in ascending id order.
pub fn query_chains(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<ChainsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let chains = CHAINS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (chain_id, chain_type) = item?;
            Ok(ChainInfo {
                chain_id,
                chain_type,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(ChainsResponse { chains })
}

pub fn query_relayers(deps: Deps) -> StdResult<RelayersResponse> {
    let relayers = RELAYERS
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?;
    Ok(RelayersResponse { relayers })
}

pub fn query_is_relayer(deps: Deps, address: String) -> StdResult<IsRelayerResponse> {
    let addr = deps.api.addr_validate(&address)?;
    Ok(IsRelayerResponse {
        is_relayer: RELAYERS.has(deps.storage, &addr),
    })
}

pub fn query_nonces(deps: Deps, chain_id: u64) -> StdResult<NoncesResponse> {
    Ok(NoncesResponse {
        chain_id,
        outbound: NONCES.outbound(deps.storage, chain_id, NonceStream::Unordered)?,
        inbound: NONCES.inbound(deps.storage, chain_id, NonceStream::Unordered)?,
        ordered_outbound: NONCES.outbound(deps.storage, chain_id, NonceStream::Ordered)?,
        ordered_inbound: NONCES.inbound(deps.storage, chain_id, NonceStream::Ordered)?,
    })
}

pub fn query_force_order(deps: Deps, chain_id: u64) -> StdResult<ForceOrderResponse> {
    Ok(ForceOrderResponse {
        chain_id,
        force_order: CHAIN_FORCE_ORDER
            .may_load(deps.storage, chain_id)?
            .unwrap_or(false),
    })
}
