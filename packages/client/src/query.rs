//! Client queries. The embedding contract routes its mirrored
//! `QueryMsg` variants here.

use cosmwasm_std::{Binary, Deps, Order, StdResult};

use crate::msg::{
    ClientConfigResponse, NextTxIdResponse, SendersResponse, TransferResponse,
    TrustedAddressResponse, TrustedAddressesResponse,
};
use crate::state::{
    CLIENT_CONFIG, DISPATCHED, OWNERSHIP, SENDERS, TRANSFERS, TRANSFER_INDEX, TRUSTED_ADDRESSES,
    TX_COUNTERS,
};

pub fn query_client_config(deps: Deps) -> StdResult<ClientConfigResponse> {
    let config = CLIENT_CONFIG.load(deps.storage)?;
    Ok(ClientConfigResponse {
        owner: OWNERSHIP.owner(deps.storage)?,
        pending_owner: OWNERSHIP.pending_owner(deps.storage)?,
        initializer: config.initializer,
        translator: config.translator,
        local_chain_id: config.local_chain_id,
        local_address: config.local_address,
        external_relay: config.external_relay,
        force_order: config.force_order,
    })
}

pub fn query_trusted_address(deps: Deps, chain_id: u64) -> StdResult<TrustedAddressResponse> {
    Ok(TrustedAddressResponse {
        chain_id,
        address: TRUSTED_ADDRESSES.may_load(deps.storage, chain_id)?,
    })
}

pub fn query_trusted_addresses(deps: Deps) -> StdResult<TrustedAddressesResponse> {
    let addresses = TRUSTED_ADDRESSES
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            let (chain_id, address) = item?;
            Ok(TrustedAddressResponse {
                chain_id,
                address: Some(address),
            })
        })
        .collect::<StdResult<Vec<_>>>()?;
    Ok(TrustedAddressesResponse { addresses })
}

pub fn query_transfer(deps: Deps, transfer_hash: Binary) -> StdResult<TransferResponse> {
    Ok(TransferResponse {
        transfer: TRANSFERS.may_load(deps.storage, transfer_hash.as_slice())?,
        dispatched: DISPATCHED.has(deps.storage, transfer_hash.as_slice()),
    })
}

pub fn query_transfer_by_tx_id(
    deps: Deps,
    dst_chain_id: u64,
    tx_id: u64,
) -> StdResult<TransferResponse> {
    match TRANSFER_INDEX.may_load(deps.storage, (dst_chain_id, tx_id))? {
        Some(hash) => query_transfer(deps, hash),
        None => Ok(TransferResponse {
            transfer: None,
            dispatched: false,
        }),
    }
}

pub fn query_next_tx_id(deps: Deps, dst_chain_id: u64) -> StdResult<NextTxIdResponse> {
    Ok(NextTxIdResponse {
        tx_id: TX_COUNTERS
            .may_load(deps.storage, dst_chain_id)?
            .unwrap_or_default(),
    })
}

pub fn query_senders(deps: Deps) -> StdResult<SendersResponse> {
    let senders = SENDERS
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?;
    Ok(SendersResponse { senders })
}
