//! Configuration management handlers.
//!
//! This module handles:
//! - Blocklist (add/remove), effective immediately on both paths
//! - Client registry (register/unregister)
//! - Protocol fee sink

use common::events::block_address_event;
use common::WideAddress;
use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::registry::parse_address;
use crate::state::{BLOCKED, CLIENTS, CONFIG, OWNERSHIP};

// ============================================================================
// Blocklist
// ============================================================================

pub fn execute_add_block_address(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u64,
    address: String,
) -> Result<Response, ContractError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    let config = CONFIG.load(deps.storage)?;
    let wide = parse_address(&deps.querier, &config, chain_id, &address)?;

    BLOCKED.save(deps.storage, (chain_id, wide.as_slice()), &true)?;

    Ok(Response::new()
        .add_event(block_address_event(true, chain_id, &wide))
        .add_attribute("method", "add_block_address"))
}

pub fn execute_remove_block_address(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u64,
    address: String,
) -> Result<Response, ContractError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    let config = CONFIG.load(deps.storage)?;
    let wide = parse_address(&deps.querier, &config, chain_id, &address)?;

    BLOCKED.remove(deps.storage, (chain_id, wide.as_slice()));

    Ok(Response::new()
        .add_event(block_address_event(false, chain_id, &wide))
        .add_attribute("method", "remove_block_address"))
}

// ============================================================================
// Client Registry
// ============================================================================

/// Register a local contract as a client able to send and receive.
pub fn execute_register_client(
    deps: DepsMut,
    info: MessageInfo,
    client: String,
) -> Result<Response, ContractError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    let config = CONFIG.load(deps.storage)?;
    let client_addr = deps.api.addr_validate(&client)?;
    let wide = WideAddress::new(
        config.local_chain.chain_type,
        client_addr.as_bytes().to_vec(),
    )?;

    CLIENTS.save(deps.storage, wide.as_slice(), &client_addr)?;

    Ok(Response::new()
        .add_attribute("method", "register_client")
        .add_attribute("client", client_addr)
        .add_attribute("wide_address", wide.to_hex()))
}

pub fn execute_unregister_client(
    deps: DepsMut,
    info: MessageInfo,
    client: String,
) -> Result<Response, ContractError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    let client_addr = deps.api.addr_validate(&client)?;
    let wide = WideAddress::from_addr(&client_addr);
    if !CLIENTS.has(deps.storage, wide.as_slice()) {
        return Err(ContractError::UnregisteredClient { address: client });
    }

    CLIENTS.remove(deps.storage, wide.as_slice());

    Ok(Response::new()
        .add_attribute("method", "unregister_client")
        .add_attribute("client", client_addr))
}

// ============================================================================
// Fee Sink
// ============================================================================

pub fn execute_update_fee_collector(
    deps: DepsMut,
    info: MessageInfo,
    fee_collector: String,
) -> Result<Response, ContractError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    let collector = deps.api.addr_validate(&fee_collector)?;

    CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
        config.fee_collector = collector;
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("method", "update_fee_collector")
        .add_attribute("fee_collector", fee_collector))
}
