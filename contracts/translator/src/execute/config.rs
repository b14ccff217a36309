//! Configuration management handlers.
//!
//! This module handles:
//! - Chain registry (add/batch add/remove)
//! - Per-chain strict ordering toggle
//! - Relayer management (add/remove)
//! - Initializer binding and fee collector

use common::{ChainInfo, ChainType};
use cosmwasm_std::{DepsMut, MessageInfo, Response, Storage};

use crate::error::ContractError;
use crate::state::{CHAINS, CHAIN_FORCE_ORDER, CONFIG, OWNERSHIP, RELAYERS};

// ============================================================================
// Chain Registry
// ============================================================================

/// Register (or re-type) a remote chain. The local chain is fixed at
/// instantiation.
pub fn execute_add_chain(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u64,
    chain_type: ChainType,
) -> Result<Response, ContractError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    assert_remote(deps.storage, chain_id)?;
    CHAINS.save(deps.storage, chain_id, &chain_type)?;

    Ok(Response::new()
        .add_attribute("method", "add_chain")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("chain_type", chain_type.as_str()))
}

/// Register several chains in one message.
pub fn execute_add_chains(
    deps: DepsMut,
    info: MessageInfo,
    chains: Vec<ChainInfo>,
) -> Result<Response, ContractError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    for chain in &chains {
        assert_remote(deps.storage, chain.chain_id)?;
        CHAINS.save(deps.storage, chain.chain_id, &chain.chain_type)?;
    }

    let ids: Vec<String> = chains.iter().map(|c| c.chain_id.to_string()).collect();
    Ok(Response::new()
        .add_attribute("method", "add_chains")
        .add_attribute("chain_ids", ids.join(",")))
}

fn assert_remote(storage: &dyn Storage, chain_id: u64) -> Result<(), ContractError> {
    if chain_id == CONFIG.load(storage)?.local_chain.chain_id {
        return Err(ContractError::CannotModifyLocalChain);
    }
    Ok(())
}

pub fn execute_remove_chain(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u64,
) -> Result<Response, ContractError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    let config = CONFIG.load(deps.storage)?;
    if chain_id == config.local_chain.chain_id {
        return Err(ContractError::CannotRemoveLocalChain);
    }
    if !CHAINS.has(deps.storage, chain_id) {
        return Err(ContractError::UnknownChain { chain_id });
    }

    CHAINS.remove(deps.storage, chain_id);
    CHAIN_FORCE_ORDER.remove(deps.storage, chain_id);

    Ok(Response::new()
        .add_attribute("method", "remove_chain")
        .add_attribute("chain_id", chain_id.to_string()))
}

pub fn execute_set_force_order(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u64,
    force_order: bool,
) -> Result<Response, ContractError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    if !CHAINS.has(deps.storage, chain_id) {
        return Err(ContractError::UnknownChain { chain_id });
    }
    CHAIN_FORCE_ORDER.save(deps.storage, chain_id, &force_order)?;

    Ok(Response::new()
        .add_attribute("method", "set_force_order")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("force_order", force_order.to_string()))
}

// ============================================================================
// Relayer Management
// ============================================================================

pub fn execute_add_relayer(
    deps: DepsMut,
    info: MessageInfo,
    relayer: String,
) -> Result<Response, ContractError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    let relayer_addr = deps.api.addr_validate(&relayer)?;
    RELAYERS.save(deps.storage, &relayer_addr, &true)?;

    Ok(Response::new()
        .add_attribute("method", "add_relayer")
        .add_attribute("relayer", relayer))
}

pub fn execute_remove_relayer(
    deps: DepsMut,
    info: MessageInfo,
    relayer: String,
) -> Result<Response, ContractError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    let relayer_addr = deps.api.addr_validate(&relayer)?;
    RELAYERS.remove(deps.storage, &relayer_addr);

    Ok(Response::new()
        .add_attribute("method", "remove_relayer")
        .add_attribute("relayer", relayer))
}

// ============================================================================
// Wiring
// ============================================================================

/// Bind the initializer allowed to send through this translator and
/// receiving its inbound deliveries.
pub fn execute_set_initializer(
    deps: DepsMut,
    info: MessageInfo,
    initializer: String,
) -> Result<Response, ContractError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    let initializer_addr = deps.api.addr_validate(&initializer)?;

    CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
        config.initializer = Some(initializer_addr);
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("method", "set_initializer")
        .add_attribute("initializer", initializer))
}

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
