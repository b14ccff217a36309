//! Translator Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdError, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_ownership, execute_add_chain, execute_add_chains, execute_add_relayer,
    execute_cancel_ownership_proposal, execute_propose_owner, execute_remove_chain,
    execute_remove_relayer, execute_resend_message, execute_send_message,
    execute_set_force_order, execute_set_initializer, execute_transfer_message,
    execute_update_fee_collector, handle_delivery_reply,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_chain, query_chains, query_config, query_force_order, query_is_relayer,
    query_local_chain, query_nonces, query_relayers,
};
use crate::state::{Config, CHAINS, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, OWNERSHIP, RELAYERS};
use common::ChainInfo;

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    let fee_collector = match msg.fee_collector {
        Some(collector) => deps.api.addr_validate(&collector)?,
        None => owner.clone(),
    };
    if msg.fee_denom.is_empty() {
        return Err(StdError::generic_err("fee_denom must not be empty").into());
    }

    let local_chain = ChainInfo {
        chain_id: msg.local_chain_id,
        chain_type: msg.local_chain_type,
    };
    CONFIG.save(
        deps.storage,
        &Config {
            initializer: None,
            local_chain,
            fee_denom: msg.fee_denom,
            fee_collector,
        },
    )?;
    OWNERSHIP.initialize(deps.storage, &owner)?;

    // the local chain is part of the registry
    CHAINS.save(deps.storage, local_chain.chain_id, &local_chain.chain_type)?;

    for relayer in &msg.relayers {
        let relayer_addr = deps.api.addr_validate(relayer)?;
        RELAYERS.save(deps.storage, &relayer_addr, &true)?;
    }

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("local_chain_id", local_chain.chain_id.to_string())
        .add_attribute("local_chain_type", local_chain.chain_type.as_str())
        .add_attribute("relayer_count", msg.relayers.len().to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Transport
        ExecuteMsg::SendMessage(request) => execute_send_message(deps, info, request),
        ExecuteMsg::ResendMessage { request, sender, .. } => {
            execute_resend_message(deps, info, request, sender)
        }
        ExecuteMsg::TransferMessage { gas_limit, payload } => {
            execute_transfer_message(deps, info, gas_limit, payload)
        }

        // Chain registry
        ExecuteMsg::AddChain {
            chain_id,
            chain_type,
        } => execute_add_chain(deps, info, chain_id, chain_type),
        ExecuteMsg::AddChains { chains } => execute_add_chains(deps, info, chains),
        ExecuteMsg::RemoveChain { chain_id } => execute_remove_chain(deps, info, chain_id),
        ExecuteMsg::SetForceOrder {
            chain_id,
            force_order,
        } => execute_set_force_order(deps, info, chain_id, force_order),

        // Configuration
        ExecuteMsg::AddRelayer { relayer } => execute_add_relayer(deps, info, relayer),
        ExecuteMsg::RemoveRelayer { relayer } => execute_remove_relayer(deps, info, relayer),
        ExecuteMsg::SetInitializer { initializer } => {
            execute_set_initializer(deps, info, initializer)
        }
        ExecuteMsg::UpdateFeeCollector { fee_collector } => {
            execute_update_fee_collector(deps, info, fee_collector)
        }

        // Ownership
        ExecuteMsg::ProposeOwner { new_owner } => execute_propose_owner(deps, info, new_owner),
        ExecuteMsg::AcceptOwnership {} => execute_accept_ownership(deps, info),
        ExecuteMsg::CancelOwnershipProposal {} => execute_cancel_ownership_proposal(deps, info),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    // Every sub-message is a delivery; its reply id keys the pending packet.
    handle_delivery_reply(deps, msg.id, msg.result)
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::LocalChain {} => to_json_binary(&query_local_chain(deps)?),
        QueryMsg::Chain { chain_id } => to_json_binary(&query_chain(deps, chain_id)?),
        QueryMsg::Chains { start_after, limit } => {
            to_json_binary(&query_chains(deps, start_after, limit)?)
        }
        QueryMsg::Relayers {} => to_json_binary(&query_relayers(deps)?),
        QueryMsg::IsRelayer { address } => to_json_binary(&query_is_relayer(deps, address)?),
        QueryMsg::Nonces { chain_id } => to_json_binary(&query_nonces(deps, chain_id)?),
        QueryMsg::ForceOrder { chain_id } => to_json_binary(&query_force_order(deps, chain_id)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("method", "migrate"))
}
