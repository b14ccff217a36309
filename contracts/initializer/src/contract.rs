//! Initializer Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use common::transport::query_local_chain;
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_ownership, execute_add_block_address, execute_cancel_ownership_proposal,
    execute_init_transfer, execute_manage_trusted_relay, execute_propose_owner,
    execute_receive_payload, execute_register_client, execute_remove_block_address,
    execute_remove_trusted_relay, execute_resend_transfer, execute_unregister_client,
    execute_update_fee_collector, execute_update_trusted_relay_fee,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_client, query_clients, query_config, query_is_blocked, query_is_processed,
    query_outbound_transfer, query_pending_owner, query_trusted_relay, query_trusted_relays,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, OWNERSHIP};

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
    let translator = deps.api.addr_validate(&msg.translator)?;
    let fee_collector = match msg.fee_collector {
        Some(collector) => deps.api.addr_validate(&collector)?,
        None => owner.clone(),
    };
    if msg.fee_denom.is_empty() {
        return Err(StdError::generic_err("fee_denom must not be empty").into());
    }

    // the local chain comes from the translator's registry
    let local_chain = query_local_chain(&deps.querier, &translator)?;

    CONFIG.save(
        deps.storage,
        &Config {
            translator: translator.clone(),
            local_chain,
            fee_denom: msg.fee_denom,
            fee_collector,
        },
    )?;
    OWNERSHIP.initialize(deps.storage, &owner)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("translator", translator)
        .add_attribute("local_chain_id", local_chain.chain_id.to_string()))
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
        // Transfers
        ExecuteMsg::InitTransfer(request) => execute_init_transfer(deps, info, request),
        ExecuteMsg::ResendTransfer {
            transfer_hash,
            refund_address,
        } => execute_resend_transfer(deps, info, transfer_hash, refund_address),
        ExecuteMsg::ReceivePayload(request) => execute_receive_payload(deps, info, request),

        // Trusted relays
        ExecuteMsg::ManageTrustedRelay {
            relay,
            external_fee,
            system_fee,
        } => execute_manage_trusted_relay(deps, info, relay, external_fee, system_fee),
        ExecuteMsg::RemoveTrustedRelay { relay } => execute_remove_trusted_relay(deps, info, relay),
        ExecuteMsg::UpdateTrustedRelayFee { external_fee } => {
            execute_update_trusted_relay_fee(deps, info, external_fee)
        }

        // Blocklist
        ExecuteMsg::AddBlockAddress { chain_id, address } => {
            execute_add_block_address(deps, info, chain_id, address)
        }
        ExecuteMsg::RemoveBlockAddress { chain_id, address } => {
            execute_remove_block_address(deps, info, chain_id, address)
        }

        // Configuration
        ExecuteMsg::RegisterClient { client } => execute_register_client(deps, info, client),
        ExecuteMsg::UnregisterClient { client } => execute_unregister_client(deps, info, client),
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
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::PendingOwner {} => to_json_binary(&query_pending_owner(deps)?),
        QueryMsg::TrustedRelay { address } => to_json_binary(&query_trusted_relay(deps, address)?),
        QueryMsg::TrustedRelays {} => to_json_binary(&query_trusted_relays(deps)?),
        QueryMsg::IsBlocked { chain_id, address } => {
            to_json_binary(&query_is_blocked(deps, chain_id, address)?)
        }
        QueryMsg::IsProcessed { transfer_hash } => {
            to_json_binary(&query_is_processed(deps, transfer_hash)?)
        }
        QueryMsg::Client { address } => to_json_binary(&query_client(deps, address)?),
        QueryMsg::Clients {} => to_json_binary(&query_clients(deps)?),
        QueryMsg::OutboundTransfer { transfer_hash } => {
            to_json_binary(&query_outbound_transfer(deps, transfer_hash)?)
        }
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
