use client::msg::ClientInstantiateMsg;
use client::query::{
    query_client_config, query_next_tx_id, query_senders, query_transfer, query_transfer_by_tx_id,
    query_trusted_address, query_trusted_addresses,
};
use client::{
    execute_client, execute_init_transfer, instantiate_client, send_message, verify_receive,
};
use common::msg::ClientReceiveMsg;
use cosmwasm_std::{
    entry_point, from_json, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order,
    Response, StdResult,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::msg::{
    ExecuteMsg, InstantiateMsg, MessageEntry, MessageResponse, MessagesResponse, MigrateMsg,
    PausedResponse, QueryMsg,
};
use crate::state::{
    ReceivedMessage, TextPayload, CONTRACT_NAME, CONTRACT_VERSION, MESSAGES, PAUSED,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    let config = instantiate_client(
        deps.branch(),
        &env,
        &owner,
        ClientInstantiateMsg {
            initializer: msg.initializer,
            external_relay: msg.external_relay,
            force_order: msg.force_order,
        },
    )?;
    PAUSED.save(deps.storage, &false)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("initializer", config.initializer)
        .add_attribute("local_chain_id", config.local_chain_id.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SendText { dst_chain_id, text } => {
            execute_send_text(deps, info, dst_chain_id, text)
        }
        ExecuteMsg::Client(msg) => Ok(execute_client(deps, info, msg)?),
        ExecuteMsg::AsterizmReceive(msg) => execute_receive(deps, info, msg),
        ExecuteMsg::Pause {} => execute_set_paused(deps, info, true),
        ExecuteMsg::Unpause {} => execute_set_paused(deps, info, false),
    }
}

/// Record the message and commit it to the initializer in one step.
fn execute_send_text(
    deps: DepsMut,
    info: MessageInfo,
    dst_chain_id: u64,
    text: String,
) -> Result<Response, ContractError> {
    if text.is_empty() {
        return Err(ContractError::EmptyText);
    }
    let payload = to_json_binary(&TextPayload { text })?;
    let (record, event) = send_message(deps.storage, dst_chain_id, payload)?;

    let response = execute_init_transfer(
        deps,
        info,
        dst_chain_id,
        record.tx_id,
        record.transfer_hash,
    )?;

    Ok(response
        .add_event(event)
        .add_attribute("action", "send_text"))
}

fn execute_receive(
    deps: DepsMut,
    info: MessageInfo,
    msg: ClientReceiveMsg,
) -> Result<Response, ContractError> {
    let event = verify_receive(deps.as_ref(), &info, &msg)?;
    if PAUSED.load(deps.storage)? {
        return Err(ContractError::Paused);
    }

    let TextPayload { text } = from_json(&msg.payload)?;
    MESSAGES.save(
        deps.storage,
        msg.transfer_hash.as_slice(),
        &ReceivedMessage {
            src_chain_id: msg.src_chain_id,
            src_address: msg.src_address,
            tx_id: msg.tx_id,
            text,
        },
    )?;

    Ok(Response::new()
        .add_event(event)
        .add_attribute("action", "receive_text")
        .add_attribute("src_chain_id", msg.src_chain_id.to_string())
        .add_attribute("tx_id", msg.tx_id.to_string()))
}

fn execute_set_paused(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    client::state::OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    PAUSED.save(deps.storage, &paused)?;

    let action = if paused { "pause" } else { "unpause" };
    Ok(Response::new().add_attribute("action", action))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::ClientConfig {} => to_json_binary(&query_client_config(deps)?),
        QueryMsg::TrustedAddress { chain_id } => {
            to_json_binary(&query_trusted_address(deps, chain_id)?)
        }
        QueryMsg::TrustedAddresses {} => to_json_binary(&query_trusted_addresses(deps)?),
        QueryMsg::Transfer { transfer_hash } => {
            to_json_binary(&query_transfer(deps, transfer_hash)?)
        }
        QueryMsg::TransferByTxId {
            dst_chain_id,
            tx_id,
        } => to_json_binary(&query_transfer_by_tx_id(deps, dst_chain_id, tx_id)?),
        QueryMsg::NextTxId { dst_chain_id } => {
            to_json_binary(&query_next_tx_id(deps, dst_chain_id)?)
        }
        QueryMsg::Senders {} => to_json_binary(&query_senders(deps)?),
        QueryMsg::Message { transfer_hash } => to_json_binary(&MessageResponse {
            message: MESSAGES.may_load(deps.storage, transfer_hash.as_slice())?,
        }),
        QueryMsg::Messages { start_after, limit } => {
            to_json_binary(&query_messages(deps, start_after, limit)?)
        }
        QueryMsg::Paused {} => to_json_binary(&PausedResponse {
            paused: PAUSED.load(deps.storage)?,
        }),
    }
}

fn query_messages(
    deps: Deps,
    start_after: Option<Binary>,
    limit: Option<u32>,
) -> StdResult<MessagesResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_ref().map(|hash| Bound::exclusive(hash.as_slice()));

    let messages = MESSAGES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (hash, message) = item?;
            Ok(MessageEntry {
                transfer_hash: Binary::from(hash),
                message,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(MessagesResponse { messages })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("action", "migrate"))
}
