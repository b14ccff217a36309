use common::events::{payload_error_event, resend_failed_transfer_event, send_message_event};
use common::msg::{
    InitializerConfigResponse, InitializerExecuteMsg, InitializerQueryMsg, TransportSendRequest,
    TrustedRelayResponse,
};
use common::transport::{build_packet, query_chain, receive_payload_msg};
use common::{bytes32_to_hex, fee_from_funds, ChainInfo, NonceStream, Packet};
use cosmwasm_std::{
    entry_point, to_json_binary, Addr, BankMsg, Binary, Coin, Deps, DepsMut, Env, MessageInfo,
    Order, Reply, Response, StdError, StdResult, SubMsg, SubMsgResult, Uint128, WasmMsg,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, NoncesResponse, QueryMsg,
    RelayersResponse,
};
use crate::state::{
    Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, NONCES, OWNERSHIP, PENDING_DELIVERIES,
    RELAYERS,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    let initializer = deps.api.addr_validate(&msg.initializer)?;
    let remote: InitializerConfigResponse = deps
        .querier
        .query_wasm_smart(&initializer, &InitializerQueryMsg::Config {})?;

    CONFIG.save(
        deps.storage,
        &Config {
            initializer,
            translator: remote.translator,
            local_chain: ChainInfo {
                chain_id: remote.local_chain_id,
                chain_type: remote.local_chain_type,
            },
            fee_denom: remote.fee_denom,
        },
    )?;
    OWNERSHIP.initialize(deps.storage, &owner)?;

    for relayer in &msg.relayers {
        let relayer_addr = deps.api.addr_validate(relayer)?;
        RELAYERS.save(deps.storage, &relayer_addr, &true)?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("relayer_count", msg.relayers.len().to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SendMessage(request) => execute_send_message(deps, env, info, request),
        ExecuteMsg::ResendMessage {
            request,
            sender,
            refund,
        } => execute_resend_message(deps, env, info, request, sender, refund),
        ExecuteMsg::TransferMessage { gas_limit, payload } => {
            execute_transfer_message(deps, info, gas_limit, payload)
        }
        ExecuteMsg::UpdateFee { external_fee } => execute_update_fee(deps, info, external_fee),
        ExecuteMsg::AddRelayer { relayer } => execute_set_relayer(deps, info, relayer, true),
        ExecuteMsg::RemoveRelayer { relayer } => execute_set_relayer(deps, info, relayer, false),
        ExecuteMsg::ProposeOwner { new_owner } => {
            let new_owner = deps.api.addr_validate(&new_owner)?;
            OWNERSHIP.propose(deps.storage, &info.sender, &new_owner)?;
            Ok(Response::new()
                .add_attribute("action", "propose_owner")
                .add_attribute("new_owner", new_owner))
        }
        ExecuteMsg::AcceptOwnership {} => {
            OWNERSHIP.accept(deps.storage, &info.sender)?;
            Ok(Response::new()
                .add_attribute("action", "accept_ownership")
                .add_attribute("owner", info.sender))
        }
        ExecuteMsg::CancelOwnershipProposal {} => {
            OWNERSHIP.cancel(deps.storage, &info.sender)?;
            Ok(Response::new().add_attribute("action", "cancel_ownership_proposal"))
        }
    }
}

/// Charge the fee, then emit the packet.
fn execute_send_message(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request: TransportSendRequest,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.initializer {
        return Err(ContractError::Unauthorized);
    }
    let fee = fee_from_funds(&info.funds, &config.fee_denom)?;
    let charge = charge(deps.as_ref(), &env, &config, fee, None)?;
    let relay_fee = charge.relay_fee;

    let packet = build_outbound(deps, &config, &request, relay_fee)?;
    let encoded = packet.encode().map_err(ContractError::EncodeError)?;

    Ok(Response::new()
        .add_messages(charge.payouts)
        .add_event(send_message_event(relay_fee, &encoded))
        .add_attribute("action", "send_message")
        .add_attribute("nonce", packet.nonce.to_string())
        .add_attribute("relay_fee", relay_fee.to_string()))
}

/// Re-emit a transfer under a new nonce, charged like a fresh send. With a
/// refund address only the required fee is kept and the excess goes back.
fn execute_resend_message(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request: TransportSendRequest,
    sender: String,
    refund: Option<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.initializer {
        return Err(ContractError::Unauthorized);
    }
    let sender = deps.api.addr_validate(&sender)?;
    let refund = refund
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let fee = fee_from_funds(&info.funds, &config.fee_denom)?;
    let charge = charge(deps.as_ref(), &env, &config, fee, refund.as_ref())?;

    let packet = build_outbound(deps, &config, &request, charge.relay_fee)?;
    let encoded = packet.encode().map_err(ContractError::EncodeError)?;

    Ok(Response::new()
        .add_messages(charge.payouts)
        .add_event(send_message_event(charge.relay_fee, &encoded))
        .add_event(resend_failed_transfer_event(
            &packet.transfer_hash,
            &sender,
            charge.kept,
        ))
        .add_attribute("action", "resend_message")
        .add_attribute("nonce", packet.nonce.to_string())
        .add_attribute("refunded", (fee - charge.kept).to_string()))
}

struct Charge {
    payouts: Vec<BankMsg>,
    /// Owner's share, written as the packet fee
    relay_fee: Uint128,
    /// Part of the attached fee not refunded
    kept: Uint128,
}

/// Split `fee` by the terms recorded for this relay in the initializer.
///
/// The system fee goes to the initializer's fee collector and the rest to
/// the relay owner. With `refund` set the owner gets exactly the external
/// fee and whatever exceeds the required total is paid back to `refund`.
fn charge(
    deps: Deps,
    env: &Env,
    config: &Config,
    fee: Uint128,
    refund: Option<&Addr>,
) -> Result<Charge, ContractError> {
    let terms: TrustedRelayResponse = deps.querier.query_wasm_smart(
        &config.initializer,
        &InitializerQueryMsg::TrustedRelay {
            address: env.contract.address.to_string(),
        },
    )?;
    let required = terms
        .system_fee
        .checked_add(terms.external_fee)
        .map_err(StdError::from)?;
    if fee < required {
        return Err(ContractError::InsufficientFee {
            required,
            got: fee,
        });
    }
    let kept = if refund.is_some() { required } else { fee };
    let relay_fee = kept - terms.system_fee;

    let fee_sink: InitializerConfigResponse = deps
        .querier
        .query_wasm_smart(&config.initializer, &InitializerQueryMsg::Config {})?;
    let owner = OWNERSHIP.owner(deps.storage)?;

    let mut shares = vec![(fee_sink.fee_collector, terms.system_fee), (owner, relay_fee)];
    if let Some(refund) = refund {
        shares.push((refund.clone(), fee - kept));
    }
    let payouts = shares
        .into_iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(recipient, amount)| pay(&recipient, amount, &config.fee_denom))
        .collect();
    Ok(Charge {
        payouts,
        relay_fee,
        kept,
    })
}

fn build_outbound(
    deps: DepsMut,
    config: &Config,
    request: &TransportSendRequest,
    fee_value: Uint128,
) -> Result<Packet, ContractError> {
    let dst_chain_id = request.dst_chain_id;
    let dst = query_chain(&deps.querier, &config.translator, dst_chain_id)?.ok_or(
        ContractError::UnknownChain {
            chain_id: dst_chain_id,
        },
    )?;
    request.src_address.validate(config.local_chain.chain_type)?;
    request.dst_address.validate(dst.chain_type)?;

    let nonce = NONCES.next_outbound(
        deps.storage,
        dst_chain_id,
        NonceStream::of(request.force_order),
    )?;
    Ok(build_packet(
        &config.local_chain,
        nonce,
        request,
        fee_value,
        request.force_order,
    )?)
}

fn pay(recipient: &Addr, amount: Uint128, denom: &str) -> BankMsg {
    BankMsg::Send {
        to_address: recipient.to_string(),
        amount: vec![Coin {
            denom: denom.to_string(),
            amount,
        }],
    }
}

/// Accept a packet from one of this relay's relayers.
fn execute_transfer_message(
    deps: DepsMut,
    info: MessageInfo,
    gas_limit: Option<u64>,
    payload: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if !RELAYERS.has(deps.storage, &info.sender) {
        return Err(ContractError::UnauthorizedRelayer);
    }

    let packet = Packet::decode(&payload).map_err(ContractError::DecodeError)?;
    if packet.dst_chain_id != config.local_chain.chain_id {
        return Err(ContractError::WrongDestination {
            expected: config.local_chain.chain_id,
            got: packet.dst_chain_id,
        });
    }
    let src = query_chain(&deps.querier, &config.translator, packet.src_chain_id)?.ok_or(
        ContractError::UnknownChain {
            chain_id: packet.src_chain_id,
        },
    )?;
    packet.src_address.validate(src.chain_type)?;
    packet.dst_address.validate(config.local_chain.chain_type)?;

    NONCES.accept_inbound(
        deps.storage,
        packet.src_chain_id,
        NonceStream::of(packet.force_order),
        packet.nonce,
        packet.force_order,
    )?;

    let delivery_id = PENDING_DELIVERIES.push(deps.storage, &payload)?;
    let mut delivery = SubMsg::reply_always(
        receive_payload_msg(&config.initializer, &packet)?,
        delivery_id,
    );
    if let Some(gas_limit) = gas_limit {
        delivery = delivery.with_gas_limit(gas_limit);
    }

    Ok(Response::new()
        .add_submessage(delivery)
        .add_attribute("action", "transfer_message")
        .add_attribute("src_chain_id", packet.src_chain_id.to_string())
        .add_attribute("nonce", packet.nonce.to_string())
        .add_attribute("transfer_hash", bytes32_to_hex(&packet.transfer_hash)))
}

fn execute_update_fee(
    deps: DepsMut,
    info: MessageInfo,
    external_fee: Uint128,
) -> Result<Response, ContractError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    let config = CONFIG.load(deps.storage)?;

    let update = WasmMsg::Execute {
        contract_addr: config.initializer.to_string(),
        msg: to_json_binary(&InitializerExecuteMsg::UpdateTrustedRelayFee { external_fee })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(update)
        .add_attribute("action", "update_fee")
        .add_attribute("external_fee", external_fee.to_string()))
}

fn execute_set_relayer(
    deps: DepsMut,
    info: MessageInfo,
    relayer: String,
    allowed: bool,
) -> Result<Response, ContractError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    let relayer_addr = deps.api.addr_validate(&relayer)?;

    let action = if allowed {
        RELAYERS.save(deps.storage, &relayer_addr, &true)?;
        "add_relayer"
    } else {
        RELAYERS.remove(deps.storage, &relayer_addr);
        "remove_relayer"
    };

    Ok(Response::new()
        .add_attribute("action", action)
        .add_attribute("relayer", relayer))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    let raw = PENDING_DELIVERIES.take(deps.storage, msg.id)?;

    match msg.result {
        SubMsgResult::Ok(_) => Ok(Response::new()
            .add_attribute("action", "delivery_reply")
            .add_attribute("status", "delivered")),
        SubMsgResult::Err(reason) => {
            let packet = Packet::decode(&raw).map_err(ContractError::DecodeError)?;
            Ok(Response::new()
                .add_event(payload_error_event(
                    packet.src_chain_id,
                    &packet.src_address,
                    packet.dst_chain_id,
                    &packet.dst_address,
                    packet.nonce,
                    &packet.transfer_hash,
                    &packet.payload,
                    &reason,
                ))
                .add_attribute("action", "delivery_reply")
                .add_attribute("status", "failed"))
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Fee {} => {
            let config = CONFIG.load(deps.storage)?;
            let terms: TrustedRelayResponse = deps.querier.query_wasm_smart(
                &config.initializer,
                &InitializerQueryMsg::TrustedRelay {
                    address: env.contract.address.to_string(),
                },
            )?;
            to_json_binary(&terms)
        }
        QueryMsg::Relayers {} => {
            let relayers = RELAYERS
                .keys(deps.storage, None, None, Order::Ascending)
                .collect::<StdResult<Vec<_>>>()?;
            to_json_binary(&RelayersResponse { relayers })
        }
        QueryMsg::Nonces { chain_id } => to_json_binary(&NoncesResponse {
            chain_id,
            outbound: NONCES.outbound(deps.storage, chain_id, NonceStream::Unordered)?,
            inbound: NONCES.inbound(deps.storage, chain_id, NonceStream::Unordered)?,
            ordered_outbound: NONCES.outbound(deps.storage, chain_id, NonceStream::Ordered)?,
            ordered_inbound: NONCES.inbound(deps.storage, chain_id, NonceStream::Ordered)?,
        }),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: OWNERSHIP.owner(deps.storage)?,
        initializer: config.initializer,
        translator: config.translator,
        local_chain: config.local_chain,
        fee_denom: config.fee_denom,
    })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("action", "migrate"))
}
