//! Packet transport handlers.
//!
//! This module handles:
//! - Outbound packets for fresh and resent transfers
//! - Inbound packet validation and delivery to the initializer
//! - The delivery reply that turns an initializer failure into `payload_error`

use common::events::{payload_error_event, resend_failed_transfer_event, send_message_event};
use common::msg::TransportSendRequest;
use common::transport::{build_packet, receive_payload_msg};
use common::{bytes32_to_hex, fee_from_funds, NonceStream, Packet};
use cosmwasm_std::{
    BankMsg, Binary, DepsMut, MessageInfo, Response, Storage, SubMsg, SubMsgResult, Uint128,
};

use crate::error::ContractError;
use crate::state::{Config, CHAINS, CHAIN_FORCE_ORDER, CONFIG, NONCES, PENDING_DELIVERIES, RELAYERS};

// ============================================================================
// Outbound
// ============================================================================

/// Build and emit the packet for a freshly committed transfer.
pub fn execute_send_message(
    deps: DepsMut,
    info: MessageInfo,
    request: TransportSendRequest,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_initializer(&config, &info)?;

    let fee = fee_from_funds(&info.funds, &config.fee_denom)?;
    let packet = build_outbound(deps.storage, &config, &request, fee)?;

    Ok(outbound_response(&config, &info, &packet, fee)?.add_attribute("method", "send_message"))
}

/// Re-emit a dispatched transfer under a new nonce with the attached fee.
/// Hash and payload are taken from the request unchanged.
///
/// The default translator prices a packet at whatever fee is attached, so a
/// resend never leaves an excess for a refund address.
pub fn execute_resend_message(
    deps: DepsMut,
    info: MessageInfo,
    request: TransportSendRequest,
    sender: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_initializer(&config, &info)?;
    let sender = deps.api.addr_validate(&sender)?;

    let fee = fee_from_funds(&info.funds, &config.fee_denom)?;
    let packet = build_outbound(deps.storage, &config, &request, fee)?;

    Ok(outbound_response(&config, &info, &packet, fee)?
        .add_event(resend_failed_transfer_event(
            &packet.transfer_hash,
            &sender,
            fee,
        ))
        .add_attribute("method", "resend_message"))
}

fn assert_initializer(config: &Config, info: &MessageInfo) -> Result<(), ContractError> {
    let initializer = config
        .initializer
        .as_ref()
        .ok_or(ContractError::InitializerNotSet)?;
    if info.sender != *initializer {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn build_outbound(
    storage: &mut dyn Storage,
    config: &Config,
    request: &TransportSendRequest,
    fee: Uint128,
) -> Result<Packet, ContractError> {
    let dst_chain_id = request.dst_chain_id;
    let dst_type = CHAINS
        .may_load(storage, dst_chain_id)?
        .ok_or(ContractError::UnknownChain {
            chain_id: dst_chain_id,
        })?;
    request.src_address.validate(config.local_chain.chain_type)?;
    request.dst_address.validate(dst_type)?;

    let force_order = request.force_order
        || CHAIN_FORCE_ORDER
            .may_load(storage, dst_chain_id)?
            .unwrap_or(false);
    let nonce = NONCES.next_outbound(storage, dst_chain_id, NonceStream::of(force_order))?;

    Ok(build_packet(
        &config.local_chain,
        nonce,
        request,
        fee,
        force_order,
    )?)
}

fn outbound_response(
    config: &Config,
    info: &MessageInfo,
    packet: &Packet,
    fee: Uint128,
) -> Result<Response, ContractError> {
    let encoded = packet.encode().map_err(ContractError::EncodeError)?;

    let mut response = Response::new();
    if !fee.is_zero() {
        response = response.add_message(BankMsg::Send {
            to_address: config.fee_collector.to_string(),
            amount: info.funds.clone(),
        });
    }

    Ok(response
        .add_event(send_message_event(fee, &encoded))
        .add_attribute("dst_chain_id", packet.dst_chain_id.to_string())
        .add_attribute("nonce", packet.nonce.to_string())
        .add_attribute("transfer_hash", bytes32_to_hex(&packet.transfer_hash)))
}

// ============================================================================
// Inbound
// ============================================================================

/// Accept a packet from an admitted relayer and forward it to the initializer.
///
/// Every check here fails the whole message. Once they pass, the inbound
/// nonce is consumed even if the initializer rejects the delivery.
pub fn execute_transfer_message(
    deps: DepsMut,
    info: MessageInfo,
    gas_limit: Option<u64>,
    payload: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if !RELAYERS.has(deps.storage, &info.sender) {
        return Err(ContractError::UnauthorizedRelayer);
    }
    let initializer = config
        .initializer
        .clone()
        .ok_or(ContractError::InitializerNotSet)?;

    let packet = Packet::decode(&payload).map_err(ContractError::DecodeError)?;
    if packet.dst_chain_id != config.local_chain.chain_id {
        return Err(ContractError::WrongDestination {
            expected: config.local_chain.chain_id,
            got: packet.dst_chain_id,
        });
    }

    let src_chain_id = packet.src_chain_id;
    let src_type = CHAINS
        .may_load(deps.storage, src_chain_id)?
        .ok_or(ContractError::UnknownChain {
            chain_id: src_chain_id,
        })?;
    packet.src_address.validate(src_type)?;
    packet.dst_address.validate(config.local_chain.chain_type)?;

    // The packet flag picks the stream; the local toggle can still enforce
    // order on unflagged packets.
    let enforce = packet.force_order
        || CHAIN_FORCE_ORDER
            .may_load(deps.storage, src_chain_id)?
            .unwrap_or(false);
    NONCES.accept_inbound(
        deps.storage,
        src_chain_id,
        NonceStream::of(packet.force_order),
        packet.nonce,
        enforce,
    )?;

    let delivery_id = PENDING_DELIVERIES.push(deps.storage, &payload)?;
    let mut delivery =
        SubMsg::reply_always(receive_payload_msg(&initializer, &packet)?, delivery_id);
    if let Some(gas_limit) = gas_limit {
        delivery = delivery.with_gas_limit(gas_limit);
    }

    Ok(Response::new()
        .add_submessage(delivery)
        .add_attribute("method", "transfer_message")
        .add_attribute("relayer", info.sender)
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("nonce", packet.nonce.to_string())
        .add_attribute("transfer_hash", bytes32_to_hex(&packet.transfer_hash)))
}

/// Settle a delivery attempt. A failed attempt keeps the nonce consumed and
/// reports the packet in `payload_error`; the initializer's writes are
/// already rolled back.
pub fn handle_delivery_reply(
    deps: DepsMut,
    delivery_id: u64,
    result: SubMsgResult,
) -> Result<Response, ContractError> {
    let raw = PENDING_DELIVERIES.take(deps.storage, delivery_id)?;

    match result {
        SubMsgResult::Ok(_) => Ok(Response::new()
            .add_attribute("method", "delivery_reply")
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
                .add_attribute("method", "delivery_reply")
                .add_attribute("status", "failed"))
        }
    }
}
