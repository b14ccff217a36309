//! Protocol events.
//!
//! Handlers keep their `method` attributes on the default `wasm` event;
//! the facts an off-chain relayer or indexer acts on are emitted as the
//! custom events below, built in one place so every contract renders them
//! identically.

use cosmwasm_std::{Addr, Binary, Event, Uint128};

use crate::address::WideAddress;
use crate::hash::bytes32_to_hex;

pub const INITIATE_TRANSFER_EVENT: &str = "initiate_transfer";
pub const SEND_MESSAGE_EVENT: &str = "send_message";
pub const PAYLOAD_RECEIVED_EVENT: &str = "payload_received";
pub const PAYLOAD_ERROR_EVENT: &str = "payload_error";
pub const RESEND_FAILED_TRANSFER_EVENT: &str = "resend_failed_transfer";
pub const ADD_BLOCK_ADDRESS_EVENT: &str = "add_block_address";
pub const REMOVE_BLOCK_ADDRESS_EVENT: &str = "remove_block_address";
pub const TRUSTED_RELAY_EVENT: &str = "trusted_relay";

pub fn initiate_transfer_event(
    dst_chain_id: u64,
    dst_address: &WideAddress,
    tx_id: u64,
    transfer_hash: &[u8; 32],
    payload: &Binary,
) -> Event {
    Event::new(INITIATE_TRANSFER_EVENT)
        .add_attribute("dst_chain_id", dst_chain_id.to_string())
        .add_attribute("dst_address", dst_address.to_hex())
        .add_attribute("tx_id", tx_id.to_string())
        .add_attribute("transfer_hash", bytes32_to_hex(transfer_hash))
        .add_attribute("payload", payload.to_base64())
}

/// `packet` is the full encoded packet, rendered as `0x`-hex.
pub fn send_message_event(fee_value: Uint128, packet: &[u8]) -> Event {
    Event::new(SEND_MESSAGE_EVENT)
        .add_attribute("fee_value", fee_value.to_string())
        .add_attribute("packet", format!("0x{}", hex::encode(packet)))
}

pub fn payload_received_event(
    src_chain_id: u64,
    src_address: &WideAddress,
    tx_id: u64,
    transfer_hash: &[u8; 32],
) -> Event {
    Event::new(PAYLOAD_RECEIVED_EVENT)
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("src_address", src_address.to_hex())
        .add_attribute("tx_id", tx_id.to_string())
        .add_attribute("transfer_hash", bytes32_to_hex(transfer_hash))
}

#[allow(clippy::too_many_arguments)]
pub fn payload_error_event(
    src_chain_id: u64,
    src_address: &WideAddress,
    dst_chain_id: u64,
    dst_address: &WideAddress,
    nonce: u64,
    transfer_hash: &[u8; 32],
    payload: &Binary,
    reason: &str,
) -> Event {
    Event::new(PAYLOAD_ERROR_EVENT)
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("src_address", src_address.to_hex())
        .add_attribute("dst_chain_id", dst_chain_id.to_string())
        .add_attribute("dst_address", dst_address.to_hex())
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("transfer_hash", bytes32_to_hex(transfer_hash))
        .add_attribute("payload", payload.to_base64())
        .add_attribute("reason", reason)
}

pub fn resend_failed_transfer_event(
    transfer_hash: &[u8; 32],
    sender: &Addr,
    fee_amount: Uint128,
) -> Event {
    Event::new(RESEND_FAILED_TRANSFER_EVENT)
        .add_attribute("transfer_hash", bytes32_to_hex(transfer_hash))
        .add_attribute("sender", sender)
        .add_attribute("fee_amount", fee_amount.to_string())
}

pub fn block_address_event(blocked: bool, chain_id: u64, address: &WideAddress) -> Event {
    let ty = if blocked {
        ADD_BLOCK_ADDRESS_EVENT
    } else {
        REMOVE_BLOCK_ADDRESS_EVENT
    };
    Event::new(ty)
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("address", address.to_hex())
}

pub fn trusted_relay_event(
    caller: &Addr,
    relay_address: &Addr,
    external_fee: Uint128,
    system_fee: Uint128,
) -> Event {
    Event::new(TRUSTED_RELAY_EVENT)
        .add_attribute("caller", caller)
        .add_attribute("relay_address", relay_address)
        .add_attribute("external_fee", external_fee.to_string())
        .add_attribute("system_fee", system_fee.to_string())
}
