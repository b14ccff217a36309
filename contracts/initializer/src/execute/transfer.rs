//! Transfer handlers.
//!
//! This module handles:
//! - InitTransfer: send-side policy and routing to a transport
//! - ResendTransfer: re-emission of a recorded transfer
//! - ReceivePayload: receive-side policy, dedup and client dispatch

use common::msg::{
    ClientReceiveMsg, InitTransferRequest, ReceivePayloadRequest, TransportSendRequest,
};
use common::{
    binary_to_bytes32, bytes32_to_hex, compute_transfer_hash, fee_from_funds, TransportContract,
    WideAddress,
};
use cosmwasm_std::{Binary, DepsMut, MessageInfo, Response, Storage};

use crate::error::ContractError;
use crate::registry::is_blocked;
use crate::state::{
    Config, OutboundTransfer, CLIENTS, CONFIG, OUTBOUND, OWNERSHIP, PROCESSED, TRUSTED_RELAYS,
};

// ============================================================================
// Send Path
// ============================================================================

/// Commit a client transfer and hand it to its transport.
pub fn execute_init_transfer(
    deps: DepsMut,
    info: MessageInfo,
    request: InitTransferRequest,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    fee_from_funds(&info.funds, &config.fee_denom)?;

    let client = WideAddress::from_addr(&info.sender);
    if CLIENTS.may_load(deps.storage, client.as_slice())?.as_ref() != Some(&info.sender) {
        return Err(ContractError::UnregisteredClient {
            address: info.sender.to_string(),
        });
    }
    assert_send_allowed(
        deps.storage,
        &config,
        &client,
        request.dst_chain_id,
        &request.dst_address,
    )?;

    let hash = binary_to_bytes32(&request.transfer_hash)?;
    let expected = compute_transfer_hash(
        config.local_chain.chain_id,
        &client,
        request.dst_chain_id,
        &request.dst_address,
        request.tx_id,
        &request.payload,
    );
    if expected != hash {
        return Err(ContractError::HashMismatch);
    }
    if OUTBOUND.has(deps.storage, hash.as_slice()) {
        return Err(ContractError::TransferAlreadySent);
    }

    let transport = match request.relay {
        Some(relay) => {
            let relay_addr = deps.api.addr_validate(&relay)?;
            if !TRUSTED_RELAYS.has(deps.storage, &relay_addr) {
                return Err(ContractError::UntrustedRelay { relay });
            }
            relay_addr
        }
        None => config.translator.clone(),
    };

    let send_request = TransportSendRequest {
        src_address: client,
        dst_chain_id: request.dst_chain_id,
        dst_address: request.dst_address,
        tx_id: request.tx_id,
        transfer_hash: request.transfer_hash,
        payload: request.payload,
        force_order: request.force_order,
    };
    OUTBOUND.save(
        deps.storage,
        hash.as_slice(),
        &OutboundTransfer {
            client: info.sender.clone(),
            transport: transport.clone(),
            request: send_request.clone(),
        },
    )?;

    let send_msg = TransportContract(transport.clone()).send_message(send_request, info.funds)?;

    Ok(Response::new()
        .add_message(send_msg)
        .add_attribute("method", "init_transfer")
        .add_attribute("client", info.sender)
        .add_attribute("transport", transport)
        .add_attribute("transfer_hash", bytes32_to_hex(&hash)))
}

/// Re-emit a recorded transfer through its original transport. The
/// transport returns any excess over its price to `refund_address`.
pub fn execute_resend_transfer(
    deps: DepsMut,
    info: MessageInfo,
    transfer_hash: Binary,
    refund_address: Option<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    fee_from_funds(&info.funds, &config.fee_denom)?;

    let hash = binary_to_bytes32(&transfer_hash)?;
    let outbound = OUTBOUND
        .may_load(deps.storage, hash.as_slice())?
        .ok_or(ContractError::UnknownTransfer)?;
    if info.sender != outbound.client && !OWNERSHIP.is_owner(deps.storage, &info.sender)? {
        return Err(ContractError::Unauthorized);
    }
    assert_send_allowed(
        deps.storage,
        &config,
        &outbound.request.src_address,
        outbound.request.dst_chain_id,
        &outbound.request.dst_address,
    )?;

    let refund_address = refund_address
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;

    let resend_msg = TransportContract(outbound.transport.clone()).resend_message(
        outbound.request,
        &info.sender,
        refund_address.as_ref(),
        info.funds,
    )?;

    let mut response = Response::new()
        .add_message(resend_msg)
        .add_attribute("method", "resend_transfer")
        .add_attribute("sender", info.sender)
        .add_attribute("transport", outbound.transport)
        .add_attribute("transfer_hash", bytes32_to_hex(&hash));
    if let Some(refund_address) = refund_address {
        response = response.add_attribute("refund_address", refund_address);
    }
    Ok(response)
}

fn assert_send_allowed(
    storage: &dyn Storage,
    config: &Config,
    client: &WideAddress,
    dst_chain_id: u64,
    dst_address: &WideAddress,
) -> Result<(), ContractError> {
    let local_chain_id = config.local_chain.chain_id;
    if is_blocked(storage, local_chain_id, client) {
        return Err(ContractError::BlockedSource {
            chain_id: local_chain_id,
            address: client.to_hex(),
        });
    }
    if is_blocked(storage, dst_chain_id, dst_address) {
        return Err(ContractError::BlockedDestination {
            chain_id: dst_chain_id,
            address: dst_address.to_hex(),
        });
    }
    Ok(())
}

// ============================================================================
// Receive Path
// ============================================================================

/// Deliver an inbound transfer to its client exactly once.
///
/// The processed mark and the client call commit together: if the client
/// hook fails the whole message reverts and the hash stays deliverable.
pub fn execute_receive_payload(
    deps: DepsMut,
    info: MessageInfo,
    request: ReceivePayloadRequest,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.translator && !TRUSTED_RELAYS.has(deps.storage, &info.sender) {
        return Err(ContractError::UnauthorizedTransport);
    }

    if is_blocked(deps.storage, request.src_chain_id, &request.src_address) {
        return Err(ContractError::BlockedSource {
            chain_id: request.src_chain_id,
            address: request.src_address.to_hex(),
        });
    }
    let local_chain_id = config.local_chain.chain_id;
    if is_blocked(deps.storage, local_chain_id, &request.dst_address) {
        return Err(ContractError::BlockedDestination {
            chain_id: local_chain_id,
            address: request.dst_address.to_hex(),
        });
    }

    let hash = binary_to_bytes32(&request.transfer_hash)?;
    if PROCESSED.has(deps.storage, hash.as_slice()) {
        return Err(ContractError::AlreadyProcessed);
    }
    let client = CLIENTS
        .may_load(deps.storage, request.dst_address.as_slice())?
        .ok_or_else(|| ContractError::UnregisteredClient {
            address: request.dst_address.to_hex(),
        })?;

    PROCESSED.save(deps.storage, hash.as_slice(), &true)?;

    let src_chain_id = request.src_chain_id;
    let deliver = ClientReceiveMsg {
        src_chain_id,
        src_address: request.src_address,
        tx_id: request.tx_id,
        transfer_hash: request.transfer_hash,
        payload: request.payload,
    }
    .into_cosmos_msg(client.as_str())?;

    Ok(Response::new()
        .add_message(deliver)
        .add_attribute("method", "receive_payload")
        .add_attribute("client", client)
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("transfer_hash", bytes32_to_hex(&hash)))
}
