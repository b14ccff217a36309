//! Client handlers.
//!
//! This module handles:
//! - Instantiation wiring against the local initializer
//! - The two-phase send (`send_message` then `init_transfer`) and resend
//! - Receive-side verification
//! - Trust, sender and ownership administration

use common::events::{initiate_transfer_event, payload_received_event};
use common::msg::{
    ClientReceiveMsg, InitTransferRequest, InitializerConfigResponse, InitializerExecuteMsg,
    InitializerQueryMsg,
};
use common::transport::query_chain;
use common::{binary_to_bytes32, bytes32_to_hex, compute_transfer_hash, WideAddress};
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, Event, MessageInfo, Response, StdError,
    Storage, WasmMsg,
};

use crate::error::ClientError;
use crate::msg::{ClientExecuteMsg, ClientInstantiateMsg};
use crate::state::{
    ClientConfig, TransferRecord, CLIENT_CONFIG, DISPATCHED, OWNERSHIP, SENDERS, TRANSFERS,
    TRANSFER_INDEX, TRUSTED_ADDRESSES, TX_COUNTERS,
};

// ============================================================================
// Instantiate
// ============================================================================

/// Wire the embedding contract to its local initializer.
///
/// The translator and local chain are read from the initializer so a client
/// can never disagree with it about where it lives.
pub fn instantiate_client(
    deps: DepsMut,
    env: &Env,
    owner: &Addr,
    msg: ClientInstantiateMsg,
) -> Result<ClientConfig, ClientError> {
    let initializer = deps.api.addr_validate(&msg.initializer)?;
    let remote: InitializerConfigResponse = deps
        .querier
        .query_wasm_smart(&initializer, &InitializerQueryMsg::Config {})?;

    let external_relay = msg
        .external_relay
        .map(|relay| deps.api.addr_validate(&relay))
        .transpose()?;

    let config = ClientConfig {
        initializer,
        translator: remote.translator,
        local_chain_id: remote.local_chain_id,
        local_address: WideAddress::new(
            remote.local_chain_type,
            env.contract.address.as_bytes().to_vec(),
        )?,
        external_relay,
        force_order: msg.force_order,
    };
    CLIENT_CONFIG.save(deps.storage, &config)?;
    OWNERSHIP.initialize(deps.storage, owner)?;

    Ok(config)
}

pub fn execute_client(
    deps: DepsMut,
    info: MessageInfo,
    msg: ClientExecuteMsg,
) -> Result<Response, ClientError> {
    match msg {
        ClientExecuteMsg::InitTransfer {
            dst_chain_id,
            tx_id,
            transfer_hash,
        } => execute_init_transfer(deps, info, dst_chain_id, tx_id, transfer_hash),
        ClientExecuteMsg::ResendTransfer {
            transfer_hash,
            refund_address,
        } => execute_resend_transfer(deps, info, transfer_hash, refund_address),
        ClientExecuteMsg::AddTrustedAddress { chain_id, address } => {
            execute_add_trusted_address(deps, info, chain_id, address)
        }
        ClientExecuteMsg::RemoveTrustedAddress { chain_id } => {
            execute_remove_trusted_address(deps, info, chain_id)
        }
        ClientExecuteMsg::AddSender { address } => execute_set_sender(deps, info, address, true),
        ClientExecuteMsg::RemoveSender { address } => {
            execute_set_sender(deps, info, address, false)
        }
        ClientExecuteMsg::SetExternalRelay { relay } => {
            execute_set_external_relay(deps, info, relay)
        }
        ClientExecuteMsg::SetForceOrder { force_order } => {
            execute_set_force_order(deps, info, force_order)
        }
        ClientExecuteMsg::ProposeOwner { new_owner } => {
            let new_owner = deps.api.addr_validate(&new_owner)?;
            OWNERSHIP.propose(deps.storage, &info.sender, &new_owner)?;
            Ok(Response::new()
                .add_attribute("method", "propose_owner")
                .add_attribute("new_owner", new_owner))
        }
        ClientExecuteMsg::AcceptOwnership {} => {
            OWNERSHIP.accept(deps.storage, &info.sender)?;
            Ok(Response::new()
                .add_attribute("method", "accept_ownership")
                .add_attribute("owner", info.sender))
        }
        ClientExecuteMsg::CancelOwnershipProposal {} => {
            OWNERSHIP.cancel(deps.storage, &info.sender)?;
            Ok(Response::new().add_attribute("method", "cancel_ownership_proposal"))
        }
    }
}

// ============================================================================
// Send Path
// ============================================================================

/// Record a new outbound transfer to the trusted counterpart on `dst_chain_id`.
///
/// Returns the stored record and the `initiate_transfer` event; the caller
/// attaches the event to its own response.
pub fn send_message(
    storage: &mut dyn Storage,
    dst_chain_id: u64,
    payload: Binary,
) -> Result<(TransferRecord, Event), ClientError> {
    let config = CLIENT_CONFIG.load(storage)?;
    let dst_address = TRUSTED_ADDRESSES
        .may_load(storage, dst_chain_id)?
        .ok_or(ClientError::UntrustedDestination {
            chain_id: dst_chain_id,
        })?;

    let tx_id = TX_COUNTERS
        .may_load(storage, dst_chain_id)?
        .unwrap_or_default();
    let next = tx_id
        .checked_add(1)
        .ok_or_else(|| StdError::generic_err("txId overflow"))?;
    TX_COUNTERS.save(storage, dst_chain_id, &next)?;

    let hash = compute_transfer_hash(
        config.local_chain_id,
        &config.local_address,
        dst_chain_id,
        &dst_address,
        tx_id,
        &payload,
    );

    let record = TransferRecord {
        tx_id,
        dst_chain_id,
        dst_address,
        payload,
        transfer_hash: Binary::from(hash.to_vec()),
    };
    TRANSFERS.save(storage, hash.as_slice(), &record)?;
    TRANSFER_INDEX.save(storage, (dst_chain_id, tx_id), &record.transfer_hash)?;

    let event = initiate_transfer_event(
        dst_chain_id,
        &record.dst_address,
        tx_id,
        &hash,
        &record.payload,
    );
    Ok((record, event))
}

/// Commit a stored transfer to the initializer. Attached funds are the fee.
pub fn execute_init_transfer(
    deps: DepsMut,
    info: MessageInfo,
    dst_chain_id: u64,
    tx_id: u64,
    transfer_hash: Binary,
) -> Result<Response, ClientError> {
    assert_sender(deps.storage, &info.sender)?;
    let config = CLIENT_CONFIG.load(deps.storage)?;

    let stored_hash = TRANSFER_INDEX
        .may_load(deps.storage, (dst_chain_id, tx_id))?
        .ok_or(ClientError::UnknownTransfer)?;
    let record = TRANSFERS.load(deps.storage, stored_hash.as_slice())?;

    // the stored fields must still produce the stored hash
    let recomputed = compute_transfer_hash(
        config.local_chain_id,
        &config.local_address,
        record.dst_chain_id,
        &record.dst_address,
        record.tx_id,
        &record.payload,
    );
    if recomputed.as_slice() != stored_hash.as_slice() || transfer_hash != stored_hash {
        return Err(ClientError::HashMismatch);
    }

    if DISPATCHED.has(deps.storage, recomputed.as_slice()) {
        return Err(ClientError::AlreadyDispatched);
    }
    DISPATCHED.save(deps.storage, recomputed.as_slice(), &true)?;

    let relay = config.external_relay.map(|relay| relay.to_string());
    let init_msg = WasmMsg::Execute {
        contract_addr: config.initializer.to_string(),
        msg: to_json_binary(&InitializerExecuteMsg::InitTransfer(InitTransferRequest {
            dst_chain_id,
            dst_address: record.dst_address,
            tx_id,
            transfer_hash: record.transfer_hash,
            payload: record.payload,
            force_order: config.force_order,
            relay: relay.clone(),
        }))?,
        funds: info.funds,
    };

    Ok(Response::new()
        .add_message(init_msg)
        .add_attribute("method", "init_transfer")
        .add_attribute("dst_chain_id", dst_chain_id.to_string())
        .add_attribute("tx_id", tx_id.to_string())
        .add_attribute("transfer_hash", bytes32_to_hex(&recomputed))
        .add_attribute("relay", relay.unwrap_or_else(|| "translator".to_string())))
}

/// Ask the initializer to re-emit a committed transfer with a new fee.
pub fn execute_resend_transfer(
    deps: DepsMut,
    info: MessageInfo,
    transfer_hash: Binary,
    refund_address: Option<String>,
) -> Result<Response, ClientError> {
    assert_sender(deps.storage, &info.sender)?;
    let config = CLIENT_CONFIG.load(deps.storage)?;

    let record = TRANSFERS
        .may_load(deps.storage, transfer_hash.as_slice())?
        .ok_or(ClientError::UnknownTransfer)?;
    if !DISPATCHED.has(deps.storage, transfer_hash.as_slice()) {
        return Err(ClientError::NotDispatched);
    }

    let refund_address = refund_address
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;

    let resend_msg = WasmMsg::Execute {
        contract_addr: config.initializer.to_string(),
        msg: to_json_binary(&InitializerExecuteMsg::ResendTransfer {
            transfer_hash: record.transfer_hash.clone(),
            refund_address: refund_address.map(|addr| addr.to_string()),
        })?,
        funds: info.funds,
    };

    Ok(Response::new()
        .add_message(resend_msg)
        .add_attribute("method", "resend_transfer")
        .add_attribute("transfer_hash", bytes32_to_hex(&binary_to_bytes32(&record.transfer_hash)?))
        .add_attribute("tx_id", record.tx_id.to_string()))
}

// ============================================================================
// Receive Path
// ============================================================================

/// Authenticate a delivery handed over by the initializer.
///
/// The caller must be the configured initializer, the source must be the
/// trusted counterpart for its chain and the hash must match the delivered
/// fields. Returns the `payload_received` event.
pub fn verify_receive(
    deps: Deps,
    info: &MessageInfo,
    msg: &ClientReceiveMsg,
) -> Result<Event, ClientError> {
    let config = CLIENT_CONFIG.load(deps.storage)?;
    if info.sender != config.initializer {
        return Err(ClientError::UnauthorizedInitializer);
    }

    let trusted = TRUSTED_ADDRESSES.may_load(deps.storage, msg.src_chain_id)?;
    if trusted.as_ref() != Some(&msg.src_address) {
        return Err(ClientError::UntrustedSource {
            chain_id: msg.src_chain_id,
            address: msg.src_address.to_hex(),
        });
    }

    let hash = binary_to_bytes32(&msg.transfer_hash)?;
    let expected = compute_transfer_hash(
        msg.src_chain_id,
        &msg.src_address,
        config.local_chain_id,
        &config.local_address,
        msg.tx_id,
        &msg.payload,
    );
    if expected != hash {
        return Err(ClientError::HashMismatch);
    }

    Ok(payload_received_event(
        msg.src_chain_id,
        &msg.src_address,
        msg.tx_id,
        &hash,
    ))
}

// ============================================================================
// Administration
// ============================================================================

fn assert_sender(storage: &dyn Storage, sender: &Addr) -> Result<(), ClientError> {
    if OWNERSHIP.is_owner(storage, sender)? || SENDERS.has(storage, sender) {
        return Ok(());
    }
    Err(ClientError::Unauthorized)
}

fn execute_add_trusted_address(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u64,
    address: String,
) -> Result<Response, ClientError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    let config = CLIENT_CONFIG.load(deps.storage)?;

    let chain = query_chain(&deps.querier, &config.translator, chain_id)?
        .ok_or(ClientError::UnknownChain { chain_id })?;
    let wide = WideAddress::parse(chain.chain_type, &address)?;
    TRUSTED_ADDRESSES.save(deps.storage, chain_id, &wide)?;

    Ok(Response::new()
        .add_attribute("method", "add_trusted_address")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("address", wide.to_hex()))
}

fn execute_remove_trusted_address(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u64,
) -> Result<Response, ClientError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    TRUSTED_ADDRESSES.remove(deps.storage, chain_id);

    Ok(Response::new()
        .add_attribute("method", "remove_trusted_address")
        .add_attribute("chain_id", chain_id.to_string()))
}

fn execute_set_sender(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
    allowed: bool,
) -> Result<Response, ClientError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    let sender = deps.api.addr_validate(&address)?;

    let method = if allowed {
        SENDERS.save(deps.storage, &sender, &true)?;
        "add_sender"
    } else {
        SENDERS.remove(deps.storage, &sender);
        "remove_sender"
    };

    Ok(Response::new()
        .add_attribute("method", method)
        .add_attribute("sender", sender))
}

fn execute_set_external_relay(
    deps: DepsMut,
    info: MessageInfo,
    relay: Option<String>,
) -> Result<Response, ClientError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    let relay = relay.map(|r| deps.api.addr_validate(&r)).transpose()?;

    CLIENT_CONFIG.update(deps.storage, |mut config| -> Result<_, ClientError> {
        config.external_relay = relay.clone();
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("method", "set_external_relay")
        .add_attribute(
            "relay",
            relay.map_or_else(|| "none".to_string(), |r| r.to_string()),
        ))
}

fn execute_set_force_order(
    deps: DepsMut,
    info: MessageInfo,
    force_order: bool,
) -> Result<Response, ClientError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    CLIENT_CONFIG.update(deps.storage, |mut config| -> Result<_, ClientError> {
        config.force_order = force_order;
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("method", "set_force_order")
        .add_attribute("force_order", force_order.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::events::{INITIATE_TRANSFER_EVENT, PAYLOAD_RECEIVED_EVENT};
    use common::ChainType;
    use cosmwasm_std::testing::{mock_dependencies, mock_info, MockApi, MockQuerier, MockStorage};
    use cosmwasm_std::{coins, CosmosMsg, OwnedDeps};

    const LOCAL_CHAIN: u64 = 1;
    const REMOTE_CHAIN: u64 = 2;

    fn remote_client() -> WideAddress {
        WideAddress::parse(ChainType::Cosmos, "terra1remoteclient").unwrap()
    }

    fn setup() -> OwnedDeps<MockStorage, MockApi, MockQuerier> {
        let mut deps = mock_dependencies();
        CLIENT_CONFIG
            .save(
                deps.as_mut().storage,
                &ClientConfig {
                    initializer: Addr::unchecked("initializer"),
                    translator: Addr::unchecked("translator"),
                    local_chain_id: LOCAL_CHAIN,
                    local_address: WideAddress::from_addr(&Addr::unchecked("cosmos2contract")),
                    external_relay: None,
                    force_order: false,
                },
            )
            .unwrap();
        OWNERSHIP
            .initialize(deps.as_mut().storage, &Addr::unchecked("owner"))
            .unwrap();
        TRUSTED_ADDRESSES
            .save(deps.as_mut().storage, REMOTE_CHAIN, &remote_client())
            .unwrap();
        deps
    }

    #[test]
    fn test_send_message_allocates_sequential_tx_ids() {
        let mut deps = setup();

        let (first, event) =
            send_message(deps.as_mut().storage, REMOTE_CHAIN, Binary::from(b"a".to_vec())).unwrap();
        let (second, _) =
            send_message(deps.as_mut().storage, REMOTE_CHAIN, Binary::from(b"a".to_vec())).unwrap();

        assert_eq!(first.tx_id, 0);
        assert_eq!(second.tx_id, 1);
        assert_ne!(first.transfer_hash, second.transfer_hash);
        assert_eq!(event.ty, INITIATE_TRANSFER_EVENT);
        assert_eq!(
            TRANSFER_INDEX
                .load(deps.as_ref().storage, (REMOTE_CHAIN, 1))
                .unwrap(),
            second.transfer_hash
        );
    }

    #[test]
    fn test_send_message_requires_trusted_destination() {
        let mut deps = setup();
        let err = send_message(deps.as_mut().storage, 99, Binary::default()).unwrap_err();
        assert_eq!(err, ClientError::UntrustedDestination { chain_id: 99 });
    }

    #[test]
    fn test_init_transfer_forwards_funds_and_blocks_repeats() {
        let mut deps = setup();
        let payload = Binary::from(b"hi".to_vec());
        let (record, _) = send_message(deps.as_mut().storage, REMOTE_CHAIN, payload).unwrap();

        let res = execute_init_transfer(
            deps.as_mut(),
            mock_info("owner", &coins(100, "uluna")),
            REMOTE_CHAIN,
            record.tx_id,
            record.transfer_hash.clone(),
        )
        .unwrap();
        assert_eq!(res.messages.len(), 1);
        match &res.messages[0].msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr,
                funds,
                ..
            }) => {
                assert_eq!(contract_addr, "initializer");
                assert_eq!(funds, &coins(100, "uluna"));
            }
            other => panic!("unexpected message: {:?}", other),
        }

        let err = execute_init_transfer(
            deps.as_mut(),
            mock_info("owner", &[]),
            REMOTE_CHAIN,
            record.tx_id,
            record.transfer_hash,
        )
        .unwrap_err();
        assert_eq!(err, ClientError::AlreadyDispatched);
    }

    #[test]
    fn test_init_transfer_rejects_wrong_hash() {
        let mut deps = setup();
        let payload = Binary::from(b"hi".to_vec());
        let (record, _) = send_message(deps.as_mut().storage, REMOTE_CHAIN, payload).unwrap();

        let err = execute_init_transfer(
            deps.as_mut(),
            mock_info("owner", &[]),
            REMOTE_CHAIN,
            record.tx_id,
            Binary::from(vec![0u8; 32]),
        )
        .unwrap_err();
        assert_eq!(err, ClientError::HashMismatch);
    }

    #[test]
    fn test_init_transfer_unknown_and_unauthorized() {
        let mut deps = setup();
        let err = execute_init_transfer(
            deps.as_mut(),
            mock_info("owner", &[]),
            REMOTE_CHAIN,
            7,
            Binary::from(vec![0u8; 32]),
        )
        .unwrap_err();
        assert_eq!(err, ClientError::UnknownTransfer);

        let err = execute_init_transfer(
            deps.as_mut(),
            mock_info("stranger", &[]),
            REMOTE_CHAIN,
            0,
            Binary::from(vec![0u8; 32]),
        )
        .unwrap_err();
        assert_eq!(err, ClientError::Unauthorized);
    }

    #[test]
    fn test_resend_requires_dispatch() {
        let mut deps = setup();
        let payload = Binary::from(b"hi".to_vec());
        let (record, _) = send_message(deps.as_mut().storage, REMOTE_CHAIN, payload).unwrap();

        let err = execute_resend_transfer(
            deps.as_mut(),
            mock_info("owner", &[]),
            record.transfer_hash.clone(),
            None,
        )
        .unwrap_err();
        assert_eq!(err, ClientError::NotDispatched);

        let err = execute_resend_transfer(
            deps.as_mut(),
            mock_info("owner", &[]),
            Binary::from(vec![1u8; 32]),
            None,
        )
        .unwrap_err();
        assert_eq!(err, ClientError::UnknownTransfer);
    }

    #[test]
    fn test_verify_receive() {
        let deps = setup();
        let local = WideAddress::from_addr(&Addr::unchecked("cosmos2contract"));
        let payload = Binary::from(b"payload".to_vec());
        let hash =
            compute_transfer_hash(REMOTE_CHAIN, &remote_client(), LOCAL_CHAIN, &local, 3, &payload);
        let msg = ClientReceiveMsg {
            src_chain_id: REMOTE_CHAIN,
            src_address: remote_client(),
            tx_id: 3,
            transfer_hash: Binary::from(hash.to_vec()),
            payload,
        };

        let event = verify_receive(deps.as_ref(), &mock_info("initializer", &[]), &msg).unwrap();
        assert_eq!(event.ty, PAYLOAD_RECEIVED_EVENT);

        assert_eq!(
            verify_receive(deps.as_ref(), &mock_info("stranger", &[]), &msg).unwrap_err(),
            ClientError::UnauthorizedInitializer
        );

        let mut tampered = msg.clone();
        tampered.payload = Binary::from(b"other".to_vec());
        assert_eq!(
            verify_receive(deps.as_ref(), &mock_info("initializer", &[]), &tampered).unwrap_err(),
            ClientError::HashMismatch
        );

        let mut untrusted = msg;
        untrusted.src_address = WideAddress::from_addr(&Addr::unchecked("terra1impostor"));
        assert!(matches!(
            verify_receive(deps.as_ref(), &mock_info("initializer", &[]), &untrusted).unwrap_err(),
            ClientError::UntrustedSource { chain_id: REMOTE_CHAIN, .. }
        ));
    }
}
