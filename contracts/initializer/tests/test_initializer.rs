//! Integration tests for the initializer.
//!
//! Runs the initializer against a real translator. Clients and relays are
//! played by plain accounts, so these tests cover the policy gates on both
//! paths; delivery into a client contract is covered by the messenger
//! end-to-end suite.

use common::msg::{InitTransferRequest, ReceivePayloadRequest, TrustedRelayResponse};
use common::{compute_transfer_hash, ChainInfo, ChainType, Packet, WideAddress};
use cosmwasm_std::{coins, Addr, Binary, Uint128};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use initializer::msg::{
    ExecuteMsg, InstantiateMsg, IsBlockedResponse, OutboundTransferResponse, QueryMsg,
    TrustedRelaysResponse,
};

const LOCAL_CHAIN: u64 = 1;
const EVM_CHAIN: u64 = 56;
const CLIENT: &str = "terra1client";
const EVM_CLIENT: &str = "0x55d398326f99059fF775485246999027B3197955";

// ============================================================================
// Test Setup
// ============================================================================

fn contract_translator() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        translator::contract::execute,
        translator::contract::instantiate,
        translator::contract::query,
    )
    .with_reply(translator::contract::reply);
    Box::new(contract)
}

fn contract_initializer() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        initializer::contract::execute,
        initializer::contract::instantiate,
        initializer::contract::query,
    );
    Box::new(contract)
}

struct Suite {
    app: App,
    translator: Addr,
    initializer: Addr,
}

fn owner() -> Addr {
    Addr::unchecked("terra1owner")
}

fn setup() -> Suite {
    let mut app = App::default();
    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &Addr::unchecked(CLIENT), coins(1_000_000, "uluna"))
            .unwrap();
        router
            .bank
            .init_balance(storage, &owner(), coins(1_000_000, "uluna"))
            .unwrap();
    });

    let translator_code = app.store_code(contract_translator());
    let translator = app
        .instantiate_contract(
            translator_code,
            owner(),
            &translator::msg::InstantiateMsg {
                owner: owner().to_string(),
                local_chain_id: LOCAL_CHAIN,
                local_chain_type: ChainType::Cosmos,
                fee_denom: "uluna".to_string(),
                fee_collector: Some("terra1translatorfees".to_string()),
                relayers: vec!["terra1relayer".to_string()],
            },
            &[],
            "translator",
            None,
        )
        .unwrap();
    app.execute_contract(
        owner(),
        translator.clone(),
        &translator::msg::ExecuteMsg::AddChains {
            chains: vec![ChainInfo {
                chain_id: EVM_CHAIN,
                chain_type: ChainType::Evm,
            }],
        },
        &[],
    )
    .unwrap();

    let initializer_code = app.store_code(contract_initializer());
    let initializer = app
        .instantiate_contract(
            initializer_code,
            owner(),
            &InstantiateMsg {
                owner: owner().to_string(),
                translator: translator.to_string(),
                fee_denom: "uluna".to_string(),
                fee_collector: Some("terra1protocol".to_string()),
            },
            &[],
            "initializer",
            None,
        )
        .unwrap();

    app.execute_contract(
        owner(),
        translator.clone(),
        &translator::msg::ExecuteMsg::SetInitializer {
            initializer: initializer.to_string(),
        },
        &[],
    )
    .unwrap();
    app.execute_contract(
        owner(),
        initializer.clone(),
        &ExecuteMsg::RegisterClient {
            client: CLIENT.to_string(),
        },
        &[],
    )
    .unwrap();

    Suite {
        app,
        translator,
        initializer,
    }
}

fn init_request(tx_id: u64) -> InitTransferRequest {
    let src = WideAddress::from_addr(&Addr::unchecked(CLIENT));
    let dst = WideAddress::parse(ChainType::Evm, EVM_CLIENT).unwrap();
    let payload = b"payload".to_vec();
    let hash = compute_transfer_hash(LOCAL_CHAIN, &src, EVM_CHAIN, &dst, tx_id, &payload);
    InitTransferRequest {
        dst_chain_id: EVM_CHAIN,
        dst_address: dst,
        tx_id,
        transfer_hash: Binary::from(hash.to_vec()),
        payload: Binary::from(payload),
        force_order: false,
        relay: None,
    }
}

impl Suite {
    fn exec(&mut self, sender: &str, msg: &ExecuteMsg, fee: u128) -> Result<AppResponse, String> {
        let funds = if fee == 0 { vec![] } else { coins(fee, "uluna") };
        self.app
            .execute_contract(Addr::unchecked(sender), self.initializer.clone(), msg, &funds)
            .map_err(|e| e.root_cause().to_string())
    }

    fn block(&mut self, chain_id: u64, address: &str) {
        self.exec(
            "terra1owner",
            &ExecuteMsg::AddBlockAddress {
                chain_id,
                address: address.to_string(),
            },
            0,
        )
        .unwrap();
    }
}

fn emitted_packet(res: &AppResponse) -> Packet {
    let packet_hex = res
        .events
        .iter()
        .filter(|e| e.ty.ends_with("send_message"))
        .flat_map(|e| &e.attributes)
        .find(|a| a.key == "packet")
        .map(|a| a.value.clone())
        .unwrap();
    Packet::decode(&hex::decode(packet_hex.trim_start_matches("0x")).unwrap()).unwrap()
}

// ============================================================================
// Send Path Tests
// ============================================================================

#[test]
fn test_init_transfer_routes_to_translator() {
    let mut suite = setup();
    let request = init_request(0);

    let res = suite
        .exec(CLIENT, &ExecuteMsg::InitTransfer(request.clone()), 100)
        .unwrap();
    let packet = emitted_packet(&res);
    assert_eq!(packet.src_address.as_slice(), CLIENT.as_bytes());
    assert_eq!(packet.dst_chain_id, EVM_CHAIN);
    assert_eq!(packet.fee_value, Uint128::new(100));
    assert_eq!(packet.transfer_hash.to_vec(), request.transfer_hash.to_vec());

    let stored: OutboundTransferResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.initializer,
            &QueryMsg::OutboundTransfer {
                transfer_hash: request.transfer_hash,
            },
        )
        .unwrap();
    let stored = stored.transfer.unwrap();
    assert_eq!(stored.client, Addr::unchecked(CLIENT));
    assert_eq!(stored.transport, suite.translator);

    let fees = suite
        .app
        .wrap()
        .query_balance("terra1translatorfees", "uluna")
        .unwrap();
    assert_eq!(fees.amount, Uint128::new(100));
}

#[test]
fn test_init_transfer_requires_registered_client() {
    let mut suite = setup();
    let err = suite
        .exec("terra1stranger", &ExecuteMsg::InitTransfer(init_request(0)), 0)
        .unwrap_err();
    assert!(err.contains("Unregistered client"));
}

#[test]
fn test_init_transfer_rejects_hash_mismatch() {
    let mut suite = setup();
    let mut request = init_request(0);
    request.payload = Binary::from(b"tampered".to_vec());

    let err = suite
        .exec(CLIENT, &ExecuteMsg::InitTransfer(request), 0)
        .unwrap_err();
    assert!(err.contains("hash mismatch"));
}

#[test]
fn test_init_transfer_rejects_duplicate_hash() {
    let mut suite = setup();
    suite
        .exec(CLIENT, &ExecuteMsg::InitTransfer(init_request(0)), 0)
        .unwrap();

    let err = suite
        .exec(CLIENT, &ExecuteMsg::InitTransfer(init_request(0)), 0)
        .unwrap_err();
    assert!(err.contains("Transfer already sent"));
}

#[test]
fn test_init_transfer_rejects_untrusted_relay() {
    let mut suite = setup();
    let mut request = init_request(0);
    request.relay = Some("terra1shadyrelay".to_string());

    let err = suite
        .exec(CLIENT, &ExecuteMsg::InitTransfer(request), 0)
        .unwrap_err();
    assert!(err.contains("Untrusted relay"));
}

#[test]
fn test_init_transfer_rejects_foreign_denom_before_moving_funds() {
    let mut suite = setup();
    suite.app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &Addr::unchecked(CLIENT), coins(500, "uusd"))
            .unwrap();
    });

    let err = suite
        .app
        .execute_contract(
            Addr::unchecked(CLIENT),
            suite.initializer.clone(),
            &ExecuteMsg::InitTransfer(init_request(0)),
            &coins(50, "uusd"),
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Invalid fee"));
}

// ============================================================================
// Blocklist Tests
// ============================================================================

#[test]
fn test_blocked_source_and_immediate_removal() {
    let mut suite = setup();
    suite.block(LOCAL_CHAIN, CLIENT);

    let blocked: IsBlockedResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.initializer,
            &QueryMsg::IsBlocked {
                chain_id: LOCAL_CHAIN,
                address: CLIENT.to_string(),
            },
        )
        .unwrap();
    assert!(blocked.blocked);

    let err = suite
        .exec(CLIENT, &ExecuteMsg::InitTransfer(init_request(0)), 0)
        .unwrap_err();
    assert!(err.contains("Blocked source"));

    let res = suite
        .exec(
            "terra1owner",
            &ExecuteMsg::RemoveBlockAddress {
                chain_id: LOCAL_CHAIN,
                address: CLIENT.to_string(),
            },
            0,
        )
        .unwrap();
    assert!(res
        .events
        .iter()
        .any(|e| e.ty.ends_with("remove_block_address")));

    suite
        .exec(CLIENT, &ExecuteMsg::InitTransfer(init_request(0)), 0)
        .unwrap();
}

#[test]
fn test_blocked_destination_on_send() {
    let mut suite = setup();
    // evm addresses are matched on bytes, so the checksum casing is irrelevant
    suite.block(EVM_CHAIN, &EVM_CLIENT.to_lowercase());

    let err = suite
        .exec(CLIENT, &ExecuteMsg::InitTransfer(init_request(0)), 0)
        .unwrap_err();
    assert!(err.contains("Blocked destination"));
}

#[test]
fn test_block_address_validates_chain() {
    let mut suite = setup();

    let err = suite
        .exec(
            "terra1owner",
            &ExecuteMsg::AddBlockAddress {
                chain_id: 999,
                address: CLIENT.to_string(),
            },
            0,
        )
        .unwrap_err();
    assert!(err.contains("Unknown chain: 999"));

    let err = suite
        .exec(
            "terra1owner",
            &ExecuteMsg::AddBlockAddress {
                chain_id: EVM_CHAIN,
                address: "0x1234".to_string(),
            },
            0,
        )
        .unwrap_err();
    assert!(err.contains("Invalid evm address length"));

    let err = suite
        .exec(
            "terra1random",
            &ExecuteMsg::AddBlockAddress {
                chain_id: LOCAL_CHAIN,
                address: CLIENT.to_string(),
            },
            0,
        )
        .unwrap_err();
    assert!(err.contains("only owner"));
}

// ============================================================================
// Resend Tests
// ============================================================================

#[test]
fn test_resend_by_client_and_owner() {
    let mut suite = setup();
    let request = init_request(0);
    suite
        .exec(CLIENT, &ExecuteMsg::InitTransfer(request.clone()), 0)
        .unwrap();

    let resend = ExecuteMsg::ResendTransfer {
        transfer_hash: request.transfer_hash.clone(),
        refund_address: Some(CLIENT.to_string()),
    };
    let res = suite.exec(CLIENT, &resend, 30).unwrap();
    let packet = emitted_packet(&res);
    assert_eq!(packet.nonce, 1);
    assert_eq!(packet.fee_value, Uint128::new(30));
    assert_eq!(packet.payload, request.payload);

    let sender = res
        .events
        .iter()
        .filter(|e| e.ty.ends_with("resend_failed_transfer"))
        .flat_map(|e| &e.attributes)
        .find(|a| a.key == "sender")
        .map(|a| a.value.clone())
        .unwrap();
    assert_eq!(sender, CLIENT);

    let res = suite.exec("terra1owner", &resend, 0).unwrap();
    assert_eq!(emitted_packet(&res).nonce, 2);

    let err = suite.exec("terra1stranger", &resend, 0).unwrap_err();
    assert!(err.contains("owning client or the owner"));
}

#[test]
fn test_resend_unknown_transfer() {
    let mut suite = setup();
    let err = suite
        .exec(
            CLIENT,
            &ExecuteMsg::ResendTransfer {
                transfer_hash: Binary::from(vec![9u8; 32]),
                refund_address: None,
            },
            0,
        )
        .unwrap_err();
    assert!(err.contains("Unknown transfer"));
}

// ============================================================================
// Trusted Relay Tests
// ============================================================================

#[test]
fn test_trusted_relay_fee_table() {
    let mut suite = setup();

    let err = suite
        .exec(
            "terra1random",
            &ExecuteMsg::ManageTrustedRelay {
                relay: "terra1relayowner".to_string(),
                external_fee: Uint128::new(10),
                system_fee: Uint128::new(5),
            },
            0,
        )
        .unwrap_err();
    assert!(err.contains("only owner"));

    let res = suite
        .exec(
            "terra1owner",
            &ExecuteMsg::ManageTrustedRelay {
                relay: "terra1relayowner".to_string(),
                external_fee: Uint128::new(10),
                system_fee: Uint128::new(5),
            },
            0,
        )
        .unwrap();
    assert!(res.events.iter().any(|e| e.ty.ends_with("trusted_relay")));

    suite
        .exec(
            "terra1relayowner",
            &ExecuteMsg::UpdateTrustedRelayFee {
                external_fee: Uint128::new(42),
            },
            0,
        )
        .unwrap();
    let relay: TrustedRelayResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.initializer,
            &QueryMsg::TrustedRelay {
                address: "terra1relayowner".to_string(),
            },
        )
        .unwrap();
    assert_eq!(relay.external_fee, Uint128::new(42));
    assert_eq!(relay.system_fee, Uint128::new(5));

    let err = suite
        .exec(
            "terra1random",
            &ExecuteMsg::UpdateTrustedRelayFee {
                external_fee: Uint128::new(1),
            },
            0,
        )
        .unwrap_err();
    assert!(err.contains("Untrusted relay"));

    suite
        .exec(
            "terra1owner",
            &ExecuteMsg::RemoveTrustedRelay {
                relay: "terra1relayowner".to_string(),
            },
            0,
        )
        .unwrap();
    let relays: TrustedRelaysResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.initializer, &QueryMsg::TrustedRelays {})
        .unwrap();
    assert!(relays.relays.is_empty());
}

// ============================================================================
// Receive Path Tests
// ============================================================================

fn receive_request() -> ReceivePayloadRequest {
    let src = WideAddress::parse(ChainType::Evm, EVM_CLIENT).unwrap();
    let dst = WideAddress::from_addr(&Addr::unchecked(CLIENT));
    let payload = b"inbound".to_vec();
    let hash = compute_transfer_hash(EVM_CHAIN, &src, LOCAL_CHAIN, &dst, 0, &payload);
    ReceivePayloadRequest {
        src_chain_id: EVM_CHAIN,
        src_address: src,
        dst_address: dst,
        tx_id: 0,
        transfer_hash: Binary::from(hash.to_vec()),
        payload: Binary::from(payload),
    }
}

#[test]
fn test_receive_payload_requires_transport() {
    let mut suite = setup();
    let err = suite
        .exec("terra1random", &ExecuteMsg::ReceivePayload(receive_request()), 0)
        .unwrap_err();
    assert!(err.contains("only the translator or a trusted relay"));
}

#[test]
fn test_receive_payload_policy_order() {
    let mut suite = setup();
    suite
        .exec(
            "terra1owner",
            &ExecuteMsg::ManageTrustedRelay {
                relay: "terra1relayacct".to_string(),
                external_fee: Uint128::zero(),
                system_fee: Uint128::zero(),
            },
            0,
        )
        .unwrap();

    // blocked source wins over blocked destination
    suite.block(EVM_CHAIN, EVM_CLIENT);
    suite.block(LOCAL_CHAIN, CLIENT);
    let err = suite
        .exec("terra1relayacct", &ExecuteMsg::ReceivePayload(receive_request()), 0)
        .unwrap_err();
    assert!(err.contains("Blocked source"));

    suite
        .exec(
            "terra1owner",
            &ExecuteMsg::RemoveBlockAddress {
                chain_id: EVM_CHAIN,
                address: EVM_CLIENT.to_string(),
            },
            0,
        )
        .unwrap();
    let err = suite
        .exec("terra1relayacct", &ExecuteMsg::ReceivePayload(receive_request()), 0)
        .unwrap_err();
    assert!(err.contains("Blocked destination"));

    suite
        .exec(
            "terra1owner",
            &ExecuteMsg::UnregisterClient {
                client: CLIENT.to_string(),
            },
            0,
        )
        .unwrap();
    suite
        .exec(
            "terra1owner",
            &ExecuteMsg::RemoveBlockAddress {
                chain_id: LOCAL_CHAIN,
                address: CLIENT.to_string(),
            },
            0,
        )
        .unwrap();
    let err = suite
        .exec("terra1relayacct", &ExecuteMsg::ReceivePayload(receive_request()), 0)
        .unwrap_err();
    assert!(err.contains("Unregistered client"));
}
