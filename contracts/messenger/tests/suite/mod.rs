//! Two-chain harness.
//!
//! Each [`Chain`] is an independent `App` running the full contract set for
//! one chain id. The tests play the off-chain relayer: they read the
//! `send_message` packet out of one chain's response and submit it to the
//! other chain's transport.

#![allow(dead_code)]

use common::events::SEND_MESSAGE_EVENT;
use common::{ChainInfo, ChainType, Packet};
use cosmwasm_std::{coins, Addr, Binary, Coin, Empty, Uint128};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use serde::Serialize;

use client::msg::ClientExecuteMsg;
use messenger::msg::{ExecuteMsg, InstantiateMsg, MessageResponse, MessagesResponse, QueryMsg};
use messenger::state::ReceivedMessage;

pub const CHAIN_A: u64 = 1;
pub const CHAIN_B: u64 = 2;

pub const DENOM: &str = "uluna";
pub const OWNER: &str = "terra1owner";
pub const RELAYER: &str = "terra1relayer";
pub const RELAY_OWNER: &str = "terra1relayowner";
pub const PROTOCOL_FEES: &str = "terra1protocol";
pub const TRANSLATOR_FEES: &str = "terra1translatorfees";

pub const RELAY_SYSTEM_FEE: u128 = 100;
pub const RELAY_EXTERNAL_FEE: u128 = 300;

fn contract_translator() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        translator::contract::execute,
        translator::contract::instantiate,
        translator::contract::query,
    )
    .with_reply(translator::contract::reply);
    Box::new(contract)
}

fn contract_initializer() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        initializer::contract::execute,
        initializer::contract::instantiate,
        initializer::contract::query,
    );
    Box::new(contract)
}

fn contract_relay() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        relay::contract::execute,
        relay::contract::instantiate,
        relay::contract::query,
    )
    .with_reply(relay::contract::reply);
    Box::new(contract)
}

fn contract_messenger() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        messenger::contract::execute,
        messenger::contract::instantiate,
        messenger::contract::query,
    );
    Box::new(contract)
}

pub struct Chain {
    pub app: App,
    pub chain_id: u64,
    pub translator: Addr,
    pub initializer: Addr,
    pub relay: Addr,
    pub messenger: Addr,
    messenger_code: u64,
}

impl Chain {
    /// Deploy and wire every contract for `chain_id`, with `remote` registered.
    pub fn new(chain_id: u64, remote: u64) -> Self {
        let mut app = App::default();
        app.init_modules(|router, _, storage| {
            router
                .bank
                .init_balance(storage, &Addr::unchecked(OWNER), coins(1_000_000, DENOM))
                .unwrap();
        });
        let owner = Addr::unchecked(OWNER);

        let translator_code = app.store_code(contract_translator());
        let translator = app
            .instantiate_contract(
                translator_code,
                owner.clone(),
                &translator::msg::InstantiateMsg {
                    owner: OWNER.to_string(),
                    local_chain_id: chain_id,
                    local_chain_type: ChainType::Cosmos,
                    fee_denom: DENOM.to_string(),
                    fee_collector: Some(TRANSLATOR_FEES.to_string()),
                    relayers: vec![RELAYER.to_string()],
                },
                &[],
                "translator",
                None,
            )
            .unwrap();
        app.execute_contract(
            owner.clone(),
            translator.clone(),
            &translator::msg::ExecuteMsg::AddChains {
                chains: vec![ChainInfo {
                    chain_id: remote,
                    chain_type: ChainType::Cosmos,
                }],
            },
            &[],
        )
        .unwrap();

        let initializer_code = app.store_code(contract_initializer());
        let initializer = app
            .instantiate_contract(
                initializer_code,
                owner.clone(),
                &initializer::msg::InstantiateMsg {
                    owner: OWNER.to_string(),
                    translator: translator.to_string(),
                    fee_denom: DENOM.to_string(),
                    fee_collector: Some(PROTOCOL_FEES.to_string()),
                },
                &[],
                "initializer",
                None,
            )
            .unwrap();
        app.execute_contract(
            owner.clone(),
            translator.clone(),
            &translator::msg::ExecuteMsg::SetInitializer {
                initializer: initializer.to_string(),
            },
            &[],
        )
        .unwrap();

        let relay_code = app.store_code(contract_relay());
        let relay = app
            .instantiate_contract(
                relay_code,
                owner.clone(),
                &relay::msg::InstantiateMsg {
                    owner: RELAY_OWNER.to_string(),
                    initializer: initializer.to_string(),
                    relayers: vec![RELAYER.to_string()],
                },
                &[],
                "relay",
                None,
            )
            .unwrap();
        app.execute_contract(
            owner.clone(),
            initializer.clone(),
            &initializer::msg::ExecuteMsg::ManageTrustedRelay {
                relay: relay.to_string(),
                external_fee: Uint128::new(RELAY_EXTERNAL_FEE),
                system_fee: Uint128::new(RELAY_SYSTEM_FEE),
            },
            &[],
        )
        .unwrap();

        let messenger_code = app.store_code(contract_messenger());
        let mut chain = Self {
            app,
            chain_id,
            translator,
            initializer,
            relay,
            messenger: Addr::unchecked(""),
            messenger_code,
        };
        chain.messenger = chain.deploy_messenger("messenger");
        chain
    }

    /// Instantiate a messenger and register it with the initializer.
    pub fn deploy_messenger(&mut self, label: &str) -> Addr {
        let messenger = self
            .app
            .instantiate_contract(
                self.messenger_code,
                Addr::unchecked(OWNER),
                &InstantiateMsg {
                    owner: OWNER.to_string(),
                    initializer: self.initializer.to_string(),
                    external_relay: None,
                    force_order: false,
                },
                &[],
                label,
                None,
            )
            .unwrap();
        let initializer = self.initializer.clone();
        self.exec(
            OWNER,
            &initializer,
            &initializer::msg::ExecuteMsg::RegisterClient {
                client: messenger.to_string(),
            },
            0,
        )
        .unwrap();
        messenger
    }

    /// Execute `msg` on `contract`; errors are flattened to their root cause.
    pub fn exec<T: Serialize + std::fmt::Debug>(
        &mut self,
        sender: &str,
        contract: &Addr,
        msg: &T,
        fee: u128,
    ) -> Result<AppResponse, String> {
        let funds: Vec<Coin> = if fee == 0 { vec![] } else { coins(fee, DENOM) };
        self.app
            .execute_contract(Addr::unchecked(sender), contract.clone(), msg, &funds)
            .map_err(|e| e.root_cause().to_string())
    }

    pub fn client_exec(&mut self, msg: ClientExecuteMsg, fee: u128) -> Result<AppResponse, String> {
        let messenger = self.messenger.clone();
        self.exec(OWNER, &messenger, &ExecuteMsg::Client(msg), fee)
    }

    pub fn send_text(
        &mut self,
        dst_chain_id: u64,
        text: &str,
        fee: u128,
    ) -> Result<AppResponse, String> {
        let messenger = self.messenger.clone();
        self.exec(
            OWNER,
            &messenger,
            &ExecuteMsg::SendText {
                dst_chain_id,
                text: text.to_string(),
            },
            fee,
        )
    }

    /// Submit raw packet bytes to `transport` as the relayer.
    pub fn deliver_via(&mut self, transport: &Addr, bytes: &[u8]) -> Result<AppResponse, String> {
        let msg = translator::msg::ExecuteMsg::TransferMessage {
            gas_limit: None,
            payload: Binary::from(bytes.to_vec()),
        };
        self.exec(RELAYER, transport, &msg, 0)
    }

    pub fn deliver(&mut self, bytes: &[u8]) -> Result<AppResponse, String> {
        let translator = self.translator.clone();
        self.deliver_via(&translator, bytes)
    }

    pub fn message(&self, transfer_hash: &Binary) -> Option<ReceivedMessage> {
        let res: MessageResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.messenger,
                &QueryMsg::Message {
                    transfer_hash: transfer_hash.clone(),
                },
            )
            .unwrap();
        res.message
    }

    pub fn message_count(&self) -> usize {
        let res: MessagesResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.messenger,
                &QueryMsg::Messages {
                    start_after: None,
                    limit: None,
                },
            )
            .unwrap();
        res.messages.len()
    }

    pub fn is_processed(&self, transfer_hash: &Binary) -> bool {
        let res: initializer::msg::IsProcessedResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.initializer,
                &initializer::msg::QueryMsg::IsProcessed {
                    transfer_hash: transfer_hash.clone(),
                },
            )
            .unwrap();
        res.processed
    }

    pub fn balance(&self, address: &str) -> u128 {
        self.app
            .wrap()
            .query_balance(address, DENOM)
            .unwrap()
            .amount
            .u128()
    }
}

/// Two chains whose messengers trust each other.
pub fn connected_pair() -> (Chain, Chain) {
    let mut a = Chain::new(CHAIN_A, CHAIN_B);
    let mut b = Chain::new(CHAIN_B, CHAIN_A);

    let b_messenger = b.messenger.to_string();
    a.client_exec(
        ClientExecuteMsg::AddTrustedAddress {
            chain_id: CHAIN_B,
            address: b_messenger,
        },
        0,
    )
    .unwrap();
    let a_messenger = a.messenger.to_string();
    b.client_exec(
        ClientExecuteMsg::AddTrustedAddress {
            chain_id: CHAIN_A,
            address: a_messenger,
        },
        0,
    )
    .unwrap();

    (a, b)
}

/// Raw bytes of the packet emitted in `res`.
pub fn emitted_packet(res: &AppResponse) -> Vec<u8> {
    let packet_hex = event_attr(res, SEND_MESSAGE_EVENT, "packet");
    hex::decode(packet_hex.trim_start_matches("0x")).unwrap()
}

pub fn decode(bytes: &[u8]) -> Packet {
    Packet::decode(bytes).unwrap()
}

/// Transfer hash of the packet emitted in `res`.
pub fn emitted_hash(res: &AppResponse) -> Binary {
    Binary::from(decode(&emitted_packet(res)).transfer_hash.to_vec())
}

pub fn has_event(res: &AppResponse, ty: &str) -> bool {
    res.events.iter().any(|e| e.ty.ends_with(ty))
}

pub fn event_attr(res: &AppResponse, ty: &str, key: &str) -> String {
    res.events
        .iter()
        .filter(|e| e.ty.ends_with(ty))
        .flat_map(|e| &e.attributes)
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
        .unwrap()
}
