//! Transport handle and helpers shared by every translator implementation.
//!
//! The initializer never knows which concrete transport it talks to: it
//! holds a [`TransportContract`] and speaks [`TransportExecuteMsg`]. The
//! default translator and trusted relays both build packets with
//! [`build_packet`] and hand decoded packets to the initializer with
//! [`receive_payload_msg`]. Deliveries still awaiting their reply are held
//! in [`PendingDeliveries`].

use cosmwasm_std::{
    to_json_binary, Addr, Binary, Coin, CosmosMsg, QuerierWrapper, StdError, StdResult, Storage,
    Uint128, WasmMsg,
};
use cw_storage_plus::{Item, Map};
use thiserror::Error;

use crate::chain::ChainInfo;
use crate::hash::binary_to_bytes32;
use crate::msg::{
    ChainRegistryQueryMsg, ChainResponse, InitializerExecuteMsg, ReceivePayloadRequest,
    TransportExecuteMsg, TransportSendRequest,
};
use crate::packet::Packet;

#[derive(Error, Debug, PartialEq)]
pub enum FeeError {
    #[error("Invalid fee: {reason}")]
    InvalidFee { reason: String },
}

/// Handle to a contract implementing the transport messages.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportContract(pub Addr);

impl TransportContract {
    pub fn send_message(
        &self,
        request: TransportSendRequest,
        funds: Vec<Coin>,
    ) -> StdResult<CosmosMsg> {
        self.call(TransportExecuteMsg::SendMessage(request), funds)
    }

    pub fn resend_message(
        &self,
        request: TransportSendRequest,
        sender: &Addr,
        refund: Option<&Addr>,
        funds: Vec<Coin>,
    ) -> StdResult<CosmosMsg> {
        self.call(
            TransportExecuteMsg::ResendMessage {
                request,
                sender: sender.to_string(),
                refund: refund.map(Addr::to_string),
            },
            funds,
        )
    }

    fn call(&self, msg: TransportExecuteMsg, funds: Vec<Coin>) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.0.to_string(),
            msg: to_json_binary(&msg)?,
            funds,
        }
        .into())
    }
}

/// Read the fee attached to a message.
///
/// No funds is a zero fee. Anything other than a single coin of `denom` is
/// rejected before any funds move.
pub fn fee_from_funds(funds: &[Coin], denom: &str) -> Result<Uint128, FeeError> {
    match funds {
        [] => Ok(Uint128::zero()),
        [coin] if coin.denom == denom => Ok(coin.amount),
        [coin] => Err(FeeError::InvalidFee {
            reason: format!("expected {}, got {}", denom, coin.denom),
        }),
        _ => Err(FeeError::InvalidFee {
            reason: "only one coin allowed".to_string(),
        }),
    }
}

/// Assemble the outbound packet for a request.
pub fn build_packet(
    local_chain: &ChainInfo,
    nonce: u64,
    request: &TransportSendRequest,
    fee_value: Uint128,
    force_order: bool,
) -> StdResult<Packet> {
    Ok(Packet {
        nonce,
        src_chain_id: local_chain.chain_id,
        src_address: request.src_address.clone(),
        dst_chain_id: request.dst_chain_id,
        dst_address: request.dst_address.clone(),
        fee_value,
        force_order,
        tx_id: request.tx_id,
        transfer_hash: binary_to_bytes32(&request.transfer_hash)?,
        payload: request.payload.clone(),
    })
}

/// Forward a decoded inbound packet to the local initializer.
pub fn receive_payload_msg(initializer: &Addr, packet: &Packet) -> StdResult<WasmMsg> {
    let msg = InitializerExecuteMsg::ReceivePayload(ReceivePayloadRequest {
        src_chain_id: packet.src_chain_id,
        src_address: packet.src_address.clone(),
        dst_address: packet.dst_address.clone(),
        tx_id: packet.tx_id,
        transfer_hash: packet.transfer_hash.to_vec().into(),
        payload: packet.payload.clone(),
    });
    Ok(WasmMsg::Execute {
        contract_addr: initializer.to_string(),
        msg: to_json_binary(&msg)?,
        funds: vec![],
    })
}

/// Raw packets whose delivery sub-message has not replied yet.
///
/// Each delivery gets its own id, used as the sub-message reply id, so a
/// delivery that re-enters the transport before replying cannot overwrite
/// another one's packet.
pub struct PendingDeliveries<'a> {
    next_id: Item<'a, u64>,
    packets: Map<'a, u64, Binary>,
}

impl<'a> PendingDeliveries<'a> {
    pub const fn new(next_id_key: &'a str, packets_namespace: &'a str) -> Self {
        Self {
            next_id: Item::new(next_id_key),
            packets: Map::new(packets_namespace),
        }
    }

    /// Store `packet` and return the reply id of its delivery.
    pub fn push(&self, store: &mut dyn Storage, packet: &Binary) -> StdResult<u64> {
        let id = self.next_id.may_load(store)?.unwrap_or_default();
        let next = id
            .checked_add(1)
            .ok_or_else(|| StdError::generic_err("delivery id overflow"))?;
        self.next_id.save(store, &next)?;
        self.packets.save(store, id, packet)?;
        Ok(id)
    }

    /// Remove and return the packet of delivery `id`.
    pub fn take(&self, store: &mut dyn Storage, id: u64) -> StdResult<Binary> {
        let packet = self
            .packets
            .may_load(store, id)?
            .ok_or_else(|| StdError::generic_err(format!("Unknown reply id: {}", id)))?;
        self.packets.remove(store, id);
        Ok(packet)
    }
}

/// Local chain of a translator's registry.
pub fn query_local_chain(querier: &QuerierWrapper, translator: &Addr) -> StdResult<ChainInfo> {
    querier.query_wasm_smart(translator, &ChainRegistryQueryMsg::LocalChain {})
}

/// A chain of a translator's registry, `None` when unregistered.
pub fn query_chain(
    querier: &QuerierWrapper,
    translator: &Addr,
    chain_id: u64,
) -> StdResult<Option<ChainInfo>> {
    let res: ChainResponse =
        querier.query_wasm_smart(translator, &ChainRegistryQueryMsg::Chain { chain_id })?;
    Ok(res.chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::coin;
    use cosmwasm_std::testing::MockStorage;

    #[test]
    fn test_fee_from_funds() {
        assert_eq!(fee_from_funds(&[], "uluna").unwrap(), Uint128::zero());
        assert_eq!(
            fee_from_funds(&[coin(500, "uluna")], "uluna").unwrap(),
            Uint128::new(500)
        );
        assert!(fee_from_funds(&[coin(500, "uusd")], "uluna").is_err());
        assert!(fee_from_funds(&[coin(1, "uluna"), coin(1, "uusd")], "uluna").is_err());
    }

    #[test]
    fn test_pending_deliveries_are_kept_apart() {
        const PENDING: PendingDeliveries = PendingDeliveries::new("next", "pending");
        let mut store = MockStorage::new();

        let outer = PENDING.push(&mut store, &Binary::from(b"outer".to_vec())).unwrap();
        let inner = PENDING.push(&mut store, &Binary::from(b"inner".to_vec())).unwrap();
        assert_ne!(outer, inner);

        assert_eq!(PENDING.take(&mut store, inner).unwrap().as_slice(), b"inner");
        assert_eq!(PENDING.take(&mut store, outer).unwrap().as_slice(), b"outer");

        let err = PENDING.take(&mut store, outer).unwrap_err();
        assert!(err.to_string().contains("Unknown reply id"));
        assert_eq!(PENDING.push(&mut store, &Binary::default()).unwrap(), 2);
    }
}
