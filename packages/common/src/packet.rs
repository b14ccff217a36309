//! Canonical wire packet exchanged between transports.
//!
//! # Byte Layout (big-endian)
//! ```text
//! nonce          u64
//! src_chain_id   u64
//! src_address    u8 length + bytes
//! dst_chain_id   u64
//! dst_address    u8 length + bytes
//! fee_value      u128
//! force_order    u8 (0 or 1)
//! tx_id          u64
//! transfer_hash  32 bytes
//! payload        u32 length + bytes
//! ```
//!
//! Decoding is strict: unknown flag values and trailing bytes are rejected.

use cosmwasm_std::{Binary, Uint128};
use thiserror::Error;

use crate::address::WideAddress;

#[derive(Error, Debug, PartialEq)]
pub enum PacketError {
    #[error("Packet truncated while reading {field}")]
    Truncated { field: &'static str },

    #[error("Invalid force_order flag: {value}")]
    InvalidFlag { value: u8 },

    #[error("Address too long: {len} bytes")]
    AddressTooLong { len: usize },

    #[error("Payload too long: {len} bytes")]
    PayloadTooLong { len: usize },

    #[error("Trailing bytes after packet: {count}")]
    TrailingBytes { count: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Packet {
    pub nonce: u64,
    pub src_chain_id: u64,
    pub src_address: WideAddress,
    pub dst_chain_id: u64,
    pub dst_address: WideAddress,
    pub fee_value: Uint128,
    pub force_order: bool,
    pub tx_id: u64,
    pub transfer_hash: [u8; 32],
    pub payload: Binary,
}

impl Packet {
    pub fn encode(&self) -> Result<Vec<u8>, PacketError> {
        for addr in [&self.src_address, &self.dst_address] {
            if addr.len() > u8::MAX as usize {
                return Err(PacketError::AddressTooLong { len: addr.len() });
            }
        }
        if self.payload.len() > u32::MAX as usize {
            return Err(PacketError::PayloadTooLong {
                len: self.payload.len(),
            });
        }

        let mut out = Vec::with_capacity(
            8 + 8
                + 1
                + self.src_address.len()
                + 8
                + 1
                + self.dst_address.len()
                + 16
                + 1
                + 8
                + 32
                + 4
                + self.payload.len(),
        );
        out.extend_from_slice(&self.nonce.to_be_bytes());
        out.extend_from_slice(&self.src_chain_id.to_be_bytes());
        out.push(self.src_address.len() as u8);
        out.extend_from_slice(self.src_address.as_slice());
        out.extend_from_slice(&self.dst_chain_id.to_be_bytes());
        out.push(self.dst_address.len() as u8);
        out.extend_from_slice(self.dst_address.as_slice());
        out.extend_from_slice(&self.fee_value.u128().to_be_bytes());
        out.push(u8::from(self.force_order));
        out.extend_from_slice(&self.tx_id.to_be_bytes());
        out.extend_from_slice(&self.transfer_hash);
        out.extend_from_slice(&(self.payload.len() as u32).to_be_bytes());
        out.extend_from_slice(self.payload.as_slice());
        Ok(out)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, PacketError> {
        let mut reader = Reader { bytes, pos: 0 };

        let nonce = reader.u64("nonce")?;
        let src_chain_id = reader.u64("src_chain_id")?;
        let src_len = reader.u8("src_address")? as usize;
        let src_address = WideAddress::from_raw(reader.take(src_len, "src_address")?.to_vec());
        let dst_chain_id = reader.u64("dst_chain_id")?;
        let dst_len = reader.u8("dst_address")? as usize;
        let dst_address = WideAddress::from_raw(reader.take(dst_len, "dst_address")?.to_vec());
        let fee_value = Uint128::new(u128::from_be_bytes(reader.array::<16>("fee_value")?));
        let force_order = match reader.u8("force_order")? {
            0 => false,
            1 => true,
            value => return Err(PacketError::InvalidFlag { value }),
        };
        let tx_id = reader.u64("tx_id")?;
        let transfer_hash = reader.array::<32>("transfer_hash")?;
        let payload_len = u32::from_be_bytes(reader.array::<4>("payload")?) as usize;
        let payload = Binary::from(reader.take(payload_len, "payload")?);

        let remaining = bytes.len() - reader.pos;
        if remaining != 0 {
            return Err(PacketError::TrailingBytes { count: remaining });
        }

        Ok(Self {
            nonce,
            src_chain_id,
            src_address,
            dst_chain_id,
            dst_address,
            fee_value,
            force_order,
            tx_id,
            transfer_hash,
            payload,
        })
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], PacketError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(PacketError::Truncated { field })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], PacketError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, field)?);
        Ok(out)
    }

    fn u8(&mut self, field: &'static str) -> Result<u8, PacketError> {
        Ok(self.take(1, field)?[0])
    }

    fn u64(&mut self, field: &'static str) -> Result<u64, PacketError> {
        Ok(u64::from_be_bytes(self.array::<8>(field)?))
    }
}
