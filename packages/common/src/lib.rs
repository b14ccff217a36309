//! Common - Shared Types and Utilities for Asterizm Contracts
//!
//! This package provides the pieces every protocol contract agrees on:
//! - `chain` - chain types and registry records
//! - `address` - chain-type-aware wide address encoding
//! - `hash` - transfer hash computation (keccak256)
//! - `packet` - the canonical wire packet codec
//! - `nonce` - per-remote-chain inbound/outbound counters
//! - `msg` - the cross-contract interface (transport, initializer, client)
//! - `transport` - transport handle and fee helpers shared by translators
//! - `events` - protocol event builders
//! - `ownership` - two-step owner transfer

pub mod address;
pub mod chain;
pub mod events;
pub mod hash;
pub mod msg;
pub mod nonce;
pub mod ownership;
pub mod packet;
pub mod transport;

pub use address::{AddressError, WideAddress};
pub use chain::{ChainInfo, ChainType};
pub use hash::{binary_to_bytes32, bytes32_to_hex, compute_transfer_hash, keccak256};
pub use nonce::{NonceError, NonceLedger, NonceStream};
pub use ownership::{Ownership, OwnershipError};
pub use packet::{Packet, PacketError};
pub use transport::{fee_from_funds, FeeError, PendingDeliveries, TransportContract};
