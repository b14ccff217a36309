//! Asterizm Translator - Default Transport
//!
//! The translator turns commits from the local initializer into wire packets
//! and turns packets submitted by relayers back into initializer deliveries.
//!
//! # Outbound Flow
//! 1. Initializer calls `SendMessage` with the transfer fields and fee
//! 2. The translator takes the next outbound nonce for the destination chain
//! 3. The encoded packet is emitted in a `send_message` event
//!
//! # Inbound Flow
//! 1. An admitted relayer calls `TransferMessage` with the packet bytes
//! 2. The packet is decoded, checked against the chain registry and the
//!    inbound nonce ledger
//! 3. The initializer is called in a sub-message; a failure there is
//!    reported as `payload_error` without reverting the nonce
//!
//! The translator also owns the chain registry every other contract reads.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
