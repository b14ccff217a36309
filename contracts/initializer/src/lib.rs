//! Asterizm Initializer - Validation and Dispatch
//!
//! The initializer sits between clients and transports on both sides of a
//! transfer:
//!
//! # Send Path
//! 1. A registered client commits a transfer with `InitTransfer`
//! 2. Blocklist, duplicate and relay trust checks run
//! 3. The transfer is recorded and handed to the default translator or the
//!    trusted relay the client named, with the attached fee
//!
//! # Receive Path
//! 1. A transport calls `ReceivePayload`
//! 2. Blocklist and processed-set checks run
//! 3. The hash is marked processed and the client's receive hook is called
//!    in the same transaction, so a failing hook leaves it unprocessed
//!
//! # Resend
//! `ResendTransfer` re-emits a recorded transfer through its original
//! transport with a new fee; hash and payload never change.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
mod registry;
pub mod state;

pub use crate::error::ContractError;
