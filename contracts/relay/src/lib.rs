//! Asterizm Trusted Relay
//!
//! An alternate transport run by a third party. It speaks the same
//! transport messages as the translator, keeps its own relayer set and
//! nonce ledger, and validates chains against the translator's registry.
//!
//! On `SendMessage` the attached fee must cover the system fee and the
//! relay's external fee as recorded in the initializer. The system fee goes
//! to the protocol fee sink; the rest goes to the relay owner and is written
//! into the packet as its fee value.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
