//! Client - base behaviour for Asterizm application contracts
//!
//! An application contract embeds this crate to take part in the protocol:
//! - `send_message` allocates a txId, computes the transfer hash and stores
//!   the transfer record (no transport yet)
//! - `execute_init_transfer` commits a stored transfer to the initializer
//!   together with the attached fee
//! - `execute_resend_transfer` re-enters a stalled transfer into transport
//! - `verify_receive` authenticates a delivery before the application applies
//!   its effect
//!
//! The embedding contract exposes `AsterizmReceive` in its `ExecuteMsg` and
//! routes [`msg::ClientExecuteMsg`] to [`execute_client`].

pub mod error;
mod execute;
pub mod msg;
pub mod query;
pub mod state;

pub use crate::error::ClientError;
pub use crate::execute::{
    execute_client, execute_init_transfer, execute_resend_transfer, instantiate_client,
    send_message, verify_receive,
};
pub use crate::state::{ClientConfig, TransferRecord};
