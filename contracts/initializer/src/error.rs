//! Error types for the initializer contract

use common::{AddressError, FeeError, OwnershipError};
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Ownership(#[from] OwnershipError),

    #[error("{0}")]
    Address(#[from] AddressError),

    #[error("{0}")]
    Fee(#[from] FeeError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only the translator or a trusted relay can deliver payloads")]
    UnauthorizedTransport,

    #[error("Unauthorized: only the owning client or the owner can resend")]
    Unauthorized,

    #[error("Unregistered client: {address}")]
    UnregisteredClient { address: String },

    #[error("Unknown chain: {chain_id}")]
    UnknownChain { chain_id: u64 },

    // ========================================================================
    // Policy Errors
    // ========================================================================

    #[error("Blocked source: {address} on chain {chain_id}")]
    BlockedSource { chain_id: u64, address: String },

    #[error("Blocked destination: {address} on chain {chain_id}")]
    BlockedDestination { chain_id: u64, address: String },

    #[error("Untrusted relay: {relay}")]
    UntrustedRelay { relay: String },

    // ========================================================================
    // Transfer Errors
    // ========================================================================

    #[error("Transfer hash mismatch")]
    HashMismatch,

    #[error("Transfer already sent")]
    TransferAlreadySent,

    #[error("Transfer already processed")]
    AlreadyProcessed,

    #[error("Unknown transfer")]
    UnknownTransfer,
}
