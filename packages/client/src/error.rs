//! Error types shared by every contract embedding the client base

use common::{AddressError, OwnershipError};
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ClientError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Ownership(#[from] OwnershipError),

    #[error("{0}")]
    Address(#[from] AddressError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: caller is not an allowed sender")]
    Unauthorized,

    #[error("Unauthorized: only the initializer can deliver payloads")]
    UnauthorizedInitializer,

    // ========================================================================
    // Trust Errors
    // ========================================================================

    #[error("Untrusted destination: no trusted address for chain {chain_id}")]
    UntrustedDestination { chain_id: u64 },

    #[error("Untrusted source: {address} on chain {chain_id}")]
    UntrustedSource { chain_id: u64, address: String },

    #[error("Unknown chain: {chain_id}")]
    UnknownChain { chain_id: u64 },

    // ========================================================================
    // Transfer Errors
    // ========================================================================

    #[error("Unknown transfer")]
    UnknownTransfer,

    #[error("Transfer hash mismatch")]
    HashMismatch,

    #[error("Transfer already dispatched")]
    AlreadyDispatched,

    #[error("Transfer was never dispatched")]
    NotDispatched,
}
