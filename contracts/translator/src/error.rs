//! Error types for the translator contract

use common::{AddressError, FeeError, NonceError, OwnershipError, PacketError};
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

    #[error("{0}")]
    Nonce(#[from] NonceError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only the initializer can send messages")]
    Unauthorized,

    #[error("Unauthorized: caller is not a relayer")]
    UnauthorizedRelayer,

    #[error("Initializer not set")]
    InitializerNotSet,

    // ========================================================================
    // Registry Errors
    // ========================================================================

    #[error("Unknown chain: {chain_id}")]
    UnknownChain { chain_id: u64 },

    #[error("Cannot remove the local chain")]
    CannotRemoveLocalChain,

    #[error("Cannot re-register the local chain")]
    CannotModifyLocalChain,

    // ========================================================================
    // Packet Errors
    // ========================================================================

    #[error("Decode error: {0}")]
    DecodeError(PacketError),

    #[error("Encode error: {0}")]
    EncodeError(PacketError),

    #[error("Wrong destination: packet for chain {got}, local chain is {expected}")]
    WrongDestination { expected: u64, got: u64 },
}
