use client::ClientError;
use common::OwnershipError;
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("{0}")]
    Ownership(#[from] OwnershipError),

    #[error("Messenger is paused")]
    Paused,

    #[error("Message text must not be empty")]
    EmptyText,
}
