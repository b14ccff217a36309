//! Ownership handlers (propose/accept/cancel).

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::state::OWNERSHIP;

/// Propose a new owner; takes effect once accepted.
pub fn execute_propose_owner(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let new_owner_addr = deps.api.addr_validate(&new_owner)?;
    OWNERSHIP.propose(deps.storage, &info.sender, &new_owner_addr)?;

    Ok(Response::new()
        .add_attribute("method", "propose_owner")
        .add_attribute("new_owner", new_owner_addr))
}

pub fn execute_accept_ownership(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    OWNERSHIP.accept(deps.storage, &info.sender)?;

    Ok(Response::new()
        .add_attribute("method", "accept_ownership")
        .add_attribute("owner", info.sender))
}

pub fn execute_cancel_ownership_proposal(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    OWNERSHIP.cancel(deps.storage, &info.sender)?;

    Ok(Response::new().add_attribute("method", "cancel_ownership_proposal"))
}
