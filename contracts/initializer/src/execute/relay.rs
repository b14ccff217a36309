//! Trusted relay fee table.
//!
//! The owner admits relays with an external and a system fee; a relay may
//! later change its own external fee. Every change emits `trusted_relay`.

use common::events::trusted_relay_event;
use cosmwasm_std::{DepsMut, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::state::{TrustedRelay, OWNERSHIP, TRUSTED_RELAYS};

/// Admit a relay or replace its fee terms.
pub fn execute_manage_trusted_relay(
    deps: DepsMut,
    info: MessageInfo,
    relay: String,
    external_fee: Uint128,
    system_fee: Uint128,
) -> Result<Response, ContractError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    let relay_addr = deps.api.addr_validate(&relay)?;

    TRUSTED_RELAYS.save(
        deps.storage,
        &relay_addr,
        &TrustedRelay {
            external_fee,
            system_fee,
        },
    )?;

    Ok(Response::new()
        .add_event(trusted_relay_event(
            &info.sender,
            &relay_addr,
            external_fee,
            system_fee,
        ))
        .add_attribute("method", "manage_trusted_relay")
        .add_attribute("relay", relay_addr))
}

pub fn execute_remove_trusted_relay(
    deps: DepsMut,
    info: MessageInfo,
    relay: String,
) -> Result<Response, ContractError> {
    OWNERSHIP.assert_owner(deps.storage, &info.sender)?;
    let relay_addr = deps.api.addr_validate(&relay)?;
    if !TRUSTED_RELAYS.has(deps.storage, &relay_addr) {
        return Err(ContractError::UntrustedRelay { relay });
    }
    TRUSTED_RELAYS.remove(deps.storage, &relay_addr);

    // zero fees mark the removal
    Ok(Response::new()
        .add_event(trusted_relay_event(
            &info.sender,
            &relay_addr,
            Uint128::zero(),
            Uint128::zero(),
        ))
        .add_attribute("method", "remove_trusted_relay")
        .add_attribute("relay", relay_addr))
}

/// Called by a trusted relay to change its own external fee.
pub fn execute_update_trusted_relay_fee(
    deps: DepsMut,
    info: MessageInfo,
    external_fee: Uint128,
) -> Result<Response, ContractError> {
    let mut record = TRUSTED_RELAYS
        .may_load(deps.storage, &info.sender)?
        .ok_or_else(|| ContractError::UntrustedRelay {
            relay: info.sender.to_string(),
        })?;
    record.external_fee = external_fee;
    TRUSTED_RELAYS.save(deps.storage, &info.sender, &record)?;

    Ok(Response::new()
        .add_event(trusted_relay_event(
            &info.sender,
            &info.sender,
            record.external_fee,
            record.system_fee,
        ))
        .add_attribute("method", "update_trusted_relay_fee")
        .add_attribute("external_fee", external_fee.to_string()))
}
