//! Lookups shared by execute and query handlers.

use common::transport::query_chain;
use common::{ChainType, WideAddress};
use cosmwasm_std::{QuerierWrapper, Storage};

use crate::error::ContractError;
use crate::state::{Config, BLOCKED};

/// Chain type of `chain_id`, read from the translator's registry.
pub fn chain_type_of(
    querier: &QuerierWrapper,
    config: &Config,
    chain_id: u64,
) -> Result<ChainType, ContractError> {
    if chain_id == config.local_chain.chain_id {
        return Ok(config.local_chain.chain_type);
    }
    query_chain(querier, &config.translator, chain_id)?
        .map(|chain| chain.chain_type)
        .ok_or(ContractError::UnknownChain { chain_id })
}

/// Parse the textual form of an account on `chain_id`.
pub fn parse_address(
    querier: &QuerierWrapper,
    config: &Config,
    chain_id: u64,
    address: &str,
) -> Result<WideAddress, ContractError> {
    let chain_type = chain_type_of(querier, config, chain_id)?;
    Ok(WideAddress::parse(chain_type, address)?)
}

pub fn is_blocked(storage: &dyn Storage, chain_id: u64, address: &WideAddress) -> bool {
    BLOCKED.has(storage, (chain_id, address.as_slice()))
}
