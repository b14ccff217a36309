//! Chain types and registry records.
//!
//! The chain type decides how an account on that chain is carried in a
//! packet. See [`crate::address`] for the per-type width rules.

use cosmwasm_schema::cw_serde;

/// Address/encoding family of a ledger.
#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum ChainType {
    /// 20-byte accounts (Ethereum, BSC, Polygon, ...)
    Evm,
    /// Bech32 accounts carried as their text bytes
    Cosmos,
    /// 32-byte accounts (TVM, Solana, ...)
    Generic,
}

impl ChainType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainType::Evm => "evm",
            ChainType::Cosmos => "cosmos",
            ChainType::Generic => "generic",
        }
    }
}

/// A chain known to a deployment.
#[cw_serde]
#[derive(Copy)]
pub struct ChainInfo {
    pub chain_id: u64,
    pub chain_type: ChainType,
}
