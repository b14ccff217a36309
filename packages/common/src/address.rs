//! Wide Cross-Chain Address Encoding
//!
//! Packets carry accounts of heterogeneous ledgers, so the width of an
//! address depends on the chain type of the ledger it lives on:
//!
//! | Chain type | Width      | Textual form                   |
//! |------------|------------|--------------------------------|
//! | `Evm`      | 20 bytes   | `0x` + 40 hex chars            |
//! | `Generic`  | 32 bytes   | `0x` + 64 hex chars            |
//! | `Cosmos`   | 1-90 bytes | bech32 text, carried verbatim  |
//!
//! On the wire an address is prefixed with its one-byte length.

use std::fmt;

use cosmwasm_std::{Addr, Binary};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::ChainType;

/// EVM account width
pub const EVM_ADDRESS_LEN: usize = 20;

/// Generic (non-homogeneous) account width
pub const GENERIC_ADDRESS_LEN: usize = 32;

/// Longest accepted bech32 account
pub const MAX_COSMOS_ADDRESS_LEN: usize = 90;

#[derive(Error, Debug, PartialEq)]
pub enum AddressError {
    #[error("Invalid {chain_type} address length: expected {expected}, got {got}")]
    InvalidLength {
        chain_type: &'static str,
        expected: String,
        got: usize,
    },

    #[error("Invalid hex address: {reason}")]
    InvalidHex { reason: String },

    #[error("Invalid cosmos address: non printable character")]
    InvalidCharacter,
}

/// An account on any supported chain, stored as its raw wire bytes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(transparent)]
pub struct WideAddress(Binary);

impl WideAddress {
    /// Wrap raw bytes after checking them against the chain type.
    pub fn new(chain_type: ChainType, bytes: Vec<u8>) -> Result<Self, AddressError> {
        validate_width(chain_type, &bytes)?;
        Ok(Self(Binary::from(bytes)))
    }

    /// Parse the textual form used in messages and queries.
    pub fn parse(chain_type: ChainType, text: &str) -> Result<Self, AddressError> {
        match chain_type {
            ChainType::Evm | ChainType::Generic => {
                let digits = text.strip_prefix("0x").unwrap_or(text);
                let bytes = hex::decode(digits).map_err(|e| AddressError::InvalidHex {
                    reason: e.to_string(),
                })?;
                Self::new(chain_type, bytes)
            }
            ChainType::Cosmos => Self::new(chain_type, text.as_bytes().to_vec()),
        }
    }

    /// Wide form of a local CosmWasm account.
    pub fn from_addr(addr: &Addr) -> Self {
        Self(Binary::from(addr.as_bytes()))
    }

    /// Raw bytes without any chain validation (wire decoding).
    pub fn from_raw(bytes: Vec<u8>) -> Self {
        Self(Binary::from(bytes))
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check the address against the chain type of the ledger it lives on.
    pub fn validate(&self, chain_type: ChainType) -> Result<(), AddressError> {
        validate_width(chain_type, self.as_slice())
    }

    /// `0x`-prefixed hex, used for event attributes.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.as_slice()))
    }
}

impl fmt::Display for WideAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn validate_width(chain_type: ChainType, bytes: &[u8]) -> Result<(), AddressError> {
    match chain_type {
        ChainType::Evm if bytes.len() != EVM_ADDRESS_LEN => Err(AddressError::InvalidLength {
            chain_type: chain_type.as_str(),
            expected: EVM_ADDRESS_LEN.to_string(),
            got: bytes.len(),
        }),
        ChainType::Generic if bytes.len() != GENERIC_ADDRESS_LEN => {
            Err(AddressError::InvalidLength {
                chain_type: chain_type.as_str(),
                expected: GENERIC_ADDRESS_LEN.to_string(),
                got: bytes.len(),
            })
        }
        ChainType::Cosmos => {
            if bytes.is_empty() || bytes.len() > MAX_COSMOS_ADDRESS_LEN {
                return Err(AddressError::InvalidLength {
                    chain_type: chain_type.as_str(),
                    expected: format!("1..={}", MAX_COSMOS_ADDRESS_LEN),
                    got: bytes.len(),
                });
            }
            if !bytes.iter().all(|b| b.is_ascii_graphic()) {
                return Err(AddressError::InvalidCharacter);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
