//! Transfer hash computation
//!
//! The transfer hash is the idempotency key of one transfer. It is computed
//! once by the source client, recomputed before transport to detect
//! tampering, and used by the destination initializer to reject repeated
//! deliveries.
//!
//! # Byte Layout
//! - srcChainId (u64, big-endian, 8 bytes)
//! - srcAddress length (1 byte) + srcAddress
//! - dstChainId (u64, big-endian, 8 bytes)
//! - dstAddress length (1 byte) + dstAddress
//! - txId (u64, big-endian, 8 bytes)
//! - payload (remaining bytes)
//!
//! The payload is last and every variable-width field before it is length
//! prefixed, so distinct inputs never share an encoding.

use cosmwasm_std::{Binary, StdError, StdResult};
use tiny_keccak::{Hasher, Keccak};

use crate::address::WideAddress;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Compute the transfer hash for one outbound transfer.
pub fn compute_transfer_hash(
    src_chain_id: u64,
    src_address: &WideAddress,
    dst_chain_id: u64,
    dst_address: &WideAddress,
    tx_id: u64,
    payload: &[u8],
) -> [u8; 32] {
    let mut data = Vec::with_capacity(
        8 + 1 + src_address.len() + 8 + 1 + dst_address.len() + 8 + payload.len(),
    );

    data.extend_from_slice(&src_chain_id.to_be_bytes());
    data.push(src_address.len() as u8);
    data.extend_from_slice(src_address.as_slice());
    data.extend_from_slice(&dst_chain_id.to_be_bytes());
    data.push(dst_address.len() as u8);
    data.extend_from_slice(dst_address.as_slice());
    data.extend_from_slice(&tx_id.to_be_bytes());
    data.extend_from_slice(payload);

    keccak256(&data)
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Read a 32-byte hash carried in a message
pub fn binary_to_bytes32(bytes: &Binary) -> StdResult<[u8; 32]> {
    bytes.as_slice().try_into().map_err(|_| {
        StdError::generic_err(format!(
            "Invalid hash length: expected 32 bytes, got {}",
            bytes.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> WideAddress {
        WideAddress::from_raw(s.as_bytes().to_vec())
    }

    fn hash_of(src: &str, dst: &str, tx_id: u64, payload: &[u8]) -> [u8; 32] {
        compute_transfer_hash(1, &addr(src), 2, &addr(dst), tx_id, payload)
    }

    #[test]
    fn test_keccak256_basic() {
        // keccak256("hello") = 0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8
        let result = keccak256(b"hello");
        assert_eq!(
            bytes32_to_hex(&result),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_transfer_hash_is_deterministic() {
        let a = hash_of("client_a", "client_b", 0, b"hello");
        let b = hash_of("client_a", "client_b", 0, b"hello");
        assert_eq!(a, b);
    }

    #[test]
    fn test_transfer_hash_changes_with_tx_id() {
        let first = hash_of("client_a", "client_b", 0, b"hello");
        let second = hash_of("client_a", "client_b", 1, b"hello");
        assert_ne!(first, second);
    }

    #[test]
    fn test_transfer_hash_binds_every_field() {
        let src = addr("client_a");
        let dst = addr("client_b");
        let base = compute_transfer_hash(1, &src, 2, &dst, 7, b"x");
        assert_ne!(base, compute_transfer_hash(3, &src, 2, &dst, 7, b"x"));
        assert_ne!(base, compute_transfer_hash(1, &addr("client_c"), 2, &dst, 7, b"x"));
        assert_ne!(base, compute_transfer_hash(1, &src, 4, &dst, 7, b"x"));
        assert_ne!(base, compute_transfer_hash(1, &src, 2, &addr("client_d"), 7, b"x"));
        assert_ne!(base, compute_transfer_hash(1, &src, 2, &dst, 8, b"x"));
        assert_ne!(base, compute_transfer_hash(1, &src, 2, &dst, 7, b"y"));
    }

    #[test]
    fn test_address_boundaries_are_length_prefixed() {
        // "ab" + "c" and "a" + "bc" must not collide
        let left = compute_transfer_hash(1, &addr("ab"), 2, &addr("c"), 0, b"");
        let right = compute_transfer_hash(1, &addr("a"), 2, &addr("bc"), 0, b"");
        assert_ne!(left, right);
    }

    #[test]
    fn test_bytes32_to_hex_is_prefixed_lowercase() {
        let hex = bytes32_to_hex(&[0xAB; 32]);
        assert_eq!(hex.len(), 66);
        assert_eq!(hex, format!("0x{}", "ab".repeat(32)));
    }

    #[test]
    fn test_binary_to_bytes32_checks_length() {
        let hash = keccak256(b"x");
        assert_eq!(binary_to_bytes32(&Binary::from(hash.to_vec())).unwrap(), hash);
        assert!(binary_to_bytes32(&Binary::from(vec![0u8; 31])).is_err());
    }
}
