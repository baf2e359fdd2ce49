//! Hashing for failed-execution records
//!
//! # Key layout
//! ```text
//! keccak256(abi.encode(
//!     bytes   recipient,
//!     uint256 amount,
//!     bytes   customPayload,
//!     uint64  srcChainId,
//!     bytes   srcPeer,
//!     uint8   srcDecimals
//! ))
//! ```

use cosmwasm_std::Uint256;
use tiny_keccak::{Hasher, Keccak};

use crate::abi::{self, Token};
use crate::chain::Origin;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Identity of a delivery whose apply step failed.
///
/// Two deliveries with identical fields share a key; the connector keeps a
/// nonce per key so each one still gets its own record.
pub fn failed_execution_key(
    recipient: &[u8],
    amount: Uint256,
    custom_payload: &[u8],
    origin: &Origin,
) -> [u8; 32] {
    let encoded = abi::encode(&[
        Token::Bytes(recipient.to_vec()),
        Token::Uint(amount),
        Token::Bytes(custom_payload.to_vec()),
        Token::Uint(Uint256::from(origin.src_chain_id)),
        Token::Bytes(origin.src_peer.to_vec()),
        Token::Uint(Uint256::from(origin.src_decimals)),
    ]);
    keccak256(&encoded)
}

/// `0x`-prefixed lowercase hex, for attributes
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
