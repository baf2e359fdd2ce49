use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Uint256};
use thiserror::Error;

use crate::abi::{self, AbiError, ParamType, Token, TokenReader};

/// Minimum length of a non-empty peer identifier
pub const MIN_PEER_LENGTH: usize = 20;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PeerError {
    #[error("Peer must be empty or at least {min} bytes, got {len}")]
    TooShort { len: usize, min: usize },

    #[error("Asserted peer is empty")]
    EmptyPeer,

    #[error("Peer length mismatch: stored {stored}, asserted {asserted}")]
    LengthMismatch { stored: usize, asserted: usize },

    #[error("Peer does not match stored peer")]
    Mismatch,
}

/// Per-remote-chain record held by a connector.
///
/// An empty `peer` means the remote chain is not configured.
#[cw_serde]
#[derive(Default, Eq)]
pub struct ChainConfig {
    pub peer: Binary,
    pub min_gas_limit: u64,
    pub remote_decimals: u8,
    pub paused: bool,
}

impl ChainConfig {
    const PARAMS: [ParamType; 4] = [
        ParamType::Bytes,
        ParamType::Uint(64),
        ParamType::Uint(8),
        ParamType::Bool,
    ];

    pub fn is_configured(&self) -> bool {
        !self.peer.is_empty()
    }

    /// `abi.encode(bytes peer, uint64 minGasLimit, uint8 remoteDecimals, bool paused)`
    pub fn abi_encode(&self) -> Vec<u8> {
        abi::encode(&[
            Token::Bytes(self.peer.to_vec()),
            Token::Uint(Uint256::from(self.min_gas_limit)),
            Token::Uint(Uint256::from(self.remote_decimals)),
            Token::Bool(self.paused),
        ])
    }

    pub fn abi_decode(data: &[u8]) -> Result<Self, AbiError> {
        let mut reader = TokenReader::new(abi::decode(&Self::PARAMS, data)?);
        Ok(Self {
            peer: Binary::from(reader.bytes()?),
            min_gas_limit: reader.u64()?,
            remote_decimals: reader.u8()?,
            paused: reader.bool()?,
        })
    }
}

/// Where an inbound message claims to come from.
#[cw_serde]
#[derive(Eq)]
pub struct Origin {
    pub src_chain_id: u64,
    pub src_peer: Binary,
    pub src_decimals: u8,
}

/// A stored peer is either empty (unconfigured) or at least `MIN_PEER_LENGTH` bytes.
pub fn validate_peer_length(peer: &[u8]) -> Result<(), PeerError> {
    if !peer.is_empty() && peer.len() < MIN_PEER_LENGTH {
        return Err(PeerError::TooShort {
            len: peer.len(),
            min: MIN_PEER_LENGTH,
        });
    }
    Ok(())
}

/// Byte-exact comparison of an asserted origin peer against the stored one.
pub fn verify_peer(stored: &[u8], asserted: &[u8]) -> Result<(), PeerError> {
    if asserted.is_empty() {
        return Err(PeerError::EmptyPeer);
    }
    if stored.len() != asserted.len() {
        return Err(PeerError::LengthMismatch {
            stored: stored.len(),
            asserted: asserted.len(),
        });
    }
    if stored != asserted {
        return Err(PeerError::Mismatch);
    }
    Ok(())
}
