//! Error types for the connector

use cosmwasm_std::{OverflowError, StdError, Uint128, Uint256};
use thiserror::Error;
use xbridge_protocol::decimals::DecimalsError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    Decimals(#[from] DecimalsError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================
    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only the router can deliver messages")]
    UnauthorizedRouter,

    #[error("Unauthorized: only the connector itself can apply a redeem")]
    UnauthorizedApply,

    #[error("Connector is paused")]
    Paused,

    // ========================================================================
    // Chain Configuration Errors
    // ========================================================================
    #[error("Chain not configured: {chain_id}")]
    ChainNotConfigured { chain_id: u64 },

    #[error("Length mismatch: {chain_ids} chain ids, {configs} configs")]
    LengthMismatch { chain_ids: usize, configs: usize },

    #[error("Invalid peer: {reason}")]
    InvalidPeer { reason: String },

    // ========================================================================
    // Transfer Errors
    // ========================================================================
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Recipient must not be empty")]
    EmptyRecipient,

    #[error("Amount {amount} is below the precision of {remote_decimals} remote decimals")]
    AmountBelowPrecision { amount: Uint128, remote_decimals: u8 },

    #[error("Recipient is not a valid address: {reason}")]
    InvalidRecipient { reason: String },

    #[error("Insufficient locked balance: {available} available, {required} required")]
    InsufficientLockedBalance {
        available: Uint128,
        required: Uint128,
    },

    // ========================================================================
    // Retry Errors
    // ========================================================================
    #[error("No pending failed execution for key {key} with nonce {nonce}")]
    ExecutionNotPending { key: String, nonce: u64 },

    #[error("Amount {amount} does not fit the local token")]
    AmountTooLarge { amount: Uint256 },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
