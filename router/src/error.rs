//! Error types for the router

use cosmwasm_std::{OverflowError, StdError, Uint128, Uint256};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================
    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only the master router can deliver messages")]
    UnauthorizedMasterRouter,

    // ========================================================================
    // Destination Errors
    // ========================================================================
    #[error("Chain not configured: {chain_id}")]
    ChainNotConfigured { chain_id: u64 },

    #[error("Chain paused: {chain_id}")]
    ChainPaused { chain_id: u64 },

    #[error("Gas limit too low: {gas_limit} < minimum {min_gas_limit}")]
    GasLimitTooLow { gas_limit: u64, min_gas_limit: u64 },

    #[error("No destination chains given")]
    NoDestinations,

    #[error("Invalid peer: {reason}")]
    InvalidPeer { reason: String },

    // ========================================================================
    // Amount & Fee Errors
    // ========================================================================
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Insufficient fee: required {required}, paid {paid}")]
    InsufficientFee { required: Uint256, paid: Uint128 },

    #[error("Fee {fee} exceeds the native coin range")]
    FeeOverflow { fee: Uint256 },

    #[error("Unexpected funds: only {expected} accepted, got {denom}")]
    UnexpectedFunds { expected: String, denom: String },

    #[error("Invalid protocol fee: {fee_bps} bps exceeds 10000")]
    InvalidFeeBps { fee_bps: u16 },

    #[error("Nothing to sweep")]
    NothingToSweep,

    // ========================================================================
    // Input Errors
    // ========================================================================
    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
