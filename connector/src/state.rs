//! State definitions for the connector

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Uint128, Uint256};
use cw_storage_plus::{Item, Map};
use xbridge_protocol::{ChainConfig, Origin};

// ============================================================================
// Core Configuration
// ============================================================================

/// How the connector debits and credits its token
#[cw_serde]
#[derive(Copy, Eq)]
pub enum TokenType {
    /// Burn on bridge, mint on redeem. The connector must be the CW20 minter.
    MintBurn,
    /// Escrow on bridge, release on redeem
    LockUnlock,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::MintBurn => "mint_burn",
            TokenType::LockUnlock => "lock_unlock",
        }
    }
}

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// Router allowed to deliver redeems and config updates
    pub router: Addr,
    /// CW20 token contract
    pub token: Addr,
    pub token_type: TokenType,
    /// Decimals of the local token
    pub decimals: u8,
    /// Blocks outbound bridges; inbound redeems are recorded for retry
    pub paused: bool,
}

#[cw_serde]
#[derive(Default)]
pub struct Stats {
    /// Outbound transfers
    pub total_bridges: u64,
    /// Local amount debited for outbound transfers
    pub total_bridged: Uint128,
    /// Redeems applied, on first delivery or by retry
    pub total_redeems: u64,
    /// Local amount credited by redeems
    pub total_redeemed: Uint128,
    pub total_failed_recorded: u64,
    pub total_retried: u64,
}

/// Redeem being applied in a sub-call, read back in `reply`
#[cw_serde]
pub struct PendingRedeem {
    pub recipient: Binary,
    pub amount: Uint256,
    pub custom_payload: Binary,
    pub origin: Origin,
}

// ============================================================================
// Constants
// ============================================================================

pub const CONTRACT_NAME: &str = "crates.io:xbridge-connector";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const REPLY_APPLY_REDEEM: u64 = 1;

// ============================================================================
// State Items
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const STATS: Item<Stats> = Item::new("stats");

/// Remote chain configuration
/// Key: remote chain id
pub const CHAIN_CONFIGS: Map<u64, ChainConfig> = Map::new("chain_configs");

/// Failed redeems awaiting retry
/// Key: (failed execution key, nonce), Value: still pending
pub const FAILED_EXECUTIONS: Map<(&[u8], u64), bool> = Map::new("failed_executions");

/// Next nonce per failed execution key
pub const FAILED_NONCES: Map<&[u8], u64> = Map::new("failed_nonces");

/// Tokens held in escrow (`LockUnlock` only)
pub const LOCKED_BALANCE: Item<Uint128> = Item::new("locked_balance");

pub const PENDING_REDEEM: Item<PendingRedeem> = Item::new("pending_redeem");
