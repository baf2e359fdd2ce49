//! Message types for the connector
//!
//! `Redeem`, `UpdateChainConfigs`, and the `ChainConfigs` query share their
//! wire shape with the router's connector interface.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128, Uint256};
use xbridge_protocol::interfaces::ChainConfigsResponse;
use xbridge_protocol::{ChainConfig, Origin};

use crate::state::TokenType;

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    pub router: String,
    pub token: String,
    pub token_type: TokenType,
    pub decimals: u8,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outbound
    // ========================================================================
    /// Debit `amount` from the sender and send it to `dst_chain_id`.
    /// The router fee is attached as native funds; the CW20 allowance must
    /// cover `amount`.
    Bridge {
        dst_chain_id: u64,
        recipient: Binary,
        amount: Uint128,
        gas_limit: u64,
        custom_payload: Binary,
    },
    /// Ask the connectors on `dst_chain_ids` to replace their configs for
    /// `chain_ids`. The router fee is attached as native funds.
    UpdateRemoteChainConfigs {
        dst_chain_ids: Vec<u64>,
        chain_ids: Vec<u64>,
        configs: Vec<ChainConfig>,
    },

    // ========================================================================
    // Inbound (router only)
    // ========================================================================
    Redeem {
        recipient: Binary,
        amount: Uint256,
        custom_payload: Binary,
        origin: Origin,
        gas_limit: u64,
    },
    UpdateChainConfigs {
        origin: Origin,
        chain_ids: Vec<u64>,
        configs: Vec<ChainConfig>,
    },
    /// Credit step of a redeem, run as a gas-bounded self call
    ApplyRedeem {
        recipient: Binary,
        amount: Uint256,
        custom_payload: Binary,
        origin: Origin,
    },

    // ========================================================================
    // Recovery
    // ========================================================================
    /// Apply a recorded failed redeem again. Anyone may call.
    RetryRedeem {
        recipient: Binary,
        amount: Uint256,
        custom_payload: Binary,
        origin: Origin,
        nonce: u64,
    },

    // ========================================================================
    // Admin
    // ========================================================================
    SetChainConfig {
        chain_ids: Vec<u64>,
        configs: Vec<ChainConfig>,
    },
    Pause {},
    Unpause {},
    UpdateRouter { router: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Zero records for unconfigured chains
    #[returns(ChainConfigsResponse)]
    ChainConfigs { chain_ids: Vec<u64> },

    #[returns(IsExecutionFailedResponse)]
    IsExecutionFailed {
        recipient: Binary,
        amount: Uint256,
        custom_payload: Binary,
        origin: Origin,
        nonce: u64,
    },

    /// Failures ever recorded for these fields; nonces run from zero
    #[returns(FailedExecutionCountResponse)]
    FailedExecutionCount {
        recipient: Binary,
        amount: Uint256,
        custom_payload: Binary,
        origin: Origin,
    },

    #[returns(LockedBalanceResponse)]
    LockedBalance {},

    #[returns(StatsResponse)]
    Stats {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub router: Addr,
    pub token: Addr,
    pub token_type: TokenType,
    pub decimals: u8,
    pub paused: bool,
}

#[cw_serde]
pub struct IsExecutionFailedResponse {
    /// Hex failed execution key
    pub key: String,
    pub nonce: u64,
    pub failed: bool,
}

#[cw_serde]
pub struct FailedExecutionCountResponse {
    pub key: String,
    pub count: u64,
}

#[cw_serde]
pub struct LockedBalanceResponse {
    pub amount: Uint128,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_bridges: u64,
    pub total_bridged: Uint128,
    pub total_redeems: u64,
    pub total_redeemed: Uint128,
    pub total_failed_recorded: u64,
    pub total_retried: u64,
}
