//! Message types for the router

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128, Uint256};
use xbridge_protocol::{ChainConfig, Status};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    pub master_router: String,
    pub price_feed: String,
    pub fee_collector: String,
    pub fee_denom: String,
    pub this_chain_id: u64,
    pub update_gas_limit: u64,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outbound (called by connectors)
    // ========================================================================
    /// Send a value transfer on behalf of the calling connector.
    /// The bridge fee is attached in `fee_denom`.
    Bridge {
        sender: String,
        recipient: Binary,
        amount: Uint256,
        src_decimals: u8,
        dst_chain_id: u64,
        gas_limit: u64,
        custom_payload: Binary,
    },
    /// Ask the calling connector's peers on `dst_chain_ids` to replace
    /// their chain configs.
    RequestToUpdateConfig {
        dst_chain_ids: Vec<u64>,
        chain_ids: Vec<u64>,
        configs: Vec<ChainConfig>,
    },

    // ========================================================================
    // Inbound (called by the master router)
    // ========================================================================
    HandleMessage {
        message_type: u8,
        destination: Binary,
        payload: Binary,
    },

    // ========================================================================
    // Admin
    // ========================================================================
    SetProtocolFee {
        chain_ids: Vec<u64>,
        fee_bps: Vec<u16>,
    },
    UpdateConfig {
        admin: Option<String>,
        master_router: Option<String>,
        price_feed: Option<String>,
        fee_collector: Option<String>,
        fee_denom: Option<String>,
        update_gas_limit: Option<u64>,
    },
    /// Forward fees retained after a failed collector transfer
    Sweep {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(ProtocolFeeResponse)]
    ProtocolFee { chain_id: u64 },

    /// Fee for an explicit gas limit and payload size
    #[returns(BridgeFeeResponse)]
    BridgeFee {
        chain_id: u64,
        gas_limit: u64,
        payload_length: u64,
    },

    /// Fee for a value transfer the given connector would send
    #[returns(BridgeFeeResponse)]
    EstimateBridgeFee {
        connector: String,
        dst_chain_id: u64,
        recipient: Binary,
        custom_payload: Binary,
        gas_limit: u64,
    },

    /// Total fee for a config update request
    #[returns(UpdateFeeResponse)]
    UpdateFee {
        connector: String,
        dst_chain_ids: Vec<u64>,
        chain_ids: Vec<u64>,
        configs: Vec<ChainConfig>,
    },

    #[returns(StatsResponse)]
    Stats {},
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub master_router: Addr,
    pub price_feed: Addr,
    pub fee_collector: Addr,
    pub fee_denom: String,
    pub this_chain_id: u64,
    pub update_gas_limit: u64,
}

#[cw_serde]
pub struct ProtocolFeeResponse {
    pub chain_id: u64,
    pub fee_bps: u16,
}

/// Fee with every input it was computed from
#[cw_serde]
pub struct BridgeFeeResponse {
    pub chain_id: u64,
    pub fee: Uint256,
    pub gas_limit: u64,
    pub gas_price: Uint256,
    pub payload_length: u64,
    pub price_per_byte: Uint256,
    pub protocol_fee_bps: u16,
}

#[cw_serde]
pub struct UpdateFeeResponse {
    pub total: Uint256,
    pub fees: Vec<BridgeFeeResponse>,
}

#[cw_serde]
pub struct StatusCount {
    pub status: Status,
    pub count: u64,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_bridges: u64,
    pub total_config_updates: u64,
    pub total_fees_collected: Uint128,
    pub total_fees_retained: Uint128,
    pub total_fees_swept: Uint128,
    pub inbound: Vec<StatusCount>,
}
