//! State definitions for the router

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};
use xbridge_protocol::MessageType;

// ============================================================================
// Core Configuration
// ============================================================================

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// Only caller allowed to hand over inbound messages
    pub master_router: Addr,
    pub price_feed: Addr,
    /// Receives every fee payment
    pub fee_collector: Addr,
    /// Native denom fees are paid in
    pub fee_denom: String,
    /// Chain id of the chain this router is deployed on
    pub this_chain_id: u64,
    /// Gas granted to a remote config update
    pub update_gas_limit: u64,
}

/// Router statistics
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    /// Outbound value transfers sent
    pub total_bridges: u64,
    /// Outbound config updates sent
    pub total_config_updates: u64,
    /// Fees charged on outbound messages
    pub total_fees_collected: Uint128,
    /// Fee payments the collector rejected, held by the router until swept
    pub total_fees_retained: Uint128,
    pub total_fees_swept: Uint128,
}

/// Context of an in-flight inbound delivery, read back in `reply`
#[cw_serde]
pub struct PendingDelivery {
    pub destination: Addr,
    pub message_type: MessageType,
}

// ============================================================================
// Constants
// ============================================================================

pub const CONTRACT_NAME: &str = "crates.io:xbridge-router";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const REPLY_FEE_TRANSFER: u64 = 1;
pub const REPLY_DELIVERY: u64 = 2;

// ============================================================================
// State Items
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const STATS: Item<Stats> = Item::new("stats");

/// Protocol fee surcharge per destination chain, in basis points
pub const PROTOCOL_FEES: Map<u64, u16> = Map::new("protocol_fees");

/// Inbound deliveries per final status code
pub const INBOUND_BY_STATUS: Map<u8, u64> = Map::new("inbound_by_status");

/// Amount of the fee transfer awaiting a possible error reply
pub const PENDING_FEE: Item<Uint128> = Item::new("pending_fee");

pub const PENDING_DELIVERY: Item<PendingDelivery> = Item::new("pending_delivery");
