//! State definitions for the master router

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// Only caller allowed to execute proposals; receives outbound messages
    pub transport: Addr,
    /// Version byte every envelope must carry
    pub protocol_version: u8,
    /// Largest accepted envelope, in bytes, both directions
    pub max_payload_size: u64,
}

/// Proposal handed to a router, read back in `reply`
#[cw_serde]
pub struct PendingDispatch {
    pub destination: Binary,
    pub router: Addr,
    pub message: Binary,
}

#[cw_serde]
#[derive(Default)]
pub struct Stats {
    pub proposals_sent: u64,
    pub proposals_dispatched: u64,
}

// ============================================================================
// Constants
// ============================================================================

pub const CONTRACT_NAME: &str = "crates.io:xbridge-master-router";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const REPLY_DISPATCH: u64 = 1;

// ============================================================================
// State Items
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const STATS: Item<Stats> = Item::new("stats");

/// Router handling each message type
/// Key: message type tag
pub const ROUTES: Map<u8, Addr> = Map::new("routes");

/// Routers allowed to receive and send proposals
pub const AUTHORIZED_ROUTERS: Map<&Addr, bool> = Map::new("authorized_routers");

/// Master router on each remote chain, as the transport addresses it
/// Key: remote chain id
pub const REMOTE_MASTER_ROUTERS: Map<u64, Binary> = Map::new("remote_master_routers");

pub const PENDING_DISPATCH: Item<PendingDispatch> = Item::new("pending_dispatch");
