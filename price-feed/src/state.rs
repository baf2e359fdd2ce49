//! State definitions for the price feed

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint256};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Admin address, may manage providers and publish prices
    pub admin: Addr,
}

pub const CONTRACT_NAME: &str = "crates.io:xbridge-price-feed";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CONFIG: Item<Config> = Item::new("config");

/// Addresses allowed to publish prices
pub const PROVIDERS: Map<&Addr, bool> = Map::new("providers");

/// Packed gas-price words, four slots each
/// Key: group id
pub const PRICE_GROUPS: Map<u32, Uint256> = Map::new("price_groups");

/// Packed per-chain header words
/// Key: remote chain id
pub const CHAIN_HEADERS: Map<u64, Uint256> = Map::new("chain_headers");
