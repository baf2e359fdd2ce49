//! Message types for the price feed

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint256};
use xbridge_protocol::price::{ChainPriceHeader, PriceRecord};

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    /// Initial price providers
    pub providers: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Overwrite packed gas-price group words
    SetPrices {
        group_ids: Vec<u32>,
        packed_values: Vec<Uint256>,
    },
    /// Assign chains to group slots and set their per-byte price
    SetChainInfo {
        chain_ids: Vec<u64>,
        packed_headers: Vec<Uint256>,
    },
    AddProvider { provider: String },
    RemoveProvider { provider: String },
    UpdateAdmin { admin: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(ProvidersResponse)]
    Providers {},

    #[returns(PriceGroupResponse)]
    PriceGroup { group_id: u32 },

    /// Unpacked header; zero if the chain is unassigned
    #[returns(ChainInfoResponse)]
    ChainInfo { chain_id: u64 },

    #[returns(GasPriceResponse)]
    DstGasPriceAtSrcNative { chain_id: u64 },

    #[returns(PricePerByteResponse)]
    PricePerByte { chain_id: u64 },

    /// Both prices in one read, as the router consumes them
    #[returns(PriceRecord)]
    Prices { chain_id: u64 },
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
}

#[cw_serde]
pub struct ProvidersResponse {
    pub providers: Vec<Addr>,
}

#[cw_serde]
pub struct PriceGroupResponse {
    pub group_id: u32,
    pub packed: Uint256,
    /// Slot values, slot 0 first
    pub gas_prices: Vec<u64>,
}

#[cw_serde]
pub struct ChainInfoResponse {
    pub chain_id: u64,
    pub assigned: bool,
    pub header: ChainPriceHeader,
}

#[cw_serde]
pub struct GasPriceResponse {
    pub gas_price: Uint256,
}

#[cw_serde]
pub struct PricePerByteResponse {
    pub price_per_byte: Uint256,
}
