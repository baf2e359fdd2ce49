//! Messages each component sends to its neighbours
//!
//! A component only ever depends on the capability it calls, never on the
//! concrete contract behind it. Each contract's own `ExecuteMsg` / `QueryMsg`
//! carries matching variants so these serialize to the same JSON.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128, Uint256};

use crate::chain::{ChainConfig, Origin};
use crate::price::PriceRecord;

/// Router -> connector
#[cw_serde]
pub enum ConnectorExecuteMsg {
    /// Deliver an inbound value transfer.
    Redeem {
        recipient: Binary,
        amount: Uint256,
        custom_payload: Binary,
        origin: Origin,
        gas_limit: u64,
    },
    /// Replace chain configs on behalf of the peer connector.
    UpdateChainConfigs {
        origin: Origin,
        chain_ids: Vec<u64>,
        configs: Vec<ChainConfig>,
    },
}

/// Router -> connector
#[cw_serde]
#[derive(QueryResponses)]
pub enum ConnectorQueryMsg {
    #[returns(ChainConfigsResponse)]
    ChainConfigs { chain_ids: Vec<u64> },
}

#[cw_serde]
pub struct ChainConfigsResponse {
    pub configs: Vec<ChainConfig>,
}

/// Connector -> router, master router -> router
#[cw_serde]
pub enum RouterExecuteMsg {
    Bridge {
        sender: String,
        recipient: Binary,
        /// Amount in remote decimals
        amount: Uint256,
        /// Decimals `amount` is expressed in
        src_decimals: u8,
        dst_chain_id: u64,
        gas_limit: u64,
        custom_payload: Binary,
    },
    RequestToUpdateConfig {
        dst_chain_ids: Vec<u64>,
        chain_ids: Vec<u64>,
        configs: Vec<ChainConfig>,
    },
    HandleMessage {
        message_type: u8,
        destination: Binary,
        payload: Binary,
    },
}

/// Router -> master router
#[cw_serde]
pub enum MasterRouterExecuteMsg {
    SendProposal {
        dst_chain_id: u64,
        message_type: u8,
        destination: Binary,
        payload: Binary,
    },
}

/// Router -> price feed
#[cw_serde]
#[derive(QueryResponses)]
pub enum PriceFeedQueryMsg {
    #[returns(PriceRecord)]
    Prices { chain_id: u64 },
}

/// Master router -> transport
#[cw_serde]
pub enum TransportExecuteMsg {
    SendMessage {
        dst_chain_id: u64,
        /// Remote master router
        receiver: Binary,
        message: Binary,
    },
}

/// Connector -> recipient, when a transfer carries a custom payload
#[cw_serde]
pub enum RedeemHookMsg {
    OnBridgeRedeem {
        origin: Origin,
        /// Amount credited, in local decimals
        amount: Uint128,
        custom_payload: Binary,
    },
}
