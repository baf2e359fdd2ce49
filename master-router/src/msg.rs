//! Message types for the master router

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary};

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    pub transport: String,
    pub protocol_version: u8,
    pub max_payload_size: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Transport
    // ========================================================================
    /// Inbound envelope delivered by the transport. Always succeeds; the
    /// outcome is the status in the response data and the
    /// `proposal_executed` event.
    ExecuteProposal { message: Binary },

    // ========================================================================
    // Routers
    // ========================================================================
    /// Wrap a message in an envelope and hand it to the transport.
    /// Attached funds are forwarded.
    SendProposal {
        dst_chain_id: u64,
        message_type: u8,
        destination: Binary,
        payload: Binary,
    },

    // ========================================================================
    // Admin
    // ========================================================================
    /// `None` removes the route
    SetRoute {
        message_type: u8,
        router: Option<String>,
    },
    SetRouterAuthorization { router: String, authorized: bool },
    /// An empty identifier removes the entry
    SetRemoteMasterRouter { chain_id: u64, master_router: Binary },
    UpdateConfig {
        admin: Option<String>,
        transport: Option<String>,
        protocol_version: Option<u8>,
        max_payload_size: Option<u64>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(RouteResponse)]
    Route { message_type: u8 },

    #[returns(IsAuthorizedRouterResponse)]
    IsAuthorizedRouter { router: String },

    #[returns(RemoteMasterRouterResponse)]
    RemoteMasterRouter { chain_id: u64 },

    #[returns(StatsResponse)]
    Stats {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub transport: Addr,
    pub protocol_version: u8,
    pub max_payload_size: u64,
}

#[cw_serde]
pub struct RouteResponse {
    pub message_type: u8,
    pub router: Option<Addr>,
}

#[cw_serde]
pub struct IsAuthorizedRouterResponse {
    pub router: Addr,
    pub authorized: bool,
}

#[cw_serde]
pub struct RemoteMasterRouterResponse {
    pub chain_id: u64,
    pub master_router: Option<Binary>,
}

#[cw_serde]
pub struct StatsResponse {
    pub proposals_sent: u64,
    pub proposals_dispatched: u64,
}
