//! Query handlers for the master router.

use cosmwasm_std::{Deps, StdResult};

use crate::msg::{
    ConfigResponse, IsAuthorizedRouterResponse, RemoteMasterRouterResponse, RouteResponse,
    StatsResponse,
};
use crate::state::{AUTHORIZED_ROUTERS, CONFIG, REMOTE_MASTER_ROUTERS, ROUTES, STATS};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        transport: config.transport,
        protocol_version: config.protocol_version,
        max_payload_size: config.max_payload_size,
    })
}

pub fn query_route(deps: Deps, message_type: u8) -> StdResult<RouteResponse> {
    Ok(RouteResponse {
        message_type,
        router: ROUTES.may_load(deps.storage, message_type)?,
    })
}

pub fn query_is_authorized_router(
    deps: Deps,
    router: String,
) -> StdResult<IsAuthorizedRouterResponse> {
    let router = deps.api.addr_validate(&router)?;
    let authorized = AUTHORIZED_ROUTERS
        .may_load(deps.storage, &router)?
        .unwrap_or(false);
    Ok(IsAuthorizedRouterResponse { router, authorized })
}

pub fn query_remote_master_router(
    deps: Deps,
    chain_id: u64,
) -> StdResult<RemoteMasterRouterResponse> {
    Ok(RemoteMasterRouterResponse {
        chain_id,
        master_router: REMOTE_MASTER_ROUTERS.may_load(deps.storage, chain_id)?,
    })
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        proposals_sent: stats.proposals_sent,
        proposals_dispatched: stats.proposals_dispatched,
    })
}
