//! Master router - entry points

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_execute_proposal, execute_send_proposal, execute_set_remote_master_router,
    execute_set_route, execute_set_router_authorization, execute_update_config,
    handle_dispatch_reply,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_is_authorized_router, query_remote_master_router, query_route,
    query_stats,
};
use crate::state::{Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, REPLY_DISPATCH, STATS};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        admin: deps.api.addr_validate(&msg.admin)?,
        transport: deps.api.addr_validate(&msg.transport)?,
        protocol_version: msg.protocol_version,
        max_payload_size: msg.max_payload_size,
    };
    CONFIG.save(deps.storage, &config)?;
    STATS.save(deps.storage, &Stats::default())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("transport", config.transport)
        .add_attribute("protocol_version", config.protocol_version.to_string())
        .add_attribute("max_payload_size", config.max_payload_size.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::ExecuteProposal { message } => execute_execute_proposal(deps, info, message),
        ExecuteMsg::SendProposal {
            dst_chain_id,
            message_type,
            destination,
            payload,
        } => execute_send_proposal(deps, info, dst_chain_id, message_type, destination, payload),

        // Admin
        ExecuteMsg::SetRoute {
            message_type,
            router,
        } => execute_set_route(deps, info, message_type, router),
        ExecuteMsg::SetRouterAuthorization { router, authorized } => {
            execute_set_router_authorization(deps, info, router, authorized)
        }
        ExecuteMsg::SetRemoteMasterRouter {
            chain_id,
            master_router,
        } => execute_set_remote_master_router(deps, info, chain_id, master_router),
        ExecuteMsg::UpdateConfig {
            admin,
            transport,
            protocol_version,
            max_payload_size,
        } => execute_update_config(
            deps,
            info,
            admin,
            transport,
            protocol_version,
            max_payload_size,
        ),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        REPLY_DISPATCH => handle_dispatch_reply(deps, msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Route { message_type } => to_json_binary(&query_route(deps, message_type)?),
        QueryMsg::IsAuthorizedRouter { router } => {
            to_json_binary(&query_is_authorized_router(deps, router)?)
        }
        QueryMsg::RemoteMasterRouter { chain_id } => {
            to_json_binary(&query_remote_master_router(deps, chain_id)?)
        }
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
