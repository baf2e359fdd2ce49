//! Connector - entry points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_apply_redeem, execute_bridge, execute_pause, execute_redeem, execute_retry_redeem,
    execute_set_chain_config, execute_unpause, execute_update_chain_configs,
    execute_update_remote_chain_configs, execute_update_router, handle_apply_reply,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_chain_configs, query_config, query_failed_execution_count, query_is_execution_failed,
    query_locked_balance, query_stats,
};
use crate::state::{
    Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, LOCKED_BALANCE, REPLY_APPLY_REDEEM,
    STATS,
};

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
        router: deps.api.addr_validate(&msg.router)?,
        token: deps.api.addr_validate(&msg.token)?,
        token_type: msg.token_type,
        decimals: msg.decimals,
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;
    STATS.save(deps.storage, &Stats::default())?;
    LOCKED_BALANCE.save(deps.storage, &Uint128::zero())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("router", config.router)
        .add_attribute("token", config.token)
        .add_attribute("token_type", config.token_type.as_str())
        .add_attribute("decimals", config.decimals.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Outbound
        ExecuteMsg::Bridge {
            dst_chain_id,
            recipient,
            amount,
            gas_limit,
            custom_payload,
        } => execute_bridge(
            deps,
            env,
            info,
            dst_chain_id,
            recipient,
            amount,
            gas_limit,
            custom_payload,
        ),
        ExecuteMsg::UpdateRemoteChainConfigs {
            dst_chain_ids,
            chain_ids,
            configs,
        } => execute_update_remote_chain_configs(deps, info, dst_chain_ids, chain_ids, configs),

        // Inbound
        ExecuteMsg::Redeem {
            recipient,
            amount,
            custom_payload,
            origin,
            gas_limit,
        } => execute_redeem(
            deps,
            env,
            info,
            recipient,
            amount,
            custom_payload,
            origin,
            gas_limit,
        ),
        ExecuteMsg::UpdateChainConfigs {
            origin,
            chain_ids,
            configs,
        } => execute_update_chain_configs(deps, info, origin, chain_ids, configs),
        ExecuteMsg::ApplyRedeem {
            recipient,
            amount,
            custom_payload,
            origin,
        } => execute_apply_redeem(deps, env, info, recipient, amount, custom_payload, origin),

        // Recovery
        ExecuteMsg::RetryRedeem {
            recipient,
            amount,
            custom_payload,
            origin,
            nonce,
        } => execute_retry_redeem(deps, info, recipient, amount, custom_payload, origin, nonce),

        // Admin
        ExecuteMsg::SetChainConfig { chain_ids, configs } => {
            execute_set_chain_config(deps, info, chain_ids, configs)
        }
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::UpdateRouter { router } => execute_update_router(deps, info, router),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        REPLY_APPLY_REDEEM => handle_apply_reply(deps, msg),
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
        QueryMsg::ChainConfigs { chain_ids } => {
            to_json_binary(&query_chain_configs(deps, chain_ids)?)
        }
        QueryMsg::IsExecutionFailed {
            recipient,
            amount,
            custom_payload,
            origin,
            nonce,
        } => to_json_binary(&query_is_execution_failed(
            deps,
            recipient,
            amount,
            custom_payload,
            origin,
            nonce,
        )?),
        QueryMsg::FailedExecutionCount {
            recipient,
            amount,
            custom_payload,
            origin,
        } => to_json_binary(&query_failed_execution_count(
            deps,
            recipient,
            amount,
            custom_payload,
            origin,
        )?),
        QueryMsg::LockedBalance {} => to_json_binary(&query_locked_balance(deps)?),
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
