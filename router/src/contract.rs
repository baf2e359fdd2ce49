//! Router - entry points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `fee_manager` - fee pricing and collection
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_bridge, execute_handle_message, execute_request_to_update_config,
    execute_set_protocol_fee, execute_sweep, execute_update_config, handle_delivery_reply,
    handle_fee_reply,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_bridge_fee, query_config, query_estimate_bridge_fee, query_protocol_fee, query_stats,
    query_update_fee,
};
use crate::state::{
    Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, REPLY_DELIVERY, REPLY_FEE_TRANSFER,
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
        master_router: deps.api.addr_validate(&msg.master_router)?,
        price_feed: deps.api.addr_validate(&msg.price_feed)?,
        fee_collector: deps.api.addr_validate(&msg.fee_collector)?,
        fee_denom: msg.fee_denom,
        this_chain_id: msg.this_chain_id,
        update_gas_limit: msg.update_gas_limit,
    };
    CONFIG.save(deps.storage, &config)?;
    STATS.save(deps.storage, &Stats::default())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("master_router", config.master_router)
        .add_attribute("this_chain_id", config.this_chain_id.to_string())
        .add_attribute("fee_denom", config.fee_denom))
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
            sender,
            recipient,
            amount,
            src_decimals,
            dst_chain_id,
            gas_limit,
            custom_payload,
        } => execute_bridge(
            deps,
            info,
            sender,
            recipient,
            amount,
            src_decimals,
            dst_chain_id,
            gas_limit,
            custom_payload,
        ),
        ExecuteMsg::RequestToUpdateConfig {
            dst_chain_ids,
            chain_ids,
            configs,
        } => execute_request_to_update_config(deps, info, dst_chain_ids, chain_ids, configs),

        // Inbound
        ExecuteMsg::HandleMessage {
            message_type,
            destination,
            payload,
        } => execute_handle_message(deps, info, message_type, destination, payload),

        // Admin
        ExecuteMsg::SetProtocolFee { chain_ids, fee_bps } => {
            execute_set_protocol_fee(deps, info, chain_ids, fee_bps)
        }
        ExecuteMsg::UpdateConfig {
            admin,
            master_router,
            price_feed,
            fee_collector,
            fee_denom,
            update_gas_limit,
        } => execute_update_config(
            deps,
            info,
            admin,
            master_router,
            price_feed,
            fee_collector,
            fee_denom,
            update_gas_limit,
        ),
        ExecuteMsg::Sweep {} => execute_sweep(deps, env),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        REPLY_FEE_TRANSFER => handle_fee_reply(deps, msg),
        REPLY_DELIVERY => handle_delivery_reply(deps, msg),
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
        QueryMsg::ProtocolFee { chain_id } => to_json_binary(&query_protocol_fee(deps, chain_id)?),
        QueryMsg::BridgeFee {
            chain_id,
            gas_limit,
            payload_length,
        } => to_json_binary(&query_bridge_fee(
            deps,
            chain_id,
            gas_limit,
            payload_length,
        )?),
        QueryMsg::EstimateBridgeFee {
            connector,
            dst_chain_id,
            recipient,
            custom_payload,
            gas_limit,
        } => to_json_binary(&query_estimate_bridge_fee(
            deps,
            connector,
            dst_chain_id,
            recipient,
            custom_payload,
            gas_limit,
        )?),
        QueryMsg::UpdateFee {
            connector,
            dst_chain_ids,
            chain_ids,
            configs,
        } => to_json_binary(&query_update_fee(
            deps,
            connector,
            dst_chain_ids,
            chain_ids,
            configs,
        )?),
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
