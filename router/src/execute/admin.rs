//! Admin operations handlers.
//!
//! This module handles:
//! - Protocol fee configuration
//! - Config updates
//! - Sweeping retained fees

use cosmwasm_std::{coins, BankMsg, DepsMut, Env, MessageInfo, Response};
use xbridge_protocol::fee::validate_protocol_fee_bps;

use crate::error::ContractError;
use crate::state::{CONFIG, PROTOCOL_FEES, STATS};

/// Set the protocol surcharge for each listed destination chain.
pub fn execute_set_protocol_fee(
    deps: DepsMut,
    info: MessageInfo,
    chain_ids: Vec<u64>,
    fee_bps: Vec<u16>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    if chain_ids.len() != fee_bps.len() {
        return Err(ContractError::LengthMismatch {
            left: chain_ids.len(),
            right: fee_bps.len(),
        });
    }
    for bps in &fee_bps {
        validate_protocol_fee_bps(*bps)
            .map_err(|_| ContractError::InvalidFeeBps { fee_bps: *bps })?;
    }

    for (chain_id, bps) in chain_ids.iter().zip(fee_bps.iter()) {
        PROTOCOL_FEES.save(deps.storage, *chain_id, bps)?;
    }

    Ok(Response::new()
        .add_attribute("method", "set_protocol_fee")
        .add_attribute("chains", chain_ids.len().to_string()))
}

#[allow(clippy::too_many_arguments)]
pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    admin: Option<String>,
    master_router: Option<String>,
    price_feed: Option<String>,
    fee_collector: Option<String>,
    fee_denom: Option<String>,
    update_gas_limit: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    if let Some(admin) = admin {
        config.admin = deps.api.addr_validate(&admin)?;
    }
    if let Some(master_router) = master_router {
        config.master_router = deps.api.addr_validate(&master_router)?;
    }
    if let Some(price_feed) = price_feed {
        config.price_feed = deps.api.addr_validate(&price_feed)?;
    }
    if let Some(fee_collector) = fee_collector {
        config.fee_collector = deps.api.addr_validate(&fee_collector)?;
    }
    if let Some(fee_denom) = fee_denom {
        config.fee_denom = fee_denom;
    }
    if let Some(update_gas_limit) = update_gas_limit {
        config.update_gas_limit = update_gas_limit;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_config")
        .add_attribute("admin", config.admin)
        .add_attribute("master_router", config.master_router)
        .add_attribute("price_feed", config.price_feed)
        .add_attribute("fee_collector", config.fee_collector))
}

/// Send the router's whole fee-denom balance to the fee collector. Anyone may call.
pub fn execute_sweep(deps: DepsMut, env: Env) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let balance = deps
        .querier
        .query_balance(&env.contract.address, &config.fee_denom)?;
    if balance.amount.is_zero() {
        return Err(ContractError::NothingToSweep);
    }

    let mut stats = STATS.load(deps.storage)?;
    stats.total_fees_swept = stats.total_fees_swept.checked_add(balance.amount)?;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: config.fee_collector.to_string(),
            amount: coins(balance.amount.u128(), &config.fee_denom),
        })
        .add_attribute("method", "sweep")
        .add_attribute("amount", balance.amount.to_string())
        .add_attribute("fee_collector", config.fee_collector))
}
