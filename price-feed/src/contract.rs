//! Price feed - entry points

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_add_provider, execute_remove_provider, execute_set_chain_info, execute_set_prices,
    execute_update_admin,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_chain_info, query_config, query_dst_gas_price, query_price_group, query_price_per_byte,
    query_prices, query_providers,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, PROVIDERS};

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

    let admin = deps.api.addr_validate(&msg.admin)?;
    CONFIG.save(deps.storage, &Config { admin: admin.clone() })?;

    for provider in &msg.providers {
        let provider = deps.api.addr_validate(provider)?;
        PROVIDERS.save(deps.storage, &provider, &true)?;
    }

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", admin)
        .add_attribute("provider_count", msg.providers.len().to_string()))
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
        ExecuteMsg::SetPrices {
            group_ids,
            packed_values,
        } => execute_set_prices(deps, info, group_ids, packed_values),
        ExecuteMsg::SetChainInfo {
            chain_ids,
            packed_headers,
        } => execute_set_chain_info(deps, info, chain_ids, packed_headers),
        ExecuteMsg::AddProvider { provider } => execute_add_provider(deps, info, provider),
        ExecuteMsg::RemoveProvider { provider } => execute_remove_provider(deps, info, provider),
        ExecuteMsg::UpdateAdmin { admin } => execute_update_admin(deps, info, admin),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Providers {} => to_json_binary(&query_providers(deps)?),
        QueryMsg::PriceGroup { group_id } => to_json_binary(&query_price_group(deps, group_id)?),
        QueryMsg::ChainInfo { chain_id } => to_json_binary(&query_chain_info(deps, chain_id)?),
        QueryMsg::DstGasPriceAtSrcNative { chain_id } => {
            to_json_binary(&query_dst_gas_price(deps, chain_id)?)
        }
        QueryMsg::PricePerByte { chain_id } => {
            to_json_binary(&query_price_per_byte(deps, chain_id)?)
        }
        QueryMsg::Prices { chain_id } => to_json_binary(&query_prices(deps, chain_id)?),
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
