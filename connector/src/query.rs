//! Query handlers for the connector.

use cosmwasm_std::{Binary, Deps, StdResult, Uint256};
use xbridge_protocol::hash::{failed_execution_key, to_hex};
use xbridge_protocol::interfaces::ChainConfigsResponse;
use xbridge_protocol::Origin;

use crate::msg::{
    ConfigResponse, FailedExecutionCountResponse, IsExecutionFailedResponse,
    LockedBalanceResponse, StatsResponse,
};
use crate::state::{
    CHAIN_CONFIGS, CONFIG, FAILED_EXECUTIONS, FAILED_NONCES, LOCKED_BALANCE, STATS,
};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        router: config.router,
        token: config.token,
        token_type: config.token_type,
        decimals: config.decimals,
        paused: config.paused,
    })
}

pub fn query_chain_configs(deps: Deps, chain_ids: Vec<u64>) -> StdResult<ChainConfigsResponse> {
    let configs = chain_ids
        .into_iter()
        .map(|chain_id| {
            Ok(CHAIN_CONFIGS
                .may_load(deps.storage, chain_id)?
                .unwrap_or_default())
        })
        .collect::<StdResult<Vec<_>>>()?;
    Ok(ChainConfigsResponse { configs })
}

pub fn query_is_execution_failed(
    deps: Deps,
    recipient: Binary,
    amount: Uint256,
    custom_payload: Binary,
    origin: Origin,
    nonce: u64,
) -> StdResult<IsExecutionFailedResponse> {
    let key = failed_execution_key(&recipient, amount, &custom_payload, &origin);
    let failed = FAILED_EXECUTIONS
        .may_load(deps.storage, (key.as_slice(), nonce))?
        .unwrap_or(false);
    Ok(IsExecutionFailedResponse {
        key: to_hex(&key),
        nonce,
        failed,
    })
}

pub fn query_failed_execution_count(
    deps: Deps,
    recipient: Binary,
    amount: Uint256,
    custom_payload: Binary,
    origin: Origin,
) -> StdResult<FailedExecutionCountResponse> {
    let key = failed_execution_key(&recipient, amount, &custom_payload, &origin);
    let count = FAILED_NONCES
        .may_load(deps.storage, key.as_slice())?
        .unwrap_or_default();
    Ok(FailedExecutionCountResponse {
        key: to_hex(&key),
        count,
    })
}

pub fn query_locked_balance(deps: Deps) -> StdResult<LockedBalanceResponse> {
    Ok(LockedBalanceResponse {
        amount: LOCKED_BALANCE.may_load(deps.storage)?.unwrap_or_default(),
    })
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        total_bridges: stats.total_bridges,
        total_bridged: stats.total_bridged,
        total_redeems: stats.total_redeems,
        total_redeemed: stats.total_redeemed,
        total_failed_recorded: stats.total_failed_recorded,
        total_retried: stats.total_retried,
    })
}
