//! Query handlers for the router.

use cosmwasm_std::{Binary, Deps, Order, StdError, StdResult, Uint256};
use xbridge_protocol::codec::{ConfigUpdate, ValueTransfer};
use xbridge_protocol::{ChainConfig, Status};

use crate::fee_manager::compute_bridge_fee;
use crate::msg::{
    BridgeFeeResponse, ConfigResponse, ProtocolFeeResponse, StatsResponse, StatusCount,
    UpdateFeeResponse,
};
use crate::state::{CONFIG, INBOUND_BY_STATUS, PROTOCOL_FEES, STATS};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        master_router: config.master_router,
        price_feed: config.price_feed,
        fee_collector: config.fee_collector,
        fee_denom: config.fee_denom,
        this_chain_id: config.this_chain_id,
        update_gas_limit: config.update_gas_limit,
    })
}

pub fn query_protocol_fee(deps: Deps, chain_id: u64) -> StdResult<ProtocolFeeResponse> {
    let fee_bps = PROTOCOL_FEES
        .may_load(deps.storage, chain_id)?
        .unwrap_or_default();
    Ok(ProtocolFeeResponse { chain_id, fee_bps })
}

pub fn query_bridge_fee(
    deps: Deps,
    chain_id: u64,
    gas_limit: u64,
    payload_length: u64,
) -> StdResult<BridgeFeeResponse> {
    let config = CONFIG.load(deps.storage)?;
    compute_bridge_fee(deps, &config, chain_id, gas_limit, payload_length)
}

/// Sizes the payload the connector would send. The amount word has a fixed
/// width, so any amount gives the same length.
pub fn query_estimate_bridge_fee(
    deps: Deps,
    connector: String,
    dst_chain_id: u64,
    recipient: Binary,
    custom_payload: Binary,
    gas_limit: u64,
) -> StdResult<BridgeFeeResponse> {
    let config = CONFIG.load(deps.storage)?;
    let connector = deps.api.addr_validate(&connector)?;

    let transfer = ValueTransfer {
        destination: vec![],
        recipient: recipient.to_vec(),
        amount: Uint256::zero(),
        src_chain_id: config.this_chain_id,
        src_peer: deps.api.addr_canonicalize(connector.as_str())?.to_vec(),
        src_decimals: 0,
        gas_limit,
        custom_payload: custom_payload.to_vec(),
    };
    let payload_length = transfer.encode_payload().len() as u64;

    compute_bridge_fee(deps, &config, dst_chain_id, gas_limit, payload_length)
}

pub fn query_update_fee(
    deps: Deps,
    connector: String,
    dst_chain_ids: Vec<u64>,
    chain_ids: Vec<u64>,
    configs: Vec<ChainConfig>,
) -> StdResult<UpdateFeeResponse> {
    let config = CONFIG.load(deps.storage)?;
    let connector = deps.api.addr_validate(&connector)?;

    let update = ConfigUpdate {
        destination: vec![],
        src_chain_id: config.this_chain_id,
        src_peer: deps.api.addr_canonicalize(connector.as_str())?.to_vec(),
        chain_ids,
        configs,
    };
    let payload_length = update.encode_payload().len() as u64;

    let fees = dst_chain_ids
        .into_iter()
        .map(|chain_id| {
            compute_bridge_fee(deps, &config, chain_id, config.update_gas_limit, payload_length)
        })
        .collect::<StdResult<Vec<_>>>()?;
    let total = fees.iter().try_fold(Uint256::zero(), |acc, fee| {
        acc.checked_add(fee.fee).map_err(StdError::from)
    })?;

    Ok(UpdateFeeResponse { total, fees })
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    let inbound = INBOUND_BY_STATUS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            let (code, count) = item?;
            let status = Status::from_code(code)
                .ok_or_else(|| StdError::generic_err(format!("unknown status code {}", code)))?;
            Ok(StatusCount { status, count })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(StatsResponse {
        total_bridges: stats.total_bridges,
        total_config_updates: stats.total_config_updates,
        total_fees_collected: stats.total_fees_collected,
        total_fees_retained: stats.total_fees_retained,
        total_fees_swept: stats.total_fees_swept,
        inbound,
    })
}
