//! Query handlers for the price feed

use cosmwasm_std::{Deps, Order, StdError, StdResult, Uint256};
use xbridge_protocol::price::{unpack_gas_price, ChainPriceHeader, PriceRecord, SLOTS_PER_GROUP};

use crate::msg::{
    ChainInfoResponse, ConfigResponse, GasPriceResponse, PriceGroupResponse, PricePerByteResponse,
    ProvidersResponse,
};
use crate::state::{CHAIN_HEADERS, CONFIG, PRICE_GROUPS, PROVIDERS};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
    })
}

pub fn query_providers(deps: Deps) -> StdResult<ProvidersResponse> {
    let providers = PROVIDERS
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?;
    Ok(ProvidersResponse { providers })
}

pub fn query_price_group(deps: Deps, group_id: u32) -> StdResult<PriceGroupResponse> {
    let packed = PRICE_GROUPS
        .may_load(deps.storage, group_id)?
        .unwrap_or_default();
    let gas_prices = (0..SLOTS_PER_GROUP)
        .map(|slot| unpack_gas_price(packed, slot).map_err(|e| StdError::generic_err(e.to_string())))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(PriceGroupResponse {
        group_id,
        packed,
        gas_prices,
    })
}

/// Header for `chain_id`, or `None` if the chain was never assigned.
fn load_header(deps: Deps, chain_id: u64) -> StdResult<Option<ChainPriceHeader>> {
    CHAIN_HEADERS
        .may_load(deps.storage, chain_id)?
        .map(|packed| {
            ChainPriceHeader::unpack(packed).map_err(|e| StdError::generic_err(e.to_string()))
        })
        .transpose()
}

pub fn query_chain_info(deps: Deps, chain_id: u64) -> StdResult<ChainInfoResponse> {
    let header = load_header(deps, chain_id)?;
    Ok(ChainInfoResponse {
        chain_id,
        assigned: header.is_some(),
        header: header.unwrap_or_default(),
    })
}

pub fn query_prices(deps: Deps, chain_id: u64) -> StdResult<PriceRecord> {
    let Some(header) = load_header(deps, chain_id)? else {
        return Ok(PriceRecord::default());
    };

    let group = PRICE_GROUPS
        .may_load(deps.storage, header.group_id)?
        .unwrap_or_default();
    let gas_price = unpack_gas_price(group, header.slot_offset)
        .map_err(|e| StdError::generic_err(e.to_string()))?;

    Ok(PriceRecord {
        gas_price: Uint256::from(gas_price),
        price_per_byte: Uint256::from(header.price_per_byte),
    })
}

pub fn query_dst_gas_price(deps: Deps, chain_id: u64) -> StdResult<GasPriceResponse> {
    let prices = query_prices(deps, chain_id)?;
    Ok(GasPriceResponse {
        gas_price: prices.gas_price,
    })
}

pub fn query_price_per_byte(deps: Deps, chain_id: u64) -> StdResult<PricePerByteResponse> {
    let prices = query_prices(deps, chain_id)?;
    Ok(PricePerByteResponse {
        price_per_byte: prices.price_per_byte,
    })
}
