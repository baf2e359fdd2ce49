//! Execute handlers for the price feed

use cosmwasm_std::{Addr, Deps, DepsMut, MessageInfo, Response, Uint256};
use xbridge_protocol::price::ChainPriceHeader;

use crate::error::ContractError;
use crate::state::{CHAIN_HEADERS, CONFIG, PRICE_GROUPS, PROVIDERS};

fn assert_admin(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Providers and the admin may publish.
fn assert_publisher(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender == config.admin || PROVIDERS.has(deps.storage, sender) {
        return Ok(());
    }
    Err(ContractError::UnauthorizedProvider)
}

// ============================================================================
// Prices
// ============================================================================

pub fn execute_set_prices(
    deps: DepsMut,
    info: MessageInfo,
    group_ids: Vec<u32>,
    packed_values: Vec<Uint256>,
) -> Result<Response, ContractError> {
    assert_publisher(deps.as_ref(), &info.sender)?;

    if group_ids.len() != packed_values.len() {
        return Err(ContractError::LengthMismatch {
            keys: group_ids.len(),
            values: packed_values.len(),
        });
    }

    for (group_id, packed) in group_ids.iter().zip(packed_values.iter()) {
        PRICE_GROUPS.save(deps.storage, *group_id, packed)?;
    }

    Ok(Response::new()
        .add_attribute("method", "set_prices")
        .add_attribute("provider", info.sender)
        .add_attribute("groups", group_ids.len().to_string()))
}

pub fn execute_set_chain_info(
    deps: DepsMut,
    info: MessageInfo,
    chain_ids: Vec<u64>,
    packed_headers: Vec<Uint256>,
) -> Result<Response, ContractError> {
    assert_publisher(deps.as_ref(), &info.sender)?;

    if chain_ids.len() != packed_headers.len() {
        return Err(ContractError::LengthMismatch {
            keys: chain_ids.len(),
            values: packed_headers.len(),
        });
    }

    // Validate the whole batch before writing any of it
    for (chain_id, packed) in chain_ids.iter().zip(packed_headers.iter()) {
        ChainPriceHeader::unpack(*packed).map_err(|e| ContractError::InvalidHeader {
            chain_id: *chain_id,
            reason: e.to_string(),
        })?;
    }
    for (chain_id, packed) in chain_ids.iter().zip(packed_headers.iter()) {
        CHAIN_HEADERS.save(deps.storage, *chain_id, packed)?;
    }

    Ok(Response::new()
        .add_attribute("method", "set_chain_info")
        .add_attribute("provider", info.sender)
        .add_attribute("chains", chain_ids.len().to_string()))
}

// ============================================================================
// Providers & admin
// ============================================================================

pub fn execute_add_provider(
    deps: DepsMut,
    info: MessageInfo,
    provider: String,
) -> Result<Response, ContractError> {
    assert_admin(deps.as_ref(), &info.sender)?;

    let provider_addr = deps.api.addr_validate(&provider)?;
    if PROVIDERS.has(deps.storage, &provider_addr) {
        return Err(ContractError::ProviderAlreadyExists { provider });
    }
    PROVIDERS.save(deps.storage, &provider_addr, &true)?;

    Ok(Response::new()
        .add_attribute("method", "add_provider")
        .add_attribute("provider", provider_addr))
}

pub fn execute_remove_provider(
    deps: DepsMut,
    info: MessageInfo,
    provider: String,
) -> Result<Response, ContractError> {
    assert_admin(deps.as_ref(), &info.sender)?;

    let provider_addr = deps.api.addr_validate(&provider)?;
    if !PROVIDERS.has(deps.storage, &provider_addr) {
        return Err(ContractError::ProviderNotFound { provider });
    }
    PROVIDERS.remove(deps.storage, &provider_addr);

    Ok(Response::new()
        .add_attribute("method", "remove_provider")
        .add_attribute("provider", provider_addr))
}

pub fn execute_update_admin(
    deps: DepsMut,
    info: MessageInfo,
    admin: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    config.admin = deps.api.addr_validate(&admin)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_admin")
        .add_attribute("admin", config.admin))
}
