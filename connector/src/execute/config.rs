//! Chain configuration and admin handlers.

use cosmwasm_std::{DepsMut, MessageInfo, Response, Storage};
use xbridge_protocol::chain::{validate_peer_length, verify_peer};
use xbridge_protocol::status::status_data;
use xbridge_protocol::{ChainConfig, Origin, Status};

use crate::error::ContractError;
use crate::state::{CHAIN_CONFIGS, CONFIG};

/// Replace the records for `chain_ids`. Nothing is written unless every
/// record is valid.
fn save_chain_configs(
    storage: &mut dyn Storage,
    chain_ids: &[u64],
    configs: &[ChainConfig],
) -> Result<(), ContractError> {
    if chain_ids.len() != configs.len() {
        return Err(ContractError::LengthMismatch {
            chain_ids: chain_ids.len(),
            configs: configs.len(),
        });
    }
    for chain_config in configs {
        validate_peer_length(&chain_config.peer).map_err(|e| ContractError::InvalidPeer {
            reason: e.to_string(),
        })?;
    }

    for (chain_id, chain_config) in chain_ids.iter().zip(configs) {
        CHAIN_CONFIGS.save(storage, *chain_id, chain_config)?;
    }
    Ok(())
}

pub fn execute_set_chain_config(
    deps: DepsMut,
    info: MessageInfo,
    chain_ids: Vec<u64>,
    configs: Vec<ChainConfig>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    save_chain_configs(deps.storage, &chain_ids, &configs)?;

    Ok(Response::new()
        .add_attribute("method", "set_chain_config")
        .add_attribute("chains", chain_ids.len().to_string()))
}

/// Config update from a remote connector, delivered by the router.
///
/// The asserted origin peer must match the stored peer for the origin chain;
/// otherwise the status is `InvalidPeer` and nothing changes.
pub fn execute_update_chain_configs(
    deps: DepsMut,
    info: MessageInfo,
    origin: Origin,
    chain_ids: Vec<u64>,
    configs: Vec<ChainConfig>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.router {
        return Err(ContractError::UnauthorizedRouter);
    }

    let stored = CHAIN_CONFIGS
        .may_load(deps.storage, origin.src_chain_id)?
        .unwrap_or_default();
    if let Err(e) = verify_peer(&stored.peer, &origin.src_peer) {
        return Ok(Response::new()
            .set_data(status_data(Status::InvalidPeer))
            .add_attribute("method", "update_chain_configs")
            .add_attribute("status", Status::InvalidPeer.as_str())
            .add_attribute("src_chain_id", origin.src_chain_id.to_string())
            .add_attribute("reason", e.to_string()));
    }

    save_chain_configs(deps.storage, &chain_ids, &configs)?;

    Ok(Response::new()
        .set_data(status_data(Status::Success))
        .add_attribute("method", "update_chain_configs")
        .add_attribute("status", Status::Success.as_str())
        .add_attribute("src_chain_id", origin.src_chain_id.to_string())
        .add_attribute("chains", chain_ids.len().to_string()))
}

// ============================================================================
// Admin
// ============================================================================

pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("method", "pause"))
}

pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("method", "unpause"))
}

pub fn execute_update_router(
    deps: DepsMut,
    info: MessageInfo,
    router: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    config.router = deps.api.addr_validate(&router)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_router")
        .add_attribute("router", config.router))
}
