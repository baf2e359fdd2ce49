//! Admin handlers for routes, router authorization, and remote master routers.

use cosmwasm_std::{Binary, Deps, DepsMut, MessageInfo, Response};
use xbridge_protocol::chain::validate_peer_length;
use xbridge_protocol::hash::to_hex;

use crate::error::ContractError;
use crate::state::{AUTHORIZED_ROUTERS, CONFIG, REMOTE_MASTER_ROUTERS, ROUTES};

fn assert_admin(deps: Deps, info: &MessageInfo) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

pub fn execute_set_route(
    deps: DepsMut,
    info: MessageInfo,
    message_type: u8,
    router: Option<String>,
) -> Result<Response, ContractError> {
    assert_admin(deps.as_ref(), &info)?;

    let router = match router {
        Some(router) => {
            let router = deps.api.addr_validate(&router)?;
            ROUTES.save(deps.storage, message_type, &router)?;
            router.to_string()
        }
        None => {
            ROUTES.remove(deps.storage, message_type);
            "none".to_string()
        }
    };

    Ok(Response::new()
        .add_attribute("method", "set_route")
        .add_attribute("message_type", message_type.to_string())
        .add_attribute("router", router))
}

pub fn execute_set_router_authorization(
    deps: DepsMut,
    info: MessageInfo,
    router: String,
    authorized: bool,
) -> Result<Response, ContractError> {
    assert_admin(deps.as_ref(), &info)?;

    let router = deps.api.addr_validate(&router)?;
    if authorized {
        AUTHORIZED_ROUTERS.save(deps.storage, &router, &true)?;
    } else {
        AUTHORIZED_ROUTERS.remove(deps.storage, &router);
    }

    Ok(Response::new()
        .add_attribute("method", "set_router_authorization")
        .add_attribute("router", router)
        .add_attribute("authorized", authorized.to_string()))
}

pub fn execute_set_remote_master_router(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u64,
    master_router: Binary,
) -> Result<Response, ContractError> {
    assert_admin(deps.as_ref(), &info)?;

    validate_peer_length(&master_router).map_err(|e| {
        ContractError::InvalidRemoteMasterRouter {
            reason: e.to_string(),
        }
    })?;
    if master_router.is_empty() {
        REMOTE_MASTER_ROUTERS.remove(deps.storage, chain_id);
    } else {
        REMOTE_MASTER_ROUTERS.save(deps.storage, chain_id, &master_router)?;
    }

    Ok(Response::new()
        .add_attribute("method", "set_remote_master_router")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("master_router", to_hex(&master_router)))
}

pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    admin: Option<String>,
    transport: Option<String>,
    protocol_version: Option<u8>,
    max_payload_size: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    if let Some(admin) = admin {
        config.admin = deps.api.addr_validate(&admin)?;
    }
    if let Some(transport) = transport {
        config.transport = deps.api.addr_validate(&transport)?;
    }
    if let Some(version) = protocol_version {
        config.protocol_version = version;
    }
    if let Some(max) = max_payload_size {
        config.max_payload_size = max;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_config")
        .add_attribute("admin", config.admin)
        .add_attribute("transport", config.transport)
        .add_attribute("protocol_version", config.protocol_version.to_string())
        .add_attribute("max_payload_size", config.max_payload_size.to_string()))
}
