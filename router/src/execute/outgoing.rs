//! Outbound handlers (value transfers and config update requests).
//!
//! Both are called by a connector. The connector's own chain configs decide
//! where the message goes, and the connector's address is the source peer the
//! remote side will verify.

use cosmwasm_std::{
    to_json_binary, Addr, Binary, CosmosMsg, Deps, DepsMut, MessageInfo, Response, StdResult,
    Uint256, WasmMsg,
};
use xbridge_protocol::chain::validate_peer_length;
use xbridge_protocol::codec::{ConfigUpdate, ValueTransfer};
use xbridge_protocol::hash::to_hex;
use xbridge_protocol::interfaces::{
    ChainConfigsResponse, ConnectorQueryMsg, MasterRouterExecuteMsg,
};
use xbridge_protocol::{ChainConfig, MessageType};

use crate::error::ContractError;
use crate::fee_manager::{collect_fee, compute_bridge_fee};
use crate::state::{Config, CONFIG, STATS};

/// Chain configs as the calling connector holds them, one per requested id.
fn connector_chain_configs(
    deps: Deps,
    connector: &Addr,
    chain_ids: Vec<u64>,
) -> StdResult<Vec<ChainConfig>> {
    let res: ChainConfigsResponse = deps
        .querier
        .query_wasm_smart(connector, &ConnectorQueryMsg::ChainConfigs { chain_ids })?;
    Ok(res.configs)
}

fn proposal_msg(
    config: &Config,
    dst_chain_id: u64,
    message_type: MessageType,
    destination: Binary,
    payload: Vec<u8>,
) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: config.master_router.to_string(),
        msg: to_json_binary(&MasterRouterExecuteMsg::SendProposal {
            dst_chain_id,
            message_type: message_type.as_u8(),
            destination,
            payload: Binary::from(payload),
        })?,
        funds: vec![],
    }
    .into())
}

/// Execute handler for an outbound value transfer.
///
/// `amount` is already expressed in `src_decimals`, the destination's
/// precision; the connector handled the narrowing and the debit.
#[allow(clippy::too_many_arguments)]
pub fn execute_bridge(
    deps: DepsMut,
    info: MessageInfo,
    sender: String,
    recipient: Binary,
    amount: Uint256,
    src_decimals: u8,
    dst_chain_id: u64,
    gas_limit: u64,
    custom_payload: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let sender = deps.api.addr_validate(&sender)?;

    let chain = connector_chain_configs(deps.as_ref(), &info.sender, vec![dst_chain_id])?
        .into_iter()
        .next()
        .unwrap_or_default();
    if !chain.is_configured() {
        return Err(ContractError::ChainNotConfigured {
            chain_id: dst_chain_id,
        });
    }
    if chain.paused {
        return Err(ContractError::ChainPaused {
            chain_id: dst_chain_id,
        });
    }
    if gas_limit < chain.min_gas_limit {
        return Err(ContractError::GasLimitTooLow {
            gas_limit,
            min_gas_limit: chain.min_gas_limit,
        });
    }

    let transfer = ValueTransfer {
        destination: chain.peer.to_vec(),
        recipient: recipient.to_vec(),
        amount,
        src_chain_id: config.this_chain_id,
        src_peer: deps.api.addr_canonicalize(info.sender.as_str())?.to_vec(),
        src_decimals,
        gas_limit,
        custom_payload: custom_payload.to_vec(),
    };
    let payload = transfer.encode_payload();

    let fee = compute_bridge_fee(
        deps.as_ref(),
        &config,
        dst_chain_id,
        gas_limit,
        payload.len() as u64,
    )?;
    let (fee_msg, paid) = collect_fee(deps.storage, &config, &info, fee.fee)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_bridges += 1;
    STATS.save(deps.storage, &stats)?;

    let proposal = proposal_msg(
        &config,
        dst_chain_id,
        MessageType::ValueTransfer,
        chain.peer,
        payload,
    )?;

    Ok(Response::new()
        .add_submessages(fee_msg)
        .add_message(proposal)
        .add_attribute("method", "bridge")
        .add_attribute("connector", info.sender)
        .add_attribute("sender", sender)
        .add_attribute("recipient", to_hex(&recipient))
        .add_attribute("amount", amount.to_string())
        .add_attribute("src_decimals", src_decimals.to_string())
        .add_attribute("dst_chain_id", dst_chain_id.to_string())
        .add_attribute("gas_limit", gas_limit.to_string())
        .add_attribute("fee", fee.fee.to_string())
        .add_attribute("paid", paid.to_string()))
}

/// Execute handler for a config update request fanned out to several chains.
pub fn execute_request_to_update_config(
    deps: DepsMut,
    info: MessageInfo,
    dst_chain_ids: Vec<u64>,
    chain_ids: Vec<u64>,
    configs: Vec<ChainConfig>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if dst_chain_ids.is_empty() {
        return Err(ContractError::NoDestinations);
    }
    if chain_ids.len() != configs.len() {
        return Err(ContractError::LengthMismatch {
            left: chain_ids.len(),
            right: configs.len(),
        });
    }
    for chain_config in &configs {
        validate_peer_length(&chain_config.peer).map_err(|e| ContractError::InvalidPeer {
            reason: e.to_string(),
        })?;
    }

    let src_peer = deps.api.addr_canonicalize(info.sender.as_str())?.to_vec();
    let destinations = connector_chain_configs(deps.as_ref(), &info.sender, dst_chain_ids.clone())?;
    if destinations.len() != dst_chain_ids.len() {
        return Err(ContractError::LengthMismatch {
            left: dst_chain_ids.len(),
            right: destinations.len(),
        });
    }

    let mut total_fee = Uint256::zero();
    let mut proposals = Vec::with_capacity(dst_chain_ids.len());
    for (dst_chain_id, destination) in dst_chain_ids.iter().zip(destinations) {
        if !destination.is_configured() {
            return Err(ContractError::ChainNotConfigured {
                chain_id: *dst_chain_id,
            });
        }

        let update = ConfigUpdate {
            destination: destination.peer.to_vec(),
            src_chain_id: config.this_chain_id,
            src_peer: src_peer.clone(),
            chain_ids: chain_ids.clone(),
            configs: configs.clone(),
        };
        let payload = update.encode_payload();

        let fee = compute_bridge_fee(
            deps.as_ref(),
            &config,
            *dst_chain_id,
            config.update_gas_limit,
            payload.len() as u64,
        )?;
        total_fee = total_fee.checked_add(fee.fee)?;

        proposals.push(proposal_msg(
            &config,
            *dst_chain_id,
            MessageType::ConfigUpdate,
            destination.peer,
            payload,
        )?);
    }

    let (fee_msg, paid) = collect_fee(deps.storage, &config, &info, total_fee)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_config_updates += proposals.len() as u64;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_submessages(fee_msg)
        .add_messages(proposals)
        .add_attribute("method", "request_to_update_config")
        .add_attribute("connector", info.sender)
        .add_attribute("destinations", dst_chain_ids.len().to_string())
        .add_attribute("chains", chain_ids.len().to_string())
        .add_attribute("fee", total_fee.to_string())
        .add_attribute("paid", paid.to_string()))
}
