//! Outbound handlers: value transfers and remote config update requests.

use cosmwasm_std::{
    to_json_binary, Binary, CosmosMsg, DepsMut, Env, MessageInfo, Response, Uint128, Uint256,
    WasmMsg,
};
use cw20::Cw20ExecuteMsg;
use xbridge_protocol::chain::validate_peer_length;
use xbridge_protocol::decimals::{convert, remove_dust};
use xbridge_protocol::hash::to_hex;
use xbridge_protocol::interfaces::RouterExecuteMsg;
use xbridge_protocol::ChainConfig;

use crate::error::ContractError;
use crate::state::{TokenType, CHAIN_CONFIGS, CONFIG, LOCKED_BALANCE, STATS};

/// Execute handler for an outbound transfer.
///
/// The amount is narrowed to the remote decimals first; only the part that
/// survives narrowing is debited, so the dust stays with the sender.
#[allow(clippy::too_many_arguments)]
pub fn execute_bridge(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    dst_chain_id: u64,
    recipient: Binary,
    amount: Uint128,
    gas_limit: u64,
    custom_payload: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if config.paused {
        return Err(ContractError::Paused);
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    if recipient.is_empty() {
        return Err(ContractError::EmptyRecipient);
    }

    let chain = CHAIN_CONFIGS
        .may_load(deps.storage, dst_chain_id)?
        .filter(ChainConfig::is_configured)
        .ok_or(ContractError::ChainNotConfigured {
            chain_id: dst_chain_id,
        })?;

    let remote_amount = convert(Uint256::from(amount), config.decimals, chain.remote_decimals)?;
    if remote_amount.is_zero() {
        return Err(ContractError::AmountBelowPrecision {
            amount,
            remote_decimals: chain.remote_decimals,
        });
    }
    // never more than `amount`, so it fits
    let debit = remove_dust(Uint256::from(amount), config.decimals, chain.remote_decimals)?;
    let debit = Uint128::try_from(debit)
        .map_err(|_| ContractError::AmountTooLarge { amount: debit })?;

    let debit_msg = match config.token_type {
        TokenType::MintBurn => Cw20ExecuteMsg::BurnFrom {
            owner: info.sender.to_string(),
            amount: debit,
        },
        TokenType::LockUnlock => {
            let locked = LOCKED_BALANCE.may_load(deps.storage)?.unwrap_or_default();
            LOCKED_BALANCE.save(deps.storage, &locked.checked_add(debit)?)?;
            Cw20ExecuteMsg::TransferFrom {
                owner: info.sender.to_string(),
                recipient: env.contract.address.to_string(),
                amount: debit,
            }
        }
    };

    let mut stats = STATS.load(deps.storage)?;
    stats.total_bridges += 1;
    stats.total_bridged = stats.total_bridged.checked_add(debit)?;
    STATS.save(deps.storage, &stats)?;

    let messages: Vec<CosmosMsg> = vec![
        WasmMsg::Execute {
            contract_addr: config.token.to_string(),
            msg: to_json_binary(&debit_msg)?,
            funds: vec![],
        }
        .into(),
        WasmMsg::Execute {
            contract_addr: config.router.to_string(),
            msg: to_json_binary(&RouterExecuteMsg::Bridge {
                sender: info.sender.to_string(),
                recipient: recipient.clone(),
                amount: remote_amount,
                src_decimals: chain.remote_decimals,
                dst_chain_id,
                gas_limit,
                custom_payload,
            })?,
            funds: info.funds,
        }
        .into(),
    ];

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "bridge")
        .add_attribute("sender", info.sender)
        .add_attribute("recipient", to_hex(&recipient))
        .add_attribute("dst_chain_id", dst_chain_id.to_string())
        .add_attribute("amount", amount)
        .add_attribute("debited", debit)
        .add_attribute("remote_amount", remote_amount.to_string())
        .add_attribute("token_type", config.token_type.as_str()))
}

/// Execute handler for pushing chain configs to remote connectors.
pub fn execute_update_remote_chain_configs(
    deps: DepsMut,
    info: MessageInfo,
    dst_chain_ids: Vec<u64>,
    chain_ids: Vec<u64>,
    configs: Vec<ChainConfig>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    if chain_ids.len() != configs.len() {
        return Err(ContractError::LengthMismatch {
            chain_ids: chain_ids.len(),
            configs: configs.len(),
        });
    }
    for chain_config in &configs {
        validate_peer_length(&chain_config.peer).map_err(|e| ContractError::InvalidPeer {
            reason: e.to_string(),
        })?;
    }

    let destinations = dst_chain_ids.len();
    let msg = WasmMsg::Execute {
        contract_addr: config.router.to_string(),
        msg: to_json_binary(&RouterExecuteMsg::RequestToUpdateConfig {
            dst_chain_ids,
            chain_ids,
            configs,
        })?,
        funds: info.funds,
    };

    Ok(Response::new()
        .add_message(msg)
        .add_attribute("method", "update_remote_chain_configs")
        .add_attribute("destinations", destinations.to_string()))
}
