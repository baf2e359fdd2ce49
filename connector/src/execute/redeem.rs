//! Inbound redeems and the failed execution records.
//!
//! A redeem delivered by the router ends in one status:
//! - `InvalidPeer` / `MalformedAddress`: rejected, nothing stored
//! - `RecordedForRetry`: the connector is paused or the apply step failed
//! - `Success`: credited
//!
//! A record is keyed by `failed_execution_key` plus a nonce, so identical
//! deliveries that fail get separate records. `RetryRedeem` clears the record
//! in the same transaction that credits, so a record can pay out only once.

use cosmwasm_std::{
    to_json_binary, Binary, CanonicalAddr, CosmosMsg, DepsMut, Env, Event, MessageInfo, Reply,
    Response, Storage, SubMsg, SubMsgResult, Uint128, Uint256, WasmMsg,
};
use cw20::Cw20ExecuteMsg;
use xbridge_protocol::chain::verify_peer;
use xbridge_protocol::decimals::convert;
use xbridge_protocol::hash::{failed_execution_key, to_hex};
use xbridge_protocol::interfaces::RedeemHookMsg;
use xbridge_protocol::status::status_data;
use xbridge_protocol::{Origin, Status};

use crate::error::ContractError;
use crate::msg::ExecuteMsg;
use crate::state::{
    PendingRedeem, TokenType, CHAIN_CONFIGS, CONFIG, FAILED_EXECUTIONS, FAILED_NONCES,
    LOCKED_BALANCE, PENDING_REDEEM, REPLY_APPLY_REDEEM, STATS,
};

fn rejected(status: Status, origin: &Origin, reason: String) -> Response {
    Response::new()
        .set_data(status_data(status))
        .add_attribute("method", "redeem")
        .add_attribute("status", status.as_str())
        .add_attribute("src_chain_id", origin.src_chain_id.to_string())
        .add_attribute("reason", reason)
}

/// Store a pending record under the next nonce for its key.
fn record_failure(
    storage: &mut dyn Storage,
    pending: &PendingRedeem,
    reason: &str,
) -> Result<Response, ContractError> {
    let key = failed_execution_key(
        &pending.recipient,
        pending.amount,
        &pending.custom_payload,
        &pending.origin,
    );
    let nonce = FAILED_NONCES
        .may_load(storage, key.as_slice())?
        .unwrap_or_default();
    FAILED_EXECUTIONS.save(storage, (key.as_slice(), nonce), &true)?;
    FAILED_NONCES.save(storage, key.as_slice(), &(nonce + 1))?;

    let mut stats = STATS.load(storage)?;
    stats.total_failed_recorded += 1;
    STATS.save(storage, &stats)?;

    let status = Status::RecordedForRetry;
    let event = Event::new("failed_execution_recorded")
        .add_attribute("key", to_hex(&key))
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("recipient", to_hex(&pending.recipient))
        .add_attribute("amount", pending.amount.to_string())
        .add_attribute("src_chain_id", pending.origin.src_chain_id.to_string())
        .add_attribute("src_peer", to_hex(&pending.origin.src_peer))
        .add_attribute("src_decimals", pending.origin.src_decimals.to_string())
        .add_attribute("reason", reason);

    Ok(Response::new()
        .set_data(status_data(status))
        .add_event(event)
        .add_attribute("method", "redeem")
        .add_attribute("status", status.as_str()))
}

/// Credit step shared by first delivery and retry.
fn apply_redeem(
    deps: DepsMut,
    recipient: &Binary,
    amount: Uint256,
    custom_payload: &Binary,
    origin: &Origin,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }

    let recipient_addr = deps
        .api
        .addr_humanize(&CanonicalAddr::from(recipient.clone()))
        .map_err(|e| ContractError::InvalidRecipient {
            reason: e.to_string(),
        })?;
    let local = convert(amount, origin.src_decimals, config.decimals)?;
    let local =
        Uint128::try_from(local).map_err(|_| ContractError::AmountTooLarge { amount: local })?;

    let mut messages: Vec<CosmosMsg> = vec![];
    if !local.is_zero() {
        let credit = match config.token_type {
            TokenType::MintBurn => Cw20ExecuteMsg::Mint {
                recipient: recipient_addr.to_string(),
                amount: local,
            },
            TokenType::LockUnlock => {
                let locked = LOCKED_BALANCE.may_load(deps.storage)?.unwrap_or_default();
                let remaining = locked.checked_sub(local).map_err(|_| {
                    ContractError::InsufficientLockedBalance {
                        available: locked,
                        required: local,
                    }
                })?;
                LOCKED_BALANCE.save(deps.storage, &remaining)?;
                Cw20ExecuteMsg::Transfer {
                    recipient: recipient_addr.to_string(),
                    amount: local,
                }
            }
        };
        messages.push(
            WasmMsg::Execute {
                contract_addr: config.token.to_string(),
                msg: to_json_binary(&credit)?,
                funds: vec![],
            }
            .into(),
        );
    }

    if !custom_payload.is_empty() {
        messages.push(
            WasmMsg::Execute {
                contract_addr: recipient_addr.to_string(),
                msg: to_json_binary(&RedeemHookMsg::OnBridgeRedeem {
                    origin: origin.clone(),
                    amount: local,
                    custom_payload: custom_payload.clone(),
                })?,
                funds: vec![],
            }
            .into(),
        );
    }

    let mut stats = STATS.load(deps.storage)?;
    stats.total_redeems += 1;
    stats.total_redeemed = stats.total_redeemed.checked_add(local)?;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("recipient", recipient_addr)
        .add_attribute("amount", local)
        .add_attribute("src_chain_id", origin.src_chain_id.to_string())
        .add_attribute("src_decimals", origin.src_decimals.to_string()))
}

/// Execute handler for a redeem delivered by the router.
#[allow(clippy::too_many_arguments)]
pub fn execute_redeem(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: Binary,
    amount: Uint256,
    custom_payload: Binary,
    origin: Origin,
    gas_limit: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.router {
        return Err(ContractError::UnauthorizedRouter);
    }

    let stored = CHAIN_CONFIGS
        .may_load(deps.storage, origin.src_chain_id)?
        .unwrap_or_default();
    if let Err(e) = verify_peer(&stored.peer, &origin.src_peer) {
        return Ok(rejected(Status::InvalidPeer, &origin, e.to_string()));
    }
    if let Err(e) = deps.api.addr_humanize(&CanonicalAddr::from(recipient.clone())) {
        return Ok(rejected(Status::MalformedAddress, &origin, e.to_string()));
    }

    let pending = PendingRedeem {
        recipient,
        amount,
        custom_payload,
        origin,
    };
    if config.paused {
        return record_failure(deps.storage, &pending, "connector paused");
    }

    PENDING_REDEEM.save(deps.storage, &pending)?;
    let msg = WasmMsg::Execute {
        contract_addr: env.contract.address.to_string(),
        msg: to_json_binary(&ExecuteMsg::ApplyRedeem {
            recipient: pending.recipient,
            amount: pending.amount,
            custom_payload: pending.custom_payload,
            origin: pending.origin,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_always(msg, REPLY_APPLY_REDEEM).with_gas_limit(gas_limit))
        .add_attribute("method", "redeem")
        .add_attribute("amount", amount.to_string())
        .add_attribute("gas_limit", gas_limit.to_string()))
}

pub fn execute_apply_redeem(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: Binary,
    amount: Uint256,
    custom_payload: Binary,
    origin: Origin,
) -> Result<Response, ContractError> {
    if info.sender != env.contract.address {
        return Err(ContractError::UnauthorizedApply);
    }

    let response = apply_redeem(deps, &recipient, amount, &custom_payload, &origin)?;
    Ok(response.add_attribute("method", "apply_redeem"))
}

/// Reply of the apply sub-call. Its state changes were rolled back on error.
pub fn handle_apply_reply(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let pending = PENDING_REDEEM.load(deps.storage)?;
    PENDING_REDEEM.remove(deps.storage);

    match msg.result {
        SubMsgResult::Ok(_) => Ok(Response::new()
            .set_data(status_data(Status::Success))
            .add_attribute("method", "redeem")
            .add_attribute("status", Status::Success.as_str())),
        SubMsgResult::Err(err) => record_failure(deps.storage, &pending, &err),
    }
}

/// Execute handler for retrying a recorded failure.
///
/// Any error reverts the whole transaction, leaving the record pending.
pub fn execute_retry_redeem(
    deps: DepsMut,
    info: MessageInfo,
    recipient: Binary,
    amount: Uint256,
    custom_payload: Binary,
    origin: Origin,
    nonce: u64,
) -> Result<Response, ContractError> {
    let key = failed_execution_key(&recipient, amount, &custom_payload, &origin);
    let pending = FAILED_EXECUTIONS
        .may_load(deps.storage, (key.as_slice(), nonce))?
        .unwrap_or(false);
    if !pending {
        return Err(ContractError::ExecutionNotPending {
            key: to_hex(&key),
            nonce,
        });
    }
    FAILED_EXECUTIONS.save(deps.storage, (key.as_slice(), nonce), &false)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_retried += 1;
    STATS.save(deps.storage, &stats)?;

    let response = apply_redeem(deps, &recipient, amount, &custom_payload, &origin)?;
    Ok(response
        .add_event(
            Event::new("failed_execution_retried")
                .add_attribute("key", to_hex(&key))
                .add_attribute("nonce", nonce.to_string())
                .add_attribute("caller", info.sender),
        )
        .add_attribute("method", "retry_redeem"))
}
