//! Inbound delivery handlers.
//!
//! The master router hands over one message at a time. A message that reaches
//! this point always produces a status in `Response::data`: either directly
//! (undeliverable) or from the reply of the gas-bounded destination call.

use cosmwasm_std::{
    to_json_binary, Binary, CanonicalAddr, DepsMut, MessageInfo, Reply, Response, StdError,
    Storage, SubMsg, SubMsgResult, WasmMsg,
};
use xbridge_protocol::codec::CodecError;
use xbridge_protocol::interfaces::ConnectorExecuteMsg;
use xbridge_protocol::status::{parse_status_data, status_data};
use xbridge_protocol::{BridgeMessage, Status, REDEEM_SERVICE_GAS};

use crate::error::ContractError;
use crate::fee_manager::record_retained_fee;
use crate::state::{
    PendingDelivery, CONFIG, INBOUND_BY_STATUS, PENDING_DELIVERY, REPLY_DELIVERY,
};

fn record_inbound(storage: &mut dyn Storage, status: Status) -> Result<(), ContractError> {
    INBOUND_BY_STATUS.update(storage, status.code(), |count| -> Result<_, StdError> {
        Ok(count.unwrap_or_default() + 1)
    })?;
    Ok(())
}

/// Finish a message that never reached its destination.
fn undelivered(
    deps: DepsMut,
    message_type: u8,
    status: Status,
) -> Result<Response, ContractError> {
    record_inbound(deps.storage, status)?;

    Ok(Response::new()
        .set_data(status_data(status))
        .add_attribute("method", "handle_message")
        .add_attribute("message_type", message_type.to_string())
        .add_attribute("status", status.as_str()))
}

pub fn execute_handle_message(
    deps: DepsMut,
    info: MessageInfo,
    message_type: u8,
    destination: Binary,
    payload: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.master_router {
        return Err(ContractError::UnauthorizedMasterRouter);
    }

    let message = match BridgeMessage::from_parts(message_type, destination.to_vec(), &payload) {
        Ok(message) => message,
        Err(CodecError::UnknownMessageType(_)) => {
            return undelivered(deps, message_type, Status::UnsupportedMessageType)
        }
        Err(_) => return undelivered(deps, message_type, Status::DecodeFailed),
    };

    let Ok(destination_addr) = deps.api.addr_humanize(&CanonicalAddr::from(destination)) else {
        return undelivered(deps, message_type, Status::MalformedAddress);
    };

    let kind = message.message_type();
    let (call, gas_limit) = match message {
        BridgeMessage::ValueTransfer(transfer) => {
            let origin = transfer.origin();
            let gas_limit = transfer.gas_limit.saturating_add(REDEEM_SERVICE_GAS);
            let call = ConnectorExecuteMsg::Redeem {
                recipient: Binary::from(transfer.recipient),
                amount: transfer.amount,
                custom_payload: Binary::from(transfer.custom_payload),
                origin,
                gas_limit: transfer.gas_limit,
            };
            (call, gas_limit)
        }
        BridgeMessage::ConfigUpdate(update) => {
            let origin = update.origin();
            let call = ConnectorExecuteMsg::UpdateChainConfigs {
                origin,
                chain_ids: update.chain_ids,
                configs: update.configs,
            };
            (call, config.update_gas_limit)
        }
        BridgeMessage::DeployRequest(_) => {
            return undelivered(deps, message_type, Status::UnsupportedMessageType)
        }
    };

    PENDING_DELIVERY.save(
        deps.storage,
        &PendingDelivery {
            destination: destination_addr.clone(),
            message_type: kind,
        },
    )?;

    let msg = WasmMsg::Execute {
        contract_addr: destination_addr.to_string(),
        msg: to_json_binary(&call)?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_always(msg, REPLY_DELIVERY).with_gas_limit(gas_limit))
        .add_attribute("method", "handle_message")
        .add_attribute("message_type", kind.as_str())
        .add_attribute("destination", destination_addr)
        .add_attribute("gas_limit", gas_limit.to_string()))
}

/// Reply of the destination call: forward its status, or `DestinationThrew`.
pub fn handle_delivery_reply(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let pending = PENDING_DELIVERY.load(deps.storage)?;
    PENDING_DELIVERY.remove(deps.storage);

    let mut response = Response::new();
    let status = match msg.result {
        SubMsgResult::Ok(res) => res
            .data
            .as_deref()
            .and_then(parse_status_data)
            .unwrap_or(Status::DestinationThrew),
        SubMsgResult::Err(err) => {
            response = response.add_attribute("error", err);
            Status::DestinationThrew
        }
    };
    record_inbound(deps.storage, status)?;

    Ok(response
        .set_data(status_data(status))
        .add_attribute("method", "delivery_result")
        .add_attribute("destination", pending.destination)
        .add_attribute("message_type", pending.message_type.as_str())
        .add_attribute("status", status.as_str()))
}

/// Error reply of the fee collector transfer.
pub fn handle_fee_reply(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let retained = record_retained_fee(deps.storage)?;

    let mut response = Response::new()
        .add_attribute("method", "fee_transfer_failed")
        .add_attribute("retained", retained.to_string());
    if let SubMsgResult::Err(err) = msg.result {
        response = response.add_attribute("error", err);
    }
    Ok(response)
}
