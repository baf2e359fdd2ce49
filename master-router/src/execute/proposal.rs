//! Proposal handlers: inbound dispatch and outbound hand-off.
//!
//! `ExecuteProposal` never fails. Each call ends in exactly one status,
//! returned as response data and bound to one `proposal_executed` event.
//! Rejected envelopes end here; dispatched ones end in the reply.

use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Event, MessageInfo, Reply, Response, StdResult,
    SubMsg, SubMsgResult, WasmMsg,
};
use xbridge_protocol::codec::{encode_envelope, split_envelope, Frame};
use xbridge_protocol::hash::to_hex;
use xbridge_protocol::interfaces::{RouterExecuteMsg, TransportExecuteMsg};
use xbridge_protocol::status::{parse_status_data, status_data};
use xbridge_protocol::Status;

use crate::error::ContractError;
use crate::state::{
    Config, PendingDispatch, AUTHORIZED_ROUTERS, CONFIG, PENDING_DISPATCH, REMOTE_MASTER_ROUTERS,
    REPLY_DISPATCH, ROUTES, STATS,
};

enum Outcome {
    Dispatch { router: Addr, frame: Frame },
    Rejected { status: Status, frame: Option<Frame> },
}

fn rejected(status: Status) -> StdResult<Outcome> {
    Ok(Outcome::Rejected {
        status,
        frame: None,
    })
}

fn is_authorized_router(deps: Deps, router: &Addr) -> StdResult<bool> {
    Ok(AUTHORIZED_ROUTERS
        .may_load(deps.storage, router)?
        .unwrap_or(false))
}

/// Run the envelope checks in their fixed order.
fn check_proposal(
    deps: Deps,
    config: &Config,
    sender: &Addr,
    message: &[u8],
) -> StdResult<Outcome> {
    if *sender != config.transport {
        return rejected(Status::UnauthorizedCaller);
    }
    if message.len() as u64 > config.max_payload_size {
        return rejected(Status::Oversized);
    }

    let Ok((version, encoded_frame)) = split_envelope(message) else {
        return rejected(Status::DecodeFailed);
    };
    if version != config.protocol_version {
        return rejected(Status::VersionMismatch);
    }
    let Ok(frame) = Frame::decode(encoded_frame) else {
        return rejected(Status::DecodeFailed);
    };

    let Some(router) = ROUTES.may_load(deps.storage, frame.message_type)? else {
        return Ok(Outcome::Rejected {
            status: Status::UnsupportedMessageType,
            frame: Some(frame),
        });
    };
    if !is_authorized_router(deps, &router)? {
        return Ok(Outcome::Rejected {
            status: Status::UnauthorizedRouter,
            frame: Some(frame),
        });
    }

    Ok(Outcome::Dispatch { router, frame })
}

fn proposal_event(
    status: Status,
    destination: &[u8],
    router: Option<&Addr>,
    message: &[u8],
) -> Event {
    Event::new("proposal_executed")
        .add_attribute("status_code", status.code().to_string())
        .add_attribute("status", status.as_str())
        .add_attribute("destination", to_hex(destination))
        .add_attribute("router", router.map_or("none", Addr::as_str))
        .add_attribute("message", to_hex(message))
}

pub fn execute_execute_proposal(
    deps: DepsMut,
    info: MessageInfo,
    message: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    match check_proposal(deps.as_ref(), &config, &info.sender, &message)? {
        Outcome::Rejected { status, frame } => {
            let destination = frame.map(|f| f.destination).unwrap_or_default();
            Ok(Response::new()
                .set_data(status_data(status))
                .add_event(proposal_event(status, &destination, None, &message))
                .add_attribute("method", "execute_proposal")
                .add_attribute("status", status.as_str()))
        }
        Outcome::Dispatch { router, frame } => {
            PENDING_DISPATCH.save(
                deps.storage,
                &PendingDispatch {
                    destination: Binary::from(frame.destination.clone()),
                    router: router.clone(),
                    message: message.clone(),
                },
            )?;

            let msg = WasmMsg::Execute {
                contract_addr: router.to_string(),
                msg: to_json_binary(&RouterExecuteMsg::HandleMessage {
                    message_type: frame.message_type,
                    destination: Binary::from(frame.destination),
                    payload: Binary::from(frame.payload),
                })?,
                funds: vec![],
            };

            Ok(Response::new()
                .add_submessage(SubMsg::reply_always(msg, REPLY_DISPATCH))
                .add_attribute("method", "execute_proposal")
                .add_attribute("message_type", frame.message_type.to_string())
                .add_attribute("router", router))
        }
    }
}

/// Reply of the router call. A router error still yields a status.
pub fn handle_dispatch_reply(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let pending = PENDING_DISPATCH.load(deps.storage)?;
    PENDING_DISPATCH.remove(deps.storage);

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

    let mut stats = STATS.load(deps.storage)?;
    stats.proposals_dispatched += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(response
        .set_data(status_data(status))
        .add_event(proposal_event(
            status,
            &pending.destination,
            Some(&pending.router),
            &pending.message,
        ))
        .add_attribute("method", "dispatch_result")
        .add_attribute("status", status.as_str()))
}

pub fn execute_send_proposal(
    deps: DepsMut,
    info: MessageInfo,
    dst_chain_id: u64,
    message_type: u8,
    destination: Binary,
    payload: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if !is_authorized_router(deps.as_ref(), &info.sender)? {
        return Err(ContractError::UnauthorizedRouter {
            router: info.sender.to_string(),
        });
    }
    let receiver = REMOTE_MASTER_ROUTERS
        .may_load(deps.storage, dst_chain_id)?
        .ok_or(ContractError::NoRemoteMasterRouter {
            chain_id: dst_chain_id,
        })?;

    let frame = Frame {
        destination: destination.to_vec(),
        message_type,
        payload: payload.to_vec(),
    };
    let envelope = encode_envelope(config.protocol_version, &frame);
    let size = envelope.len() as u64;
    if size > config.max_payload_size {
        return Err(ContractError::PayloadTooLarge {
            size,
            max: config.max_payload_size,
        });
    }

    let mut stats = STATS.load(deps.storage)?;
    stats.proposals_sent += 1;
    STATS.save(deps.storage, &stats)?;

    let msg = WasmMsg::Execute {
        contract_addr: config.transport.to_string(),
        msg: to_json_binary(&TransportExecuteMsg::SendMessage {
            dst_chain_id,
            receiver,
            message: Binary::from(envelope),
        })?,
        funds: info.funds,
    };

    Ok(Response::new()
        .add_message(msg)
        .add_attribute("method", "send_proposal")
        .add_attribute("router", info.sender)
        .add_attribute("dst_chain_id", dst_chain_id.to_string())
        .add_attribute("message_type", message_type.to_string())
        .add_attribute("destination", to_hex(&destination))
        .add_attribute("size", size.to_string()))
}
