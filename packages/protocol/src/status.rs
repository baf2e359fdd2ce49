//! Delivery status codes
//!
//! Every inbound delivery ends in exactly one status. The status travels back
//! up the call chain as a one-byte `Response::data`.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Binary;

/// There is no separate code for a paused destination or a stale peer. A
/// delivery to a paused connector is stored and reported as
/// `RecordedForRetry`; a peer that no longer matches the stored one is
/// `InvalidPeer`.
#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum Status {
    Success,
    RecordedForRetry,
    DestinationThrew,
    UnauthorizedCaller,
    UnauthorizedRouter,
    VersionMismatch,
    MalformedAddress,
    InvalidPeer,
    Oversized,
    DecodeFailed,
    UnsupportedMessageType,
}

impl Status {
    pub const ALL: [Status; 11] = [
        Status::Success,
        Status::RecordedForRetry,
        Status::DestinationThrew,
        Status::UnauthorizedCaller,
        Status::UnauthorizedRouter,
        Status::VersionMismatch,
        Status::MalformedAddress,
        Status::InvalidPeer,
        Status::Oversized,
        Status::DecodeFailed,
        Status::UnsupportedMessageType,
    ];

    pub const fn code(self) -> u8 {
        match self {
            Status::Success => 0,
            Status::RecordedForRetry => 1,
            Status::DestinationThrew => 2,
            Status::UnauthorizedCaller => 3,
            Status::UnauthorizedRouter => 4,
            Status::VersionMismatch => 5,
            Status::MalformedAddress => 6,
            Status::InvalidPeer => 7,
            Status::Oversized => 8,
            Status::DecodeFailed => 9,
            Status::UnsupportedMessageType => 10,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::RecordedForRetry => "recorded_for_retry",
            Status::DestinationThrew => "destination_threw",
            Status::UnauthorizedCaller => "unauthorized_caller",
            Status::UnauthorizedRouter => "unauthorized_router",
            Status::VersionMismatch => "version_mismatch",
            Status::MalformedAddress => "malformed_address",
            Status::InvalidPeer => "invalid_peer",
            Status::Oversized => "oversized",
            Status::DecodeFailed => "decode_failed",
            Status::UnsupportedMessageType => "unsupported_message_type",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-byte response data carrying `status`.
pub fn status_data(status: Status) -> Binary {
    Binary::from(vec![status.code()])
}

/// Read a status from sub-call response data.
///
/// Accepts the raw byte, or the byte wrapped in a `MsgExecuteContractResponse`
/// (field 1, length-delimited) as the chain returns it to the caller's reply.
pub fn parse_status_data(data: &[u8]) -> Option<Status> {
    match data {
        [code] => Status::from_code(*code),
        [0x0a, rest @ ..] => {
            let (len, inner) = read_varint(rest)?;
            match inner {
                [code] if len == 1 => Status::from_code(*code),
                _ => None,
            }
        }
        _ => None,
    }
}

fn read_varint(data: &[u8]) -> Option<(u64, &[u8])> {
    let mut value = 0u64;
    for (i, byte) in data.iter().enumerate().take(10) {
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Some((value, &data[i + 1..]));
        }
    }
    None
}
