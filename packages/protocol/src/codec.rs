//! Cross-chain message codec
//!
//! Every routed message travels as a frame:
//! `abi.encode(bytes destination, uint8 messageType, bytes payload)`.
//! The master router prepends a one-byte protocol version to form the
//! envelope that the transport carries.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Uint256};
use thiserror::Error;

use crate::abi::{self, AbiError, ParamType, Token, TokenReader};
use crate::chain::{ChainConfig, Origin};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodecError {
    #[error("ABI decoding failed: {0}")]
    Abi(#[from] AbiError),

    #[error("Empty message")]
    Empty,

    #[error("Unknown message type: {0}")]
    UnknownMessageType(u8),

    #[error("Unexpected message type: expected {expected}, got {got}")]
    UnexpectedMessageType { expected: u8, got: u8 },

    #[error("Chain id list and config list differ in length: {chain_ids} vs {configs}")]
    LengthMismatch { chain_ids: usize, configs: usize },
}

#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum MessageType {
    ValueTransfer,
    ConfigUpdate,
    DeployRequest,
}

impl MessageType {
    pub const fn as_u8(self) -> u8 {
        match self {
            MessageType::ValueTransfer => 1,
            MessageType::ConfigUpdate => 2,
            MessageType::DeployRequest => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::ValueTransfer => "value_transfer",
            MessageType::ConfigUpdate => "config_update",
            MessageType::DeployRequest => "deploy_request",
        }
    }
}

impl TryFrom<u8> for MessageType {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MessageType::ValueTransfer),
            2 => Ok(MessageType::ConfigUpdate),
            3 => Ok(MessageType::DeployRequest),
            other => Err(CodecError::UnknownMessageType(other)),
        }
    }
}

// ============================================================================
// Frame and envelope
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub destination: Vec<u8>,
    pub message_type: u8,
    pub payload: Vec<u8>,
}

impl Frame {
    const PARAMS: [ParamType; 3] = [ParamType::Bytes, ParamType::Uint(8), ParamType::Bytes];

    pub fn encode(&self) -> Vec<u8> {
        abi::encode(&[
            Token::Bytes(self.destination.clone()),
            Token::Uint(Uint256::from(self.message_type)),
            Token::Bytes(self.payload.clone()),
        ])
    }

    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        if data.is_empty() {
            return Err(CodecError::Empty);
        }
        let mut reader = TokenReader::new(abi::decode(&Self::PARAMS, data)?);
        Ok(Self {
            destination: reader.bytes()?,
            message_type: reader.u8()?,
            payload: reader.bytes()?,
        })
    }
}

/// `[version] ++ frame`
pub fn encode_envelope(version: u8, frame: &Frame) -> Vec<u8> {
    let encoded = frame.encode();
    let mut out = Vec::with_capacity(1 + encoded.len());
    out.push(version);
    out.extend(encoded);
    out
}

/// Split an envelope into its version byte and the still-encoded frame.
pub fn split_envelope(data: &[u8]) -> Result<(u8, &[u8]), CodecError> {
    data.split_first()
        .map(|(version, frame)| (*version, frame))
        .ok_or(CodecError::Empty)
}

pub fn decode_envelope(data: &[u8]) -> Result<(u8, Frame), CodecError> {
    let (version, frame) = split_envelope(data)?;
    Ok((version, Frame::decode(frame)?))
}

// ============================================================================
// Payloads
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueTransfer {
    pub destination: Vec<u8>,
    pub recipient: Vec<u8>,
    pub amount: Uint256,
    pub src_chain_id: u64,
    pub src_peer: Vec<u8>,
    pub src_decimals: u8,
    pub gas_limit: u64,
    pub custom_payload: Vec<u8>,
}

impl ValueTransfer {
    const PARAMS: [ParamType; 7] = [
        ParamType::Bytes,
        ParamType::Uint(256),
        ParamType::Uint(64),
        ParamType::Bytes,
        ParamType::Uint(8),
        ParamType::Uint(64),
        ParamType::Bytes,
    ];

    pub fn encode_payload(&self) -> Vec<u8> {
        abi::encode(&[
            Token::Bytes(self.recipient.clone()),
            Token::Uint(self.amount),
            Token::Uint(Uint256::from(self.src_chain_id)),
            Token::Bytes(self.src_peer.clone()),
            Token::Uint(Uint256::from(self.src_decimals)),
            Token::Uint(Uint256::from(self.gas_limit)),
            Token::Bytes(self.custom_payload.clone()),
        ])
    }

    pub fn decode_payload(destination: Vec<u8>, payload: &[u8]) -> Result<Self, CodecError> {
        let mut reader = TokenReader::new(abi::decode(&Self::PARAMS, payload)?);
        Ok(Self {
            destination,
            recipient: reader.bytes()?,
            amount: reader.uint()?,
            src_chain_id: reader.u64()?,
            src_peer: reader.bytes()?,
            src_decimals: reader.u8()?,
            gas_limit: reader.u64()?,
            custom_payload: reader.bytes()?,
        })
    }

    pub fn origin(&self) -> Origin {
        Origin {
            src_chain_id: self.src_chain_id,
            src_peer: Binary::from(self.src_peer.clone()),
            src_decimals: self.src_decimals,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub destination: Vec<u8>,
    pub src_chain_id: u64,
    pub src_peer: Vec<u8>,
    pub chain_ids: Vec<u64>,
    pub configs: Vec<ChainConfig>,
}

impl ConfigUpdate {
    const PARAMS: [ParamType; 4] = [
        ParamType::Uint(64),
        ParamType::Bytes,
        ParamType::UintArray(64),
        ParamType::BytesArray,
    ];

    pub fn encode_payload(&self) -> Vec<u8> {
        abi::encode(&[
            Token::Uint(Uint256::from(self.src_chain_id)),
            Token::Bytes(self.src_peer.clone()),
            Token::UintArray(self.chain_ids.iter().map(|id| Uint256::from(*id)).collect()),
            Token::BytesArray(self.configs.iter().map(ChainConfig::abi_encode).collect()),
        ])
    }

    pub fn decode_payload(destination: Vec<u8>, payload: &[u8]) -> Result<Self, CodecError> {
        let mut reader = TokenReader::new(abi::decode(&Self::PARAMS, payload)?);
        let src_chain_id = reader.u64()?;
        let src_peer = reader.bytes()?;
        let chain_ids = reader.u64_array()?;
        let raw_configs = reader.bytes_array()?;

        if chain_ids.len() != raw_configs.len() {
            return Err(CodecError::LengthMismatch {
                chain_ids: chain_ids.len(),
                configs: raw_configs.len(),
            });
        }

        let configs = raw_configs
            .iter()
            .map(|raw| ChainConfig::abi_decode(raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            destination,
            src_chain_id,
            src_peer,
            chain_ids,
            configs,
        })
    }

    pub fn origin(&self) -> Origin {
        Origin {
            src_chain_id: self.src_chain_id,
            src_peer: Binary::from(self.src_peer.clone()),
            src_decimals: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub destination: Vec<u8>,
    pub is_connector: bool,
    pub payer: Vec<u8>,
    pub deploy_params: Vec<u8>,
}

impl DeployRequest {
    const PARAMS: [ParamType; 3] = [ParamType::Bool, ParamType::Bytes, ParamType::Bytes];

    pub fn encode_payload(&self) -> Vec<u8> {
        abi::encode(&[
            Token::Bool(self.is_connector),
            Token::Bytes(self.payer.clone()),
            Token::Bytes(self.deploy_params.clone()),
        ])
    }

    pub fn decode_payload(destination: Vec<u8>, payload: &[u8]) -> Result<Self, CodecError> {
        let mut reader = TokenReader::new(abi::decode(&Self::PARAMS, payload)?);
        Ok(Self {
            destination,
            is_connector: reader.bool()?,
            payer: reader.bytes()?,
            deploy_params: reader.bytes()?,
        })
    }
}

// ============================================================================
// Tagged message
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeMessage {
    ValueTransfer(ValueTransfer),
    ConfigUpdate(ConfigUpdate),
    DeployRequest(DeployRequest),
}

impl BridgeMessage {
    pub fn message_type(&self) -> MessageType {
        match self {
            BridgeMessage::ValueTransfer(_) => MessageType::ValueTransfer,
            BridgeMessage::ConfigUpdate(_) => MessageType::ConfigUpdate,
            BridgeMessage::DeployRequest(_) => MessageType::DeployRequest,
        }
    }

    pub fn destination(&self) -> &[u8] {
        match self {
            BridgeMessage::ValueTransfer(msg) => &msg.destination,
            BridgeMessage::ConfigUpdate(msg) => &msg.destination,
            BridgeMessage::DeployRequest(msg) => &msg.destination,
        }
    }

    pub fn encode_payload(&self) -> Vec<u8> {
        match self {
            BridgeMessage::ValueTransfer(msg) => msg.encode_payload(),
            BridgeMessage::ConfigUpdate(msg) => msg.encode_payload(),
            BridgeMessage::DeployRequest(msg) => msg.encode_payload(),
        }
    }

    pub fn into_frame(self) -> Frame {
        let payload = self.encode_payload();
        let message_type = self.message_type().as_u8();
        let destination = match self {
            BridgeMessage::ValueTransfer(msg) => msg.destination,
            BridgeMessage::ConfigUpdate(msg) => msg.destination,
            BridgeMessage::DeployRequest(msg) => msg.destination,
        };
        Frame {
            destination,
            message_type,
            payload,
        }
    }

    pub fn encode(self) -> Vec<u8> {
        self.into_frame().encode()
    }

    /// Decode from the parts a router receives from the master router.
    pub fn from_parts(
        message_type: u8,
        destination: Vec<u8>,
        payload: &[u8],
    ) -> Result<Self, CodecError> {
        match MessageType::try_from(message_type)? {
            MessageType::ValueTransfer => {
                ValueTransfer::decode_payload(destination, payload).map(Self::ValueTransfer)
            }
            MessageType::ConfigUpdate => {
                ConfigUpdate::decode_payload(destination, payload).map(Self::ConfigUpdate)
            }
            MessageType::DeployRequest => {
                DeployRequest::decode_payload(destination, payload).map(Self::DeployRequest)
            }
        }
    }

    pub fn from_frame(frame: Frame) -> Result<Self, CodecError> {
        Self::from_parts(frame.message_type, frame.destination, &frame.payload)
    }

    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        Self::from_frame(Frame::decode(data)?)
    }
}

fn expect_type(frame: &Frame, expected: MessageType) -> Result<(), CodecError> {
    if frame.message_type != expected.as_u8() {
        return Err(CodecError::UnexpectedMessageType {
            expected: expected.as_u8(),
            got: frame.message_type,
        });
    }
    Ok(())
}

pub fn decode_value_transfer(data: &[u8]) -> Result<ValueTransfer, CodecError> {
    let frame = Frame::decode(data)?;
    expect_type(&frame, MessageType::ValueTransfer)?;
    ValueTransfer::decode_payload(frame.destination, &frame.payload)
}

pub fn decode_config_update(data: &[u8]) -> Result<ConfigUpdate, CodecError> {
    let frame = Frame::decode(data)?;
    expect_type(&frame, MessageType::ConfigUpdate)?;
    ConfigUpdate::decode_payload(frame.destination, &frame.payload)
}

pub fn decode_deploy_request(data: &[u8]) -> Result<DeployRequest, CodecError> {
    let frame = Frame::decode(data)?;
    expect_type(&frame, MessageType::DeployRequest)?;
    DeployRequest::decode_payload(frame.destination, &frame.payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transfer() -> ValueTransfer {
        ValueTransfer {
            destination: vec![0xd0; 32],
            recipient: vec![0xaa; 20],
            amount: Uint256::from(1_000_000u128),
            src_chain_id: 1,
            src_peer: vec![0x5e; 20],
            src_decimals: 6,
            gas_limit: 250_000,
            custom_payload: vec![],
        }
    }

    fn sample_update() -> ConfigUpdate {
        ConfigUpdate {
            destination: vec![0xd1; 20],
            src_chain_id: 7,
            src_peer: vec![0x01; 32],
            chain_ids: vec![1, 2],
            configs: vec![
                ChainConfig {
                    peer: Binary::from(vec![0x02; 20]),
                    min_gas_limit: 100_000,
                    remote_decimals: 18,
                    paused: false,
                },
                ChainConfig::default(),
            ],
        }
    }

    #[test]
    fn test_value_transfer_round_trip() {
        let msg = BridgeMessage::ValueTransfer(sample_transfer());
        let decoded = BridgeMessage::decode(&msg.clone().encode()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_config_update_round_trip() {
        let msg = BridgeMessage::ConfigUpdate(sample_update());
        let decoded = decode_config_update(&msg.clone().encode()).unwrap();
        assert_eq!(BridgeMessage::ConfigUpdate(decoded), msg);
    }

    #[test]
    fn test_deploy_request_round_trip() {
        let msg = BridgeMessage::DeployRequest(DeployRequest {
            destination: vec![0x33; 20],
            is_connector: true,
            payer: vec![0x44; 20],
            deploy_params: b"params".to_vec(),
        });
        let decoded = decode_deploy_request(&msg.clone().encode()).unwrap();
        assert_eq!(BridgeMessage::DeployRequest(decoded), msg);
    }

    #[test]
    fn test_frame_carries_type_tag() {
        let frame = BridgeMessage::ConfigUpdate(sample_update()).into_frame();
        assert_eq!(frame.message_type, 2);
        let encoded = frame.encode();
        // the uint8 tag is the second head word
        assert_eq!(encoded[63], 2);
    }

    #[test]
    fn test_typed_decode_rejects_other_type() {
        let encoded = BridgeMessage::ValueTransfer(sample_transfer()).encode();
        assert_eq!(
            decode_config_update(&encoded).unwrap_err(),
            CodecError::UnexpectedMessageType {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_value_transfer_typed_decode() {
        let transfer = ValueTransfer {
            custom_payload: b"hook".to_vec(),
            ..sample_transfer()
        };
        let encoded = BridgeMessage::ValueTransfer(transfer.clone()).encode();
        assert_eq!(decode_value_transfer(&encoded).unwrap(), transfer);

        let encoded = BridgeMessage::ConfigUpdate(sample_update()).encode();
        assert_eq!(
            decode_value_transfer(&encoded).unwrap_err(),
            CodecError::UnexpectedMessageType {
                expected: 1,
                got: 2
            }
        );
    }

    #[test]
    fn test_unknown_message_type() {
        let frame = Frame {
            destination: vec![1; 20],
            message_type: 9,
            payload: vec![],
        };
        assert_eq!(
            BridgeMessage::decode(&frame.encode()).unwrap_err(),
            CodecError::UnknownMessageType(9)
        );
    }

    #[test]
    fn test_config_update_length_mismatch() {
        let payload = abi::encode(&[
            Token::Uint(Uint256::from(7u64)),
            Token::Bytes(vec![1; 20]),
            Token::UintArray(vec![Uint256::from(1u64), Uint256::from(2u64)]),
            Token::BytesArray(vec![ChainConfig::default().abi_encode()]),
        ]);
        assert_eq!(
            ConfigUpdate::decode_payload(vec![], &payload).unwrap_err(),
            CodecError::LengthMismatch {
                chain_ids: 2,
                configs: 1
            }
        );
    }

    #[test]
    fn test_value_transfer_rejects_wide_chain_id() {
        let mut transfer = sample_transfer();
        let mut payload = transfer.encode_payload();
        // set a byte above the low 64 bits of the srcChainId word
        payload[2 * 32 + 23] = 1;
        assert!(matches!(
            ValueTransfer::decode_payload(vec![], &payload),
            Err(CodecError::Abi(AbiError::IntegerOverflow { bits: 64 }))
        ));
        transfer.src_chain_id = u64::MAX;
        let payload = transfer.encode_payload();
        assert_eq!(
            ValueTransfer::decode_payload(transfer.destination.clone(), &payload).unwrap(),
            transfer
        );
    }

    #[test]
    fn test_envelope() {
        let frame = BridgeMessage::ValueTransfer(sample_transfer()).into_frame();
        let envelope = encode_envelope(3, &frame);
        assert_eq!(envelope[0], 3);
        assert_eq!(decode_envelope(&envelope).unwrap(), (3, frame));

        assert_eq!(decode_envelope(&[]).unwrap_err(), CodecError::Empty);
        assert_eq!(decode_envelope(&[1]).unwrap_err(), CodecError::Empty);
        assert!(matches!(
            decode_envelope(&[1, 2, 3]).unwrap_err(),
            CodecError::Abi(_)
        ));
    }

    #[test]
    fn test_origin_from_transfer() {
        let origin = sample_transfer().origin();
        assert_eq!(origin.src_chain_id, 1);
        assert_eq!(origin.src_peer.as_slice(), &[0x5e; 20]);
        assert_eq!(origin.src_decimals, 6);
    }
}
