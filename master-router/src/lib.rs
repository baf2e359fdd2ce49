//! XBridge Master Router
//!
//! Single entry point between the transport and the routers. Inbound, it
//! authenticates the transport, checks the envelope (size, version, frame),
//! resolves the router registered for the message type, and hands the message
//! over. Outbound, authorized routers wrap their messages in an envelope
//! addressed to the remote master router.
//!
//! # Envelope
//! `[protocol_version: 1 byte] ++ abi.encode(bytes destination, uint8 message_type, bytes payload)`

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
