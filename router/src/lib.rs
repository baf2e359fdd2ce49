//! XBridge Router
//!
//! # Outbound
//! 1. A connector debits the user and calls `Bridge` (or `RequestToUpdateConfig`)
//! 2. The router checks the connector's chain config, encodes the message, and
//!    prices it from the price feed
//! 3. The payment goes to the fee collector and the message to the master router
//!
//! # Inbound
//! 1. The master router calls `HandleMessage`
//! 2. The router decodes it and calls the destination connector under a gas limit
//! 3. The destination's status (or `DestinationThrew`) is returned as response data

pub mod contract;
pub mod error;
mod execute;
pub mod fee_manager;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
