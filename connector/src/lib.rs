//! XBridge Connector
//!
//! Binds one CW20 token to the bridge. Holds the chain configuration for the
//! token, debits senders on bridge (burn or escrow), credits recipients on
//! redeem (mint or release), and keeps failed redeems as retryable records.
//!
//! # Redeem
//! 1. The router calls `Redeem` under the sender's gas limit
//! 2. The origin peer is checked against the stored chain config
//! 3. `ApplyRedeem` runs as a gas-bounded self call
//! 4. If it fails, a record is stored and anyone may `RetryRedeem` it later

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
