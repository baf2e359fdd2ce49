//! XBridge price feed
//!
//! Stores destination gas prices packed four to a word, plus a header per
//! remote chain that points at its slot and carries a flat per-byte price.
//! The router reads both through the `Prices` query.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
