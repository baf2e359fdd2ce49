//! Execute handlers for the connector.
//!
//! - `outgoing` - bridging and remote config update requests
//! - `redeem` - inbound redeems, failed execution records, retry
//! - `config` - chain configuration and admin

mod config;
mod outgoing;
mod redeem;

pub use config::*;
pub use outgoing::*;
pub use redeem::*;
