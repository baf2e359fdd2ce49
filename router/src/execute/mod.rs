//! Execute handlers for the router.
//!
//! - `outgoing` - value transfers and config update requests from connectors
//! - `inbound` - delivery of messages handed over by the master router
//! - `admin` - protocol fees, config, and sweeping

mod admin;
mod inbound;
mod outgoing;

pub use admin::*;
pub use inbound::*;
pub use outgoing::*;
