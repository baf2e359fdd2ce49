//! Execute handlers for the master router.
//!
//! - `proposal` - inbound dispatch and outbound hand-off
//! - `admin` - routes, router authorization, remote master routers

mod admin;
mod proposal;

pub use admin::*;
pub use proposal::*;
