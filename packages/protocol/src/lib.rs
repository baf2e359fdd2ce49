//! XBridge protocol core
//!
//! Pure, storage-free building blocks shared by every bridge contract:
//! - [`abi`]: Solidity ABI word codec
//! - [`codec`]: routed message frames and payloads
//! - [`decimals`]: amount rescaling between decimal precisions
//! - [`price`]: packed gas-price and per-chain header words
//! - [`fee`]: bridge fee formula
//! - [`status`]: delivery status codes
//! - [`chain`]: per-chain config, origin, and peer checks
//! - [`hash`]: keccak hashing of failed-execution records
//! - [`interfaces`]: cross-contract capability messages

pub mod abi;
pub mod chain;
pub mod codec;
pub mod decimals;
pub mod fee;
pub mod hash;
pub mod interfaces;
pub mod price;
pub mod status;

pub use chain::{ChainConfig, Origin};
pub use codec::{BridgeMessage, MessageType};
pub use status::Status;

/// Extra gas the router adds on top of a transfer's own gas limit to cover
/// the connector's bookkeeping around the apply step.
pub const REDEEM_SERVICE_GAS: u64 = 100_000;
