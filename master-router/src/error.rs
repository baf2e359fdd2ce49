use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: {router} is not an authorized router")]
    UnauthorizedRouter { router: String },

    #[error("No master router configured for chain {chain_id}")]
    NoRemoteMasterRouter { chain_id: u64 },

    #[error("Payload too large: {size} bytes exceeds the limit of {max}")]
    PayloadTooLarge { size: u64, max: u64 },

    #[error("Invalid remote master router: {reason}")]
    InvalidRemoteMasterRouter { reason: String },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
