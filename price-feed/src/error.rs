use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: caller is not a price provider")]
    UnauthorizedProvider,

    #[error("Length mismatch: {keys} keys, {values} values")]
    LengthMismatch { keys: usize, values: usize },

    #[error("Invalid price header for chain {chain_id}: {reason}")]
    InvalidHeader { chain_id: u64, reason: String },

    #[error("Provider already registered: {provider}")]
    ProviderAlreadyExists { provider: String },

    #[error("Provider not found: {provider}")]
    ProviderNotFound { provider: String },
}
