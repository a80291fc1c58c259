//! Error types for contract operations.
//!
//! Message texts are part of the contract surface: clients match on them,
//! so they follow the wording the deployed chaincode has always used.

use crate::context::IdentityError;
use plug_storage::StorageError;
use thiserror::Error;

/// Result type for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;

/// Errors returned by contract operations. Every one aborts the transaction.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Payload or stored bytes are not valid JSON for the record type.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    #[error("the {entity} {key} does not exist")]
    NotFound { entity: &'static str, key: String },

    #[error("the {entity} {key} already exists")]
    AlreadyExists { entity: &'static str, key: String },

    #[error("failed to read from world state: {0}")]
    StateRead(StorageError),

    #[error("failed to put to world state: {0}")]
    StateWrite(StorageError),

    /// Scan, query and event errors, passed through unchanged.
    #[error("{0}")]
    State(StorageError),

    #[error("the {entity} {key} can only be {action} by its creator")]
    Unauthorized {
        entity: &'static str,
        key: String,
        action: &'static str,
    },

    #[error("{field} is required for {action}")]
    MissingField { field: &'static str, action: String },

    #[error("failed to read clientID: {0}")]
    ReadClientId(IdentityError),

    #[error("failed to base64 decode clientID: {0}")]
    DecodeClientId(plug_types::Error),

    #[error("function {function} not found in {contract}")]
    UnknownFunction { contract: String, function: String },

    #[error("invalid arguments for {function}: {reason}")]
    InvalidArgument { function: String, reason: String },
}

impl ContractError {
    pub(crate) fn invalid_argument(function: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            function: function.to_string(),
            reason: reason.into(),
        }
    }
}
