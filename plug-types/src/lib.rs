//! Core type definitions for the plug chaincode.
//!
//! This crate defines the small, contract-agnostic types shared by every
//! chaincode module:
//! - Ledger timestamps with an explicit zero instant
//! - Caller identities as handed over by the host runtime
//! - Chaincode events emitted at the end of a transaction
//!
//! Entity types (tags, posts, profiles, ...) belong to their contract
//! modules, not here.

mod event;
mod ids;
mod timestamp;

pub use event::ChaincodeEvent;
pub use ids::ClientId;
pub use timestamp::LedgerTime;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("{0}")]
    Base64(#[from] base64::DecodeError),

    #[error("client id is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
