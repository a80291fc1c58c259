//! Chaincode events.
//!
//! A transaction may publish a single named event alongside its state
//! writes. Listeners receive it once the block is committed; chaincode gets
//! no acknowledgment, so an event is strictly a notification.

use crate::Result;
use serde::{Deserialize, Serialize};

/// A named notification with an opaque payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeEvent {
    /// Event name, by convention the PascalCase name of the operation
    /// (e.g. "CreateTag").
    pub name: String,
    /// Payload bytes, JSON for every event this crate's users emit.
    pub payload: Vec<u8>,
}

impl ChaincodeEvent {
    /// Creates an event from raw payload bytes.
    #[must_use]
    pub fn new(name: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
        }
    }

    /// Creates an event whose payload is the JSON encoding of `value`.
    pub fn json<T: Serialize + ?Sized>(name: impl Into<String>, value: &T) -> Result<Self> {
        Ok(Self::new(name, serde_json::to_vec(value)?))
    }

    /// Decodes the payload as JSON.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.payload)?)
    }
}
