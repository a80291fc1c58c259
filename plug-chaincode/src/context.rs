//! Transaction context handed to every contract operation.
//!
//! The host runtime owns the ledger connection and the caller's
//! certificate; a contract only sees them through these two traits. Tests
//! and the local runner supply [`LocalContext`] with a
//! [`MemoryStub`](plug_storage::MemoryStub) and a [`StaticIdentity`].

use crate::{ContractError, ContractResult};
use plug_storage::ChaincodeStub;
use plug_types::ClientId;

/// Error reported by a [`ClientIdentity`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct IdentityError(pub String);

/// The submitting client's certificate details.
pub trait ClientIdentity: Send + Sync {
    /// Base64-encoded client id, exactly as the host delivers it.
    fn id(&self) -> Result<String, IdentityError>;

    /// Membership service provider of the client's organisation.
    fn msp_id(&self) -> Result<String, IdentityError>;
}

/// Everything a contract operation can reach.
pub trait TransactionContext {
    fn stub(&self) -> &dyn ChaincodeStub;

    fn client_identity(&self) -> &dyn ClientIdentity;
}

/// An identity fixed at construction, typically from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    encoded_id: String,
    msp_id: String,
}

impl StaticIdentity {
    /// Identity for a decoded client id.
    pub fn new(client_id: &ClientId, msp_id: impl Into<String>) -> Self {
        Self {
            encoded_id: client_id.to_base64(),
            msp_id: msp_id.into(),
        }
    }

    /// Identity from an id that is already in its delivered (base64) form.
    /// Nothing is validated until a contract decodes it.
    pub fn from_encoded(encoded_id: impl Into<String>, msp_id: impl Into<String>) -> Self {
        Self {
            encoded_id: encoded_id.into(),
            msp_id: msp_id.into(),
        }
    }
}

impl ClientIdentity for StaticIdentity {
    fn id(&self) -> Result<String, IdentityError> {
        Ok(self.encoded_id.clone())
    }

    fn msp_id(&self) -> Result<String, IdentityError> {
        Ok(self.msp_id.clone())
    }
}

/// A context over borrowed parts.
#[derive(Clone, Copy)]
pub struct LocalContext<'a> {
    stub: &'a dyn ChaincodeStub,
    identity: &'a dyn ClientIdentity,
}

impl<'a> LocalContext<'a> {
    pub fn new(stub: &'a dyn ChaincodeStub, identity: &'a dyn ClientIdentity) -> Self {
        Self { stub, identity }
    }
}

impl TransactionContext for LocalContext<'_> {
    fn stub(&self) -> &dyn ChaincodeStub {
        self.stub
    }

    fn client_identity(&self) -> &dyn ClientIdentity {
        self.identity
    }
}

/// Decoded identity of the client that submitted the transaction.
pub fn submitting_client_identity(ctx: &dyn TransactionContext) -> ContractResult<ClientId> {
    let encoded = ctx
        .client_identity()
        .id()
        .map_err(ContractError::ReadClientId)?;
    ClientId::from_base64(&encoded).map_err(ContractError::DecodeClientId)
}
