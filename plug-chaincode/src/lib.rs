//! Forum chaincode contracts.
//!
//! Four deployable chaincodes share this crate:
//!
//! - `plug`: tags, categories and category groups
//! - `post`: posts with votes and emoji reactions
//! - `topic`: topics with votes and emoji reactions
//! - `userprofile`: user profiles with roles and badges
//!
//! Every contract follows the same shape. Creates decode a JSON payload and
//! refuse to overwrite an existing key. Updates are partial: the payload is
//! merged onto the stored record with [`plug_model::Record::merge`], so any
//! field left at its zero value keeps its stored value. Each mutation emits
//! one event carrying the stored record.
//!
//! Contracts reach the ledger only through a [`TransactionContext`]. The
//! host supplies one per transaction; [`LocalContext`] pairs a
//! [`MemoryStub`](plug_storage::MemoryStub) with a [`StaticIdentity`] for
//! local runs and tests.

mod context;
mod contracts;
mod dispatch;
mod error;
pub mod reactions;
pub mod records;

pub use context::{
    ClientIdentity, IdentityError, LocalContext, StaticIdentity, TransactionContext,
    submitting_client_identity,
};
pub use contracts::{
    Category, CategoryContract, CategoryGroup, CategoryGroupContract, Post, PostContract, Profile,
    Tag, TagContract, Topic, TopicContract, UserProfileContract,
};
pub use dispatch::{Chaincode, Contract};
pub use error::{ContractError, ContractResult};
