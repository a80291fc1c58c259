//! World-state access for plug chaincode.
//!
//! Chaincode never owns its storage: the host ledger hands every
//! transaction a stub that reads from a consistent snapshot and buffers
//! writes until commit. This crate defines that seam and what sits
//! directly on top of it.
//!
//! # Architecture
//!
//! - [`ChaincodeStub`] is the host-provided surface: key reads and writes,
//!   range scans, rich queries, the transaction event and timestamp
//! - Composite keys give each entity type its own key space inside one
//!   chaincode namespace
//! - [`Selector`] builds and evaluates the Mango-style rich queries
//! - [`MemoryStub`] is an in-process stub for local runs and tests

mod composite;
mod error;
mod memory;
mod selector;
mod stub;

pub use composite::{create_composite_key, split_composite_key, MAX_UNICODE_RUNE};
pub use error::{StorageError, StorageResult};
pub use memory::MemoryStub;
pub use selector::Selector;
pub use stub::{ChaincodeStub, KeyValue, StateIter};
