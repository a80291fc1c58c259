//! In-memory chaincode stub.
//!
//! Holds one chaincode namespace in a `BTreeMap`, so keys iterate in the
//! same byte order the ledger uses. Writes apply immediately; wrap a
//! transaction in its own stub built from a [`snapshot`](MemoryStub::snapshot)
//! to get abort-on-error behavior.

use crate::{
    ChaincodeStub, KeyValue, Selector, StateIter, StorageError, StorageResult,
};
use plug_types::{ChaincodeEvent, LedgerTime};
use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::debug;

/// Substitute for an empty range start: skips the composite key space,
/// which begins at U+0000.
const EMPTY_KEY_SUBSTITUTE: &str = "\u{1}";

/// A [`ChaincodeStub`] backed by process memory.
#[derive(Debug)]
pub struct MemoryStub {
    state: RwLock<BTreeMap<String, Vec<u8>>>,
    events: RwLock<Vec<ChaincodeEvent>>,
    tx_time: RwLock<LedgerTime>,
}

impl MemoryStub {
    /// An empty world state stamped with the current time.
    pub fn new() -> Self {
        Self::from_snapshot(BTreeMap::new())
    }

    /// Restores a world state captured with [`snapshot`](Self::snapshot).
    pub fn from_snapshot(state: BTreeMap<String, Vec<u8>>) -> Self {
        Self {
            state: RwLock::new(state),
            events: RwLock::new(Vec::new()),
            tx_time: RwLock::new(LedgerTime::now()),
        }
    }

    /// Fixes the timestamp reported by [`ChaincodeStub::tx_timestamp`].
    #[must_use]
    pub fn with_tx_timestamp(mut self, time: LedgerTime) -> Self {
        self.tx_time = RwLock::new(time);
        self
    }

    /// Moves the transaction clock, e.g. between two simulated transactions.
    pub fn set_tx_timestamp(&self, time: LedgerTime) -> StorageResult<()> {
        *self.tx_time.write().map_err(|_| StorageError::Poisoned)? = time;
        Ok(())
    }

    /// Copies the current world state.
    pub fn snapshot(&self) -> StorageResult<BTreeMap<String, Vec<u8>>> {
        Ok(self.state.read().map_err(|_| StorageError::Poisoned)?.clone())
    }

    /// Every event set so far, oldest first. The host keeps only the last
    /// one per transaction.
    pub fn events(&self) -> StorageResult<Vec<ChaincodeEvent>> {
        Ok(self.events.read().map_err(|_| StorageError::Poisoned)?.clone())
    }

    /// The most recent event, if any.
    pub fn last_event(&self) -> StorageResult<Option<ChaincodeEvent>> {
        Ok(self
            .events
            .read()
            .map_err(|_| StorageError::Poisoned)?
            .last()
            .cloned())
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> StorageResult<usize> {
        Ok(self.state.read().map_err(|_| StorageError::Poisoned)?.len())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }

    fn collect_matching(
        &self,
        mut keep: impl FnMut(&str, &[u8]) -> bool,
    ) -> StorageResult<StateIter<'_>> {
        let state = self.state.read().map_err(|_| StorageError::Poisoned)?;
        let hits: Vec<StorageResult<KeyValue>> = state
            .iter()
            .filter(|(k, v)| keep(k.as_str(), v.as_slice()))
            .map(|(k, v)| Ok(KeyValue::new(k.clone(), v.clone())))
            .collect();
        Ok(Box::new(hits.into_iter()))
    }
}

impl Default for MemoryStub {
    fn default() -> Self {
        Self::new()
    }
}

impl ChaincodeStub for MemoryStub {
    fn get_state(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(self
            .state
            .read()
            .map_err(|_| StorageError::Poisoned)?
            .get(key)
            .cloned())
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey("key must not be an empty string".into()));
        }
        debug!(key = %key.escape_debug(), bytes = value.len(), "put state");
        self.state
            .write()
            .map_err(|_| StorageError::Poisoned)?
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn del_state(&self, key: &str) -> StorageResult<()> {
        debug!(key = %key.escape_debug(), "delete state");
        self.state
            .write()
            .map_err(|_| StorageError::Poisoned)?
            .remove(key);
        Ok(())
    }

    fn get_state_by_range(&self, start: &str, end: &str) -> StorageResult<StateIter<'_>> {
        let start = if start.is_empty() { EMPTY_KEY_SUBSTITUTE } else { start };
        self.collect_matching(|key, _| key >= start && (end.is_empty() || key < end))
    }

    fn get_query_result(&self, query: &str) -> StorageResult<StateIter<'_>> {
        let selector = Selector::parse(query)?;
        self.collect_matching(|_, value| {
            serde_json::from_slice::<serde_json::Value>(value)
                .map(|doc| selector.matches(&doc))
                .unwrap_or(false)
        })
    }

    fn set_event(&self, name: &str, payload: &[u8]) -> StorageResult<()> {
        if name.is_empty() {
            return Err(StorageError::Backend("event name can not be empty string".into()));
        }
        debug!(event = name, bytes = payload.len(), "set event");
        self.events
            .write()
            .map_err(|_| StorageError::Poisoned)?
            .push(ChaincodeEvent::new(name, payload));
        Ok(())
    }

    fn tx_timestamp(&self) -> StorageResult<LedgerTime> {
        Ok(*self.tx_time.read().map_err(|_| StorageError::Poisoned)?)
    }
}
