//! Shared test helpers for contract tests.

#![allow(dead_code)]

use plug_chaincode::{LocalContext, StaticIdentity};
use plug_storage::{ChaincodeStub, MemoryStub, StateIter, StorageError, StorageResult};
use plug_types::{ChaincodeEvent, ClientId, LedgerTime};
use std::sync::atomic::{AtomicBool, Ordering};

/// Fixed transaction time used by every test.
pub fn tx_time() -> LedgerTime {
    "2024-05-01T12:00:00Z".parse().unwrap()
}

pub fn identity(caller: &str) -> StaticIdentity {
    StaticIdentity::new(&ClientId::new(caller), "Org1MSP")
}

/// A memory stub with the fixed transaction time.
pub fn stub() -> MemoryStub {
    MemoryStub::new().with_tx_timestamp(tx_time())
}

/// Stub plus caller, borrowed into a context on demand.
pub struct Harness {
    pub stub: MemoryStub,
    pub identity: StaticIdentity,
}

impl Harness {
    pub fn new(caller: &str) -> Self {
        Self {
            stub: stub(),
            identity: identity(caller),
        }
    }

    pub fn ctx(&self) -> LocalContext<'_> {
        LocalContext::new(&self.stub, &self.identity)
    }

    /// Switches the submitting client, keeping the world state.
    pub fn as_caller(&mut self, caller: &str) -> &mut Self {
        self.identity = identity(caller);
        self
    }

    pub fn last_event(&self) -> ChaincodeEvent {
        self.stub.last_event().unwrap().expect("an event was emitted")
    }

    pub fn event_names(&self) -> Vec<String> {
        self.stub
            .events()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect()
    }
}

/// Wraps a [`MemoryStub`] and fails selected operations on demand.
#[derive(Default)]
pub struct FailingStub {
    pub inner: MemoryStub,
    pub fail_get: AtomicBool,
    pub fail_put: AtomicBool,
    pub fail_scan: AtomicBool,
    pub fail_next: AtomicBool,
    pub fail_event: AtomicBool,
}

impl FailingStub {
    pub fn new() -> Self {
        Self {
            inner: stub(),
            ..Self::default()
        }
    }

    pub fn fail_get(&self, on: bool) {
        self.fail_get.store(on, Ordering::SeqCst);
    }

    pub fn fail_put(&self, on: bool) {
        self.fail_put.store(on, Ordering::SeqCst);
    }

    pub fn fail_scan(&self, on: bool) {
        self.fail_scan.store(on, Ordering::SeqCst);
    }

    /// Scans start normally but yield an error after the stored items.
    pub fn fail_next(&self, on: bool) {
        self.fail_next.store(on, Ordering::SeqCst);
    }

    pub fn fail_event(&self, on: bool) {
        self.fail_event.store(on, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool, message: &str) -> StorageResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(StorageError::Backend(message.to_string()));
        }
        Ok(())
    }

    fn scan<'a>(&'a self, iter: StateIter<'a>) -> StateIter<'a> {
        if !self.fail_next.load(Ordering::SeqCst) {
            return iter;
        }
        let failure = StorageError::Iterator("failed retrieving next item".to_string());
        Box::new(iter.chain(std::iter::once(Err(failure))))
    }
}

impl ChaincodeStub for FailingStub {
    fn get_state(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Self::check(&self.fail_get, "unable to retrieve asset")?;
        self.inner.get_state(key)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        Self::check(&self.fail_put, "failed inserting key")?;
        self.inner.put_state(key, value)
    }

    fn del_state(&self, key: &str) -> StorageResult<()> {
        Self::check(&self.fail_put, "failed deleting key")?;
        self.inner.del_state(key)
    }

    fn get_state_by_range(&self, start: &str, end: &str) -> StorageResult<StateIter<'_>> {
        Self::check(&self.fail_scan, "failed retrieving all assets")?;
        Ok(self.scan(self.inner.get_state_by_range(start, end)?))
    }

    fn get_query_result(&self, query: &str) -> StorageResult<StateIter<'_>> {
        Self::check(&self.fail_scan, "failed retrieving all assets")?;
        Ok(self.scan(self.inner.get_query_result(query)?))
    }

    fn set_event(&self, name: &str, payload: &[u8]) -> StorageResult<()> {
        Self::check(&self.fail_event, "event bus unavailable")?;
        self.inner.set_event(name, payload)
    }

    fn tx_timestamp(&self) -> StorageResult<LedgerTime> {
        self.inner.tx_timestamp()
    }
}
