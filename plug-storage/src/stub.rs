use crate::{StorageResult, create_composite_key, MAX_UNICODE_RUNE};
use plug_types::LedgerTime;

/// A key and its stored bytes, as returned by scans and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Results of a scan or query. Each item may fail on its own, so a scan can
/// error part-way through.
pub type StateIter<'a> = Box<dyn Iterator<Item = StorageResult<KeyValue>> + 'a>;

/// The host ledger's per-transaction view of world state.
///
/// Reads see the snapshot the transaction was simulated against; writes are
/// buffered and only become visible if the transaction commits. None of the
/// methods retry: every error is meant to abort the transaction.
pub trait ChaincodeStub: Send + Sync {
    /// Reads a key. `None` means the key does not exist.
    fn get_state(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Writes a key.
    fn put_state(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Deletes a key. Deleting a missing key is not an error.
    fn del_state(&self, key: &str) -> StorageResult<()>;

    /// Scans simple keys in `[start, end)`. An empty bound is open.
    fn get_state_by_range(&self, start: &str, end: &str) -> StorageResult<StateIter<'_>>;

    /// Runs a rich query (see [`Selector`](crate::Selector)).
    fn get_query_result(&self, query: &str) -> StorageResult<StateIter<'_>>;

    /// Sets the transaction's event. A later call replaces an earlier one.
    fn set_event(&self, name: &str, payload: &[u8]) -> StorageResult<()>;

    /// Timestamp the client assigned to the transaction.
    fn tx_timestamp(&self) -> StorageResult<LedgerTime>;

    /// Scans every composite key that starts with `object_type` followed by
    /// `attributes`.
    fn get_state_by_partial_composite_key(
        &self,
        object_type: &str,
        attributes: &[&str],
    ) -> StorageResult<StateIter<'_>> {
        let start = create_composite_key(object_type, attributes)?;
        let end = format!("{start}{MAX_UNICODE_RUNE}");
        self.get_state_by_range(&start, &end)
    }
}
