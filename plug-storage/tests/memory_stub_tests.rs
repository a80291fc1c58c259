use plug_storage::{ChaincodeStub, KeyValue, MemoryStub, StorageError, create_composite_key};
use plug_types::LedgerTime;
use pretty_assertions::assert_eq;

fn keys(iter: plug_storage::StateIter<'_>) -> Vec<String> {
    iter.map(|kv| kv.unwrap().key).collect()
}

#[test]
fn put_and_get() {
    let stub = MemoryStub::new();
    stub.put_state("tag1", br#"{"name":"tag1"}"#).unwrap();
    assert_eq!(stub.get_state("tag1").unwrap(), Some(br#"{"name":"tag1"}"#.to_vec()));
}

#[test]
fn missing_key_is_none() {
    let stub = MemoryStub::new();
    assert_eq!(stub.get_state("nope").unwrap(), None);
}

#[test]
fn put_overwrites() {
    let stub = MemoryStub::new();
    stub.put_state("k", b"1").unwrap();
    stub.put_state("k", b"2").unwrap();
    assert_eq!(stub.get_state("k").unwrap(), Some(b"2".to_vec()));
    assert_eq!(stub.len().unwrap(), 1);
}

#[test]
fn empty_key_rejected() {
    let stub = MemoryStub::new();
    let err = stub.put_state("", b"x").unwrap_err();
    assert!(matches!(err, StorageError::InvalidKey(_)));
}

#[test]
fn delete_removes_and_tolerates_missing() {
    let stub = MemoryStub::new();
    stub.put_state("k", b"1").unwrap();
    stub.del_state("k").unwrap();
    stub.del_state("k").unwrap();
    assert!(stub.is_empty().unwrap());
}

// ── Range scans ──────────────────────────────────────────────────

#[test]
fn range_is_half_open_and_sorted() {
    let stub = MemoryStub::new();
    for k in ["d", "a", "c", "b"] {
        stub.put_state(k, b"{}").unwrap();
    }
    assert_eq!(keys(stub.get_state_by_range("b", "d").unwrap()), vec!["b", "c"]);
}

#[test]
fn open_range_returns_all_simple_keys() {
    let stub = MemoryStub::new();
    stub.put_state("b", b"{}").unwrap();
    stub.put_state("a", b"{}").unwrap();
    assert_eq!(keys(stub.get_state_by_range("", "").unwrap()), vec!["a", "b"]);
}

#[test]
fn open_range_skips_composite_keys() {
    let stub = MemoryStub::new();
    stub.put_state("plain", b"{}").unwrap();
    let ck = create_composite_key("tag", &["rust"]).unwrap();
    stub.put_state(&ck, b"{}").unwrap();

    assert_eq!(keys(stub.get_state_by_range("", "").unwrap()), vec!["plain"]);
}

#[test]
fn inverted_range_is_empty() {
    let stub = MemoryStub::new();
    stub.put_state("a", b"{}").unwrap();
    assert!(keys(stub.get_state_by_range("z", "b").unwrap()).is_empty());
}

#[test]
fn partial_composite_scan_stays_in_its_object_type() {
    let stub = MemoryStub::new();
    let tag = create_composite_key("tag", &["x"]).unwrap();
    let tags = create_composite_key("tags", &["x"]).unwrap();
    let category = create_composite_key("category", &["x"]).unwrap();
    for k in [&tag, &tags, &category] {
        stub.put_state(k, b"{}").unwrap();
    }

    let found = keys(stub.get_state_by_partial_composite_key("tag", &[]).unwrap());
    assert_eq!(found, vec![tag]);
}

// ── Rich queries ─────────────────────────────────────────────────

#[test]
fn query_filters_by_selector() {
    let stub = MemoryStub::new();
    stub.put_state("p1", br#"{"creator":"alice"}"#).unwrap();
    stub.put_state("p2", br#"{"creator":"bob"}"#).unwrap();

    let hits: Vec<KeyValue> = stub
        .get_query_result(r#"{"selector":{"creator":"bob"}}"#)
        .unwrap()
        .map(Result::unwrap)
        .collect();
    assert_eq!(hits, vec![KeyValue::new("p2", br#"{"creator":"bob"}"#.to_vec())]);
}

#[test]
fn query_skips_non_json_values() {
    let stub = MemoryStub::new();
    stub.put_state("raw", b"\x00\x01").unwrap();
    stub.put_state("doc", br#"{"creator":"bob"}"#).unwrap();
    let found = keys(stub.get_query_result(r#"{"selector":{}}"#).unwrap());
    assert_eq!(found, vec!["doc"]);
}

#[test]
fn query_rejects_bad_selector() {
    let stub = MemoryStub::new();
    let err = stub.get_query_result("creator=bob").err().unwrap();
    assert!(matches!(err, StorageError::InvalidQuery(_)));
}

// ── Events & timestamp ───────────────────────────────────────────

#[test]
fn events_recorded_in_order() {
    let stub = MemoryStub::new();
    stub.set_event("CreateTag", b"1").unwrap();
    stub.set_event("UpdateTag", b"2").unwrap();

    let names: Vec<_> = stub.events().unwrap().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["CreateTag", "UpdateTag"]);
    assert_eq!(stub.last_event().unwrap().unwrap().payload, b"2".to_vec());
}

#[test]
fn empty_event_name_rejected() {
    let stub = MemoryStub::new();
    assert!(stub.set_event("", b"x").is_err());
}

#[test]
fn tx_timestamp_is_configurable() {
    let t = LedgerTime::from_unix(1_700_000_000, 0).unwrap();
    let stub = MemoryStub::new().with_tx_timestamp(t);
    assert_eq!(stub.tx_timestamp().unwrap(), t);

    let later = LedgerTime::from_unix(1_700_000_060, 0).unwrap();
    stub.set_tx_timestamp(later).unwrap();
    assert_eq!(stub.tx_timestamp().unwrap(), later);
}

#[test]
fn snapshot_roundtrip() {
    let stub = MemoryStub::new();
    stub.put_state("a", b"1").unwrap();
    let restored = MemoryStub::from_snapshot(stub.snapshot().unwrap());
    assert_eq!(restored.get_state("a").unwrap(), Some(b"1".to_vec()));
}
