mod common;

use common::{Flags, Label, Note, full_note, label, note};
use plug_model::{Presence, Record, pick};
use plug_types::LedgerTime;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

// ── Single-field rule ────────────────────────────────────────────

#[test]
fn pick_prefers_set_value() {
    assert_eq!(pick(&"old".to_string(), &"new".to_string()), "new");
    assert_eq!(pick(&5u32, &9u32), 9);
    assert!(pick(&false, &true));
}

#[test]
fn pick_keeps_previous_on_zero() {
    assert_eq!(pick(&"old".to_string(), &String::new()), "old");
    assert_eq!(pick(&5u32, &0u32), 5);
    assert_eq!(pick(&-3i64, &0i64), -3);
    assert_eq!(pick(&vec![1u32], &Vec::new()), vec![1]);
}

// ── Concrete scenarios ───────────────────────────────────────────

#[test]
fn description_changes_creator_kept() {
    let previous = label("tag1", 5, "old");
    let next = label("tag1", 0, "new");

    let merged = Label::merge(&previous, &next);
    assert_eq!(merged, label("tag1", 5, "new"));
}

#[test]
fn false_cannot_clear_stored_true() {
    let previous = Note {
        muted: true,
        ..note("h1")
    };
    let next = Note {
        muted: false,
        ..note("h1")
    };

    let merged = Note::merge(&previous, &next);
    assert!(merged.muted);
}

#[test]
fn zero_integer_cannot_clear_stored_value() {
    let previous = Note {
        score: 12,
        ..note("h1")
    };
    let merged = Note::merge(&previous, &note("h1"));
    assert_eq!(merged.score, 12);
}

#[test]
fn negative_integer_is_a_set_value() {
    let previous = Note {
        score: 12,
        ..note("h1")
    };
    let next = Note {
        score: -1,
        ..note("h1")
    };
    assert_eq!(Note::merge(&previous, &next).score, -1);
}

// ── Identity ─────────────────────────────────────────────────────

#[test]
fn identity_from_previous_even_if_next_differs() {
    let previous = label("tag1", 5, "old");
    let next = label("other", 9, "new");

    let merged = Label::merge(&previous, &next);
    assert_eq!(merged.name, "tag1");
    assert_eq!(merged.creator_id, 9);
    assert_eq!(merged.description, "new");
}

#[test]
fn identity_kept_when_next_identity_empty() {
    let merged = Note::merge(&full_note(), &Note::default());
    assert_eq!(merged.hash, "h1");
}

// ── Collections ──────────────────────────────────────────────────

#[test]
fn lists_replaced_wholesale() {
    let previous = full_note();
    let next = Note {
        upvotes: vec!["b".into()],
        ..note("h1")
    };

    let merged = Note::merge(&previous, &next);
    assert_eq!(merged.upvotes, vec!["b".to_string()]);
    assert_eq!(merged.downvotes, previous.downvotes);
}

#[test]
fn empty_list_keeps_stored_list() {
    let previous = full_note();
    let merged = Note::merge(&previous, &note("h1"));
    assert_eq!(merged.ranks, vec![1, 2]);
}

#[test]
fn maps_replaced_wholesale_not_merged_by_key() {
    let previous = full_note();
    let next = Note {
        emojis: BTreeMap::from([(2, vec!["b".into()])]),
        ..note("h1")
    };

    let merged = Note::merge(&previous, &next);
    assert_eq!(merged.emojis, BTreeMap::from([(2, vec!["b".to_string()])]));
    assert!(!merged.emojis.contains_key(&1));
}

// ── Timestamps ───────────────────────────────────────────────────

#[test]
fn zero_timestamp_keeps_stored_time() {
    let previous = full_note();
    let merged = Note::merge(&previous, &note("h1"));
    assert_eq!(merged.created, previous.created);
}

#[test]
fn set_timestamp_overwrites() {
    let later = LedgerTime::from_unix(1_800_000_000, 0).unwrap();
    let next = Note {
        created: later,
        ..note("h1")
    };
    assert_eq!(Note::merge(&full_note(), &next).created, later);
}

// ── Whole-record properties ──────────────────────────────────────

#[test]
fn merge_with_self_is_identity() {
    let previous = full_note();
    assert_eq!(Note::merge(&previous, &previous), previous);
}

#[test]
fn all_zero_next_returns_previous() {
    let previous = full_note();
    assert_eq!(previous.merged_with(&note("h1")), previous);
}

#[test]
fn previous_not_mutated() {
    let previous = full_note();
    let snapshot = previous.clone();
    let next = Note {
        title: "changed".into(),
        ..note("h1")
    };
    let _ = Note::merge(&previous, &next);
    assert_eq!(previous, snapshot);
}

#[test]
fn payload_with_missing_fields_merges_as_partial_update() {
    let previous = label("tag1", 5, "old");
    let next: Label = serde_json::from_str(r#"{"name":"tag1","description":"new"}"#).unwrap();
    assert_eq!(Label::merge(&previous, &next), label("tag1", 5, "new"));
}

// ── Explicit presence ────────────────────────────────────────────

#[test]
fn present_false_overwrites_stored_true() {
    let previous = Flags {
        id: "f1".into(),
        pinned: Presence::Present(true),
        weight: Presence::Present(3),
        caption: "c".into(),
    };
    let next: Flags = serde_json::from_str(r#"{"id":"f1","pinned":false}"#).unwrap();

    let merged = Flags::merge(&previous, &next);
    assert_eq!(merged.pinned, Presence::Present(false));
    assert_eq!(merged.weight, Presence::Present(3));
    assert_eq!(merged.caption, "c");
}

#[test]
fn present_zero_overwrites_stored_number() {
    let previous = Flags {
        id: "f1".into(),
        weight: Presence::Present(3),
        ..Flags::default()
    };
    let next = Flags {
        id: "f1".into(),
        weight: Presence::Present(0),
        ..Flags::default()
    };
    assert_eq!(Flags::merge(&previous, &next).weight, Presence::Present(0));
}

#[test]
fn null_is_absent() {
    let flags: Flags = serde_json::from_str(r#"{"id":"f1","pinned":null}"#).unwrap();
    assert_eq!(flags.pinned, Presence::Absent);
}

#[test]
fn presence_serializes_as_plain_optional() {
    let flags = Flags {
        id: "f1".into(),
        pinned: Presence::Present(false),
        ..Flags::default()
    };
    let json = serde_json::to_value(&flags).unwrap();
    assert_eq!(json["pinned"], serde_json::json!(false));
    assert_eq!(json["weight"], serde_json::Value::Null);
}

#[test]
fn null_collections_decode_as_empty_and_keep_stored() {
    let next: Note =
        serde_json::from_str(r#"{"hash":"h1","title":"new","ranks":null,"emojis":null}"#).unwrap();
    assert!(next.ranks.is_empty());
    assert!(next.emojis.is_empty());

    let merged = Note::merge(&full_note(), &next);
    assert_eq!(merged.title, "new");
    assert_eq!(merged.ranks, vec![1, 2]);
    assert_eq!(merged.emojis, full_note().emojis);
}
