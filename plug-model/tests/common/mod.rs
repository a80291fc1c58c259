//! Record types shared by the model tests.

#![allow(dead_code)]

use plug_model::{Presence, impl_record};
use plug_types::LedgerTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Label {
    pub name: String,
    #[serde(rename = "creatorID")]
    pub creator_id: u32,
    pub description: String,
}

impl_record!(Label {
    entity: "label",
    identity: name,
    fields: [creator_id, description],
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Note {
    pub hash: String,
    pub title: String,
    pub score: i64,
    pub muted: bool,
    pub created: LedgerTime,
    pub upvotes: Vec<String>,
    pub downvotes: Vec<String>,
    #[serde(deserialize_with = "plug_model::null_as_default")]
    pub ranks: Vec<u32>,
    #[serde(deserialize_with = "plug_model::null_as_default")]
    pub emojis: BTreeMap<u8, Vec<String>>,
}

impl_record!(Note {
    entity: "note",
    identity: hash,
    fields: [title, score, muted, created, upvotes, downvotes, ranks, emojis],
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Flags {
    pub id: String,
    pub pinned: Presence<bool>,
    pub weight: Presence<u32>,
    pub caption: String,
}

impl_record!(Flags {
    entity: "flags",
    identity: id,
    fields: [pinned, weight, caption],
});

pub fn label(name: &str, creator_id: u32, description: &str) -> Label {
    Label {
        name: name.into(),
        creator_id,
        description: description.into(),
    }
}

pub fn note(hash: &str) -> Note {
    Note {
        hash: hash.into(),
        ..Note::default()
    }
}

pub fn full_note() -> Note {
    Note {
        hash: "h1".into(),
        title: "stored".into(),
        score: 7,
        muted: true,
        created: LedgerTime::from_unix(1_700_000_000, 0).unwrap(),
        upvotes: vec!["a".into()],
        downvotes: vec!["z".into()],
        ranks: vec![1, 2],
        emojis: BTreeMap::from([(1, vec!["a".into()])]),
    }
}
