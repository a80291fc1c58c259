//! Votes and emoji reactions shared by posts and topics.
//!
//! These are append operations on the stored record, not merges: the
//! caller's id is added to (or removed from) a list, and a list is never
//! replaced wholesale.

use crate::context::submitting_client_identity;
use crate::{ContractResult, TransactionContext, records};
use plug_model::Record;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::debug;

/// A record that collects votes and emoji reactions.
pub trait Reactable: Record + Serialize + DeserializeOwned {
    fn upvotes_mut(&mut self) -> &mut Vec<String>;

    fn downvotes_mut(&mut self) -> &mut Vec<String>;

    fn emojis_mut(&mut self) -> &mut BTreeMap<u8, Vec<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Up,
    Down,
}

impl Vote {
    fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// Records `voter`'s vote. A voter appears in at most one of the two lists;
/// voting the other way moves them. Returns false if nothing changed.
pub fn apply_vote<R: Reactable>(record: &mut R, voter: &str, vote: Vote) -> bool {
    let removed = remove_voter(list_for(record, vote.opposite()), voter);
    let added = push_unique(list_for(record, vote), voter);
    removed || added
}

/// Adds `reactor` under emoji `code`. Returns false if already there.
pub fn add_emoji<R: Reactable>(record: &mut R, code: u8, reactor: &str) -> bool {
    push_unique(record.emojis_mut().entry(code).or_default(), reactor)
}

/// Removes `reactor` from emoji `code`, dropping the code once nobody is
/// left under it. Returns false if the reactor was not there.
pub fn remove_emoji<R: Reactable>(record: &mut R, code: u8, reactor: &str) -> bool {
    let emojis = record.emojis_mut();
    let Some(reactors) = emojis.get_mut(&code) else {
        return false;
    };
    let removed = remove_voter(reactors, reactor);
    if reactors.is_empty() {
        emojis.remove(&code);
    }
    removed
}

/// Applies the caller's vote to the stored record and writes it back.
pub fn vote<R: Reactable>(ctx: &dyn TransactionContext, id: &str, vote: Vote) -> ContractResult<R> {
    let caller = submitting_client_identity(ctx)?;
    let mut record = records::read::<R>(ctx, id)?;
    if apply_vote(&mut record, caller.as_str(), vote) {
        records::store(ctx, &record)?;
    }
    debug!(entity = R::ENTITY, key = id, ?vote, "vote recorded");
    Ok(record)
}

/// Adds or removes the caller's emoji reaction on the stored record.
pub fn react<R: Reactable>(
    ctx: &dyn TransactionContext,
    id: &str,
    code: u8,
    add: bool,
) -> ContractResult<R> {
    let caller = submitting_client_identity(ctx)?;
    let mut record = records::read::<R>(ctx, id)?;
    let changed = if add {
        add_emoji(&mut record, code, caller.as_str())
    } else {
        remove_emoji(&mut record, code, caller.as_str())
    };
    if changed {
        records::store(ctx, &record)?;
    }
    debug!(entity = R::ENTITY, key = id, code, add, "reaction recorded");
    Ok(record)
}

fn list_for<R: Reactable>(record: &mut R, vote: Vote) -> &mut Vec<String> {
    match vote {
        Vote::Up => record.upvotes_mut(),
        Vote::Down => record.downvotes_mut(),
    }
}

fn push_unique(list: &mut Vec<String>, id: &str) -> bool {
    if list.iter().any(|existing| existing == id) {
        return false;
    }
    list.push(id.to_string());
    true
}

fn remove_voter(list: &mut Vec<String>, id: &str) -> bool {
    let before = list.len();
    list.retain(|existing| existing != id);
    list.len() != before
}
