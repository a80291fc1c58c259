//! Generic record storage on top of the chaincode stub.
//!
//! Every record lives under the composite key `(R::ENTITY, [identity])`,
//! so several entity types can share one chaincode namespace without their
//! identity keys colliding.

use crate::context::submitting_client_identity;
use crate::{ContractError, ContractResult, TransactionContext};
use plug_model::Record;
use plug_storage::{Selector, StateIter, create_composite_key};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// A record that belongs to the client who created it.
pub trait Owned: Record {
    /// Client id of the creator.
    fn creator(&self) -> &str;
}

/// Storage key of the record of type `R` with identity `id`.
pub fn record_key<R: Record>(id: &str) -> ContractResult<String> {
    create_composite_key(R::ENTITY, &[id]).map_err(ContractError::State)
}

/// True if a record with this identity is stored.
pub fn exists<R: Record>(ctx: &dyn TransactionContext, id: &str) -> ContractResult<bool> {
    let key = record_key::<R>(id)?;
    let bytes = ctx
        .stub()
        .get_state(&key)
        .map_err(ContractError::StateRead)?;
    Ok(bytes.is_some())
}

/// Reads and decodes one record.
pub fn read<R>(ctx: &dyn TransactionContext, id: &str) -> ContractResult<R>
where
    R: Record + DeserializeOwned,
{
    let key = record_key::<R>(id)?;
    let bytes = ctx
        .stub()
        .get_state(&key)
        .map_err(ContractError::StateRead)?
        .ok_or_else(|| ContractError::NotFound {
            entity: R::ENTITY,
            key: id.to_string(),
        })?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Stores a new record, refusing to overwrite an existing one.
pub fn insert<R>(ctx: &dyn TransactionContext, record: &R) -> ContractResult<()>
where
    R: Record + Serialize,
{
    require_identity(record, "creation")?;
    if exists::<R>(ctx, record.identity())? {
        return Err(ContractError::AlreadyExists {
            entity: R::ENTITY,
            key: record.identity().to_string(),
        });
    }
    store(ctx, record)?;
    debug!(entity = R::ENTITY, key = record.identity(), "record created");
    Ok(())
}

/// Writes a record unconditionally.
pub fn store<R>(ctx: &dyn TransactionContext, record: &R) -> ContractResult<()>
where
    R: Record + Serialize,
{
    let key = record_key::<R>(record.identity())?;
    let bytes = serde_json::to_vec(record)?;
    ctx.stub()
        .put_state(&key, &bytes)
        .map_err(ContractError::StateWrite)
}

/// Deletes a record. Callers check existence first.
pub fn remove<R: Record>(ctx: &dyn TransactionContext, id: &str) -> ContractResult<()> {
    let key = record_key::<R>(id)?;
    ctx.stub()
        .del_state(&key)
        .map_err(ContractError::StateWrite)?;
    debug!(entity = R::ENTITY, key = id, "record deleted");
    Ok(())
}

/// Partial update: reads the stored record, merges `next` onto it and
/// writes the result back.
pub fn merge_update<R>(ctx: &dyn TransactionContext, next: &R) -> ContractResult<R>
where
    R: Record + Serialize + DeserializeOwned,
{
    require_identity(next, "updating")?;
    let previous = read::<R>(ctx, next.identity())?;
    let merged = R::merge(&previous, next);
    store(ctx, &merged)?;
    debug!(entity = R::ENTITY, key = merged.identity(), "record merged");
    Ok(merged)
}

/// Reads a record and checks that the submitting client created it.
///
/// `action` completes the rejection message, e.g. "updated".
pub fn owned_by_caller<R>(
    ctx: &dyn TransactionContext,
    id: &str,
    action: &'static str,
) -> ContractResult<R>
where
    R: Owned + DeserializeOwned,
{
    let stored: R = read(ctx, id)?;
    let caller = submitting_client_identity(ctx)?;
    if stored.creator() != caller.as_str() {
        warn!(
            entity = R::ENTITY,
            key = id,
            caller = %caller,
            action,
            "rejected: caller is not the creator"
        );
        return Err(ContractError::Unauthorized {
            entity: R::ENTITY,
            key: id.to_string(),
            action,
        });
    }
    Ok(stored)
}

/// Every stored record of type `R`, in key order.
pub fn all<R>(ctx: &dyn TransactionContext) -> ContractResult<Vec<R>>
where
    R: Record + DeserializeOwned,
{
    let iter = ctx
        .stub()
        .get_state_by_partial_composite_key(R::ENTITY, &[])
        .map_err(ContractError::State)?;
    decode_all(iter, |_| true)
}

/// Records of type `R` matching a rich-query selector.
pub fn query<R>(ctx: &dyn TransactionContext, selector: &Selector) -> ContractResult<Vec<R>>
where
    R: Record + DeserializeOwned,
{
    let prefix = create_composite_key(R::ENTITY, &[]).map_err(ContractError::State)?;
    let query = selector.to_query_string();
    debug!(entity = R::ENTITY, %query, "rich query");
    let iter = ctx
        .stub()
        .get_query_result(&query)
        .map_err(ContractError::State)?;
    decode_all(iter, |key| key.starts_with(&prefix))
}

/// Encodes `value` as JSON and sets it as the transaction's event.
pub fn emit<T>(ctx: &dyn TransactionContext, name: &str, value: &T) -> ContractResult<()>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_vec(value)?;
    ctx.stub()
        .set_event(name, &payload)
        .map_err(ContractError::State)
}

fn decode_all<R: DeserializeOwned>(
    iter: StateIter<'_>,
    keep: impl Fn(&str) -> bool,
) -> ContractResult<Vec<R>> {
    let mut records = Vec::new();
    for item in iter {
        let kv = item.map_err(ContractError::State)?;
        if keep(&kv.key) {
            records.push(serde_json::from_slice(&kv.value)?);
        }
    }
    Ok(records)
}

pub(crate) fn require_identity<R: Record>(record: &R, action: &str) -> ContractResult<()> {
    if record.identity().is_empty() {
        return Err(ContractError::MissingField {
            field: R::IDENTITY_FIELD,
            action: format!("{} {action}", R::ENTITY),
        });
    }
    Ok(())
}
