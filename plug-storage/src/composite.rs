//! Composite keys.
//!
//! A composite key is `U+0000 objectType U+0000 attr1 U+0000 attr2 U+0000 ...`.
//! The leading `U+0000` keeps composite keys out of plain range scans, and
//! the trailing separator after each component makes prefix scans exact:
//! `("tag", ["ab"])` never matches a scan for `("tag", ["a"])`.

use crate::{StorageError, StorageResult};

pub const MIN_UNICODE_RUNE: char = '\u{0}';
pub const MAX_UNICODE_RUNE: char = '\u{10FFFF}';

/// Builds a composite key from an object type and its attributes.
pub fn create_composite_key(object_type: &str, attributes: &[&str]) -> StorageResult<String> {
    validate_component(object_type)?;
    let mut key = String::with_capacity(
        2 + object_type.len() + attributes.iter().map(|a| a.len() + 1).sum::<usize>(),
    );
    key.push(MIN_UNICODE_RUNE);
    key.push_str(object_type);
    key.push(MIN_UNICODE_RUNE);
    for attr in attributes {
        validate_component(attr)?;
        key.push_str(attr);
        key.push(MIN_UNICODE_RUNE);
    }
    Ok(key)
}

/// Splits a composite key back into its object type and attributes.
pub fn split_composite_key(key: &str) -> StorageResult<(String, Vec<String>)> {
    let body = key
        .strip_prefix(MIN_UNICODE_RUNE)
        .and_then(|rest| rest.strip_suffix(MIN_UNICODE_RUNE))
        .ok_or_else(|| StorageError::InvalidKey(format!("{key:?} is not a composite key")))?;
    let mut parts = body.split(MIN_UNICODE_RUNE).map(str::to_string);
    let object_type = parts.next().unwrap_or_default();
    Ok((object_type, parts.collect()))
}

fn validate_component(component: &str) -> StorageResult<()> {
    if component.contains(MIN_UNICODE_RUNE) || component.contains(MAX_UNICODE_RUNE) {
        return Err(StorageError::InvalidKey(format!(
            "{component:?} contains U+0000 or U+10FFFF, which are reserved for composite keys"
        )));
    }
    Ok(())
}
