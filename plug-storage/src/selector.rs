//! Mango-style selectors for rich queries.
//!
//! Only the subset the contracts use is understood:
//!
//! ```text
//! {"selector": {"creator": "user1"}}
//! {"selector": {"creator": {"$eq": "user1"}}}
//! {"selector": {"tags": {"$elemMatch": {"$eq": "rust"}}}}
//! ```
//!
//! Several fields in one selector must all match. Field names may use dots
//! to reach into nested objects. Top-level keys other than `selector`
//! (`fields`, `use_index`, ...) are accepted and ignored.

use crate::{StorageError, StorageResult};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq)]
enum Condition {
    Eq(Value),
    ElemMatchEq(Value),
}

impl Condition {
    fn matches(&self, field: Option<&Value>) -> bool {
        match (self, field) {
            (Condition::Eq(expected), Some(actual)) => actual == expected,
            (Condition::ElemMatchEq(expected), Some(Value::Array(items))) => {
                items.iter().any(|item| item == expected)
            }
            _ => false,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Condition::Eq(v) => v.clone(),
            Condition::ElemMatchEq(v) => json!({ "$elemMatch": { "$eq": v } }),
        }
    }
}

/// A parsed or programmatically built rich-query selector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
    conditions: Vec<(String, Condition)>,
}

impl Selector {
    /// An empty selector, which matches every JSON object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `field` to equal `value`.
    #[must_use]
    pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), Condition::Eq(value.into())));
        self
    }

    /// Requires the array at `field` to contain `value`.
    #[must_use]
    pub fn elem_match_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions
            .push((field.into(), Condition::ElemMatchEq(value.into())));
        self
    }

    /// Parses a query string.
    pub fn parse(query: &str) -> StorageResult<Self> {
        let root: Value = serde_json::from_str(query)
            .map_err(|e| StorageError::InvalidQuery(format!("not JSON: {e}")))?;
        let selector = root
            .get("selector")
            .and_then(Value::as_object)
            .ok_or_else(|| StorageError::InvalidQuery("missing \"selector\" object".into()))?;

        let mut conditions = Vec::with_capacity(selector.len());
        for (field, cond) in selector {
            if field.starts_with('$') {
                return Err(StorageError::InvalidQuery(format!(
                    "unsupported top-level operator {field}"
                )));
            }
            conditions.push((field.clone(), parse_condition(field, cond)?));
        }
        Ok(Self { conditions })
    }

    /// Renders the selector as a query string.
    pub fn to_query_string(&self) -> String {
        let selector: Map<String, Value> = self
            .conditions
            .iter()
            .map(|(field, cond)| (field.clone(), cond.to_json()))
            .collect();
        json!({ "selector": selector }).to_string()
    }

    /// True if `doc` satisfies every condition.
    pub fn matches(&self, doc: &Value) -> bool {
        doc.is_object()
            && self
                .conditions
                .iter()
                .all(|(field, cond)| cond.matches(lookup(doc, field)))
    }
}

fn parse_condition(field: &str, cond: &Value) -> StorageResult<Condition> {
    let Some(ops) = cond.as_object() else {
        return Ok(Condition::Eq(cond.clone()));
    };
    let mut entries = ops.iter();
    let (Some((op, operand)), None) = (entries.next(), entries.next()) else {
        return Err(StorageError::InvalidQuery(format!(
            "{field}: expected exactly one operator"
        )));
    };
    match op.as_str() {
        "$eq" => Ok(Condition::Eq(operand.clone())),
        "$elemMatch" => operand
            .as_object()
            .filter(|m| m.len() == 1)
            .and_then(|m| m.get("$eq"))
            .map(|inner| Condition::ElemMatchEq(inner.clone()))
            .ok_or_else(|| {
                StorageError::InvalidQuery(format!(
                    "{field}: only {{\"$elemMatch\": {{\"$eq\": ...}}}} is supported"
                ))
            }),
        _ if !op.starts_with('$') => Err(StorageError::InvalidQuery(format!(
            "{field}: nested field selectors are not supported, use \"{field}.{op}\""
        ))),
        _ => Err(StorageError::InvalidQuery(format!(
            "{field}: unsupported operator {op}"
        ))),
    }
}

fn lookup<'a>(doc: &'a Value, field: &str) -> Option<&'a Value> {
    field.split('.').try_fold(doc, |v, part| v.get(part))
}
