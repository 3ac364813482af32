//! YAML decoding into an existing value.
//!
//! serde builds values from scratch, so to keep fields that the document does
//! not mention the target is first serialized to a YAML value, the document
//! is merged over it, and the merged value is deserialized back.
//!
//! The snapshot only carries canonical field names. When the document sets a
//! field through a `#[serde(alias)]`, serde reports the canonical name as a
//! duplicate; that snapshot key is dropped and the decode retried.

use crate::error::{ConfigError, Result};
use regex::Regex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use std::sync::LazyLock;

/// serde's message for a field that appears twice in one mapping.
static DUPLICATE_FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"duplicate field `([^`]+)`").expect("Invalid duplicate field regex")
});

/// Populate `target` from `content`.
///
/// Keys in `content` without a matching field are ignored; fields missing
/// from `content` keep their current value, and so do fields the document
/// leaves null (`key:` or `key: ~`) while they currently hold a value.
/// `target` is only replaced when the whole document decodes.
pub(crate) fn decode_into<T>(content: &[u8], target: &mut T) -> Result<()>
where
    T: Serialize + DeserializeOwned,
{
    let document: Value =
        serde_yaml::from_slice(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;

    if document.is_null() {
        tracing::trace!("config document is empty, keeping current values");
        return Ok(());
    }

    let mut merged = serde_yaml::to_value(&*target)
        .map_err(|e| ConfigError::Deserialize(format!("failed to snapshot current config: {}", e)))?;
    overlay(&mut merged, document.clone());

    loop {
        let err = match serde_yaml::from_value(merged.clone()) {
            Ok(decoded) => {
                *target = decoded;
                return Ok(());
            }
            Err(err) => err.to_string(),
        };

        let field = DUPLICATE_FIELD_REGEX
            .captures(&err)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());
        match field {
            Some(field) if drop_snapshot_key(&mut merged, Some(&document), field) => {
                tracing::trace!(field, "document sets field through an alias");
            }
            _ => return Err(ConfigError::Deserialize(err)),
        }
    }
}

/// Merge `top` into `base`: mappings merge key by key, anything else replaces.
///
/// A null from `top` only lands where `base` is null or missing.
fn overlay(base: &mut Value, top: Value) {
    match (base, top) {
        (Value::Mapping(base), Value::Mapping(top)) => {
            for (key, value) in top {
                match base.get_mut(&key) {
                    Some(existing) => overlay(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, Value::Null) if !base.is_null() => {}
        (base, top) => *base = top,
    }
}

/// Remove `field` from the first mapping in `merged` that got it from the
/// snapshot rather than from `document`.
///
/// Returns false when every `field` key was written by the document itself,
/// in which case the duplicate is real.
fn drop_snapshot_key(merged: &mut Value, document: Option<&Value>, field: &str) -> bool {
    let Value::Mapping(merged) = merged else {
        return false;
    };
    let document = document.and_then(Value::as_mapping);
    let key = Value::String(field.to_string());

    if merged.contains_key(&key) && !document.is_some_and(|doc| doc.contains_key(&key)) {
        merged.remove(&key);
        return true;
    }

    merged.iter_mut().any(|(name, value)| {
        let nested = document.and_then(|doc| doc.get(name));
        drop_snapshot_key(value, nested, field)
    })
}
