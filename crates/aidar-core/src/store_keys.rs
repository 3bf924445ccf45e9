//! Object key conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of records in the Aidar bucket: one JSON object per record under
//! its collection prefix.

use uuid::Uuid;

use crate::error::CoreError;
use crate::record::RecordKind;

pub fn prefix(kind: RecordKind) -> String {
    format!("{}/", kind.collection())
}

pub fn record(kind: RecordKind, id: Uuid) -> String {
    format!("{}/{id}.json", kind.collection())
}

/// Split a record key back into its kind and id.
pub fn parse(key: &str) -> Result<(RecordKind, Uuid), CoreError> {
    let (collection, file) = key
        .split_once('/')
        .ok_or_else(|| CoreError::InvalidKey(key.to_string()))?;
    let kind: RecordKind = collection.parse()?;
    let stem = file
        .strip_suffix(".json")
        .ok_or_else(|| CoreError::InvalidKey(key.to_string()))?;
    Ok((kind, Uuid::parse_str(stem)?))
}
