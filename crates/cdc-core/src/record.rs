//! Change-event records emitted by the generator.

use crate::types::Operation;
use crate::values::Data;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Metadata key carrying the creation instant as unix nanoseconds.
pub const METADATA_CREATED_AT: &str = "opencdc.createdAt";

/// Metadata key carrying the collection name.
pub const METADATA_COLLECTION: &str = "collection";

/// String-to-string metadata attached to every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Stamp the creation instant.
    pub fn set_created_at(&mut self, at: DateTime<Utc>) {
        let nanos = at.timestamp_nanos_opt().unwrap_or_default();
        self.insert(METADATA_CREATED_AT, nanos.to_string());
    }

    /// Creation instant, if present and well formed.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let nanos: i64 = self.get(METADATA_CREATED_AT)?.parse().ok()?;
        Some(DateTime::from_timestamp_nanos(nanos))
    }

    pub fn collection(&self) -> Option<&str> {
        self.get(METADATA_COLLECTION)
    }
}

/// The `before` and `after` images of a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Payload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Data>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Data>,
}

/// One emitted change event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Stringified per-generator counter
    pub position: String,
    pub operation: Operation,
    pub metadata: Metadata,
    pub key: Data,
    pub payload: Payload,
}

impl Record {
    /// Whether the populated payload slots match what the operation requires.
    pub fn has_consistent_payload(&self) -> bool {
        self.operation.has_before() == self.payload.before.is_some()
            && self.operation.has_after() == self.payload.after.is_some()
    }
}
