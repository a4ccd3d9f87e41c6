//! Value representations for generated payloads.
//!
//! A structured payload is a map of field name to [`Value`]. Raw payloads are
//! plain bytes; for field-based formats they hold the JSON encoding of the
//! structured form, produced by [`StructuredData::to_json_bytes`].

use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::time::Duration;

/// Typed value of a single generated field.
///
/// The JSON encoding follows the conventions downstream consumers expect:
/// integers, strings and booleans map naturally, times become RFC 3339
/// strings with nanosecond precision and durations become their nanosecond
/// count.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer
    Int(i64),
    /// String value (also used by all rich field types)
    String(String),
    /// UTC instant
    Time(DateTime<Utc>),
    /// Elapsed span
    Duration(Duration),
    /// Boolean value
    Bool(bool),
}

impl Value {
    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a timestamp.
    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Try to get this value as a duration.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::String(s) => serializer.serialize_str(s),
            Self::Time(t) => {
                serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Self::Duration(d) => {
                serializer.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
            }
            Self::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

/// Semantic key-value payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StructuredData(BTreeMap<String, Value>);

impl StructuredData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Field names in lexical order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Encode as a JSON object.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl FromIterator<(String, Value)> for StructuredData {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Payload data in one of the two shapes a record can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    /// Opaque bytes
    Raw(Vec<u8>),
    /// Typed field map
    Structured(StructuredData),
}

impl Data {
    /// Raw bytes, if this is raw data.
    pub fn as_raw(&self) -> Option<&[u8]> {
        match self {
            Self::Raw(bytes) => Some(bytes),
            Self::Structured(_) => None,
        }
    }

    /// Structured map, if this is structured data.
    pub fn as_structured(&self) -> Option<&StructuredData> {
        match self {
            Self::Structured(data) => Some(data),
            Self::Raw(_) => None,
        }
    }

    /// Byte form of the data; structured data is JSON encoded.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Self::Raw(bytes) => Ok(bytes.clone()),
            Self::Structured(data) => data.to_json_bytes(),
        }
    }
}

impl Serialize for Data {
    /// Raw bytes are written as base64, structured data as a JSON object.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Raw(bytes) => serializer
                .serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes)),
            Self::Structured(data) => data.serialize(serializer),
        }
    }
}

impl From<StructuredData> for Data {
    fn from(value: StructuredData) -> Self {
        Self::Structured(value)
    }
}

impl From<Vec<u8>> for Data {
    fn from(value: Vec<u8>) -> Self {
        Self::Raw(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_value_json_encoding() {
        let mut data = StructuredData::new();
        data.insert("id", 42i64);
        data.insert("name", "alpha beta");
        data.insert("admin", true);
        data.insert("timeout", Duration::from_secs(3));
        data.insert(
            "joined",
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        );

        let json: serde_json::Value =
            serde_json::from_slice(&data.to_json_bytes().unwrap()).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(json["name"], "alpha beta");
        assert_eq!(json["admin"], true);
        assert_eq!(json["timeout"], 3_000_000_000u64);
        assert_eq!(json["joined"], "2024-05-01T12:30:00Z");
    }

    #[test]
    fn test_time_keeps_nanoseconds() {
        let t = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let json = serde_json::to_string(&Value::Time(t)).unwrap();
        assert_eq!(json, "\"2023-11-14T22:13:20.123456789Z\"");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Int(7).as_i64(), Some(7));
        assert_eq!(Value::Int(7).as_str(), None);
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert_eq!(
            Value::Duration(Duration::from_secs(1)).as_duration(),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_raw_data_serializes_as_base64() {
        let data = Data::Raw(b"hello".to_vec());
        assert_eq!(serde_json::to_string(&data).unwrap(), "\"aGVsbG8=\"");
        assert_eq!(data.to_bytes().unwrap(), b"hello");
    }

    #[test]
    fn test_structured_data_to_bytes() {
        let mut fields = StructuredData::new();
        fields.insert("a", 1i64);
        let data = Data::from(fields);
        assert_eq!(data.to_bytes().unwrap(), br#"{"a":1}"#);
        assert!(data.as_raw().is_none());
        assert_eq!(data.as_structured().map(StructuredData::len), Some(1));
    }
}
