//! Timestamp value generators.

use cdc_core::Value;
use chrono::Utc;

/// Generate the current UTC timestamp.
///
/// This is NOT deterministic - each call returns the current time.
pub fn generate_timestamp_now() -> Value {
    Value::Time(Utc::now())
}

/// Current UTC time in the compact `YYYYMMDDHHMMSS` form used by HL7.
pub fn compact_timestamp_now() -> String {
    Utc::now().format("%Y%m%d%H%M%S").to_string()
}
