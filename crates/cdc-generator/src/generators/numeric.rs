//! Numeric, boolean and duration value generators.

use cdc_core::Value;
use rand::Rng;
use std::time::Duration;

/// Upper bound (exclusive) of generated durations, in seconds.
pub const MAX_DURATION_SECS: u64 = 1000;

/// Generate a non-negative integer from the full i64 range.
pub fn generate_int<R: Rng>(rng: &mut R) -> Value {
    Value::Int(rng.random_range(0..=i64::MAX))
}

/// Generate a coin flip.
pub fn generate_bool<R: Rng>(rng: &mut R) -> Value {
    Value::Bool(rng.random_bool(0.5))
}

/// Generate a whole-second duration below [`MAX_DURATION_SECS`].
pub fn generate_duration<R: Rng>(rng: &mut R) -> Value {
    Value::Duration(Duration::from_secs(rng.random_range(0..MAX_DURATION_SECS)))
}

/// Random number in `[min, max]` rendered zero-padded to `width` digits.
pub fn padded_number<R: Rng>(rng: &mut R, min: u32, max: u32, width: usize) -> String {
    format!("{:0width$}", rng.random_range(min..=max))
}

/// Random string of exactly `len` decimal digits (leading zeros allowed).
pub fn digits<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}
