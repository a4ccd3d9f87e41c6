//! Duration parsing utilities.

use super::ConfigError;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

const NANOS_PER_SEC: f64 = 1e9;

/// Unit to nanoseconds.
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("us", 1e3),
    ("µs", 1e3),
    ("ms", 1e6),
    ("s", NANOS_PER_SEC),
    ("m", 60.0 * NANOS_PER_SEC),
    ("h", 3600.0 * NANOS_PER_SEC),
];

/// Parse a duration string like "100ms", "1.5s", "1m30s", "1h" or "300".
/// Supports:
/// - Plain numbers (interpreted as seconds): "300", "0.25"
/// - One or more number+unit pairs, summed: "2h45m", "1m30.5s"
/// - Units "ns", "us" (or "µs"), "ms", "s", "m" and "h"
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(invalid(s, "empty duration string"));
    }

    if let Ok(secs) = s.parse::<f64>() {
        return nanos_to_duration(secs * NANOS_PER_SEC).map_err(|reason| invalid(s, &reason));
    }

    let mut nanos = 0.0;
    let mut rest = s;
    while !rest.is_empty() {
        let num_len = rest.find(|c: char| !is_number_char(c)).unwrap_or(rest.len());
        let (num_str, tail) = rest.split_at(num_len);
        let value: f64 = num_str
            .parse()
            .map_err(|_| invalid(s, &format!("invalid number {num_str:?}")))?;

        let unit_len = tail.find(is_number_char).unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let unit_nanos = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, nanos)| *nanos)
            .ok_or_else(|| invalid(s, &format!("unknown unit {unit:?}")))?;

        nanos += value * unit_nanos;
        rest = tail;
    }
    nanos_to_duration(nanos).map_err(|reason| invalid(s, &reason))
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

fn nanos_to_duration(nanos: f64) -> Result<Duration, String> {
    if !nanos.is_finite() || nanos < 0.0 {
        return Err("duration must be a finite, non-negative value".to_string());
    }
    if nanos >= u64::MAX as f64 {
        return Err("duration is too large".to_string());
    }
    Ok(Duration::from_nanos(nanos.round() as u64))
}

fn invalid(value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidDuration {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// A [`Duration`] read from configuration.
///
/// Strings go through [`parse_duration`]; bare numbers are seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl From<Duration> for HumanDuration {
    fn from(value: Duration) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for HumanDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct HumanDurationVisitor;

        impl Visitor<'_> for HumanDurationVisitor {
            type Value = HumanDuration;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a duration such as \"100ms\" or a number of seconds")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                parse_duration(v).map(HumanDuration).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(HumanDuration(Duration::from_secs(v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map(|secs| HumanDuration(Duration::from_secs(secs)))
                    .map_err(|_| E::custom(format!("negative duration: {v}")))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                nanos_to_duration(v * NANOS_PER_SEC).map(HumanDuration).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(HumanDurationVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suffixes() {
        assert_eq!(parse_duration("100ms").unwrap(), Duration::from_millis(100));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("30m").unwrap(), Duration::from_secs(1800));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("250us").unwrap(), Duration::from_micros(250));
        assert_eq!(parse_duration("42ns").unwrap(), Duration::from_nanos(42));
    }

    #[test]
    fn test_parse_compound() {
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("2h45m").unwrap(), Duration::from_secs(9900));
        assert_eq!(
            parse_duration("1h2m3.5s").unwrap(),
            Duration::from_millis(3_723_500)
        );
        assert_eq!(parse_duration("1s500ms").unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn test_parse_bare_number_is_seconds() {
        assert_eq!(parse_duration("300").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration(" 0.25 ").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "fast", "ms", "-1s", "1d", "NaNs", "1m30", "1m-30s", "1..5s"] {
            assert!(
                matches!(parse_duration(input), Err(ConfigError::InvalidDuration { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_deserialize_string_and_number() {
        let d: HumanDuration = serde_yaml::from_str("\"150ms\"").unwrap();
        assert_eq!(d.0, Duration::from_millis(150));
        let d: HumanDuration = serde_yaml::from_str("2").unwrap();
        assert_eq!(d.0, Duration::from_secs(2));
        let d: HumanDuration = serde_yaml::from_str("0.5").unwrap();
        assert_eq!(d.0, Duration::from_millis(500));
        assert!(serde_yaml::from_str::<HumanDuration>("\"soon\"").is_err());
    }
}
