//! Flat `key=value` parameters.
//!
//! Pipelines hand sources a string map with dotted keys:
//!
//! | Key | Value |
//! |-----|-------|
//! | `rate` | records per second |
//! | `readTime` | duration per record (legacy) |
//! | `recordCount` | total records, 0 = unbounded |
//! | `burst.generateTime`, `burst.sleepTime` | durations |
//! | `seed` | unsigned integer |
//! | `format.type` | `raw`, `structured`, `file`, `fhir`, `hl7`, `hl7v3` |
//! | `format.options.<name>` | field type, or `path` for `file` |
//! | `operations` | comma-separated operations |
//! | `collections.<name>.format.type` | as `format.type` |
//! | `collections.<name>.format.options.<name>` | as `format.options.<name>` |
//! | `collections.<name>.operations` | as `operations` |

use super::duration::{parse_duration, HumanDuration};
use super::{ConfigError, FormatConfig, GeneratorConfig};
use cdc_core::{FormatType, Operation};
use std::str::FromStr;

impl GeneratorConfig {
    /// Build a configuration from flat parameters.
    pub fn from_params<'a, I>(params: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut config = Self::default();
        for (key, value) in params {
            config.set_param(key, value)?;
        }
        Ok(config)
    }

    /// Apply a single parameter, overriding any earlier value.
    pub fn set_param(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "rate" => self.rate = Some(parse_number(key, value)?),
            "readTime" => self.read_time = Some(HumanDuration(parse_duration(value)?)),
            "recordCount" => self.record_count = parse_number(key, value)?,
            "burst.generateTime" => {
                self.burst.generate_time = Some(HumanDuration(parse_duration(value)?))
            }
            "burst.sleepTime" => self.burst.sleep_time = Some(HumanDuration(parse_duration(value)?)),
            "seed" => self.seed = Some(parse_number(key, value)?),
            "operations" => self.operations = Some(Operation::parse_list(value)?),
            _ => {
                if let Some(rest) = key.strip_prefix("format.") {
                    let format = self.format.get_or_insert_with(FormatConfig::default);
                    return set_format_param(format, rest, key, value);
                }
                if let Some(rest) = key.strip_prefix("collections.") {
                    return self.set_collection_param(rest, key, value);
                }
                return Err(ConfigError::UnknownParameter(key.to_string()));
            }
        }
        Ok(())
    }

    fn set_collection_param(&mut self, rest: &str, key: &str, value: &str) -> Result<(), ConfigError> {
        let Some((name, field)) = rest.split_once('.') else {
            return Err(ConfigError::UnknownParameter(key.to_string()));
        };
        if name.is_empty() {
            return Err(ConfigError::UnknownParameter(key.to_string()));
        }

        let collection = self.collections.entry(name.to_string()).or_default();
        if field == "operations" {
            collection.operations = Some(Operation::parse_list(value)?);
            return Ok(());
        }
        match field.strip_prefix("format.") {
            Some(format_key) => set_format_param(&mut collection.format, format_key, key, value),
            None => Err(ConfigError::UnknownParameter(key.to_string())),
        }
    }
}

fn set_format_param(
    format: &mut FormatConfig,
    rest: &str,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    if rest == "type" {
        format.format_type = Some(value.trim().parse::<FormatType>()?);
        return Ok(());
    }
    match rest.strip_prefix("options.") {
        Some(option) if !option.is_empty() => {
            format.options.insert(option.to_string(), value.trim().to_string());
            Ok(())
        }
        _ => Err(ConfigError::UnknownParameter(key.to_string())),
    }
}

fn parse_number<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}
