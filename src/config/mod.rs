//! Generator configuration.
//!
//! Configuration arrives either as a YAML/TOML file ([`GeneratorConfig::from_file`])
//! or as flat `key=value` parameters ([`GeneratorConfig::from_params`]). Both
//! end up in the same loose [`GeneratorConfig`], which [`GeneratorConfig::validate`]
//! turns into [`GeneratorSettings`] with every tag parsed and every default
//! applied.
//!
//! # YAML Format
//!
//! ```yaml
//! rate: 20
//! recordCount: 1000
//! seed: 42
//! burst:
//!   generateTime: 150ms
//!   sleepTime: 100ms
//! collections:
//!   users:
//!     format:
//!       type: structured
//!       options:
//!         id: int
//!         name: name
//!         email: email
//!     operations: [create, update]
//!   patients:
//!     format:
//!       type: fhir
//! ```

pub mod duration;
pub mod params;

use cdc_burst::BurstSchedule;
use cdc_core::{CoreError, FormatSpec, FormatType, Operation};
use duration::HumanDuration;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Golden-ratio increment used to spread derived seeds.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown configuration parameter: {0}")]
    UnknownParameter(String),

    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Invalid duration {value:?}: {reason}")]
    InvalidDuration { value: String, reason: String },

    #[error("rate must be a finite, non-negative number, got {0}")]
    InvalidRate(f64),

    #[error("No format configured{}", collection_suffix(.collection))]
    MissingFormat { collection: Option<String> },

    #[error(transparent)]
    Core(#[from] CoreError),
}

fn collection_suffix(collection: &Option<String>) -> String {
    collection
        .as_ref()
        .map(|c| format!(" for collection {c:?}"))
        .unwrap_or_default()
}

/// Burst duty cycle as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BurstConfig {
    #[serde(default)]
    pub generate_time: Option<HumanDuration>,
    #[serde(default)]
    pub sleep_time: Option<HumanDuration>,
}

/// Payload format selector with its free-form options.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatConfig {
    #[serde(rename = "type", default)]
    pub format_type: Option<FormatType>,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

/// One named collection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionConfig {
    #[serde(default)]
    pub format: FormatConfig,
    #[serde(default)]
    pub operations: Option<Vec<Operation>>,
}

/// Unvalidated generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Records per second; 0 disables the steady cap
    #[serde(default)]
    pub rate: Option<f64>,
    /// Legacy pacing: time per record
    #[serde(default)]
    pub read_time: Option<HumanDuration>,
    /// Total records to emit; 0 means unbounded
    #[serde(default)]
    pub record_count: u64,
    #[serde(default)]
    pub burst: BurstConfig,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Format of the single unnamed collection
    #[serde(default)]
    pub format: Option<FormatConfig>,
    /// Operations of the unnamed collection and default for named ones
    #[serde(default)]
    pub operations: Option<Vec<Operation>>,
    #[serde(default)]
    pub collections: BTreeMap<String, CollectionConfig>,
}

/// Validated settings of one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSettings {
    /// `None` for the unnamed collection
    pub name: Option<String>,
    pub format: FormatSpec,
    pub operations: Vec<Operation>,
    pub seed: u64,
}

/// Validated generator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSettings {
    pub rate: f64,
    pub burst: Option<BurstSchedule>,
    pub record_count: u64,
    pub seed: u64,
    pub collections: Vec<CollectionSettings>,
}

impl GeneratorConfig {
    /// Load from a file; `.toml` files are read as TOML, everything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::from_toml(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Check the configuration and resolve defaults.
    ///
    /// - `rate` wins over the legacy `readTime`
    /// - bursting needs both `burst.generateTime` and `burst.sleepTime`
    /// - operations default to `create`; named collections inherit the
    ///   top-level list
    /// - an absent seed is taken from the clock
    pub fn validate(&self) -> Result<GeneratorSettings, ConfigError> {
        let rate = self.effective_rate()?;
        let burst = self.burst_schedule();

        let default_operations = match &self.operations {
            Some(ops) if ops.is_empty() => return Err(CoreError::NoOperations.into()),
            Some(ops) => ops.clone(),
            None => vec![Operation::Create],
        };

        let seed = self.seed.unwrap_or_else(clock_seed);
        if self.seed.is_none() {
            info!("No seed configured, using {}", seed);
        }

        let collections = if self.collections.is_empty() {
            let format = self
                .format
                .as_ref()
                .ok_or(ConfigError::MissingFormat { collection: None })?;
            vec![CollectionSettings {
                name: None,
                format: resolve_format(format, None)?,
                operations: default_operations,
                seed: derive_seed(seed, 1),
            }]
        } else {
            if self.format.is_some() {
                warn!("Top-level format is ignored when collections are configured");
            }
            self.collections
                .iter()
                .enumerate()
                .map(|(index, (name, collection))| {
                    let operations = match &collection.operations {
                        Some(ops) if ops.is_empty() => {
                            return Err(ConfigError::from(CoreError::NoOperations))
                        }
                        Some(ops) => ops.clone(),
                        None => default_operations.clone(),
                    };
                    Ok(CollectionSettings {
                        name: Some(name.clone()),
                        format: resolve_format(&collection.format, Some(name))?,
                        operations,
                        seed: derive_seed(seed, index as u64 + 1),
                    })
                })
                .collect::<Result<Vec<_>, ConfigError>>()?
        };

        Ok(GeneratorSettings {
            rate,
            burst,
            record_count: self.record_count,
            seed,
            collections,
        })
    }

    fn effective_rate(&self) -> Result<f64, ConfigError> {
        match (self.rate, self.read_time) {
            (Some(rate), read_time) => {
                if !rate.is_finite() || rate < 0.0 {
                    return Err(ConfigError::InvalidRate(rate));
                }
                if read_time.is_some() {
                    warn!("Both rate and readTime are set, readTime is ignored");
                }
                Ok(rate)
            }
            (None, Some(HumanDuration(read_time))) => {
                warn!("readTime is deprecated, use rate instead");
                if read_time.is_zero() {
                    Ok(0.0)
                } else {
                    Ok(1.0 / read_time.as_secs_f64())
                }
            }
            (None, None) => Ok(0.0),
        }
    }

    fn burst_schedule(&self) -> Option<BurstSchedule> {
        match (self.burst.generate_time, self.burst.sleep_time) {
            (Some(generate), Some(sleep)) => BurstSchedule::new(generate.0, sleep.0),
            (None, Some(sleep)) if !sleep.0.is_zero() => {
                warn!("burst.sleepTime is set without burst.generateTime, bursting is disabled");
                None
            }
            _ => None,
        }
    }
}

fn resolve_format(format: &FormatConfig, collection: Option<&str>) -> Result<FormatSpec, ConfigError> {
    let format_type = format.format_type.ok_or_else(|| ConfigError::MissingFormat {
        collection: collection.map(str::to_string),
    })?;
    Ok(FormatSpec::from_options(format_type, &format.options)?)
}

/// Seed of the `stream`-th independent random source derived from `base`.
pub fn derive_seed(base: u64, stream: u64) -> u64 {
    base.wrapping_add(stream.wrapping_mul(SEED_STRIDE))
}

fn clock_seed() -> u64 {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .map(|nanos| nanos as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdc_core::{FieldSpec, FieldType};
    use std::io::Write;
    use std::time::Duration;

    const YAML: &str = r#"
rate: 20
recordCount: 10
seed: 7
burst:
  generateTime: 150ms
  sleepTime: 100ms
operations: [create, delete]
collections:
  users:
    format:
      type: structured
      options:
        id: int
        name: name
    operations: [update]
  patients:
    format:
      type: fhir
"#;

    #[test]
    fn test_yaml_config() {
        let settings = GeneratorConfig::from_yaml(YAML).unwrap().validate().unwrap();

        assert_eq!(settings.rate, 20.0);
        assert_eq!(settings.record_count, 10);
        assert_eq!(
            settings.burst,
            BurstSchedule::new(Duration::from_millis(150), Duration::from_millis(100))
        );

        // Collections come out sorted by name
        let patients = &settings.collections[0];
        assert_eq!(patients.name.as_deref(), Some("patients"));
        assert_eq!(patients.format, FormatSpec::Fhir);
        assert_eq!(patients.operations, vec![Operation::Create, Operation::Delete]);

        let users = &settings.collections[1];
        assert_eq!(users.operations, vec![Operation::Update]);
        assert_eq!(
            users.format,
            FormatSpec::Structured(
                FieldSpec::new()
                    .with_field("id", FieldType::Int)
                    .with_field("name", FieldType::Name)
            )
        );
        assert_ne!(patients.seed, users.seed);
    }

    #[test]
    fn test_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
rate = 5
[burst]
generateTime = "1s"
sleepTime = 2

[format]
type = "raw"
options = {{ id = "int" }}
"#
        )
        .unwrap();

        let settings = GeneratorConfig::from_file(file.path()).unwrap().validate().unwrap();
        assert_eq!(settings.rate, 5.0);
        assert_eq!(
            settings.burst,
            BurstSchedule::new(Duration::from_secs(1), Duration::from_secs(2))
        );
        assert_eq!(settings.collections.len(), 1);
        assert_eq!(settings.collections[0].name, None);
        assert_eq!(settings.collections[0].operations, vec![Operation::Create]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GeneratorConfig::from_file(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_read_time_fallback() {
        let config = GeneratorConfig {
            read_time: Some(HumanDuration(Duration::from_millis(50))),
            format: Some(FormatConfig {
                format_type: Some(FormatType::Hl7),
                options: BTreeMap::new(),
            }),
            ..Default::default()
        };
        assert!((config.validate().unwrap().rate - 20.0).abs() < 1e-9);

        let config = GeneratorConfig {
            rate: Some(3.0),
            ..config
        };
        assert_eq!(config.validate().unwrap().rate, 3.0);
    }

    #[test]
    fn test_invalid_rate() {
        let config = GeneratorConfig {
            rate: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRate(_))));
    }

    #[test]
    fn test_sleep_without_generate_disables_bursting() {
        let config = GeneratorConfig::from_yaml(
            "burst:\n  sleepTime: 1s\nformat:\n  type: hl7\n",
        )
        .unwrap();
        assert_eq!(config.validate().unwrap().burst, None);
    }

    #[test]
    fn test_missing_format() {
        let err = GeneratorConfig::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingFormat { collection: None }));

        let err = GeneratorConfig::from_yaml("collections:\n  users: {}\n")
            .unwrap()
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "No format configured for collection \"users\"");
    }

    #[test]
    fn test_unknown_values_rejected() {
        assert!(GeneratorConfig::from_yaml("format:\n  type: csv\n").is_err());
        assert!(GeneratorConfig::from_yaml("operations: [upsert]\n").is_err());
        assert!(GeneratorConfig::from_yaml("ratee: 1\n").is_err());

        let err = GeneratorConfig::from_yaml("format:\n  type: raw\n  options:\n    id: decimal\n")
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Core(CoreError::InvalidFieldType { .. })
        ));

        let err = GeneratorConfig::from_yaml("operations: []\nformat:\n  type: hl7\n")
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Core(CoreError::NoOperations)));
    }

    #[test]
    fn test_seed_derivation() {
        assert_eq!(derive_seed(1, 0), 1);
        assert_ne!(derive_seed(1, 1), derive_seed(1, 2));
        assert_eq!(derive_seed(u64::MAX, 1), SEED_STRIDE - 1);
    }
}
