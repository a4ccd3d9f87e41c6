//! cdc-loadgen library
//!
//! Synthetic change-event source for exercising data pipelines. Records carry
//! an operation (`snapshot`, `create`, `update`, `delete`), a key, metadata and
//! `before`/`after` payloads in one of several formats, and are paced by a
//! burst/sleep duty cycle with an optional steady rate cap.
//!
//! # Crates
//!
//! - `cdc_core` - record, payload and schema types
//! - `cdc_generator` - payload and record generation
//! - `cdc_burst` - the burst rate limiter
//!
//! # Example
//!
//! ```rust,no_run
//! use cdc_loadgen::{GeneratorConfig, ReadOutcome, Source};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = GeneratorConfig::from_yaml(r#"
//! rate: 100
//! recordCount: 3
//! format:
//!   type: structured
//!   options:
//!     id: int
//!     email: email
//! "#)?;
//!
//! let mut source = Source::open(&config)?;
//! let cancel = CancellationToken::new();
//! while let ReadOutcome::Record(record) = source.read(&cancel).await? {
//!     println!("{}", serde_json::to_string(&record)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod source;

pub use config::{
    CollectionSettings, ConfigError, FormatConfig, GeneratorConfig, GeneratorSettings,
};
pub use source::{ReadOutcome, Source, SourceError};
