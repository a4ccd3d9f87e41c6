//! Core types for the cdc-loadgen synthetic change-event generator.
//!
//! This crate provides the foundational types shared by the generator, the
//! burst limiter and the source:
//!
//! - [`Record`] - one change event with operation, key, metadata and payload
//! - [`Data`] / [`StructuredData`] / [`Value`] - payload representations
//! - [`FieldType`] / [`FieldSpec`] - field definitions for field-based formats
//! - [`FormatType`] / [`FormatSpec`] - payload format selection
//! - [`Operation`] - snapshot / create / update / delete
//!
//! # Architecture
//!
//! ```text
//! cdc-core (this crate)
//!    │
//!    ├─── cdc-generator  (builds payloads and records from these types)
//!    │
//!    └─── cdc-loadgen    (configuration, source orchestration, CLI)
//! ```
//!
//! # Example
//!
//! ```rust
//! use cdc_core::{FieldSpec, FieldType, FormatSpec, FormatType};
//! use std::collections::BTreeMap;
//!
//! let mut options = BTreeMap::new();
//! options.insert("id".to_string(), "int".to_string());
//! options.insert("owner".to_string(), "name".to_string());
//!
//! let format = FormatSpec::from_options(FormatType::Raw, &options).unwrap();
//! assert_eq!(
//!     format,
//!     FormatSpec::Raw(
//!         FieldSpec::new()
//!             .with_field("id", FieldType::Int)
//!             .with_field("owner", FieldType::Name)
//!     )
//! );
//! ```

pub mod record;
pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use record::{Metadata, Payload, Record, METADATA_COLLECTION, METADATA_CREATED_AT};
pub use schema::{FieldSpec, FormatSpec, FILE_PATH_OPTION};
pub use types::{FieldType, FormatType, Operation};
pub use values::{Data, StructuredData, Value};

/// Error type for parsing and validating core types.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Field type tag outside the known set
    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    /// Field declared with a type tag outside the known set
    #[error("Field {field:?} contains invalid type: {tag}")]
    InvalidFieldType { field: String, tag: String },

    /// Format tag outside the known set
    #[error("Unknown format type: {0}")]
    UnknownFormat(String),

    /// Operation tag outside the known set
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Operation list without any entry
    #[error("At least one operation must be configured")]
    NoOperations,

    /// `file` format without a `path` option
    #[error("File format requires the \"path\" option")]
    MissingFilePath,
}
