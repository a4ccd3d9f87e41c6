//! Synthetic change-event generation for cdc-loadgen.
//!
//! This crate turns a validated [`FormatSpec`](cdc_core::FormatSpec) and an
//! operation list into an endless stream of [`Record`](cdc_core::Record)s.
//!
//! # Architecture
//!
//! ```text
//! FormatSpec + operations
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │ CollectionGenerator  │
//! │                      │
//! │  - PayloadBuilder    │
//! │  - rng (StdRng)      │
//! │  - count             │
//! └──────────┬───────────┘
//!            │  (one per collection, picked uniformly
//!            │   by MultiRecordGenerator)
//!            ▼
//!    Record { position, operation, metadata, key, payload }
//! ```
//!
//! # Example
//!
//! ```rust
//! use cdc_core::{FieldSpec, FieldType, FormatSpec, Operation};
//! use cdc_generator::{CollectionGenerator, PayloadBuilder, RecordGenerator};
//!
//! let format = FormatSpec::Structured(FieldSpec::new().with_field("id", FieldType::Int));
//! let payload = PayloadBuilder::from_format(&format, 42).unwrap();
//! let mut generator =
//!     CollectionGenerator::new(Some("users".to_string()), vec![Operation::Create], payload, 42)
//!         .unwrap();
//!
//! let record = generator.next_record().unwrap();
//! assert_eq!(record.position, "1");
//! assert!(record.payload.before.is_none());
//! ```
//!
//! # Payload formats
//!
//! - `structured` - typed field map
//! - `raw` - JSON bytes of the typed field map
//! - `file` - bytes of a file, read once
//! - `fhir` - FHIR Patient resource (JSON)
//! - `hl7` - HL7 v2 ADT^A01 message (text)
//! - `hl7v3` - HL7 v3 Patient (XML)

pub mod generators;
pub mod patient;
pub mod payload;
pub mod record;
pub mod structured;

use std::path::PathBuf;

// Re-exports for convenience
pub use payload::PayloadBuilder;
pub use record::{CollectionGenerator, MultiRecordGenerator, RecordGenerator};

/// Error type for payload and record generation.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Failed to read payload file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Serialize(serde_json::Error),

    #[error("XML serialization failed: {0}")]
    Xml(String),

    #[error("At least one operation must be configured")]
    NoOperations,

    #[error("At least one collection generator is required")]
    NoCollections,
}
