//! Payload schemas: which fields a collection generates and in which format.
//!
//! ## Type Hierarchy
//!
//! - [`FieldSpec`] - field name to [`FieldType`] map, used by `raw` and `structured`
//! - [`FormatSpec`] - a validated format selection with its options
//!
//! Both are built from the loose string maps found in configuration, so all
//! validation (unknown field types, missing file paths) happens here, before
//! a generator is constructed.

use crate::types::{FieldType, FormatType};
use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Option key holding the payload file of the `file` format.
pub const FILE_PATH_OPTION: &str = "path";

/// Field specification for `raw` and `structured` payloads.
///
/// Field names are unique; ordering carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSpec {
    fields: BTreeMap<String, FieldType>,
}

impl FieldSpec {
    /// Create an empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, builder style.
    pub fn with_field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.insert(name.into(), field_type);
        self
    }

    /// Parse a field map whose values are type tags, e.g. `{"id": "int"}`.
    pub fn from_tags<'a, I>(tags: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let fields = tags
            .into_iter()
            .map(|(field, tag)| {
                tag.parse::<FieldType>()
                    .map(|ty| (field.clone(), ty))
                    .map_err(|_| CoreError::InvalidFieldType {
                        field: field.clone(),
                        tag: tag.clone(),
                    })
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(Self { fields })
    }

    pub fn get(&self, field: &str) -> Option<FieldType> {
        self.fields.get(field).copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.fields.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    /// Get all field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }
}

/// Validated payload format of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSpec {
    Raw(FieldSpec),
    Structured(FieldSpec),
    File { path: PathBuf },
    Fhir,
    Hl7,
    Hl7v3,
}

impl FormatSpec {
    /// Build a format from its type tag and the free-form `options` map.
    ///
    /// For `raw` and `structured` every option is a field definition. The
    /// `file` format requires the [`FILE_PATH_OPTION`] option. The patient
    /// document formats take no options.
    pub fn from_options(
        format: FormatType,
        options: &BTreeMap<String, String>,
    ) -> Result<Self, CoreError> {
        match format {
            FormatType::Raw => Ok(FormatSpec::Raw(FieldSpec::from_tags(options)?)),
            FormatType::Structured => Ok(FormatSpec::Structured(FieldSpec::from_tags(options)?)),
            FormatType::File => match options.get(FILE_PATH_OPTION) {
                Some(path) if !path.trim().is_empty() => Ok(FormatSpec::File {
                    path: PathBuf::from(path),
                }),
                _ => Err(CoreError::MissingFilePath),
            },
            FormatType::Fhir => Ok(FormatSpec::Fhir),
            FormatType::Hl7 => Ok(FormatSpec::Hl7),
            FormatType::Hl7v3 => Ok(FormatSpec::Hl7v3),
        }
    }

    /// The format tag this spec was built from.
    pub fn format_type(&self) -> FormatType {
        match self {
            FormatSpec::Raw(_) => FormatType::Raw,
            FormatSpec::Structured(_) => FormatType::Structured,
            FormatSpec::File { .. } => FormatType::File,
            FormatSpec::Fhir => FormatType::Fhir,
            FormatSpec::Hl7 => FormatType::Hl7,
            FormatSpec::Hl7v3 => FormatType::Hl7v3,
        }
    }
}
