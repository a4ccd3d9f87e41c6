//! Type tags for generated fields, payload formats and record operations.
//!
//! All three are closed sets. They are parsed once, when configuration is
//! loaded, so an unknown tag surfaces as a [`CoreError`] before any record is
//! produced.

use crate::CoreError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Type of a generated field.
///
/// # YAML Format
///
/// Field types are plain lowercase strings:
/// ```yaml
/// fields:
///   id: int
///   owner: name
///   card: creditcard
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    // Basic types
    /// Non-negative 64-bit integer
    Int,
    /// Random multi-word phrase
    String,
    /// Current UTC instant
    Time,
    /// Coin flip
    Bool,
    /// Whole-second span below 1000 seconds
    Duration,

    // Rich types
    /// Capitalized "First Last"
    Name,
    /// Syntactically valid email address
    Email,
    /// `EMP` followed by four digits
    EmployeeId,
    /// Obfuscated social security number, `XXX-XX-1234`
    Ssn,
    /// Obfuscated credit card number, twelve `X` and four digits
    CreditCard,
    /// `ORD-` followed by a UUID
    OrderNumber,
}

impl FieldType {
    /// Every known field type, basic types first.
    pub const ALL: [FieldType; 11] = [
        FieldType::Int,
        FieldType::String,
        FieldType::Time,
        FieldType::Bool,
        FieldType::Duration,
        FieldType::Name,
        FieldType::Email,
        FieldType::EmployeeId,
        FieldType::Ssn,
        FieldType::CreditCard,
        FieldType::OrderNumber,
    ];

    /// Configuration tag of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Int => "int",
            FieldType::String => "string",
            FieldType::Time => "time",
            FieldType::Bool => "bool",
            FieldType::Duration => "duration",
            FieldType::Name => "name",
            FieldType::Email => "email",
            FieldType::EmployeeId => "employeeid",
            FieldType::Ssn => "ssn",
            FieldType::CreditCard => "creditcard",
            FieldType::OrderNumber => "ordernumber",
        }
    }

    /// Whether this is one of the "rich" string types.
    pub fn is_rich(&self) -> bool {
        !matches!(
            self,
            FieldType::Int
                | FieldType::String
                | FieldType::Time
                | FieldType::Bool
                | FieldType::Duration
        )
    }
}

impl FromStr for FieldType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::UnknownFieldType(s.to_string()))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

/// Payload format of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatType {
    /// JSON bytes of the structured form
    Raw,
    /// Typed field map
    Structured,
    /// Cached file contents
    File,
    /// FHIR Patient resource as JSON
    Fhir,
    /// HL7 v2 ADT message as pipe-delimited text
    Hl7,
    /// HL7 v3 Patient as XML
    Hl7v3,
}

impl FormatType {
    /// Every known format.
    pub const ALL: [FormatType; 6] = [
        FormatType::Raw,
        FormatType::Structured,
        FormatType::File,
        FormatType::Fhir,
        FormatType::Hl7,
        FormatType::Hl7v3,
    ];

    /// Configuration tag of this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatType::Raw => "raw",
            FormatType::Structured => "structured",
            FormatType::File => "file",
            FormatType::Fhir => "fhir",
            FormatType::Hl7 => "hl7",
            FormatType::Hl7v3 => "hl7v3",
        }
    }

    /// Whether the format is built from a field specification.
    pub fn uses_fields(&self) -> bool {
        matches!(self, FormatType::Raw | FormatType::Structured)
    }
}

impl FromStr for FormatType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::UnknownFormat(s.to_string()))
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change-event operation carried by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Row observed during an initial snapshot
    Snapshot,
    /// Row inserted
    Create,
    /// Row changed
    Update,
    /// Row removed
    Delete,
}

impl Operation {
    /// Every operation.
    pub const ALL: [Operation; 4] = [
        Operation::Snapshot,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Snapshot => "snapshot",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Whether records with this operation carry a `before` payload.
    pub fn has_before(&self) -> bool {
        matches!(self, Operation::Update | Operation::Delete)
    }

    /// Whether records with this operation carry an `after` payload.
    pub fn has_after(&self) -> bool {
        !matches!(self, Operation::Delete)
    }

    /// Parse a comma-separated list such as `"create,update"`.
    ///
    /// Blank entries are skipped; an empty result is an error.
    pub fn parse_list(s: &str) -> Result<Vec<Operation>, CoreError> {
        let ops = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Operation>, _>>()?;
        if ops.is_empty() {
            return Err(CoreError::NoOperations);
        }
        Ok(ops)
    }
}

impl FromStr for Operation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| CoreError::UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
