//! HL7 v3 `Patient` documents as XML.

use super::{PatientGenerator, PostalAddress, HL7V3_BIRTH_YEARS};
use crate::GeneratorError;
use serde::{Deserialize, Serialize};

/// Namespace of the `Patient` root element.
pub const NAMESPACE: &str = "urn:hl7-org:v3";

/// Local name of the root element.
pub const ROOT_ELEMENT: &str = "Patient";

/// Prologue written before the document element.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// An HL7 v3 patient.
///
/// `id` is the generator's identity counter and is not clamped, so
/// long-running generators emit ids above 9999.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hl7v3Patient {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,
    pub id: u64,
    pub name: Vec<Hl7v3Name>,
    #[serde(rename = "administrativeGenderCode")]
    pub gender: GenderCode,
    #[serde(rename = "birthTime")]
    pub birth_time: BirthTime,
    #[serde(rename = "addr")]
    pub address: Vec<Hl7v3Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hl7v3Name {
    pub given: Vec<String>,
    pub family: String,
}

/// `M` or `F`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderCode {
    pub code: String,
}

/// `YYYYMMDDHHMMSS`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthTime {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hl7v3Address {
    #[serde(rename = "streetAddressLine")]
    pub street: Vec<String>,
    pub city: String,
    pub state: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
}

impl From<PostalAddress> for Hl7v3Address {
    fn from(address: PostalAddress) -> Self {
        Self {
            street: vec![address.street],
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
        }
    }
}

impl Hl7v3Patient {
    /// XML declaration followed by the indented `Patient` document.
    pub fn to_xml(&self) -> Result<String, GeneratorError> {
        let mut body = String::new();
        let mut serializer = quick_xml::se::Serializer::with_root(&mut body, Some(ROOT_ELEMENT))
            .map_err(|e| GeneratorError::Xml(e.to_string()))?;
        serializer.indent(' ', 2);
        self.serialize(serializer)
            .map_err(|e| GeneratorError::Xml(e.to_string()))?;

        Ok(format!("{XML_DECLARATION}{body}"))
    }

    /// Parse a document produced by [`Hl7v3Patient::to_xml`].
    pub fn from_xml(xml: &str) -> Result<Self, GeneratorError> {
        quick_xml::de::from_str(xml).map_err(|e| GeneratorError::Xml(e.to_string()))
    }
}

impl PatientGenerator {
    /// Generate the next HL7 v3 patient.
    pub fn hl7v3_patient(&mut self) -> Hl7v3Patient {
        let id = self.next_identity();
        let gender = self.gender();
        let birth_date = self.birth_date(HL7V3_BIRTH_YEARS);
        let name = Hl7v3Name {
            given: vec![self.first_name()],
            family: self.last_name(),
        };
        let address = self.address();

        Hl7v3Patient {
            xmlns: NAMESPACE.to_string(),
            id,
            name: vec![name],
            gender: GenderCode {
                code: gender.code().to_string(),
            },
            birth_time: BirthTime {
                value: birth_date.compact_timestamp(),
            },
            address: vec![address.into()],
        }
    }
}
