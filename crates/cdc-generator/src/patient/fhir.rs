//! FHIR `Patient` resources.

use super::{Gender, PatientGenerator, BIRTH_YEARS, COUNTRY};
use crate::GeneratorError;
use serde::{Deserialize, Serialize};

/// A FHIR patient resource, serialized with canonical lowerCamel field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FhirPatient {
    pub id: String,
    pub name: Vec<FhirName>,
    pub birth_date: String,
    pub gender: Gender,
    pub address: Vec<FhirAddress>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FhirName {
    pub family: Vec<String>,
    pub given: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FhirAddress {
    pub line: Vec<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl FhirPatient {
    /// JSON encoding of the resource.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, GeneratorError> {
        serde_json::to_vec(self).map_err(GeneratorError::Serialize)
    }
}

impl PatientGenerator {
    /// Generate the next FHIR patient.
    pub fn fhir_patient(&mut self) -> FhirPatient {
        let id = self.next_identity();
        let name = FhirName {
            family: vec![self.last_name()],
            given: vec![self.first_name()],
        };
        let gender = self.gender();
        let address = self.address();
        let birth_date = self.birth_date(BIRTH_YEARS);

        FhirPatient {
            id: id.to_string(),
            name: vec![name],
            birth_date: birth_date.iso(),
            gender,
            address: vec![FhirAddress {
                line: vec![address.street],
                city: address.city,
                state: address.state,
                postal_code: address.postal_code,
                country: COUNTRY.to_string(),
            }],
        }
    }
}
