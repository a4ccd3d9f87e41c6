//! Payload builders: one closed set of formats behind a single `build` call.

use crate::patient::PatientGenerator;
use crate::structured::{random_raw_data, random_structured_data};
use crate::GeneratorError;
use cdc_core::{Data, FieldSpec, FormatSpec, FormatType};
use rand::Rng;
use std::path::Path;
use tracing::debug;

/// Produces the data placed in a record's `before`/`after` slots.
pub enum PayloadBuilder {
    /// Typed field map
    Structured(FieldSpec),
    /// JSON bytes of the typed field map
    Raw(FieldSpec),
    /// File contents read once at construction
    File(Vec<u8>),
    /// FHIR patient JSON
    Fhir(PatientGenerator),
    /// HL7 v2 message text
    Hl7(PatientGenerator),
    /// HL7 v3 patient XML
    Hl7v3(PatientGenerator),
}

impl PayloadBuilder {
    /// Build the payload source for `format`.
    ///
    /// Patient formats get their own [`PatientGenerator`] seeded with `seed`.
    /// The `file` format reads its file here, so an unreadable file fails
    /// construction rather than generation.
    pub fn from_format(format: &FormatSpec, seed: u64) -> Result<Self, GeneratorError> {
        Ok(match format {
            FormatSpec::Structured(fields) => PayloadBuilder::Structured(fields.clone()),
            FormatSpec::Raw(fields) => PayloadBuilder::Raw(fields.clone()),
            FormatSpec::File { path } => PayloadBuilder::from_file(path)?,
            FormatSpec::Fhir => PayloadBuilder::Fhir(PatientGenerator::new(seed)),
            FormatSpec::Hl7 => PayloadBuilder::Hl7(PatientGenerator::new(seed)),
            FormatSpec::Hl7v3 => PayloadBuilder::Hl7v3(PatientGenerator::new(seed)),
        })
    }

    /// Read `path` once and serve its bytes for every payload.
    ///
    /// Caching keeps disk latency out of the rate-limited read path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GeneratorError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| GeneratorError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Cached {} bytes from {}", bytes.len(), path.display());
        Ok(PayloadBuilder::File(bytes))
    }

    pub fn format_type(&self) -> FormatType {
        match self {
            PayloadBuilder::Structured(_) => FormatType::Structured,
            PayloadBuilder::Raw(_) => FormatType::Raw,
            PayloadBuilder::File(_) => FormatType::File,
            PayloadBuilder::Fhir(_) => FormatType::Fhir,
            PayloadBuilder::Hl7(_) => FormatType::Hl7,
            PayloadBuilder::Hl7v3(_) => FormatType::Hl7v3,
        }
    }

    /// Produce one payload.
    ///
    /// Field-based formats draw from `rng`; patient formats use their own
    /// seeded generator.
    pub fn build<R: Rng>(&mut self, rng: &mut R) -> Result<Data, GeneratorError> {
        match self {
            PayloadBuilder::Structured(fields) => {
                Ok(Data::Structured(random_structured_data(fields, rng)))
            }
            PayloadBuilder::Raw(fields) => Ok(Data::Raw(random_raw_data(fields, rng)?)),
            PayloadBuilder::File(bytes) => Ok(Data::Raw(bytes.clone())),
            PayloadBuilder::Fhir(generator) => {
                Ok(Data::Raw(generator.fhir_patient().to_json_bytes()?))
            }
            PayloadBuilder::Hl7(generator) => {
                Ok(Data::Raw(generator.hl7_message().to_string().into_bytes()))
            }
            PayloadBuilder::Hl7v3(generator) => {
                Ok(Data::Raw(generator.hl7v3_patient().to_xml()?.into_bytes()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::{FhirPatient, Hl7v3Patient};
    use cdc_core::FieldType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn test_file_payload_is_cached() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"hello\":\"world\"}").unwrap();

        let spec = FormatSpec::File {
            path: file.path().to_path_buf(),
        };
        let mut builder = PayloadBuilder::from_format(&spec, 0).unwrap();

        // Later changes on disk are not observed
        std::fs::write(file.path(), b"changed").unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..3 {
            let data = builder.build(&mut rng).unwrap();
            assert_eq!(data.as_raw(), Some(&b"{\"hello\":\"world\"}"[..]));
        }
    }

    #[test]
    fn test_unreadable_file_fails_construction() {
        let dir = tempfile::tempdir().unwrap();
        let spec = FormatSpec::File {
            path: dir.path().join("missing.json"),
        };
        let err = PayloadBuilder::from_format(&spec, 0).err().unwrap();
        assert!(matches!(err, GeneratorError::ReadFile { .. }));
    }

    #[test]
    fn test_structured_and_raw_builders() {
        let fields = FieldSpec::new().with_field("id", FieldType::Int);
        let mut rng = StdRng::seed_from_u64(0);

        let mut structured =
            PayloadBuilder::from_format(&FormatSpec::Structured(fields.clone()), 0).unwrap();
        assert!(structured.build(&mut rng).unwrap().as_structured().is_some());

        let mut raw = PayloadBuilder::from_format(&FormatSpec::Raw(fields), 0).unwrap();
        let bytes = raw.build(&mut rng).unwrap();
        let json: serde_json::Value = serde_json::from_slice(bytes.as_raw().unwrap()).unwrap();
        assert!(json["id"].is_i64());
    }

    #[test]
    fn test_patient_builders() {
        let mut rng = StdRng::seed_from_u64(0);

        let mut fhir = PayloadBuilder::from_format(&FormatSpec::Fhir, 1).unwrap();
        let data = fhir.build(&mut rng).unwrap();
        let patient: FhirPatient = serde_json::from_slice(data.as_raw().unwrap()).unwrap();
        assert_eq!(patient.id, "1");

        let mut hl7 = PayloadBuilder::from_format(&FormatSpec::Hl7, 1).unwrap();
        let data = hl7.build(&mut rng).unwrap();
        assert!(data.as_raw().unwrap().starts_with(b"MSH|"));

        let mut hl7v3 = PayloadBuilder::from_format(&FormatSpec::Hl7v3, 1).unwrap();
        hl7v3.build(&mut rng).unwrap();
        let data = hl7v3.build(&mut rng).unwrap();
        let xml = std::str::from_utf8(data.as_raw().unwrap()).unwrap();
        assert_eq!(Hl7v3Patient::from_xml(xml).unwrap().id, 2);
        assert_eq!(hl7v3.format_type(), FormatType::Hl7v3);
    }
}
