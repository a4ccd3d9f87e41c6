//! Structured and raw payload builders for field-based formats.

use crate::generators::generate_value;
use crate::GeneratorError;
use cdc_core::{FieldSpec, StructuredData};
use rand::Rng;

/// Generate one value per field of `spec`, keyed by field name.
pub fn random_structured_data<R: Rng>(spec: &FieldSpec, rng: &mut R) -> StructuredData {
    spec.iter()
        .map(|(field, field_type)| (field.to_string(), generate_value(field_type, rng)))
        .collect()
}

/// JSON encoding of [`random_structured_data`].
pub fn random_raw_data<R: Rng>(spec: &FieldSpec, rng: &mut R) -> Result<Vec<u8>, GeneratorError> {
    random_structured_data(spec, rng)
        .to_json_bytes()
        .map_err(GeneratorError::Serialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdc_core::{FieldType, Value};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn basic_spec() -> FieldSpec {
        FieldSpec::new()
            .with_field("intField", FieldType::Int)
            .with_field("stringField", FieldType::String)
            .with_field("timeField", FieldType::Time)
            .with_field("durationField", FieldType::Duration)
            .with_field("boolField", FieldType::Bool)
    }

    fn rich_spec() -> FieldSpec {
        FieldSpec::new()
            .with_field("nameField", FieldType::Name)
            .with_field("emailField", FieldType::Email)
            .with_field("employeeIDField", FieldType::EmployeeId)
            .with_field("ssnField", FieldType::Ssn)
            .with_field("creditCardField", FieldType::CreditCard)
            .with_field("orderNumField", FieldType::OrderNumber)
    }

    #[test]
    fn test_structured_basic_types() {
        let mut rng = StdRng::seed_from_u64(42);
        let data = random_structured_data(&basic_spec(), &mut rng);

        assert_eq!(data.len(), 5);
        assert!(matches!(data.get("intField"), Some(Value::Int(_))));
        assert!(matches!(data.get("stringField"), Some(Value::String(_))));
        assert!(matches!(data.get("timeField"), Some(Value::Time(_))));
        assert!(matches!(data.get("durationField"), Some(Value::Duration(_))));
        assert!(matches!(data.get("boolField"), Some(Value::Bool(_))));
    }

    #[test]
    fn test_structured_rich_types() {
        let mut rng = StdRng::seed_from_u64(42);
        let data = random_structured_data(&rich_spec(), &mut rng);

        let text = |field: &str| data.get(field).and_then(Value::as_str).unwrap().to_string();
        assert!(text("employeeIDField").starts_with("EMP"));
        assert!(text("ssnField").starts_with("XXX-XX-"));
        assert!(text("creditCardField").starts_with("XXXXXXXXXXXX"));
        assert!(text("orderNumField").starts_with("ORD-"));
        assert!(text("emailField").contains('@'));
        assert_eq!(text("nameField").split(' ').count(), 2);
    }

    #[test]
    fn test_raw_round_trip_keeps_field_names() {
        let mut rng = StdRng::seed_from_u64(42);
        let spec = rich_spec();
        let raw = random_raw_data(&spec, &mut rng).unwrap();

        let decoded: serde_json::Map<String, serde_json::Value> =
            serde_json::from_slice(&raw).unwrap();
        let names: BTreeSet<&str> = decoded.keys().map(String::as_str).collect();
        let expected: BTreeSet<&str> = spec.field_names().into_iter().collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_raw_basic_types_encoding() {
        let mut rng = StdRng::seed_from_u64(42);
        let raw = random_raw_data(&basic_spec(), &mut rng).unwrap();
        let decoded: serde_json::Value = serde_json::from_slice(&raw).unwrap();

        assert!(decoded["intField"].as_i64().is_some_and(|v| v >= 0));
        assert!(decoded["boolField"].is_boolean());
        assert!(decoded["durationField"].is_u64());
        let ts = decoded["timeField"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[test]
    fn test_empty_spec() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(random_structured_data(&FieldSpec::new(), &mut rng).is_empty());
        assert_eq!(random_raw_data(&FieldSpec::new(), &mut rng).unwrap(), b"{}");
    }
}
