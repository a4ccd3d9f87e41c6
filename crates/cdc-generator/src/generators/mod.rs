//! Individual value generators for the supported field types.
//!
//! This module maps a [`FieldType`] to the function that produces its value.
//! All generators draw from the RNG they are handed, so a seeded RNG gives
//! reproducible values for every type except `time`.

pub mod faker;
pub mod numeric;
pub mod obfuscator;
pub mod rich;
pub mod timestamp;
pub mod uuid;

use cdc_core::{FieldType, Value};
use rand::Rng;

/// Generate one value of the given field type.
pub fn generate_value<R: Rng>(field_type: FieldType, rng: &mut R) -> Value {
    match field_type {
        FieldType::Int => numeric::generate_int(rng),
        FieldType::String => Value::String(faker::phrase(rng)),
        FieldType::Time => timestamp::generate_timestamp_now(),
        FieldType::Duration => numeric::generate_duration(rng),
        FieldType::Bool => numeric::generate_bool(rng),

        FieldType::Name => Value::String(rich::generate_name(rng)),
        FieldType::Email => Value::String(rich::generate_email(rng)),
        FieldType::EmployeeId => Value::String(rich::generate_employee_id(rng)),
        FieldType::Ssn => Value::String(rich::generate_ssn(rng)),
        FieldType::CreditCard => Value::String(rich::generate_credit_card(rng)),
        FieldType::OrderNumber => Value::String(rich::generate_order_number(rng)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_basic_types_keep_native_shape() {
        let mut rng = StdRng::seed_from_u64(42);

        assert!(matches!(generate_value(FieldType::Int, &mut rng), Value::Int(_)));
        assert!(matches!(generate_value(FieldType::String, &mut rng), Value::String(_)));
        assert!(matches!(generate_value(FieldType::Time, &mut rng), Value::Time(_)));
        assert!(matches!(
            generate_value(FieldType::Duration, &mut rng),
            Value::Duration(_)
        ));
        assert!(matches!(generate_value(FieldType::Bool, &mut rng), Value::Bool(_)));
    }

    #[test]
    fn test_rich_types_are_strings() {
        let mut rng = StdRng::seed_from_u64(42);
        for ty in FieldType::ALL.into_iter().filter(FieldType::is_rich) {
            let value = generate_value(ty, &mut rng);
            assert!(
                value.as_str().is_some_and(|s| !s.is_empty()),
                "{ty} produced {value:?}"
            );
        }
    }
}
