//! Generators for the "rich" string field types.
//!
//! Sensitive-looking values (SSN, credit card) are produced in full and then
//! masked, so no real-looking number ever leaves the generator.

use super::faker;
use super::numeric::{digits, padded_number};
use super::obfuscator::{obfuscate_credit_card, obfuscate_ssn};
use super::uuid::generate_uuid_v4;
use rand::Rng;

/// Capitalized "First Last".
pub fn generate_name<R: Rng>(rng: &mut R) -> String {
    faker::full_name(rng)
}

pub fn generate_email<R: Rng>(rng: &mut R) -> String {
    faker::email(rng)
}

/// `EMP` followed by a number in `[1000, 9999]`.
pub fn generate_employee_id<R: Rng>(rng: &mut R) -> String {
    format!("EMP{}", padded_number(rng, 1000, 9999, 4))
}

/// Masked SSN, `XXX-XX-NNNN`.
pub fn generate_ssn<R: Rng>(rng: &mut R) -> String {
    let full = format!(
        "{}-{}-{}",
        padded_number(rng, 1, 899, 3),
        padded_number(rng, 1, 99, 2),
        padded_number(rng, 0, 9999, 4)
    );
    obfuscate_ssn(&full)
}

/// Masked 16-digit card number, twelve `X` followed by four digits.
pub fn generate_credit_card<R: Rng>(rng: &mut R) -> String {
    obfuscate_credit_card(&digits(rng, 16))
}

/// `ORD-` followed by a canonical UUID.
pub fn generate_order_number<R: Rng>(rng: &mut R) -> String {
    format!("ORD-{}", generate_uuid_v4(rng))
}
