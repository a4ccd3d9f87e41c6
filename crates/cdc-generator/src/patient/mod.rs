//! Synthetic patient documents in three healthcare representations.
//!
//! A [`PatientGenerator`] owns a seeded RNG and an identity counter. Every
//! document it produces takes the next identity, so identities are unique and
//! strictly increasing within one generator, and the first document of every
//! generator has identity 1.
//!
//! | Format  | Type            | Encoding                        |
//! |---------|-----------------|---------------------------------|
//! | FHIR    | [`FhirPatient`]  | JSON resource                   |
//! | HL7 v2  | [`Hl7Message`]   | `MSH` + `PID` pipe-delimited    |
//! | HL7 v3  | [`Hl7v3Patient`] | XML in namespace `urn:hl7-org:v3` |

pub mod fhir;
pub mod hl7;
pub mod hl7v3;

pub use fhir::{FhirAddress, FhirName, FhirPatient};
pub use hl7::{Hl7Message, MshSegment, PidSegment};
pub use hl7v3::{Hl7v3Address, Hl7v3Name, Hl7v3Patient};

use crate::generators::faker;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Country of every generated address.
pub const COUNTRY: &str = "USA";

/// Birth years of FHIR and HL7 v2 patients.
pub const BIRTH_YEARS: Range<i32> = 1920..2020;

/// Birth years of HL7 v3 patients.
pub const HL7V3_BIRTH_YEARS: Range<i32> = 1950..2000;

/// Administrative gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Single-letter administrative code.
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar date of birth.
///
/// Days are drawn from 1..=28, so every generated date exists regardless of
/// month or leap year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl BirthDate {
    /// `YYYY-MM-DD`.
    pub fn iso(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Midnight of the date as `YYYYMMDDHHMMSS`.
    pub fn compact_timestamp(&self) -> String {
        format!("{:04}{:02}{:02}000000", self.year, self.month, self.day)
    }
}

/// Street, city, state and postal code of one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// Seeded source of patient documents.
pub struct PatientGenerator {
    rng: StdRng,
    identity: u64,
}

impl PatientGenerator {
    /// Create a generator whose first document has identity 1.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            identity: 0,
        }
    }

    /// Identity of the most recently produced document (0 before the first).
    pub fn current_identity(&self) -> u64 {
        self.identity
    }

    fn next_identity(&mut self) -> u64 {
        self.identity += 1;
        self.identity
    }

    fn first_name(&mut self) -> String {
        faker::first_name(&mut self.rng).to_string()
    }

    fn last_name(&mut self) -> String {
        faker::last_name(&mut self.rng).to_string()
    }

    fn gender(&mut self) -> Gender {
        if self.rng.random_bool(0.5) {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    fn birth_date(&mut self, years: Range<i32>) -> BirthDate {
        BirthDate {
            year: self.rng.random_range(years),
            month: self.rng.random_range(1..=12),
            day: self.rng.random_range(1..=28),
        }
    }

    fn address(&mut self) -> PostalAddress {
        PostalAddress {
            street: faker::street_address(&mut self.rng),
            city: faker::city(&mut self.rng).to_string(),
            state: faker::state(&mut self.rng).to_string(),
            postal_code: faker::zip_code(&mut self.rng),
        }
    }
}
