//! HL7 v2 `ADT^A01` messages as pipe-delimited text.

use super::{Gender, PatientGenerator, BIRTH_YEARS, COUNTRY};
use crate::generators::timestamp::compact_timestamp_now;
use std::fmt;

const SENDING_APPLICATION: &str = "FHIR_CONVERTER";
const RECEIVING_APPLICATION: &str = "HL7_PARSER";
const FACILITY: &str = "FACILITY";
const MESSAGE_TYPE: &str = "ADT^A01";
const PROCESSING_ID: &str = "P";
const VERSION: &str = "2.5";

/// Message header segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MshSegment {
    pub sending_application: String,
    pub sending_facility: String,
    pub receiving_application: String,
    pub receiving_facility: String,
    /// `YYYYMMDDHHMMSS`
    pub date_time: String,
    pub message_type: String,
    pub message_control_id: String,
    pub processing_id: String,
    pub version: String,
}

/// Patient identification segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PidSegment {
    pub set_id: String,
    pub patient_id: String,
    /// `last^first`
    pub patient_name: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
    pub gender: Gender,
    /// `street^city^state^zip^country`
    pub address: String,
}

/// An HL7 v2 message with a header and a patient segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hl7Message {
    pub msh: MshSegment,
    pub pid: PidSegment,
}

impl fmt::Display for Hl7Message {
    /// Renders `MSH` and `PID` on two lines, header first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msh = &self.msh;
        let pid = &self.pid;
        writeln!(
            f,
            "MSH|^~\\&|{}|{}|{}|{}|{}||{}|{}|{}|{}|",
            msh.sending_application,
            msh.sending_facility,
            msh.receiving_application,
            msh.receiving_facility,
            msh.date_time,
            msh.message_type,
            msh.message_control_id,
            msh.processing_id,
            msh.version,
        )?;
        write!(
            f,
            "PID|{}||{}||{}||{}|{}|||{}||||||{}",
            pid.set_id,
            pid.patient_id,
            pid.patient_name,
            pid.date_of_birth,
            pid.gender,
            pid.address,
            pid.patient_id,
        )
    }
}

impl PatientGenerator {
    /// Generate the next HL7 v2 admission message.
    pub fn hl7_message(&mut self) -> Hl7Message {
        let now = compact_timestamp_now();
        let id = self.next_identity();

        let msh = MshSegment {
            sending_application: SENDING_APPLICATION.to_string(),
            sending_facility: FACILITY.to_string(),
            receiving_application: RECEIVING_APPLICATION.to_string(),
            receiving_facility: FACILITY.to_string(),
            date_time: now.clone(),
            message_type: MESSAGE_TYPE.to_string(),
            message_control_id: now,
            processing_id: PROCESSING_ID.to_string(),
            version: VERSION.to_string(),
        };

        let patient_name = format!("{}^{}", self.last_name(), self.first_name());
        let date_of_birth = self.birth_date(BIRTH_YEARS).iso();
        let gender = self.gender();
        let address = self.address();

        let pid = PidSegment {
            set_id: "1".to_string(),
            patient_id: id.to_string(),
            patient_name,
            date_of_birth,
            gender,
            address: format!(
                "{}^{}^{}^{}^{COUNTRY}",
                address.street, address.city, address.state, address.postal_code
            ),
        };

        Hl7Message { msh, pid }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(message: &Hl7Message) -> (Vec<String>, Vec<String>) {
        let text = message.to_string();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 2, "expected two segments in {text:?}");
        let split = |line: &str| line.split('|').map(str::to_string).collect();
        (split(lines[0]), split(lines[1]))
    }

    #[test]
    fn test_hl7_message_structure() {
        let mut generator = PatientGenerator::new(0);
        let message = generator.hl7_message();
        let text = message.to_string();

        assert!(text.starts_with("MSH|"));
        assert!(text.contains("\nPID|"));

        let (msh, pid) = segments(&message);
        assert_eq!(msh[1], "^~\\&");
        assert_eq!(msh[2], "FHIR_CONVERTER");
        assert_eq!(msh[3], "FACILITY");
        assert_eq!(msh[4], "HL7_PARSER");
        assert_eq!(msh[5], "FACILITY");
        assert_eq!(msh[6].len(), 14);
        assert_eq!(msh[8], "ADT^A01");
        assert_eq!(msh[10], "P");
        assert_eq!(msh[11], "2.5");

        assert_eq!(pid[1], "1");
        assert_eq!(pid[3], "1");
        assert!(pid[5].contains('^'));
        assert_eq!(pid[7].len(), 10);
        let birth_year: i32 = pid[7][..4].parse().unwrap();
        assert!(BIRTH_YEARS.contains(&birth_year));
        assert!(pid[8] == "male" || pid[8] == "female");
        assert_eq!(pid[11].split('^').count(), 5);
        assert!(pid[11].ends_with("^USA"));
        assert_eq!(pid.last().map(String::as_str), Some("1"));
    }

    #[test]
    fn test_hl7_patient_ids_increase() {
        let mut generator = PatientGenerator::new(0);
        for expected in 1..=3u64 {
            let message = generator.hl7_message();
            assert_eq!(message.pid.patient_id, expected.to_string());
        }
    }
}
