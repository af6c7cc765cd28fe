//! The static patient record.
//!
//! The kiosk pre-fills every intake document from one externally supplied JSON file. The record
//! is read once per page view and never written back; missing keys deserialise to empty strings
//! and lists so that a sparse file still produces a usable (if emptier) pre-fill.

use crate::constants::{DIAGNOSED_PREFIX, HISTORY_ENTRY_SEPARATOR};
use crate::{CheckinError, CheckinResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientRecord {
    pub patient: Demographics,
    pub emergency_contact: EmergencyContact,
    pub insurance: Insurance,
    pub medical_history: MedicalHistory,
    pub visit_info: VisitInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Demographics {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub date_of_birth: String,
    pub ssn: String,
    pub gender: String,
    pub marital_status: String,
    pub phone: String,
    pub email: String,
    pub address: Address,
    pub employer: String,
    pub occupation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
    pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insurance {
    pub primary: InsurancePolicy,
    pub secondary: InsurancePolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsurancePolicy {
    pub company: String,
    pub policy_number: String,
    pub group_number: String,
    pub subscriber_name: String,
    #[serde(rename = "subscriberDOB")]
    pub subscriber_dob: String,
    pub relationship: String,
}

/// Free-text medical history lists.
///
/// Medication and allergy entries follow `"<name> - <detail>"`; conditions follow
/// `"<name> - diagnosed <year>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicalHistory {
    pub allergies: Vec<String>,
    pub medications: Vec<String>,
    pub conditions: Vec<String>,
    pub surgeries: Vec<String>,
    pub family_history: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisitInfo {
    pub date: String,
    pub time: String,
    pub provider: String,
    pub reason_for_visit: String,
}

impl PatientRecord {
    /// First, middle and last name joined by single spaces.
    pub fn full_name(&self) -> String {
        let p = &self.patient;
        format!("{} {} {}", p.first_name, p.middle_name, p.last_name)
    }
}

/// The name part of a `"<name> - <detail>"` entry. An entry without a separator is all name.
pub fn entry_name(entry: &str) -> &str {
    entry
        .split_once(HISTORY_ENTRY_SEPARATOR)
        .map_or(entry, |(name, _)| name)
}

/// The detail part of a `"<name> - <detail>"` entry, empty when there is no separator.
pub fn entry_detail(entry: &str) -> &str {
    let Some((_, detail)) = entry.split_once(HISTORY_ENTRY_SEPARATOR) else {
        return "";
    };
    detail.split(HISTORY_ENTRY_SEPARATOR).next().unwrap_or("")
}

/// The year a condition was diagnosed, e.g. `"2019"` from `"Asthma - diagnosed 2019"`.
pub fn condition_year(entry: &str) -> String {
    entry_detail(entry).replacen(DIAGNOSED_PREFIX, "", 1)
}

/// Read and parse the patient record at `path`.
///
/// # Errors
///
/// Returns `CheckinError::PatientDataRead` if the file cannot be read and
/// `CheckinError::PatientDataParse` if it is not a valid patient record.
pub fn load_patient_record(path: &Path) -> CheckinResult<PatientRecord> {
    let contents = std::fs::read_to_string(path).map_err(|source| CheckinError::PatientDataRead {
        path: path.to_path_buf(),
        source,
    })?;
    let record = serde_json::from_str(&contents).map_err(CheckinError::PatientDataParse)?;
    tracing::debug!("loaded patient record from {}", path.display());
    Ok(record)
}
