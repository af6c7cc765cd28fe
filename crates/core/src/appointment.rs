//! Appointment details shown on the welcome page.

use crate::constants::APPOINTMENT_LEAD_MINUTES;
use crate::patient::PatientRecord;
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentInfo {
    /// e.g. "Saturday, October 17, 2026"
    pub date: String,
    /// e.g. "3:05 PM"
    pub time: String,
    pub current_time: String,
    pub provider: String,
}

fn clock(at: NaiveDateTime) -> String {
    at.format("%-I:%M %p").to_string()
}

impl AppointmentInfo {
    /// Today's appointment for a patient arriving at `now`.
    ///
    /// The appointment is shown a fixed lead time after arrival; the record only supplies the
    /// provider.
    pub fn at(now: NaiveDateTime, record: &PatientRecord) -> Self {
        let appointment = now + Duration::minutes(APPOINTMENT_LEAD_MINUTES);
        Self {
            date: now.format("%A, %B %-d, %Y").to_string(),
            time: clock(appointment),
            current_time: clock(now),
            provider: record.visit_info.provider.clone(),
        }
    }
}
