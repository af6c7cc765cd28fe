//! # API Shared
//!
//! Shared request/response types for the check-in kiosk API.
//!
//! Contains:
//! - JSON DTOs with OpenAPI schemas (`utoipa::ToSchema`)
//! - Conversions from `checkin-core` domain types
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`; kept separate so the wire shapes do not depend on axum.

pub mod health;

pub use health::HealthService;

use checkin_core::{
    AppointmentInfo, FormStatus, IntakeForm, PatientRecord, ViewerConfiguration, WritePlan,
};
use checkin_types::FieldValues;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormRes {
    pub index: usize,
    pub name: String,
    pub file: String,
    pub duration: String,
    /// URL the viewer loads the document from.
    pub document: String,
}

impl FormRes {
    pub fn new(index: usize, form: &IntakeForm, document: String) -> Self {
        Self {
            index,
            name: form.name.to_string(),
            file: form.file.to_string(),
            duration: form.duration.to_string(),
            document,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListFormsRes {
    pub forms: Vec<FormStatusRes>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormStatusRes {
    pub form: FormRes,
    /// "completed", "current" or "locked"
    pub status: String,
}

impl FormStatusRes {
    pub fn new(form: FormRes, status: FormStatus) -> Self {
        let status = match status {
            FormStatus::Completed => "completed",
            FormStatus::Current => "current",
            FormStatus::Locked => "locked",
        };
        Self {
            form,
            status: status.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummaryRes {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub provider: String,
    pub reason_for_visit: String,
    pub appointment_date: String,
    pub appointment_time: String,
}

impl PatientSummaryRes {
    pub fn new(record: &PatientRecord, appointment: AppointmentInfo) -> Self {
        Self {
            first_name: record.patient.first_name.clone(),
            last_name: record.patient.last_name.clone(),
            full_name: record.full_name(),
            provider: appointment.provider,
            reason_for_visit: record.visit_info.reason_for_visit.clone(),
            appointment_date: appointment.date,
            appointment_time: appointment.time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfigRes {
    pub container: String,
    pub document: String,
    pub license_key: String,
    pub toolbar_items: Vec<String>,
    pub sdk_script_url: String,
}

impl ViewerConfigRes {
    pub fn new(config: ViewerConfiguration, sdk_script_url: String) -> Self {
        Self {
            container: config.container,
            document: config.document,
            license_key: config.license_key,
            toolbar_items: config.toolbar_items,
            sdk_script_url,
        }
    }
}

/// Fields reported by the viewer for the loaded document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrefillReq {
    /// Document URL or file name, used for logging only.
    #[serde(default)]
    pub document: String,
    /// Field identifiers in the order the viewer reported them.
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrefillRes {
    /// Resolved value per field: a string for text fields, `["Yes"]` or `[]` for checkboxes.
    #[schema(value_type = Object)]
    pub values: FieldValues,
    /// Ordered write batches plus the text-only fallback.
    #[schema(value_type = Object)]
    pub plan: WritePlan,
}
