//! # Check-in Core
//!
//! Core logic for the patient check-in kiosk.
//!
//! This crate holds the data operations behind the kiosk pages:
//! - Loading the static patient record
//! - Resolving pre-fill values for the fields a document reports
//! - Ordering viewer writes so checkbox groups stay mutually exclusive
//! - The viewer contract and the prefill orchestration built on it
//! - The intake form catalogue and the patient's progress through it
//!
//! **No API concerns**: HTTP routing, page rendering and the CLI belong in `api-rest`,
//! `api-shared` and `checkin-cli`.

pub mod appointment;
pub mod config;
pub mod constants;
pub mod error;
pub mod flow;
pub mod forms;
pub mod patient;
pub mod plan;
pub mod prefill;
pub mod resolver;
pub mod viewer;

pub use appointment::AppointmentInfo;
pub use config::{CoreConfig, SdkSettings};
pub use constants::{DEFAULT_DOCUMENTS_DIR, DEFAULT_PATIENT_DATA_FILE};
pub use error::{CheckinError, CheckinResult};
pub use flow::{CheckinFlow, FlowTransition, FormStatus, Progress};
pub use forms::{IntakeForm, INTAKE_FORMS};
pub use patient::{load_patient_record, PatientRecord};
pub use plan::{BatchKind, WriteBatch, WritePlan};
pub use prefill::{close_document, open_and_prefill, prefill_document, PrefillOutcome};
pub use resolver::resolve_field_values;
pub use viewer::{DocumentViewer, MemoryViewer, ViewerConfiguration, ViewerError};
