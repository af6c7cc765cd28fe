//! Pre-filling an open document from the patient record.
//!
//! Reads the document's fields through the viewer, resolves values for them, and issues the
//! [`WritePlan`] batches in order. Failures never reach the caller: a failed batch is logged and
//! the text-only fallback is written once instead, and anything else is logged and reported in
//! the returned [`PrefillOutcome`]. Nothing is retried.

use crate::patient::PatientRecord;
use crate::plan::WritePlan;
use crate::resolver::resolve_field_values;
use crate::viewer::{DocumentViewer, ViewerConfiguration};
use checkin_types::FieldId;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefillOutcome {
    /// The document could not be loaded; the page stays without a working viewer.
    ViewerUnavailable,
    /// No field in the document has a pre-fill value.
    NothingToWrite,
    /// Every batch was written.
    Populated { fields: usize },
    /// A batch failed and only plain-text fields were written.
    Degraded { fields: usize },
    /// Fields could not be read, or the fallback write failed too.
    Failed,
}

/// Pre-fill the document currently open in `viewer`.
pub async fn prefill_document<V>(
    viewer: &mut V,
    record: &PatientRecord,
    today: NaiveDate,
) -> PrefillOutcome
where
    V: DocumentViewer + ?Sized,
{
    let current = match viewer.read_fields().await {
        Ok(current) => current,
        Err(e) => {
            tracing::error!("Error populating form fields: {}", e);
            return PrefillOutcome::Failed;
        }
    };
    let available: Vec<FieldId> = current.into_keys().collect();

    let resolved = resolve_field_values(&available, record, today);
    if resolved.is_empty() {
        tracing::debug!("no pre-fill values for {} fields", available.len());
        return PrefillOutcome::NothingToWrite;
    }

    let plan = WritePlan::build(&resolved, &available);
    for batch in plan.batches() {
        if let Err(e) = viewer.write_fields(&batch.values).await {
            tracing::error!("Error setting form field values: {}", e);
            return write_fallback(viewer, &plan).await;
        }
    }

    tracing::info!(
        "pre-filled {} of {} fields",
        resolved.len(),
        available.len()
    );
    PrefillOutcome::Populated {
        fields: resolved.len(),
    }
}

async fn write_fallback<V>(viewer: &mut V, plan: &WritePlan) -> PrefillOutcome
where
    V: DocumentViewer + ?Sized,
{
    let text_only = plan.text_only_fallback();
    if text_only.is_empty() {
        return PrefillOutcome::Degraded { fields: 0 };
    }

    match viewer.write_fields(text_only).await {
        Ok(()) => {
            tracing::warn!("fell back to {} text-only fields", text_only.len());
            PrefillOutcome::Degraded {
                fields: text_only.len(),
            }
        }
        Err(e) => {
            tracing::error!("Error writing text-only fallback: {}", e);
            PrefillOutcome::Failed
        }
    }
}

/// Load a document into `viewer` and pre-fill it.
pub async fn open_and_prefill<V>(
    viewer: &mut V,
    config: &ViewerConfiguration,
    record: &PatientRecord,
    today: NaiveDate,
) -> PrefillOutcome
where
    V: DocumentViewer + ?Sized,
{
    if let Err(e) = viewer.open(config).await {
        tracing::error!(
            "Failed to load viewer for {}: {}",
            config.document_name(),
            e
        );
        return PrefillOutcome::ViewerUnavailable;
    }
    tracing::info!("document loaded: {}", config.document);

    prefill_document(viewer, record, today).await
}

/// Unload the current document when the kiosk navigates away.
pub async fn close_document<V>(viewer: &mut V)
where
    V: DocumentViewer + ?Sized,
{
    if let Err(e) = viewer.close().await {
        tracing::warn!("failed to unload viewer: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::Demographics;
    use crate::viewer::MemoryViewer;
    use checkin_types::FieldValue;

    fn record() -> PatientRecord {
        PatientRecord {
            patient: Demographics {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                gender: "Female".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn id(name: &str) -> FieldId {
        FieldId::new(name).unwrap()
    }

    fn config() -> ViewerConfiguration {
        ViewerConfiguration {
            container: "viewer".into(),
            document: "/documents/Patient Demographics Form.pdf".into(),
            license_key: String::new(),
            toolbar_items: Vec::new(),
        }
    }

    #[tokio::test]
    async fn populates_text_and_exclusive_checkboxes() {
        let mut fields = checkin_types::FieldValues::new();
        fields.insert(id("firstName_firstName"), FieldValue::text(""));
        fields.insert(id("genderFemale_gender"), FieldValue::unchecked());
        fields.insert(id("genderMale_gender"), FieldValue::checked());
        fields.insert(id("notes_notes"), FieldValue::text("keep"));
        let mut viewer = MemoryViewer::new(fields);

        let outcome = open_and_prefill(&mut viewer, &config(), &record(), today()).await;
        assert_eq!(outcome, PrefillOutcome::Populated { fields: 3 });

        let values = viewer.values();
        assert_eq!(values["firstName_firstName"], FieldValue::text("Jane"));
        assert_eq!(values["genderFemale_gender"], FieldValue::checked());
        assert_eq!(values["genderMale_gender"], FieldValue::unchecked());
        assert_eq!(values["notes_notes"], FieldValue::text("keep"));

        // regular, clear gender, select gender
        assert_eq!(viewer.writes().len(), 3);
        assert_eq!(viewer.writes()[1].len(), 2);
    }

    #[tokio::test]
    async fn failed_checkbox_write_degrades_to_text_only() {
        let mut viewer = MemoryViewer::with_fields([
            "firstName_firstName",
            "lastName_lastName",
            "genderFemale_gender",
            "authTreatment_authTreatment",
        ])
        .unwrap()
        .failing_checkbox_writes();

        let outcome = open_and_prefill(&mut viewer, &config(), &record(), today()).await;
        assert_eq!(outcome, PrefillOutcome::Degraded { fields: 2 });

        assert_eq!(viewer.writes().len(), 1);
        let written = &viewer.writes()[0];
        assert!(written.values().all(|v| v.is_text()));
        let last_name = &viewer.values()["lastName_lastName"];
        assert_eq!(*last_name, FieldValue::text("Doe"));
    }

    #[tokio::test]
    async fn document_without_known_fields_is_left_alone() {
        let mut viewer = MemoryViewer::with_fields(["witness_witness"]).unwrap();

        let outcome = open_and_prefill(&mut viewer, &config(), &record(), today()).await;
        assert_eq!(outcome, PrefillOutcome::NothingToWrite);
        assert!(viewer.writes().is_empty());
    }

    #[tokio::test]
    async fn load_failure_is_reported_not_raised() {
        let mut viewer = MemoryViewer::with_fields(["firstName_firstName"])
            .unwrap()
            .failing_open();

        let outcome = open_and_prefill(&mut viewer, &config(), &record(), today()).await;
        assert_eq!(outcome, PrefillOutcome::ViewerUnavailable);
        assert!(viewer.writes().is_empty());
    }

    #[tokio::test]
    async fn read_failure_is_reported_not_raised() {
        let mut viewer = MemoryViewer::with_fields(["firstName_firstName"]).unwrap();

        // never opened
        let outcome = prefill_document(&mut viewer, &record(), today()).await;
        assert_eq!(outcome, PrefillOutcome::Failed);
    }

    #[tokio::test]
    async fn unreadable_fields_fail_without_writing() {
        let mut viewer = MemoryViewer::with_fields(["firstName_firstName"])
            .unwrap()
            .failing_reads();

        let outcome = open_and_prefill(&mut viewer, &config(), &record(), today()).await;
        assert_eq!(outcome, PrefillOutcome::Failed);
        assert!(viewer.is_open());
        assert!(viewer.writes().is_empty());
    }

    #[tokio::test]
    async fn close_unloads_and_tolerates_double_close() {
        let mut viewer = MemoryViewer::with_fields(["firstName_firstName"]).unwrap();
        open_and_prefill(&mut viewer, &config(), &record(), today()).await;
        assert!(viewer.is_open());

        close_document(&mut viewer).await;
        assert!(!viewer.is_open());
        close_document(&mut viewer).await;
    }

    #[tokio::test]
    async fn works_through_a_trait_object() {
        let mut viewer: Box<dyn DocumentViewer> =
            Box::new(MemoryViewer::with_fields(["ssn_ssn"]).unwrap());

        let outcome = open_and_prefill(viewer.as_mut(), &config(), &record(), today()).await;
        assert_eq!(outcome, PrefillOutcome::Populated { fields: 1 });
    }
}
