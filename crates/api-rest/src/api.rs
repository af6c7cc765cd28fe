//! JSON endpoints.

use crate::pages::StepQuery;
use crate::AppState;
use api_shared::{
    FormRes, FormStatusRes, HealthRes, HealthService, ListFormsRes, PatientSummaryRes, PrefillReq,
    PrefillRes, ViewerConfigRes,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use checkin_core::constants::SAMPLE_DOCUMENT;
use checkin_core::{
    load_patient_record, resolve_field_values, AppointmentInfo, PatientRecord,
    ViewerConfiguration, WritePlan,
};
use checkin_types::FieldId;
use serde::Deserialize;

type ApiError = (StatusCode, &'static str);

/// Read the patient record, mapping any failure to a 500.
pub(crate) fn patient_record(state: &AppState) -> Result<PatientRecord, ApiError> {
    load_patient_record(state.cfg().patient_data_file()).map_err(|e| {
        tracing::error!("Load patient record error: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
    })
}

/// A fresh container element id for one viewer instance.
pub(crate) fn viewer_container() -> String {
    format!("viewer-{}", uuid::Uuid::new_v4().simple())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the check-in service.
#[axum::debug_handler]
pub(crate) async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/forms",
    params(
        ("step" = Option<usize>, Query, description = "Number of forms already completed")
    ),
    responses(
        (status = 200, description = "Intake form catalogue with status", body = ListFormsRes)
    )
)]
/// List the intake forms in the order the patient completes them
///
/// # Returns
/// * `Json<ListFormsRes>` - Every form with its document URL and its status at `step`
#[axum::debug_handler]
pub(crate) async fn list_forms(
    State(state): State<AppState>,
    Query(query): Query<StepQuery>,
) -> Json<ListFormsRes> {
    let flow = query.flow();
    let cfg = state.cfg();
    let forms = flow
        .forms()
        .iter()
        .enumerate()
        .map(|(index, form)| {
            let res = FormRes::new(index, form, cfg.document_url(form.file));
            FormStatusRes::new(res, flow.status(index))
        })
        .collect();
    Json(ListFormsRes { forms })
}

#[utoipa::path(
    get,
    path = "/api/patient",
    responses(
        (status = 200, description = "Patient summary", body = PatientSummaryRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Summary of the checked-in patient and today's appointment
///
/// # Returns
/// * `Ok(Json<PatientSummaryRes>)` - Name, provider, visit reason and appointment slot
/// * `Err((StatusCode, &str))` - Internal server error if the record cannot be read
///
/// # Errors
/// Returns `500 Internal Server Error` if:
/// - the patient data file is missing or malformed.
#[axum::debug_handler]
pub(crate) async fn patient_summary(
    State(state): State<AppState>,
) -> Result<Json<PatientSummaryRes>, ApiError> {
    let record = patient_record(&state)?;
    let appointment = AppointmentInfo::at(chrono::Local::now().naive_local(), &record);
    Ok(Json(PatientSummaryRes::new(&record, appointment)))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ViewerConfigQuery {
    document: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/viewer-config",
    params(
        ("document" = Option<String>, Query, description = "Document file name (default: sample)")
    ),
    responses(
        (status = 200, description = "Viewer configuration", body = ViewerConfigRes)
    )
)]
/// Configuration for loading a document into the viewer
///
/// Each call hands out a new container id.
#[axum::debug_handler]
pub(crate) async fn viewer_config(
    State(state): State<AppState>,
    Query(query): Query<ViewerConfigQuery>,
) -> Json<ViewerConfigRes> {
    let file = query
        .document
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| SAMPLE_DOCUMENT.to_string());
    let cfg = state.cfg();
    let config = ViewerConfiguration::new(cfg, viewer_container(), cfg.document_url(&file));
    Json(ViewerConfigRes::new(config, cfg.sdk().script_url()))
}

#[utoipa::path(
    post,
    path = "/api/prefill",
    request_body = PrefillReq,
    responses(
        (status = 200, description = "Resolved values and the write plan", body = PrefillRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Resolve pre-fill values for the fields a loaded document reports
///
/// The viewer page posts the field names it read from the document and replays the returned
/// plan batch by batch. Blank field names are ignored.
///
/// # Returns
/// * `Ok(Json<PrefillRes>)` - Values per field plus the ordered write plan
/// * `Err((StatusCode, &str))` - Internal server error if the record cannot be read
///
/// # Errors
/// Returns `500 Internal Server Error` if:
/// - the patient data file is missing or malformed.
#[axum::debug_handler]
pub(crate) async fn prefill(
    State(state): State<AppState>,
    Json(req): Json<PrefillReq>,
) -> Result<Json<PrefillRes>, ApiError> {
    let record = patient_record(&state)?;
    let available: Vec<FieldId> = req
        .fields
        .into_iter()
        .filter_map(|name| FieldId::new(name).ok())
        .collect();

    let today = chrono::Local::now().date_naive();
    let values = resolve_field_values(&available, &record, today);
    let plan = WritePlan::build(&values, &available);
    tracing::info!(
        "Resolved {} of {} fields for {}",
        values.len(),
        available.len(),
        req.document
    );

    Ok(Json(PrefillRes { values, plan }))
}
