//! Server-rendered kiosk pages.
//!
//! The patient's position in the form sequence travels in the `step` query parameter; the server
//! keeps no session.

use crate::api::{patient_record, viewer_container};
use crate::{templates, AppState, PageError};
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use checkin_core::constants::{SAMPLE_DOCUMENT, SDK_CDN_HOST};
use checkin_core::{AppointmentInfo, CheckinFlow, FlowTransition, FormStatus, ViewerConfiguration};
use serde::{Deserialize, Serialize};
use tera::Context;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StepQuery {
    step: Option<usize>,
}

impl StepQuery {
    pub(crate) fn flow(&self) -> CheckinFlow {
        CheckinFlow::new(self.step.unwrap_or(0))
    }
}

#[derive(Debug, Serialize)]
struct FormRow {
    name: &'static str,
    duration: &'static str,
    status: FormStatus,
    href: String,
}

fn portal_href(step: usize) -> String {
    format!("/patient-portal?step={step}")
}

fn form_href(index: usize, step: usize) -> String {
    format!("/patient-portal/forms/{index}?step={step}")
}

/// Context shared by every page: the viewer SDK script is preloaded from the first page on.
fn page_context(state: &AppState) -> Context {
    let mut context = Context::new();
    context.insert("sdk_script_url", &state.cfg().sdk().script_url());
    context.insert("sdk_cdn_host", SDK_CDN_HOST);
    context
}

fn render(state: &AppState, name: &str, context: &Context) -> Result<Html<String>, PageError> {
    Ok(Html(templates::render(&state.templates, name, context)?))
}

/// Welcome page with today's appointment.
pub(crate) async fn welcome(State(state): State<AppState>) -> Response {
    let record = match patient_record(&state) {
        Ok(record) => record,
        Err(err) => return err.into_response(),
    };
    let appointment = AppointmentInfo::at(chrono::Local::now().naive_local(), &record);

    let mut context = page_context(&state);
    context.insert("first_name", &record.patient.first_name);
    context.insert("reason_for_visit", &record.visit_info.reason_for_visit);
    context.insert("appointment", &appointment);
    render(&state, "welcome.html", &context).into_response()
}

/// Intake form list with progress.
pub(crate) async fn portal(
    State(state): State<AppState>,
    Query(query): Query<StepQuery>,
) -> Response {
    let record = match patient_record(&state) {
        Ok(record) => record,
        Err(err) => return err.into_response(),
    };
    let appointment = AppointmentInfo::at(chrono::Local::now().naive_local(), &record);
    let flow = query.flow();
    let step = flow.current_step();
    let forms: Vec<FormRow> = flow
        .forms()
        .iter()
        .enumerate()
        .map(|(index, form)| FormRow {
            name: form.name,
            duration: form.duration,
            status: flow.status(index),
            href: form_href(index, step),
        })
        .collect();

    let mut context = page_context(&state);
    context.insert("first_name", &record.patient.first_name);
    context.insert("last_name", &record.patient.last_name);
    context.insert("full_name", &record.full_name());
    context.insert("reason_for_visit", &record.visit_info.reason_for_visit);
    context.insert("appointment", &appointment);
    context.insert("progress", &flow.progress());
    context.insert("forms", &forms);
    render(&state, "portal.html", &context).into_response()
}

/// Viewer page for one intake form.
///
/// # Errors
///
/// `404` for an unknown form, `403` for a form the patient has not reached yet.
pub(crate) async fn open_form(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Query(query): Query<StepQuery>,
) -> Result<Html<String>, PageError> {
    let flow = query.flow();
    let form = flow.open(index)?;
    let step = flow.current_step();
    let cfg = state.cfg();
    let viewer = ViewerConfiguration::new(cfg, viewer_container(), cfg.document_url(form.file));
    tracing::debug!("Opening {} for step {}", viewer.document_name(), step);

    let mut context = page_context(&state);
    context.insert("title", form.name);
    context.insert(
        "subtitle",
        &format!("Form {} of {}", index + 1, flow.total()),
    );
    context.insert("back_href", &portal_href(step));
    context.insert("back_label", "Back to Forms");
    context.insert(
        "complete_action",
        &format!("/patient-portal/forms/{index}/complete?step={step}"),
    );
    context.insert("sdk_version", &Option::<String>::None);
    context.insert("viewer", &viewer);
    render(&state, "document.html", &context)
}

/// Mark a form complete and move on.
pub(crate) async fn complete_form(
    Path(index): Path<usize>,
    Query(query): Query<StepQuery>,
) -> Result<Redirect, PageError> {
    let flow = query.flow();
    flow.open(index)?;
    let target = match flow.complete(index) {
        FlowTransition::Next(next) => portal_href(next),
        FlowTransition::Finished => "/patient-portal/completed".to_string(),
    };
    tracing::info!("Form {} complete, continuing to {}", index, target);
    Ok(Redirect::to(&target))
}

pub(crate) async fn completed(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    render(&state, "completed.html", &Context::new())
}

/// Standalone viewer showing the sample signed document.
pub(crate) async fn sample_viewer(
    State(state): State<AppState>,
) -> Result<Html<String>, PageError> {
    let cfg = state.cfg();
    let viewer =
        ViewerConfiguration::new(cfg, viewer_container(), cfg.document_url(SAMPLE_DOCUMENT));

    let mut context = page_context(&state);
    context.insert("title", "Document Viewer");
    context.insert("subtitle", SAMPLE_DOCUMENT);
    context.insert("sdk_version", cfg.sdk().version());
    context.insert("back_href", "/");
    context.insert("back_label", "Back to Welcome");
    context.insert("complete_action", &Option::<String>::None);
    context.insert("viewer", &viewer);
    render(&state, "document.html", &context)
}
