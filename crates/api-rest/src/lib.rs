//! # API REST
//!
//! Kiosk pages and the REST API for the check-in service.
//!
//! Handles:
//! - Server-rendered pages (welcome, portal, document viewer, completion) with tera
//! - JSON endpoints with axum, including the field pre-fill used by the viewer page
//! - OpenAPI/Swagger documentation
//! - Static intake documents
//!
//! Uses `api-shared` for request/response types and `checkin-core` for everything else.

#![warn(rust_2018_idioms)]

mod api;
mod error;
mod pages;
mod templates;

pub use error::PageError;

use axum::{
    routing::{get, post},
    Router,
};
use checkin_core::CoreConfig;
use std::sync::Arc;
use tera::Tera;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers
///
/// Holds the kiosk configuration and the parsed page templates. The patient record is read from
/// disk on each request, so edits to the data file show up on the next page load.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CoreConfig>,
    templates: Arc<Tera>,
}

impl AppState {
    /// Build the state, parsing every page template.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Render` if a template fails to parse.
    pub fn new(cfg: Arc<CoreConfig>) -> Result<Self, PageError> {
        Ok(Self {
            cfg,
            templates: Arc::new(templates::load()?),
        })
    }

    pub fn cfg(&self) -> &CoreConfig {
        &self.cfg
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health,
        api::list_forms,
        api::patient_summary,
        api::viewer_config,
        api::prefill,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::FormRes,
        api_shared::FormStatusRes,
        api_shared::ListFormsRes,
        api_shared::PatientSummaryRes,
        api_shared::ViewerConfigRes,
        api_shared::PrefillReq,
        api_shared::PrefillRes,
    ))
)]
pub struct ApiDoc;

/// Build the kiosk router: pages, JSON API, static documents and Swagger UI.
pub fn router(state: AppState) -> Router {
    let documents = ServeDir::new(state.cfg.documents_dir());

    Router::new()
        .route("/", get(pages::welcome))
        .route("/patient-portal", get(pages::portal))
        .route("/patient-portal/forms/:index", get(pages::open_form))
        .route(
            "/patient-portal/forms/:index/complete",
            post(pages::complete_form),
        )
        .route("/patient-portal/completed", get(pages::completed))
        .route("/viewer", get(pages::sample_viewer))
        .route("/health", get(api::health))
        .route("/api/forms", get(api::list_forms))
        .route("/api/patient", get(api::patient_summary))
        .route("/api/viewer-config", get(api::viewer_config))
        .route("/api/prefill", post(api::prefill))
        .nest_service(checkin_core::constants::DOCUMENTS_URL_PREFIX, documents)
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
