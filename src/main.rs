use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use checkin_core::config::{sdk_version_from_env_value, toolbar_items_from_env_value};
use checkin_core::{CoreConfig, DEFAULT_DOCUMENTS_DIR, DEFAULT_PATIENT_DATA_FILE, SdkSettings};

/// Main entry point for the check-in kiosk
///
/// Serves the kiosk pages, the JSON API and the intake documents on one address
/// (default: 0.0.0.0:3000).
///
/// # Environment Variables
/// - `CHECKIN_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `PATIENT_DATA_FILE`: Patient record JSON (default: "data/patient-data.json")
/// - `DOCUMENTS_DIR`: Directory the intake PDFs are served from (default: "documents")
/// - `WEB_SDK_LICENSE_KEY`: Viewer SDK license key (default: empty)
/// - `WEB_SDK_VERSION`: Viewer SDK version loaded from the CDN (default: "1.7.0")
/// - `WEB_SDK_TOOLBAR_ITEMS`: Comma-separated toolbar item types to show
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("checkin=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("CHECKIN_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let patient_data_file = PathBuf::from(
        std::env::var("PATIENT_DATA_FILE").unwrap_or_else(|_| DEFAULT_PATIENT_DATA_FILE.into()),
    );
    if !patient_data_file.exists() {
        // Pages report the missing record per request; the server still starts.
        tracing::warn!(
            "Patient data file does not exist: {}",
            patient_data_file.display()
        );
    }
    let documents_dir = PathBuf::from(
        std::env::var("DOCUMENTS_DIR").unwrap_or_else(|_| DEFAULT_DOCUMENTS_DIR.into()),
    );

    let sdk = SdkSettings::new(
        std::env::var("WEB_SDK_LICENSE_KEY").unwrap_or_default(),
        sdk_version_from_env_value(std::env::var("WEB_SDK_VERSION").ok()),
        toolbar_items_from_env_value(std::env::var("WEB_SDK_TOOLBAR_ITEMS").ok())?,
    );
    let cfg = Arc::new(CoreConfig::new(patient_data_file, documents_dir, sdk)?);

    tracing::info!("++ Starting check-in kiosk on {}", rest_addr);
    tracing::info!("++ Viewer SDK from {}", cfg.sdk().script_url());

    let app = router(AppState::new(cfg)?);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
