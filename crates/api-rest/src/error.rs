use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use checkin_core::CheckinError;

/// Errors raised while serving a kiosk page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Checkin(#[from] CheckinError),
    #[error("template rendering failed: {0}")]
    Render(#[from] tera::Error),
}

impl PageError {
    fn status(&self) -> StatusCode {
        match self {
            PageError::Checkin(CheckinError::UnknownForm(_)) => StatusCode::NOT_FOUND,
            PageError::Checkin(CheckinError::FormLocked { .. }) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match status {
            StatusCode::NOT_FOUND => "Form not found",
            StatusCode::FORBIDDEN => "Complete the earlier forms first",
            _ => {
                tracing::error!("Page error: {:?}", self);
                "Internal error"
            }
        };
        (status, message).into_response()
    }
}
