#[derive(Debug, thiserror::Error)]
pub enum CheckinError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read patient data file {}: {source}", .path.display())]
    PatientDataRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse patient data: {0}")]
    PatientDataParse(serde_json::Error),
    #[error("failed to read field manifest: {0}")]
    ManifestRead(std::io::Error),
    #[error("failed to parse field manifest: {0}")]
    ManifestParse(serde_json::Error),

    #[error("no intake form at index {0}")]
    UnknownForm(usize),
    #[error("intake form {index} is locked until step {current_step} is complete")]
    FormLocked { index: usize, current_step: usize },
}

pub type CheckinResult<T> = std::result::Result<T, CheckinError>;
