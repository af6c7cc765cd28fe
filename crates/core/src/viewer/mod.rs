//! The document viewer contract.
//!
//! Rendering, form-field storage and signature capture belong to an external viewer SDK. The
//! kiosk only ever talks to it through [`DocumentViewer`]: open a document, read its fields,
//! write values back, close it. Calls are made one at a time and awaited in order; a viewer is a
//! single serially-accessed resource for the document it shows.

mod memory;

pub use memory::MemoryViewer;

use crate::config::CoreConfig;
use async_trait::async_trait;
use checkin_types::{FieldId, FieldValues};
use serde::Serialize;

/// Errors reported by a viewer implementation.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("no document is open")]
    NotOpen,
    #[error("failed to load document: {0}")]
    Load(String),
    #[error("failed to read form fields: {0}")]
    Read(String),
    #[error("failed to write form fields: {0}")]
    Write(String),
    #[error("document has no field named {0}")]
    UnknownField(FieldId),
}

/// Everything the viewer needs to show one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfiguration {
    /// Identifier of the element the viewer renders into.
    pub container: String,
    /// URL of the document to load.
    pub document: String,
    pub license_key: String,
    /// Toolbar item types the viewer may show; everything else is hidden.
    pub toolbar_items: Vec<String>,
}

impl ViewerConfiguration {
    pub fn new(
        cfg: &CoreConfig,
        container: impl Into<String>,
        document: impl Into<String>,
    ) -> Self {
        Self {
            container: container.into(),
            document: document.into(),
            license_key: cfg.sdk().license_key().to_string(),
            toolbar_items: cfg.sdk().toolbar_items().to_vec(),
        }
    }

    /// The document's file name, for logging.
    pub fn document_name(&self) -> &str {
        self.document.rsplit('/').next().unwrap_or(&self.document)
    }
}

#[async_trait]
pub trait DocumentViewer: Send + Sync {
    /// Load the configured document.
    async fn open(&mut self, config: &ViewerConfiguration) -> Result<(), ViewerError>;

    /// Current value of every form field in the open document.
    async fn read_fields(&self) -> Result<FieldValues, ViewerError>;

    /// Set the given fields. Fields not named keep their values.
    async fn write_fields(&mut self, values: &FieldValues) -> Result<(), ViewerError>;

    /// Unload the document.
    async fn close(&mut self) -> Result<(), ViewerError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SdkSettings;
    use std::path::PathBuf;

    #[test]
    fn configuration_carries_sdk_settings() {
        let sdk = SdkSettings::new("demo-key".into(), "1.7.0".into(), vec!["pager".into()]);
        let cfg = CoreConfig::new(
            PathBuf::from("data/patient-data.json"),
            PathBuf::from("documents"),
            sdk,
        )
        .unwrap();

        let document = "/documents/Medical History Questionnaire.pdf";
        let config = ViewerConfiguration::new(&cfg, "viewer-1", document);
        assert_eq!(config.license_key, "demo-key");
        assert_eq!(config.toolbar_items, vec!["pager".to_string()]);
        assert_eq!(config.document_name(), "Medical History Questionnaire.pdf");
    }

    #[test]
    fn configuration_serialises_camel_case() {
        let config = ViewerConfiguration {
            container: "viewer-1".into(),
            document: "/documents/a.pdf".into(),
            license_key: String::new(),
            toolbar_items: vec!["zoom-in".into()],
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["licenseKey"], "");
        assert_eq!(json["toolbarItems"][0], "zoom-in");
    }
}
