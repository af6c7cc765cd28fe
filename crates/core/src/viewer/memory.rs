use super::{DocumentViewer, ViewerConfiguration, ViewerError};
use crate::{CheckinError, CheckinResult};
use async_trait::async_trait;
use checkin_types::{FieldId, FieldValue, FieldValues};
use std::path::Path;

/// In-process viewer over a fixed table of form fields.
///
/// Stands in for the external SDK wherever a real browser is not available: the CLI's
/// `simulate` command and the prefill tests. Writes to fields the table does not hold are
/// rejected, as the real viewer rejects them, and every accepted batch is recorded.
#[derive(Debug, Clone, Default)]
pub struct MemoryViewer {
    fields: FieldValues,
    opened: Option<ViewerConfiguration>,
    writes: Vec<FieldValues>,
    fail_open: bool,
    fail_reads: bool,
    fail_checkbox_writes: bool,
}

impl MemoryViewer {
    pub fn new(fields: FieldValues) -> Self {
        Self {
            fields,
            ..Default::default()
        }
    }

    /// A document whose fields are all blank text.
    pub fn with_fields<I, S>(names: I) -> Result<Self, checkin_types::FieldIdError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = names
            .into_iter()
            .map(|n| Ok((FieldId::new(n)?, FieldValue::text(""))))
            .collect::<Result<FieldValues, checkin_types::FieldIdError>>()?;
        Ok(Self::new(fields))
    }

    /// Load a field table from a JSON manifest mapping field ids to their initial values.
    ///
    /// # Errors
    ///
    /// Returns `CheckinError::ManifestRead` or `CheckinError::ManifestParse`.
    pub fn from_manifest(path: &Path) -> CheckinResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(CheckinError::ManifestRead)?;
        let fields: FieldValues =
            serde_json::from_str(&contents).map_err(CheckinError::ManifestParse)?;
        Ok(Self::new(fields))
    }

    /// Make `open` fail, as when the SDK script could not be loaded.
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Make `read_fields` fail once a document is open.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Reject any write batch that contains a checkbox value.
    pub fn failing_checkbox_writes(mut self) -> Self {
        self.fail_checkbox_writes = true;
        self
    }

    pub fn is_open(&self) -> bool {
        self.opened.is_some()
    }

    /// Current field values, readable whether or not a document is open.
    pub fn values(&self) -> &FieldValues {
        &self.fields
    }

    /// Every accepted write batch, oldest first.
    pub fn writes(&self) -> &[FieldValues] {
        &self.writes
    }
}

#[async_trait]
impl DocumentViewer for MemoryViewer {
    async fn open(&mut self, config: &ViewerConfiguration) -> Result<(), ViewerError> {
        if self.fail_open {
            return Err(ViewerError::Load(format!(
                "viewer unavailable for {}",
                config.document_name()
            )));
        }
        self.opened = Some(config.clone());
        Ok(())
    }

    async fn read_fields(&self) -> Result<FieldValues, ViewerError> {
        if self.opened.is_none() {
            return Err(ViewerError::NotOpen);
        }
        if self.fail_reads {
            return Err(ViewerError::Read("field table unavailable".into()));
        }
        Ok(self.fields.clone())
    }

    async fn write_fields(&mut self, values: &FieldValues) -> Result<(), ViewerError> {
        if self.opened.is_none() {
            return Err(ViewerError::NotOpen);
        }
        if let Some(unknown) = values.keys().find(|id| !self.fields.contains_key(*id)) {
            return Err(ViewerError::UnknownField(unknown.clone()));
        }
        if self.fail_checkbox_writes && values.values().any(|v| !v.is_text()) {
            return Err(ViewerError::Write("checkbox values rejected".into()));
        }

        for (id, value) in values {
            self.fields.insert(id.clone(), value.clone());
        }
        self.writes.push(values.clone());
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ViewerError> {
        self.opened.take().map(|_| ()).ok_or(ViewerError::NotOpen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config() -> ViewerConfiguration {
        ViewerConfiguration {
            container: "viewer".into(),
            document: "/documents/form.pdf".into(),
            license_key: String::new(),
            toolbar_items: Vec::new(),
        }
    }

    fn one(name: &str, value: FieldValue) -> FieldValues {
        let mut values = FieldValues::new();
        values.insert(FieldId::new(name).unwrap(), value);
        values
    }

    #[tokio::test]
    async fn calls_before_open_are_rejected() {
        let mut viewer = MemoryViewer::with_fields(["ssn_ssn"]).unwrap();

        assert!(matches!(
            viewer.read_fields().await,
            Err(ViewerError::NotOpen)
        ));
        assert!(matches!(
            viewer.write_fields(&one("ssn_ssn", FieldValue::text("1"))).await,
            Err(ViewerError::NotOpen)
        ));
        assert!(matches!(viewer.close().await, Err(ViewerError::NotOpen)));
    }

    #[tokio::test]
    async fn write_to_unknown_field_changes_nothing() {
        let mut viewer = MemoryViewer::with_fields(["ssn_ssn"]).unwrap();
        viewer.open(&config()).await.unwrap();

        let mut batch = one("ssn_ssn", FieldValue::text("123"));
        batch.insert(FieldId::new("nope_nope").unwrap(), FieldValue::text("x"));

        let err = viewer.write_fields(&batch).await.unwrap_err();
        assert_eq!(err.to_string(), "document has no field named nope_nope");
        assert_eq!(viewer.values()["ssn_ssn"], FieldValue::text(""));
        assert!(viewer.writes().is_empty());
    }

    #[tokio::test]
    async fn writes_are_applied_and_recorded() {
        let mut viewer = MemoryViewer::with_fields(["ssn_ssn", "commPhone_commPhone"]).unwrap();
        viewer.open(&config()).await.unwrap();

        viewer.write_fields(&one("ssn_ssn", FieldValue::text("123"))).await.unwrap();
        viewer
            .write_fields(&one("commPhone_commPhone", FieldValue::checked()))
            .await
            .unwrap();

        let fields = viewer.read_fields().await.unwrap();
        assert_eq!(fields["ssn_ssn"], FieldValue::text("123"));
        assert!(fields["commPhone_commPhone"].is_checked());
        assert_eq!(viewer.writes().len(), 2);

        viewer.close().await.unwrap();
        assert!(!viewer.is_open());
    }

    #[tokio::test]
    async fn checkbox_failure_injection_only_blocks_checkboxes() {
        let mut viewer = MemoryViewer::with_fields(["ssn_ssn", "commPhone_commPhone"])
            .unwrap()
            .failing_checkbox_writes();
        viewer.open(&config()).await.unwrap();

        let text = one("ssn_ssn", FieldValue::text("1"));
        assert!(viewer.write_fields(&text).await.is_ok());
        assert!(matches!(
            viewer
                .write_fields(&one("commPhone_commPhone", FieldValue::unchecked()))
                .await,
            Err(ViewerError::Write(_))
        ));
    }

    #[tokio::test]
    async fn failing_open_reports_load_error() {
        let mut viewer = MemoryViewer::default().failing_open();
        assert!(matches!(
            viewer.open(&config()).await,
            Err(ViewerError::Load(_))
        ));
        assert!(!viewer.is_open());
    }

    #[tokio::test]
    async fn failing_reads_report_read_error() {
        let mut viewer = MemoryViewer::with_fields(["ssn_ssn"])
            .unwrap()
            .failing_reads();
        viewer.open(&config()).await.unwrap();

        assert!(matches!(
            viewer.read_fields().await,
            Err(ViewerError::Read(_))
        ));
        assert_eq!(viewer.values().len(), 1);
    }

    #[test]
    fn manifest_is_loaded_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let manifest = br#"{"firstName_firstName": "", "genderMale_gender": ["Yes"]}"#;
        file.write_all(manifest).unwrap();

        let viewer = MemoryViewer::from_manifest(file.path()).unwrap();
        assert_eq!(viewer.values().len(), 2);
        assert!(viewer.values()["genderMale_gender"].is_checked());
    }

    #[test]
    fn manifest_errors_are_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            MemoryViewer::from_manifest(&dir.path().join("absent.json")),
            Err(CheckinError::ManifestRead(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2]").unwrap();
        assert!(matches!(
            MemoryViewer::from_manifest(file.path()),
            Err(CheckinError::ManifestParse(_))
        ));
    }
}
