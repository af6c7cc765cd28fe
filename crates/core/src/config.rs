//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads environment variables; binaries read
//! them once, run the values through the parsers below and build a `CoreConfig`.

use crate::constants::{
    DEFAULT_SDK_VERSION, DEFAULT_TOOLBAR_ITEMS, DOCUMENTS_URL_PREFIX, SDK_CDN_HOST,
};
use crate::{CheckinError, CheckinResult};
use std::path::{Path, PathBuf};

/// Settings handed to the external viewer SDK.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SdkSettings {
    license_key: String,
    version: String,
    toolbar_items: Vec<String>,
}

impl SdkSettings {
    pub fn new(license_key: String, version: String, toolbar_items: Vec<String>) -> Self {
        Self {
            license_key,
            version,
            toolbar_items,
        }
    }

    pub fn license_key(&self) -> &str {
        &self.license_key
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn toolbar_items(&self) -> &[String] {
        &self.toolbar_items
    }

    /// Location of the SDK script for the configured version.
    pub fn script_url(&self) -> String {
        format!(
            "https://{SDK_CDN_HOST}/pspdfkit-web@{}/nutrient-viewer.js",
            self.version
        )
    }
}

impl Default for SdkSettings {
    fn default() -> Self {
        Self {
            license_key: String::new(),
            version: DEFAULT_SDK_VERSION.to_string(),
            toolbar_items: default_toolbar_items(),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    patient_data_file: PathBuf,
    documents_dir: PathBuf,
    sdk: SdkSettings,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CheckinError::InvalidInput` if the patient data path is empty or the SDK version
    /// is blank.
    pub fn new(
        patient_data_file: PathBuf,
        documents_dir: PathBuf,
        sdk: SdkSettings,
    ) -> CheckinResult<Self> {
        if patient_data_file.as_os_str().is_empty() {
            return Err(CheckinError::InvalidInput(
                "patient data file path cannot be empty".into(),
            ));
        }
        if sdk.version.trim().is_empty() {
            return Err(CheckinError::InvalidInput(
                "web SDK version cannot be empty".into(),
            ));
        }

        Ok(Self {
            patient_data_file,
            documents_dir,
            sdk,
        })
    }

    pub fn patient_data_file(&self) -> &Path {
        &self.patient_data_file
    }

    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }

    pub fn sdk(&self) -> &SdkSettings {
        &self.sdk
    }

    /// URL the viewer loads a named document from.
    pub fn document_url(&self, file_name: &str) -> String {
        format!("{DOCUMENTS_URL_PREFIX}/{file_name}")
    }
}

fn default_toolbar_items() -> Vec<String> {
    DEFAULT_TOOLBAR_ITEMS.iter().map(|s| s.to_string()).collect()
}

/// Parse the web SDK version from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default version.
pub fn sdk_version_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_SDK_VERSION.to_string())
}

/// Parse a comma-separated toolbar item list from an optional string value.
///
/// If `value` is `None` or contains no items, returns the default pagination/zoom toolbar.
///
/// # Errors
///
/// Returns `CheckinError::InvalidInput` if an item contains characters other than ASCII
/// alphanumerics and `-`, since items are matched against the SDK's toolbar type names.
pub fn toolbar_items_from_env_value(value: Option<String>) -> CheckinResult<Vec<String>> {
    let items: Vec<String> = value
        .unwrap_or_default()
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();

    if items.is_empty() {
        return Ok(default_toolbar_items());
    }

    if let Some(bad) = items.iter().find(|item| !is_toolbar_item(item)) {
        return Err(CheckinError::InvalidInput(format!(
            "toolbar item '{bad}' contains invalid characters (only alphanumeric and '-' allowed)"
        )));
    }

    Ok(items)
}

fn is_toolbar_item(item: &str) -> bool {
    item.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
