//! Constants used throughout the check-in core crate.
//!
//! Default locations, SDK settings and the conventions used by the patient data file are kept
//! here so the resolver, the configuration and the pages agree on them.

/// Default location of the static patient record, relative to the working directory.
pub const DEFAULT_PATIENT_DATA_FILE: &str = "data/patient-data.json";

/// Default directory holding the intake documents served under `/documents/`.
pub const DEFAULT_DOCUMENTS_DIR: &str = "documents";

/// URL prefix the viewer uses to fetch intake documents.
pub const DOCUMENTS_URL_PREFIX: &str = "/documents";

/// Web SDK version used when none is configured.
pub const DEFAULT_SDK_VERSION: &str = "1.7.0";

/// Host serving the viewer SDK script.
pub const SDK_CDN_HOST: &str = "cdn.cloud.pspdfkit.com";

/// Toolbar items the kiosk exposes: pagination and zoom only.
pub const DEFAULT_TOOLBAR_ITEMS: &[&str] = &[
    "previous-page",
    "next-page",
    "pager",
    "page-jump",
    "zoom-out",
    "zoom-in",
    "zoom-mode",
];

/// Sample document opened by the standalone viewer page.
pub const SAMPLE_DOCUMENT: &str = "SampleSignedDocumentGlobalTrust.pdf";

/// Separator between the name and detail of a history entry (`"Lisinopril - Blood pressure"`).
pub const HISTORY_ENTRY_SEPARATOR: &str = " - ";

/// Prefix on the detail of a condition entry (`"Hypertension - diagnosed 2019"`).
pub const DIAGNOSED_PREFIX: &str = "diagnosed ";

/// Numbered medical-history rows a document may expose per list.
pub const HISTORY_ROWS: usize = 3;

/// Minutes between arriving at the kiosk and the displayed appointment time.
pub const APPOINTMENT_LEAD_MINUTES: i64 = 20;

/// Seconds the portal budgets for each form that is not yet complete.
pub const SECONDS_PER_REMAINING_FORM: usize = 45;
