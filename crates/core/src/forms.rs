//! The intake forms a patient completes at the kiosk, in order.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntakeForm {
    pub name: &'static str,
    /// Document file name under the documents directory.
    pub file: &'static str,
    /// Rough time to complete, shown next to forms not yet done.
    pub duration: &'static str,
}

pub const INTAKE_FORMS: &[IntakeForm] = &[
    IntakeForm {
        name: "Patient Demographics",
        file: "Patient Demographics Form.pdf",
        duration: "1 min",
    },
    IntakeForm {
        name: "Emergency Contact",
        file: "Emergency Contact Information.pdf",
        duration: "30 sec",
    },
    IntakeForm {
        name: "Insurance Verification",
        file: "Insurance Verification Form.pdf",
        duration: "45 sec",
    },
    IntakeForm {
        name: "Medical History",
        file: "Medical History Questionnaire.pdf",
        duration: "1 min",
    },
    IntakeForm {
        name: "HIPAA Authorization",
        file: "HIPAA Authorization Form.pdf",
        duration: "30 sec",
    },
    IntakeForm {
        name: "Financial Responsibility",
        file: "Financial Responsibility Agreement.pdf",
        duration: "45 sec",
    },
];

pub fn intake_form(index: usize) -> Option<&'static IntakeForm> {
    INTAKE_FORMS.get(index)
}
