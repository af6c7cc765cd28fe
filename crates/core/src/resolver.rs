//! Field-value resolution.
//!
//! Given the field identifiers the viewer reports for the loaded document and the static patient
//! record, work out which fields can be pre-filled and with what. Three kinds of field exist:
//!
//! - **Fixed fields** named `key_key` (`firstName_firstName`) that map to one record value.
//! - **Checkbox groups** whose members are named `member_group` (`genderFemale_gender`). The
//!   viewer treats each member as an independent boolean, so every present member is resolved:
//!   the one matching the record is checked and the rest are cleared.
//! - **Medical-history rows** (`medicationName1`, `allergen2`, ...) which some documents emit
//!   behind generated prefixes. These are found by suffix once per document through
//!   [`HistoryLookup`].
//!
//! Fields the document does not report are never resolved, and reported fields this module does
//! not know are left alone.

use crate::constants::HISTORY_ROWS;
use crate::patient::{condition_year, entry_detail, entry_name, PatientRecord};
use checkin_types::{FieldId, FieldValue, FieldValues};
use chrono::NaiveDate;

/// One member of a checkbox group and the record value that selects it.
#[derive(Debug, Clone, Copy)]
pub struct GroupMember {
    pub field: &'static str,
    pub value: &'static str,
}

/// A set of checkbox fields standing in for a single choice.
#[derive(Clone, Copy)]
pub struct CheckboxGroup {
    pub key: &'static str,
    pub members: &'static [GroupMember],
    choice: fn(&PatientRecord) -> &str,
}

impl CheckboxGroup {
    pub fn contains(&self, field: &str) -> bool {
        self.members.iter().any(|m| m.field == field)
    }

    /// The member the record selects, if its value names one.
    pub fn selected(&self, record: &PatientRecord) -> Option<&'static str> {
        let choice = (self.choice)(record);
        self.members
            .iter()
            .find(|m| m.value == choice)
            .map(|m| m.field)
    }
}

fn gender_choice(record: &PatientRecord) -> &str {
    &record.patient.gender
}

fn marital_status_choice(record: &PatientRecord) -> &str {
    &record.patient.marital_status
}

fn primary_relationship_choice(record: &PatientRecord) -> &str {
    &record.insurance.primary.relationship
}

fn secondary_relationship_choice(record: &PatientRecord) -> &str {
    &record.insurance.secondary.relationship
}

pub const GENDER: CheckboxGroup = CheckboxGroup {
    key: "gender",
    members: &[
        GroupMember {
            field: "genderFemale_gender",
            value: "Female",
        },
        GroupMember {
            field: "genderMale_gender",
            value: "Male",
        },
        GroupMember {
            field: "genderOther_gender",
            value: "Other",
        },
        GroupMember {
            field: "genderPreferNot_gender",
            value: "Prefer not to say",
        },
    ],
    choice: gender_choice,
};

pub const MARITAL_STATUS: CheckboxGroup = CheckboxGroup {
    key: "maritalStatus",
    members: &[
        GroupMember {
            field: "maritalSingle_maritalStatus",
            value: "Single",
        },
        GroupMember {
            field: "maritalMarried_maritalStatus",
            value: "Married",
        },
        GroupMember {
            field: "maritalDivorced_maritalStatus",
            value: "Divorced",
        },
        GroupMember {
            field: "maritalWidowed_maritalStatus",
            value: "Widowed",
        },
    ],
    choice: marital_status_choice,
};

pub const PRIMARY_RELATIONSHIP: CheckboxGroup = CheckboxGroup {
    key: "primaryRelationship",
    members: &[
        GroupMember {
            field: "primarySelf_primaryRelationship",
            value: "Self",
        },
        GroupMember {
            field: "primarySpouse_primaryRelationship",
            value: "Spouse",
        },
    ],
    choice: primary_relationship_choice,
};

pub const SECONDARY_RELATIONSHIP: CheckboxGroup = CheckboxGroup {
    key: "secondaryRelationship",
    members: &[
        GroupMember {
            field: "secondarySelf_secondaryRelationship",
            value: "Self",
        },
        GroupMember {
            field: "secondarySpouse_secondaryRelationship",
            value: "Spouse",
        },
    ],
    choice: secondary_relationship_choice,
};

/// Every mutually exclusive group, in the order their writes are issued.
pub const CHECKBOX_GROUPS: &[CheckboxGroup] = &[
    GENDER,
    MARITAL_STATUS,
    PRIMARY_RELATIONSHIP,
    SECONDARY_RELATIONSHIP,
];

/// The group a field belongs to, if any.
pub fn group_for(field: &str) -> Option<&'static CheckboxGroup> {
    CHECKBOX_GROUPS.iter().find(|g| g.contains(field))
}

/// Authorisations and agreements the kiosk pre-checks on every document that has them.
const PRECHECKED: &[&str] = &[
    "authTreatment_authTreatment",
    "authPayment_authPayment",
    "authOperations_authOperations",
    "disclosureInsurance_disclosureInsurance",
    "disclosureProviders_disclosureProviders",
    "disclosureFamily_disclosureFamily",
    "expiresEndTreatment_expiresEndTreatment",
    "commPhone_commPhone",
    "commEmail_commEmail",
    "voicemailOk_voicemailOk",
    "agreeInsurance_agreeInsurance",
    "agreePayment_agreePayment",
    "agreeAppointment_agreeAppointment",
    "paymentCash_paymentCash",
    "paymentCheck_paymentCheck",
    "paymentCredit_paymentCredit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryList {
    Medications,
    Allergies,
    Conditions,
    FamilyHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryPart {
    Name,
    Detail,
    Year,
    Joined,
}

/// A logical medical-history cell, e.g. "the purpose of medication 2".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConcept {
    suffix: String,
    list: HistoryList,
    row: usize,
    part: HistoryPart,
}

impl HistoryConcept {
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    fn value(&self, record: &PatientRecord) -> String {
        let history = &record.medical_history;
        let list = match self.list {
            HistoryList::Medications => &history.medications,
            HistoryList::Allergies => &history.allergies,
            HistoryList::Conditions => &history.conditions,
            HistoryList::FamilyHistory => return history.family_history.join("\n"),
        };
        let Some(entry) = list.get(self.row) else {
            return String::new();
        };
        match self.part {
            HistoryPart::Name => entry_name(entry).to_string(),
            HistoryPart::Detail => entry_detail(entry).to_string(),
            HistoryPart::Year => condition_year(entry),
            HistoryPart::Joined => entry.clone(),
        }
    }
}

/// All medical-history concepts a document may expose.
pub fn history_concepts() -> Vec<HistoryConcept> {
    let numbered = [
        (HistoryList::Medications, "medicationName", HistoryPart::Name),
        (HistoryList::Medications, "medicationPurpose", HistoryPart::Detail),
        (HistoryList::Allergies, "allergen", HistoryPart::Name),
        (HistoryList::Allergies, "reaction", HistoryPart::Detail),
        (HistoryList::Conditions, "condition", HistoryPart::Name),
        (HistoryList::Conditions, "conditionYear", HistoryPart::Year),
    ];

    let mut concepts: Vec<HistoryConcept> = numbered
        .iter()
        .flat_map(|&(list, stem, part)| {
            (0..HISTORY_ROWS).map(move |row| HistoryConcept {
                suffix: format!("{stem}{}", row + 1),
                list,
                row,
                part,
            })
        })
        .collect();

    concepts.push(HistoryConcept {
        suffix: "familyHistory".into(),
        list: HistoryList::FamilyHistory,
        row: 0,
        part: HistoryPart::Joined,
    });

    concepts
}

/// Medical-history concepts bound to the fields of one document.
///
/// Built once per document: for each concept the first reported field ending in
/// `_<concept>` is bound to it. Concepts with no such field are absent.
#[derive(Debug, Clone, Default)]
pub struct HistoryLookup {
    bound: Vec<(FieldId, HistoryConcept)>,
}

impl HistoryLookup {
    pub fn resolve(available: &[FieldId]) -> Self {
        let bound = history_concepts()
            .into_iter()
            .filter_map(|concept| {
                available
                    .iter()
                    .find(|field| field.has_suffix(&concept.suffix))
                    .map(|field| (field.clone(), concept))
            })
            .collect();
        Self { bound }
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// The concept bound to `field`, if any.
    pub fn concept_for(&self, field: &FieldId) -> Option<&HistoryConcept> {
        self.bound
            .iter()
            .find(|(bound, _)| bound == field)
            .map(|(_, concept)| concept)
    }
}

fn us_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Text value for a fixed `key_key` field, if the field is one the kiosk knows.
fn text_candidate(field: &str, record: &PatientRecord, today: NaiveDate) -> Option<String> {
    let p = &record.patient;
    let ec = &record.emergency_contact;
    let primary = &record.insurance.primary;
    let secondary = &record.insurance.secondary;

    let value = match field {
        "firstName_firstName" => p.first_name.clone(),
        "lastName_lastName" => p.last_name.clone(),
        "middleName_middleName" => p.middle_name.clone(),
        "dateOfBirth_dateOfBirth" => p.date_of_birth.clone(),
        "ssn_ssn" => p.ssn.clone(),
        "phone_phone" => p.phone.clone(),
        "email_email" => p.email.clone(),
        "address_address" => p.address.street.clone(),
        "city_city" => p.address.city.clone(),
        "state_state" => p.address.state.clone(),
        "zipCode_zipCode" => p.address.zip_code.clone(),
        "employer_employer" => p.employer.clone(),
        "occupation_occupation" => p.occupation.clone(),

        "signatureDate_signatureDate" | "staffDate_staffDate" => us_date(today),

        "emergencyName_emergencyName" => ec.name.clone(),
        "relationship_relationship" => ec.relationship.clone(),
        "emergencyPhone_emergencyPhone" => ec.phone.clone(),
        "emergencyEmail_emergencyEmail" => p.email.clone(),
        "emergencyAddress_emergencyAddress" => ec.address.street.clone(),
        "emergencyCity_emergencyCity" => ec.address.city.clone(),
        "emergencyState_emergencyState" => ec.address.state.clone(),
        "emergencyZip_emergencyZip" => ec.address.zip_code.clone(),
        "emergencyPhone2_emergencyPhone2"
        | "emergency2Name_emergency2Name"
        | "relationship2_relationship2"
        | "emergency2Phone_emergency2Phone" => String::new(),

        "decisionMaker_decisionMaker" => ec.name.clone(),
        "decisionMakerRelation_decisionMakerRelation" => ec.relationship.clone(),
        "decisionMakerPhone_decisionMakerPhone" => ec.phone.clone(),

        "primaryInsurance_primaryInsurance" => primary.company.clone(),
        "primaryPolicy_primaryPolicy" => primary.policy_number.clone(),
        "primaryGroup_primaryGroup" => primary.group_number.clone(),
        "primarySubscriber_primarySubscriber" => primary.subscriber_name.clone(),
        "primarySubscriberDOB_primarySubscriberDOB" => primary.subscriber_dob.clone(),

        "secondaryInsurance_secondaryInsurance" => secondary.company.clone(),
        "secondaryPolicy_secondaryPolicy" => secondary.policy_number.clone(),
        "secondaryGroup_secondaryGroup" => secondary.group_number.clone(),
        "secondarySubscriber_secondarySubscriber" => secondary.subscriber_name.clone(),
        "secondarySubscriberDOB_secondarySubscriberDOB" => secondary.subscriber_dob.clone(),

        "patientName_patientName" | "responsibleParty_responsibleParty" => record.full_name(),
        "patientDOB_patientDOB" => p.date_of_birth.clone(),
        "authorizedPersons_authorizedPersons" => format!("{} - {}", ec.name, ec.relationship),

        _ => return None,
    };
    Some(value)
}

/// Resolve pre-fill values for the fields a document reports.
///
/// `available` is the field list in the order the viewer reported it; the order only matters when
/// several fields share a medical-history suffix, in which case the first one is filled.
/// `today` stamps the signature and staff date fields.
///
/// Every key in the result is one of `available`. Calling this twice with the same inputs gives
/// the same result.
pub fn resolve_field_values(
    available: &[FieldId],
    record: &PatientRecord,
    today: NaiveDate,
) -> FieldValues {
    let history = HistoryLookup::resolve(available);
    let mut values = FieldValues::new();

    for field in available {
        let value = if let Some(concept) = history.concept_for(field) {
            FieldValue::Text(concept.value(record))
        } else if let Some(group) = group_for(field.as_str()) {
            FieldValue::checkbox(group.selected(record) == Some(field.as_str()))
        } else if PRECHECKED.contains(&field.as_str()) {
            FieldValue::checked()
        } else if let Some(text) = text_candidate(field.as_str(), record, today) {
            FieldValue::Text(text)
        } else {
            continue;
        };
        values.insert(field.clone(), value);
    }

    values
}
