//! Ordering of viewer writes.
//!
//! Resolved values cannot be written in one call: checkbox members are independent booleans in
//! the viewer, so a previously checked member would survive a write that only checks the new one.
//! A [`WritePlan`] splits the resolution into batches that are issued strictly in order:
//!
//! 1. every field that is not a checkbox-group member,
//! 2. for each group present in the document, a batch clearing every present member,
//! 3. followed by a batch checking the selected member, when the record selects one.
//!
//! The plan also carries the text-only fallback used when any batch fails.

use crate::resolver::{group_for, CHECKBOX_GROUPS};
use checkin_types::{FieldId, FieldValue, FieldValues};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BatchKind {
    /// Text fields and standalone checkboxes.
    Regular,
    /// Clears every present member of one group.
    Clear,
    /// Checks the selected member of one group.
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteBatch {
    pub kind: BatchKind,
    /// Group key for `Clear`/`Select` batches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<&'static str>,
    pub values: FieldValues,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WritePlan {
    batches: Vec<WriteBatch>,
    fallback: FieldValues,
}

impl WritePlan {
    /// Build the write sequence for a resolution.
    ///
    /// `available` is the document's full field list; group clears cover every member the document
    /// reports, not only those that were resolved.
    pub fn build(resolved: &FieldValues, available: &[FieldId]) -> Self {
        let mut batches = Vec::new();

        let regular: FieldValues = resolved
            .iter()
            .filter(|(id, _)| group_for(id.as_str()).is_none())
            .map(|(id, v)| (id.clone(), v.clone()))
            .collect();
        if !regular.is_empty() {
            batches.push(WriteBatch {
                kind: BatchKind::Regular,
                group: None,
                values: regular,
            });
        }

        // Only groups with a resolved member are touched.
        for group in CHECKBOX_GROUPS {
            if !resolved.keys().any(|id| group.contains(id.as_str())) {
                continue;
            }

            let clear: FieldValues = available
                .iter()
                .filter(|id| group.contains(id.as_str()))
                .map(|id| (id.clone(), FieldValue::unchecked()))
                .collect();
            batches.push(WriteBatch {
                kind: BatchKind::Clear,
                group: Some(group.key),
                values: clear,
            });

            if let Some((id, value)) = resolved
                .iter()
                .find(|(id, v)| group.contains(id.as_str()) && v.is_checked())
            {
                let mut select = FieldValues::new();
                select.insert(id.clone(), value.clone());
                batches.push(WriteBatch {
                    kind: BatchKind::Select,
                    group: Some(group.key),
                    values: select,
                });
            }
        }

        let fallback = resolved
            .iter()
            .filter(|(_, v)| v.is_text())
            .map(|(id, v)| (id.clone(), v.clone()))
            .collect();

        Self { batches, fallback }
    }

    pub fn batches(&self) -> &[WriteBatch] {
        &self.batches
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Plain-text fields only, for when the checkbox writes cannot be made.
    pub fn text_only_fallback(&self) -> &FieldValues {
        &self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> FieldId {
        FieldId::new(name).unwrap()
    }

    fn values(entries: &[(&str, FieldValue)]) -> FieldValues {
        entries.iter().map(|(k, v)| (id(k), v.clone())).collect()
    }

    #[test]
    fn regular_batch_comes_first_then_clear_then_select() {
        let available = vec![
            id("firstName_firstName"),
            id("genderFemale_gender"),
            id("genderMale_gender"),
            id("commPhone_commPhone"),
        ];
        let resolved = values(&[
            ("firstName_firstName", FieldValue::text("Jane")),
            ("genderFemale_gender", FieldValue::checked()),
            ("genderMale_gender", FieldValue::unchecked()),
            ("commPhone_commPhone", FieldValue::checked()),
        ]);

        let plan = WritePlan::build(&resolved, &available);
        let kinds: Vec<BatchKind> = plan.batches().iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![BatchKind::Regular, BatchKind::Clear, BatchKind::Select]
        );

        let regular = &plan.batches()[0].values;
        assert_eq!(regular.len(), 2);
        assert!(regular.contains_key("commPhone_commPhone"));

        let clear = &plan.batches()[1];
        assert_eq!(clear.group, Some("gender"));
        assert_eq!(
            clear.values,
            values(&[
                ("genderFemale_gender", FieldValue::unchecked()),
                ("genderMale_gender", FieldValue::unchecked()),
            ])
        );

        assert_eq!(
            plan.batches()[2].values,
            values(&[("genderFemale_gender", FieldValue::checked())])
        );
    }

    #[test]
    fn groups_follow_declared_order() {
        let available = vec![
            id("secondarySelf_secondaryRelationship"),
            id("primarySelf_primaryRelationship"),
            id("maritalSingle_maritalStatus"),
        ];
        let resolved = values(&[
            ("secondarySelf_secondaryRelationship", FieldValue::checked()),
            ("primarySelf_primaryRelationship", FieldValue::unchecked()),
            ("maritalSingle_maritalStatus", FieldValue::checked()),
        ]);

        let plan = WritePlan::build(&resolved, &available);
        let order: Vec<(BatchKind, Option<&str>)> =
            plan.batches().iter().map(|b| (b.kind, b.group)).collect();
        assert_eq!(
            order,
            vec![
                (BatchKind::Clear, Some("maritalStatus")),
                (BatchKind::Select, Some("maritalStatus")),
                (BatchKind::Clear, Some("primaryRelationship")),
                (BatchKind::Clear, Some("secondaryRelationship")),
                (BatchKind::Select, Some("secondaryRelationship")),
            ]
        );
    }

    #[test]
    fn clear_without_select_when_nothing_matches() {
        let available = vec![id("genderMale_gender"), id("genderOther_gender")];
        let resolved = values(&[
            ("genderMale_gender", FieldValue::unchecked()),
            ("genderOther_gender", FieldValue::unchecked()),
        ]);

        let plan = WritePlan::build(&resolved, &available);
        assert_eq!(plan.batches().len(), 1);
        assert_eq!(plan.batches()[0].kind, BatchKind::Clear);
        assert_eq!(plan.batches()[0].values.len(), 2);
    }

    #[test]
    fn fallback_keeps_text_only() {
        let available = vec![
            id("ssn_ssn"),
            id("authPayment_authPayment"),
            id("genderMale_gender"),
        ];
        let resolved = values(&[
            ("ssn_ssn", FieldValue::text("123-45-6789")),
            ("authPayment_authPayment", FieldValue::checked()),
            ("genderMale_gender", FieldValue::checked()),
        ]);

        let plan = WritePlan::build(&resolved, &available);
        assert_eq!(
            plan.text_only_fallback(),
            &values(&[("ssn_ssn", FieldValue::text("123-45-6789"))])
        );
    }

    #[test]
    fn empty_resolution_gives_empty_plan() {
        let plan = WritePlan::build(&FieldValues::new(), &[id("genderMale_gender")]);
        assert!(plan.is_empty());
        assert!(plan.text_only_fallback().is_empty());
    }

    #[test]
    fn plan_serialises_for_the_page_script() {
        let available = vec![id("genderFemale_gender")];
        let resolved = values(&[("genderFemale_gender", FieldValue::checked())]);

        let json = serde_json::to_value(WritePlan::build(&resolved, &available)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "batches": [
                    {
                        "kind": "clear",
                        "group": "gender",
                        "values": { "genderFemale_gender": [] }
                    },
                    {
                        "kind": "select",
                        "group": "gender",
                        "values": { "genderFemale_gender": ["Yes"] }
                    }
                ],
                "fallback": {}
            })
        );
    }
}
