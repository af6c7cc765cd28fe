//! Field identifier and field value types shared across the check-in crates.
//!
//! The external document viewer reports every interactive field in a loaded document under a
//! string key and accepts writes keyed the same way. These types give those keys and values a
//! name in Rust so the resolver, the write plan and the HTTP layer agree on one shape.

use std::collections::BTreeMap;

/// Marker value the viewer expects in a checkbox array to mean "checked".
pub const CHECKED_MARKER: &str = "Yes";

/// Errors that can occur when creating a field identifier.
#[derive(Debug, thiserror::Error)]
pub enum FieldIdError {
    /// The identifier was empty or contained only whitespace
    #[error("field identifier cannot be empty")]
    Empty,
}

/// A field identifier reported by the document viewer.
///
/// Identifiers are compared exactly as reported; unlike free text they are not trimmed, because
/// the viewer will only accept a write under the byte-for-byte key it handed out.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId(String);

impl FieldId {
    /// Creates a new `FieldId` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `FieldIdError::Empty` if the input is empty or whitespace only.
    pub fn new(input: impl Into<String>) -> Result<Self, FieldIdError> {
        let input = input.into();
        if input.trim().is_empty() {
            return Err(FieldIdError::Empty);
        }
        Ok(Self(input))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier ends with `_<concept>`.
    ///
    /// Some documents prefix their fields with opaque generated segments
    /// (`id_3fa1_medicationName1`), so numbered entries are located by suffix.
    pub fn has_suffix(&self, concept: &str) -> bool {
        self.0
            .strip_suffix(concept)
            .is_some_and(|head| head.ends_with('_'))
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for FieldId {
    type Err = FieldIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for FieldId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for FieldId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FieldId::new(s).map_err(serde::de::Error::custom)
    }
}

/// A value held by, or written to, one viewer field.
///
/// On the wire a text field is a JSON string and a checkbox is a JSON array: `["Yes"]` checks it
/// and `[]` clears it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Checkbox(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// A checkbox value carrying the checked marker.
    pub fn checked() -> Self {
        Self::Checkbox(vec![CHECKED_MARKER.to_string()])
    }

    /// A checkbox value with no marker.
    pub fn unchecked() -> Self {
        Self::Checkbox(Vec::new())
    }

    /// `checked()` when `on` holds, `unchecked()` otherwise.
    pub fn checkbox(on: bool) -> Self {
        if on {
            Self::checked()
        } else {
            Self::unchecked()
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// True for a checkbox value holding at least one marker.
    pub fn is_checked(&self) -> bool {
        matches!(self, Self::Checkbox(markers) if !markers.is_empty())
    }
}

/// Field values keyed by identifier, in a deterministic order.
pub type FieldValues = BTreeMap<FieldId, FieldValue>;
