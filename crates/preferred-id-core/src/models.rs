// Rust guideline compliant 2026-10-12

//! Core data models for the preferred-id operation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resource type name the operation is scoped to.
pub const NAMING_SYSTEM_TYPE: &str = "NamingSystem";

/// Format classification of a unique identifier.
///
/// The set is closed: free-text input that names none of these kinds is folded
/// into [`IdentifierKind::Uri`] by the type mapper instead of being represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    /// A URI (or URL) identifier.
    Uri,
    /// An ISO object identifier.
    Oid,
    /// A UUID identifier.
    Uuid,
}

impl IdentifierKind {
    /// All identifier kinds in declaration order.
    pub const ALL: [IdentifierKind; 3] = [Self::Uri, Self::Oid, Self::Uuid];

    /// Returns the wire code for the kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            IdentifierKind::Uri => "uri",
            IdentifierKind::Oid => "oid",
            IdentifierKind::Uuid => "uuid",
        }
    }

    /// Parses a wire code strictly.
    ///
    /// # Arguments
    ///
    /// * `code` - The code to parse (`uri`, `oid`, or `uuid`)
    ///
    /// # Returns
    ///
    /// The matching kind, or `None` for any other code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One typed identifier value attached to a naming system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierEntry {
    /// Format of the identifier.
    #[serde(rename = "type")]
    pub kind: IdentifierKind,
    /// Identifier value.
    pub value: String,
    /// Whether this is the preferred identifier of its kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred: Option<bool>,
}

impl IdentifierEntry {
    /// Creates an entry without a preferred flag.
    pub fn new(kind: IdentifierKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            preferred: None,
        }
    }

    /// Returns true if the entry is flagged as preferred.
    #[must_use]
    pub fn is_preferred(&self) -> bool {
        self.preferred.unwrap_or(false)
    }
}

/// Typed view of a NamingSystem resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawNamingSystem")]
pub struct NamingSystem {
    /// Logical resource id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Computer-friendly name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Publication status (draft, active, retired, unknown).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Naming system kind (codesystem, identifier, root).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Unique identifiers of a known kind, in document order.
    pub unique_id: Vec<IdentifierEntry>,
    /// Values of unique identifiers whose type is outside the known kinds
    /// (e.g. FHIR `other`). They match a known id but are never returned.
    #[serde(skip)]
    pub untyped_values: Vec<String>,
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    #[serde(default)]
    preferred: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNamingSystem {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    unique_id: Option<Vec<RawEntry>>,
}

impl From<RawNamingSystem> for NamingSystem {
    fn from(raw: RawNamingSystem) -> Self {
        let mut unique_id = Vec::new();
        let mut untyped_values = Vec::new();
        for entry in raw.unique_id.unwrap_or_default() {
            match IdentifierKind::from_code(&entry.kind) {
                Some(kind) => unique_id.push(IdentifierEntry {
                    kind,
                    value: entry.value,
                    preferred: entry.preferred,
                }),
                None => untyped_values.push(entry.value),
            }
        }

        Self {
            id: raw.id,
            name: raw.name,
            status: raw.status,
            kind: raw.kind,
            unique_id,
            untyped_values,
        }
    }
}

impl NamingSystem {
    /// Creates a naming system with an id and identifier entries.
    ///
    /// # Arguments
    ///
    /// * `id` - Logical resource id
    /// * `unique_id` - Identifier entries in document order
    ///
    /// # Returns
    ///
    /// A new NamingSystem with the remaining fields unset.
    pub fn new(id: impl Into<String>, unique_id: Vec<IdentifierEntry>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
            status: None,
            kind: None,
            unique_id,
            untyped_values: Vec::new(),
        }
    }

    /// Returns true if any unique identifier has exactly this value,
    /// whatever its type.
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.unique_id.iter().any(|entry| entry.value == value)
            || self.untyped_values.iter().any(|untyped| untyped == value)
    }

    /// Returns true if any entry has this kind.
    #[must_use]
    pub fn has_kind(&self, kind: IdentifierKind) -> bool {
        self.unique_id.iter().any(|entry| entry.kind == kind)
    }

    /// Picks the entry to report for a kind.
    ///
    /// An entry flagged `preferred` wins; otherwise the first entry of the kind
    /// in document order.
    ///
    /// # Arguments
    ///
    /// * `kind` - The requested identifier kind
    ///
    /// # Returns
    ///
    /// The selected entry, or `None` if the resource has no entry of that kind.
    #[must_use]
    pub fn entry_for(&self, kind: IdentifierKind) -> Option<&IdentifierEntry> {
        let mut of_kind = self.unique_id.iter().filter(|entry| entry.kind == kind);
        let first = of_kind.next()?;
        if first.is_preferred() {
            return Some(first);
        }
        Some(of_kind.find(|entry| entry.is_preferred()).unwrap_or(first))
    }

    /// Converts the naming system into a storable resource record.
    ///
    /// # Returns
    ///
    /// A record with `resourceType` set to `NamingSystem`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_record(&self) -> Result<ResourceRecord> {
        let mut value = serde_json::to_value(self)?;
        if let serde_json::Value::Object(map) = &mut value {
            map.insert(
                "resourceType".to_string(),
                serde_json::Value::String(NAMING_SYSTEM_TYPE.to_string()),
            );
        }
        ResourceRecord::new(value)
    }
}

impl TryFrom<&ResourceRecord> for NamingSystem {
    type Error = Error;

    fn try_from(record: &ResourceRecord) -> Result<Self> {
        match record.resource_type() {
            Some(NAMING_SYSTEM_TYPE) => Ok(serde_json::from_value(record.as_value().clone())?),
            other => Err(Error::InvalidResource(format!(
                "Expected {} record, got {}",
                NAMING_SYSTEM_TYPE,
                other.unwrap_or("<none>")
            ))),
        }
    }
}

/// Opaque resource record as stored and returned by search providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRecord(serde_json::Value);

impl ResourceRecord {
    /// Wraps a JSON value as a record.
    ///
    /// # Arguments
    ///
    /// * `value` - A JSON object with a `resourceType` member
    ///
    /// # Returns
    ///
    /// The validated record.
    ///
    /// # Errors
    ///
    /// Returns an error if the value fails [`ResourceRecord::validate`].
    pub fn new(value: serde_json::Value) -> Result<Self> {
        let record = Self(value);
        record.validate()?;
        Ok(record)
    }

    /// Validates the record shape.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The value is not a JSON object
    /// - `resourceType` is missing or empty
    /// - `id` is present but not a non-empty string
    pub fn validate(&self) -> Result<()> {
        let object = self
            .0
            .as_object()
            .ok_or_else(|| Error::InvalidResource("Record must be a JSON object".to_string()))?;

        match object.get("resourceType").and_then(serde_json::Value::as_str) {
            Some(resource_type) if !resource_type.trim().is_empty() => {}
            _ => {
                return Err(Error::InvalidResource(
                    "Record must have a non-empty resourceType".to_string(),
                ))
            }
        }

        if let Some(id) = object.get("id") {
            match id.as_str() {
                Some(id) if !id.trim().is_empty() => {}
                _ => {
                    return Err(Error::InvalidResource(
                        "Record id must be a non-empty string".to_string(),
                    ))
                }
            }
        }

        Ok(())
    }

    /// Returns the record's `resourceType`.
    #[must_use]
    pub fn resource_type(&self) -> Option<&str> {
        self.0.get("resourceType").and_then(serde_json::Value::as_str)
    }

    /// Returns the record's logical id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(serde_json::Value::as_str)
    }

    /// Returns the underlying JSON value.
    #[must_use]
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Consumes the record and returns the JSON value.
    #[must_use]
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

/// Validated input of one `$preferred-id` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// Resource type argument; always [`NAMING_SYSTEM_TYPE`] once validated.
    pub resource_type: String,
    /// Known identifier value to look up.
    pub known_id: String,
    /// Identifier kind to return.
    pub requested_kind: IdentifierKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_keeps_unknown_kinds_for_matching_only() {
        let record = ResourceRecord::new(json!({
            "resourceType": "NamingSystem",
            "id": "ns-1",
            "uniqueId": [
                { "type": "other", "value": "local-1" },
                { "type": "oid", "value": "1.2.3" }
            ]
        }))
        .unwrap();

        let naming_system = NamingSystem::try_from(&record).unwrap();
        assert_eq!(naming_system.unique_id.len(), 1);
        assert_eq!(naming_system.unique_id[0].kind, IdentifierKind::Oid);
        assert_eq!(naming_system.untyped_values, vec!["local-1".to_string()]);
        assert!(naming_system.has_value("local-1"));
        assert!(naming_system.has_value("1.2.3"));
        assert!(!naming_system.has_value("local-2"));
    }

    #[test]
    fn test_decode_null_or_missing_unique_id_is_empty() {
        for value in [
            json!({ "resourceType": "NamingSystem", "id": "a", "uniqueId": null }),
            json!({ "resourceType": "NamingSystem", "id": "b" }),
        ] {
            let record = ResourceRecord::new(value).unwrap();
            let naming_system = NamingSystem::try_from(&record).unwrap();
            assert!(naming_system.unique_id.is_empty());
            assert!(naming_system.untyped_values.is_empty());
        }
    }

    #[test]
    fn test_decode_rejects_malformed_unique_id() {
        let record = ResourceRecord::new(json!({
            "resourceType": "NamingSystem",
            "id": "broken",
            "uniqueId": "not-a-list"
        }))
        .unwrap();
        assert!(NamingSystem::try_from(&record).is_err());
    }

    #[test]
    fn test_decode_rejects_other_resource_types() {
        let record =
            ResourceRecord::new(json!({ "resourceType": "CodeSystem", "id": "cs" })).unwrap();
        assert!(NamingSystem::try_from(&record).is_err());
    }

    #[test]
    fn test_entry_for_prefers_flagged_entry() {
        let mut preferred = IdentifierEntry::new(IdentifierKind::Uri, "http://b");
        preferred.preferred = Some(true);
        let naming_system = NamingSystem::new(
            "ns",
            vec![IdentifierEntry::new(IdentifierKind::Uri, "http://a"), preferred],
        );

        let entry = naming_system.entry_for(IdentifierKind::Uri).unwrap();
        assert_eq!(entry.value, "http://b");
    }

    #[test]
    fn test_entry_for_defaults_to_first() {
        let naming_system = NamingSystem::new(
            "ns",
            vec![
                IdentifierEntry::new(IdentifierKind::Uri, "http://a"),
                IdentifierEntry::new(IdentifierKind::Uri, "http://b"),
            ],
        );

        let entry = naming_system.entry_for(IdentifierKind::Uri).unwrap();
        assert_eq!(entry.value, "http://a");
        assert!(naming_system.entry_for(IdentifierKind::Uuid).is_none());
    }

    #[test]
    fn test_to_record_sets_resource_type() {
        let naming_system = NamingSystem::new("ns", vec![]);
        let record = naming_system.to_record().unwrap();
        assert_eq!(record.resource_type(), Some(NAMING_SYSTEM_TYPE));
        assert_eq!(record.id(), Some("ns"));
    }

    #[test]
    fn test_record_validation() {
        assert!(ResourceRecord::new(json!("text")).is_err());
        assert!(ResourceRecord::new(json!({ "id": "x" })).is_err());
        assert!(ResourceRecord::new(json!({ "resourceType": "" })).is_err());
        assert!(ResourceRecord::new(json!({ "resourceType": "Patient", "id": 5 })).is_err());
        assert!(ResourceRecord::new(json!({ "resourceType": "Patient" })).is_ok());
    }
}
