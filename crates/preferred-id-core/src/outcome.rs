// Rust guideline compliant 2026-10-12

//! Resolution outcomes and the payloads they are answered with.
//!
//! Every request ends in exactly one [`ResolutionOutcome`]. Each outcome maps
//! to a [`StatusCode`] and a [`Payload`]: a `Parameters` resource with a single
//! parameter on success, or an `OperationOutcome` with a single informational
//! issue otherwise.

use crate::{IdentifierEntry, IdentifierKind, NamingSystem, Result, NAMING_SYSTEM_TYPE};
use serde::{Deserialize, Serialize};

/// Coding system of every diagnostic issue.
pub const DIAGNOSTIC_SYSTEM: &str = "http://hl7.org/fhir/dotnet-api-operation-outcome";

/// Code of every diagnostic issue.
pub const DIAGNOSTIC_CODE: &str = "5000";

/// HTTP-like status of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 200
    Ok,
    /// 400
    BadRequest,
    /// 404
    NotFound,
    /// 500
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric status code.
    #[must_use]
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns true for 2xx codes.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }
}

/// Severity of a diagnostic issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// The operation failed fatally.
    Fatal,
    /// The operation failed.
    Error,
    /// Potential problem, operation succeeded.
    Warning,
    /// Purely informational.
    Information,
}

/// A code from a coding system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coding {
    /// Coding system URI.
    pub system: String,
    /// Code within the system.
    pub code: String,
}

/// Coded concept with a human-readable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeableConcept {
    /// Codes for the concept.
    #[serde(default)]
    pub coding: Vec<Coding>,
    /// Human-readable text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A single diagnostic issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue severity.
    pub severity: IssueSeverity,
    /// Issue type code.
    pub code: String,
    /// Coded details and message.
    pub details: CodeableConcept,
}

impl Issue {
    /// Creates an informational issue with the fixed diagnostic coding.
    pub fn informational(message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Information,
            code: "informational".to_string(),
            details: CodeableConcept {
                coding: vec![Coding {
                    system: DIAGNOSTIC_SYSTEM.to_string(),
                    code: DIAGNOSTIC_CODE.to_string(),
                }],
                text: Some(message.into()),
            },
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.details.text.as_deref()
    }
}

/// Diagnostic payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationOutcome {
    /// Issues; always exactly one when built by this crate.
    pub issue: Vec<Issue>,
}

/// A named output parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter value.
    #[serde(rename = "valueString")]
    pub value_string: String,
}

/// Success payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    /// Output parameters; always exactly one when built by this crate.
    pub parameter: Vec<Parameter>,
}

/// Body of a `$preferred-id` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resourceType")]
pub enum Payload {
    /// Success payload.
    Parameters(Parameters),
    /// Diagnostic payload.
    OperationOutcome(OperationOutcome),
}

impl Payload {
    /// Returns the payload's resource type name.
    #[must_use]
    pub fn resource_type(&self) -> &'static str {
        match self {
            Payload::Parameters(_) => "Parameters",
            Payload::OperationOutcome(_) => "OperationOutcome",
        }
    }

    /// Returns the diagnostic issues, empty for success payloads.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        match self {
            Payload::Parameters(_) => &[],
            Payload::OperationOutcome(outcome) => &outcome.issue,
        }
    }

    /// Serializes the payload to JSON.
    ///
    /// # Arguments
    ///
    /// * `pretty` - Whether to indent the output
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Why a request was rejected before any search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadRequestReason {
    /// The `id` argument was absent or empty.
    MissingIdentifier,
    /// The resource type argument named another type; holds the offending name.
    WrongResourceType(String),
}

impl BadRequestReason {
    /// Returns the caller-facing message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            BadRequestReason::MissingIdentifier => {
                "No id provided to the $preferred-id operation.".to_string()
            }
            BadRequestReason::WrongResourceType(resource) => format!(
                "Operation called with wrong resource. Expected [{}] and got [{}] instead.",
                NAMING_SYSTEM_TYPE, resource
            ),
        }
    }
}

/// Outcome of one `$preferred-id` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// The identifier entry of the requested kind.
    Found(IdentifierEntry),
    /// No naming system holds both the known id and the requested kind.
    NotFound {
        /// Known identifier value from the request.
        known_id: String,
        /// Requested identifier kind.
        kind: IdentifierKind,
    },
    /// The request was rejected during validation.
    BadRequest(BadRequestReason),
    /// Several naming systems match, breaking the uniqueness of (known id, kind).
    Ambiguous {
        /// Known identifier value from the request.
        known_id: String,
        /// Requested identifier kind.
        kind: IdentifierKind,
        /// Ids of the matching resources, in search order.
        matches: Vec<String>,
    },
}

impl ResolutionOutcome {
    /// Chooses the outcome for the survivors of the resource filter.
    ///
    /// # Arguments
    ///
    /// * `survivors` - Naming systems that passed both filter stages
    /// * `known_id` - Known identifier value from the request
    /// * `kind` - Requested identifier kind
    ///
    /// # Returns
    ///
    /// `NotFound` for no survivors, `Found` for exactly one, `Ambiguous` otherwise.
    #[must_use]
    pub fn from_survivors(survivors: &[NamingSystem], known_id: &str, kind: IdentifierKind) -> Self {
        match survivors {
            [] => ResolutionOutcome::NotFound {
                known_id: known_id.to_string(),
                kind,
            },
            [naming_system] => match naming_system.entry_for(kind) {
                Some(entry) => ResolutionOutcome::Found(entry.clone()),
                None => ResolutionOutcome::NotFound {
                    known_id: known_id.to_string(),
                    kind,
                },
            },
            many => ResolutionOutcome::Ambiguous {
                known_id: known_id.to_string(),
                kind,
                matches: many
                    .iter()
                    .map(|ns| ns.id.clone().unwrap_or_else(|| "<no id>".to_string()))
                    .collect(),
            },
        }
    }

    /// Returns the status code for the outcome.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ResolutionOutcome::Found(_) => StatusCode::Ok,
            ResolutionOutcome::NotFound { .. } => StatusCode::NotFound,
            ResolutionOutcome::BadRequest(_) => StatusCode::BadRequest,
            ResolutionOutcome::Ambiguous { .. } => StatusCode::InternalServerError,
        }
    }

    /// Returns the diagnostic message, `None` on success.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            ResolutionOutcome::Found(_) => None,
            ResolutionOutcome::BadRequest(reason) => Some(reason.message()),
            ResolutionOutcome::NotFound { known_id, kind } => Some(format!(
                "$preferred-id operation found no {} resources with Identifier=[{}] and TargetType=[{}]",
                NAMING_SYSTEM_TYPE, known_id, kind
            )),
            ResolutionOutcome::Ambiguous {
                known_id,
                kind,
                matches,
            } => Some(format!(
                "$preferred-id operation found {} {} resources with Identifier=[{}] and TargetType=[{}]: [{}]",
                matches.len(),
                NAMING_SYSTEM_TYPE,
                known_id,
                kind,
                matches.join(", ")
            )),
        }
    }

    /// Builds the response payload for the outcome.
    #[must_use]
    pub fn payload(&self) -> Payload {
        match self {
            ResolutionOutcome::Found(entry) => Payload::Parameters(Parameters {
                parameter: vec![Parameter {
                    name: entry.kind.code().to_string(),
                    value_string: entry.value.clone(),
                }],
            }),
            other => Payload::OperationOutcome(OperationOutcome {
                issue: vec![Issue::informational(other.message().unwrap_or_default())],
            }),
        }
    }
}
