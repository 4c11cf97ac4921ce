// Rust guideline compliant 2026-10-12

//! Mapping of the free-text `type` argument to an identifier kind.

use crate::IdentifierKind;

/// Maps the `type` argument of a request to the identifier kind to return.
///
/// Matching is exact and case-sensitive: `"uuid"` and `"oid"` select their
/// kinds, and every other value (absent, `"uri"`, `"url"`, anything else)
/// selects [`IdentifierKind::Uri`]. Callers use both `uri` and `url` for URI
/// identifiers, so URI is the fallback.
///
/// # Arguments
///
/// * `type_text` - The raw `type` argument, if any
///
/// # Returns
///
/// The identifier kind. Never fails.
#[must_use]
pub fn map_identifier_kind(type_text: Option<&str>) -> IdentifierKind {
    match type_text {
        Some("uuid") => IdentifierKind::Uuid,
        Some("oid") => IdentifierKind::Oid,
        _ => IdentifierKind::Uri,
    }
}
