// Rust guideline compliant 2026-10-12

//! MCP tool input and output types.

use preferred_id_core::NamingSystem;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for the `preferred_id` tool.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct PreferredIdInput {
    /// Known identifier value of the naming system.
    pub id: Option<String>,
    /// Identifier kind to return: `oid`, `uuid`, or anything else for URI.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Resource type the operation is invoked on. Defaults to `NamingSystem`.
    pub resource_type: Option<String>,
}

/// Empty input for tools without parameters.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct EmptyInput {}

/// Output payload for the `list_naming_systems` tool and resource.
#[derive(Debug, Clone, Serialize)]
pub struct NamingSystemList {
    /// Stored naming systems in file order.
    pub naming_systems: Vec<NamingSystem>,
    /// Number of naming systems returned.
    pub total: usize,
}
