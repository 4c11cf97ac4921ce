// Rust guideline compliant 2026-10-12

//! MCP server surface for the `$preferred-id` operation.
//!
//! Exposes the operation as the `preferred_id` tool over stdio, together with
//! a `list_naming_systems` tool and a `preferred-id://naming-systems` resource.

pub mod server;
pub mod types;

pub use server::{run, McpOptions, McpServerError};
