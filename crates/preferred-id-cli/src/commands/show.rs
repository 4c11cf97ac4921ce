// Rust guideline compliant 2026-10-12

//! Implementation of the `pid show` command.

use anyhow::Result;
use preferred_id_app::RepoContext;
use std::path::Path;

/// Loads one stored resource as raw JSON.
///
/// # Arguments
///
/// * `repo` - Optional repository root
/// * `resource_type` - The `resourceType` of the record
/// * `id` - The logical id of the record
///
/// # Errors
///
/// Returns an error if the repository is not initialized, the store cannot be
/// read, or no record has this type and id.
pub fn load(repo: Option<&Path>, resource_type: &str, id: &str) -> Result<serde_json::Value> {
    let context = RepoContext::discover(repo)?;
    let record = context.open_store()?.load_by_id(resource_type, id)?;
    Ok(record.into_value())
}

/// Prints one stored resource as JSON.
///
/// # Errors
///
/// Returns an error under the same conditions as [`load`].
pub fn execute(repo: Option<&Path>, resource_type: &str, id: &str, pretty: bool) -> Result<()> {
    let value = load(repo, resource_type, id)?;
    let rendered = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{}", rendered);
    Ok(())
}
