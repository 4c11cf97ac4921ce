// Rust guideline compliant 2026-10-12

//! Implementation of the `pid remove` command.

use anyhow::Result;
use preferred_id_app::RepoContext;
use std::path::Path;

/// Deletes one stored resource while holding the store lock.
///
/// # Arguments
///
/// * `repo` - Optional repository root
/// * `resource_type` - The `resourceType` of the record
/// * `id` - The logical id of the record
///
/// # Errors
///
/// Returns an error if:
/// - The repository is not initialized
/// - The store is locked by another process
/// - No record has this type and id
pub fn execute(repo: Option<&Path>, resource_type: &str, id: &str) -> Result<()> {
    let context = RepoContext::discover(repo)?;
    let store = context.open_store()?;
    store.with_lock(|| store.delete(resource_type, id))?;

    println!("Removed {}/{}", resource_type, id);
    Ok(())
}
