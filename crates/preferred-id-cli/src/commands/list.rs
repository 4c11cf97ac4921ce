// Rust guideline compliant 2026-10-12

//! Implementation of the `pid list` command.

use crate::output::OutputFormatter;
use anyhow::Result;
use preferred_id_app::RepoContext;
use preferred_id_core::{NamingSystem, NAMING_SYSTEM_TYPE};
use std::path::Path;

/// Loads the stored naming systems in file order.
///
/// # Errors
///
/// Returns an error if the repository is not initialized, the store cannot be
/// read, or a stored naming system cannot be decoded.
pub fn load_naming_systems(repo: Option<&Path>) -> Result<Vec<NamingSystem>> {
    let context = RepoContext::discover(repo)?;
    let records = context.open_store()?.load_by_type(NAMING_SYSTEM_TYPE)?;
    let naming_systems = records
        .iter()
        .map(NamingSystem::try_from)
        .collect::<preferred_id_core::Result<Vec<_>>>()?;
    Ok(naming_systems)
}

/// Prints the stored naming systems.
///
/// # Arguments
///
/// * `repo` - Optional repository root
/// * `formatter` - Output formatter for display
///
/// # Errors
///
/// Returns an error if the naming systems cannot be loaded.
pub fn execute(repo: Option<&Path>, formatter: &dyn OutputFormatter) -> Result<usize> {
    let naming_systems = load_naming_systems(repo)?;
    println!("{}", formatter.format_naming_systems(&naming_systems));
    Ok(naming_systems.len())
}
