// Rust guideline compliant 2026-10-12

//! Implementation of the `pid init` command.
//!
//! Creates the `.preferred-id` directory with an empty resource file and a
//! default `config.toml`.

use anyhow::Result;
use preferred_id_app::RepoContext;
use std::path::Path;

/// Initializes a preferred-id repository.
///
/// Existing resources and configuration are kept, so re-running the command
/// on an initialized repository only reports its location.
///
/// # Arguments
///
/// * `root` - Optional repository root; defaults to the current directory
///
/// # Returns
///
/// The initialized repository context.
///
/// # Errors
///
/// Returns an error if:
/// - The current directory cannot be resolved
/// - The data directory, resource file, or configuration cannot be written
pub fn execute(root: Option<&Path>) -> Result<RepoContext> {
    let root = match root {
        Some(root) => root.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let context = RepoContext::init(&root)?;

    println!(
        "Preferred-id repository initialized at {}",
        context.data_dir().display()
    );
    println!("  - {}", context.resources_path().display());
    println!("  - {}", context.config_path().display());

    Ok(context)
}
