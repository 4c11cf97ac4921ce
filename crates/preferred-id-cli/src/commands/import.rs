// Rust guideline compliant 2026-10-12

//! Implementation of the `pid import` command.
//!
//! Loads FHIR resources into the repository. The input may be a single JSON
//! resource, a JSON array of resources, or JSONL with one resource per line.

use anyhow::Result;
use preferred_id_app::RepoContext;
use preferred_id_core::ResourceRecord;
use serde_json::Value;
use std::path::Path;

/// Counts reported by an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Resources written to the store.
    pub imported: usize,
    /// Entries skipped because they were not valid resources.
    pub skipped: usize,
}

/// Imports resources from a file into the repository.
///
/// Records are upserted by `(resourceType, id)` while holding the store lock.
///
/// # Arguments
///
/// * `repo` - Optional repository root
/// * `file` - Path of the file to import
///
/// # Returns
///
/// How many resources were imported and skipped.
///
/// # Errors
///
/// Returns an error if:
/// - The repository is not initialized
/// - The source file cannot be read
/// - No valid resource is found
/// - The store cannot be locked or written
pub fn execute(repo: Option<&Path>, file: &Path) -> Result<ImportSummary> {
    let context = RepoContext::discover(repo)?;
    if !file.exists() {
        anyhow::bail!("Import file not found: {}", file.display());
    }

    let content = std::fs::read_to_string(file)?;
    let (records, skipped) = parse_resources(&content);
    if records.is_empty() {
        anyhow::bail!("No valid resources found in {}", file.display());
    }

    let store = context.open_store()?;
    store.with_lock(|| {
        for record in &records {
            store.save(record)?;
        }
        Ok(())
    })?;

    let summary = ImportSummary {
        imported: records.len(),
        skipped,
    };
    println!("Imported resources: {}", summary.imported);
    if summary.skipped > 0 {
        println!("Skipped entries: {}", summary.skipped);
    }

    Ok(summary)
}

/// Parses import content into resource records.
///
/// Invalid entries are reported on stderr and counted rather than aborting
/// the import.
///
/// # Returns
///
/// The valid records in input order and the number of skipped entries.
pub fn parse_resources(content: &str) -> (Vec<ResourceRecord>, usize) {
    let candidates: Vec<(usize, std::result::Result<Value, String>)> =
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| (idx + 1, Ok(item)))
                .collect(),
            Ok(value) => vec![(1, Ok(value))],
            Err(_) => content
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(idx, line)| {
                    (
                        idx + 1,
                        serde_json::from_str::<Value>(line).map_err(|err| err.to_string()),
                    )
                })
                .collect(),
        };

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (position, candidate) in candidates {
        match candidate {
            Ok(value) => match ResourceRecord::new(value) {
                Ok(record) => records.push(record),
                Err(err) => {
                    skipped += 1;
                    eprintln!("Warning: Skipping invalid resource at entry {}: {}", position, err);
                }
            },
            Err(err) => {
                skipped += 1;
                eprintln!("Warning: Skipping invalid JSON on line {}: {}", position, err);
            }
        }
    }

    (records, skipped)
}
