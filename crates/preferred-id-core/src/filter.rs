// Rust guideline compliant 2026-10-12

//! Two-stage narrowing of naming systems by known value and target kind.

use crate::{IdentifierKind, NamingSystem};
use rayon::prelude::*;

/// Result counts of each filter stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterReport {
    /// Number of resources given to the filter.
    pub total: usize,
    /// Resources with an entry equal to the known identifier.
    pub with_known_id: usize,
    /// Resources from the previous stage that also hold an entry of the target kind.
    pub with_kind: usize,
}

/// Surviving resources together with the per-stage counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Filtered {
    /// Resources that passed both stages, in input order.
    pub survivors: Vec<NamingSystem>,
    /// Counts observed at each stage.
    pub report: FilterReport,
}

/// Filters naming systems down to those that can answer a request.
///
/// Stage A keeps resources having an entry whose value equals `known_id`
/// exactly. Stage B keeps those of the survivors having an entry of `kind`.
/// More than one survivor is a valid result; choosing among them is left
/// to the caller.
///
/// # Arguments
///
/// * `resources` - Candidate naming systems
/// * `known_id` - Identifier value that must be present
/// * `kind` - Identifier kind that must be present
///
/// # Returns
///
/// The survivors in input order plus a report of each stage's count.
pub fn filter_naming_systems(
    resources: Vec<NamingSystem>,
    known_id: &str,
    kind: IdentifierKind,
) -> Filtered {
    let total = resources.len();

    let by_known_id = retain(resources, |ns| ns.has_value(known_id));
    let with_known_id = by_known_id.len();

    let survivors = retain(by_known_id, |ns| ns.has_kind(kind));
    let with_kind = survivors.len();

    Filtered {
        survivors,
        report: FilterReport {
            total,
            with_known_id,
            with_kind,
        },
    }
}

fn retain<F>(resources: Vec<NamingSystem>, predicate: F) -> Vec<NamingSystem>
where
    F: Fn(&NamingSystem) -> bool + Sync,
{
    const PARALLEL_THRESHOLD: usize = 1_000;

    // Indexed parallel iterators keep input order on collect.
    if resources.len() >= PARALLEL_THRESHOLD {
        resources.into_par_iter().filter(|ns| predicate(ns)).collect()
    } else {
        resources.into_iter().filter(|ns| predicate(ns)).collect()
    }
}
