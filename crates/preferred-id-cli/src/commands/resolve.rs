// Rust guideline compliant 2026-10-12

//! Implementation of the `pid resolve` command.
//!
//! Runs one `$preferred-id` request against the repository's resource file
//! and prints the status code with its `Parameters` or `OperationOutcome`.

use crate::output::OutputFormatter;
use anyhow::Result;
use preferred_id_app::{
    IdentificationService, Method, OperationRequest, OperationResponse, OperationResult,
    RepoContext, StorageSearchProvider, PREFERRED_ID_OPERATION,
};
use std::path::Path;
use std::sync::Arc;

/// Arguments of a single resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolveArgs {
    /// Known identifier value.
    pub id: Option<String>,
    /// Requested identifier kind text (`oid`, `uuid`, anything else for URI).
    pub kind: Option<String>,
    /// Resource type the operation is invoked on.
    pub resource_type: String,
}

/// Resolves the preferred identifier and returns the raw result.
///
/// # Errors
///
/// Returns an error if:
/// - The repository is not initialized or its config is invalid
/// - The configured information model is not served by the operation
/// - The search or decoding of stored resources fails
pub fn run(repo: Option<&Path>, args: ResolveArgs) -> Result<OperationResult> {
    let context = RepoContext::discover(repo)?;
    let config = context.load_config()?;
    let service =
        IdentificationService::new(Arc::new(StorageSearchProvider::new(context.open_store()?)));

    let mut request = OperationRequest::new(PREFERRED_ID_OPERATION.name, Method::Get)
        .with_server_base(config.server_base)
        .with_information_model(config.information_model)
        .with_resource_type(args.resource_type);
    if let Some(id) = args.id {
        request = request.with_query("id", id);
    }
    if let Some(kind) = args.kind {
        request = request.with_query("type", kind);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mut response = OperationResponse::new();
    let outcome = runtime
        .block_on(service.handle(&mut request, &mut response))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "${} is not served for information model {}",
                PREFERRED_ID_OPERATION.name,
                config.information_model
            )
        })??;

    Ok(OperationResult::from(&outcome))
}

/// Resolves the preferred identifier and prints the result.
///
/// # Arguments
///
/// * `repo` - Optional repository root
/// * `args` - Identifier, requested kind, and resource type
/// * `formatter` - Output formatter for display
///
/// # Returns
///
/// The status code of the answer.
///
/// # Errors
///
/// Returns an error under the same conditions as [`run`].
pub fn execute(
    repo: Option<&Path>,
    args: ResolveArgs,
    formatter: &dyn OutputFormatter,
) -> Result<u16> {
    let result = run(repo, args)?;
    println!("{}", formatter.format_resolution(&result));
    Ok(result.status_code)
}

/// Maps an answer's status code to the process exit code.
///
/// 0 for success, 2 for client errors, 1 for everything else.
#[must_use]
pub fn exit_code(status_code: u16) -> i32 {
    match status_code {
        200 => 0,
        400..=499 => 2,
        _ => 1,
    }
}
