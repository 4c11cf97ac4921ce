// Rust guideline compliant 2026-10-12

//! Implementation of the `pid mcp` command.

use anyhow::Result;
use preferred_id_app::RepoContext;
use preferred_id_core::Config;
use preferred_id_mcp::McpOptions;
use std::path::{Path, PathBuf};

/// Picks the server log level.
///
/// An explicit flag wins; otherwise the repository's `log_level` (with its
/// `PREFERRED_ID_LOG_LEVEL` override) applies, or the default when the
/// repository cannot be read.
#[must_use]
pub fn effective_log_level(repo: Option<&Path>, flag: Option<String>) -> String {
    flag.unwrap_or_else(|| {
        RepoContext::discover(repo)
            .and_then(|context| context.load_config())
            .map(|config| config.log_level)
            .unwrap_or_else(|_| Config::default().log_level)
    })
}

/// Serves the repository over MCP on stdio until the client disconnects.
///
/// # Arguments
///
/// * `repo` - Optional repository root to pin the server to
/// * `log_level` - One of `error`, `warn`, `info`, `debug`; defaults to the configured level
/// * `log_file` - Optional file receiving JSON logs instead of stderr
///
/// # Errors
///
/// Returns an error if the log level is invalid or the server fails.
pub fn execute(
    repo: Option<PathBuf>,
    log_level: Option<String>,
    log_file: Option<PathBuf>,
) -> Result<()> {
    let log_level = effective_log_level(repo.as_deref(), log_level);
    preferred_id_mcp::run(McpOptions {
        repo,
        log_level,
        log_file,
    })?;
    Ok(())
}
