// Rust guideline compliant 2026-10-12

//! MCP server runtime for the `$preferred-id` operation.

use crate::types::{EmptyInput, NamingSystemList, PreferredIdInput};
use preferred_id_app::{
    AppError, ErrorCode, ErrorEnvelope, IdentificationService, Method, OperationRequest,
    OperationResponse, OperationResult, RepoContext, StorageSearchProvider, SuccessEnvelope,
    PREFERRED_ID_OPERATION,
};
use preferred_id_core::{NamingSystem, NAMING_SYSTEM_TYPE};
use rmcp::handler::server::{router::tool::ToolRouter, wrapper::Parameters};
use rmcp::model::{
    AnnotateAble, CallToolResult, Content, ErrorData, Implementation, ListResourcesResult,
    PaginatedRequestParams, ProtocolVersion, RawResource, ReadResourceRequestParams,
    ReadResourceResult, ResourceContents, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::transport::stdio;
use rmcp::{tool, tool_handler, tool_router, RoleServer, ServiceExt};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;

/// URI of the naming-system listing resource.
const NAMING_SYSTEMS_URI: &str = "preferred-id://naming-systems";

/// Runtime options for the MCP server.
#[derive(Debug, Clone)]
pub struct McpOptions {
    /// Optional repository root to pin to.
    pub repo: Option<PathBuf>,
    /// Logging level.
    pub log_level: String,
    /// Optional log file path.
    pub log_file: Option<PathBuf>,
}

impl Default for McpOptions {
    fn default() -> Self {
        Self {
            repo: None,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

/// MCP server errors.
#[derive(Debug, Error)]
pub enum McpServerError {
    /// IO errors during runtime setup.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid log level provided.
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
    /// Transport or server errors.
    #[error("MCP server error: {0}")]
    Transport(String),
}

/// Runs the MCP server on stdio.
///
/// Logs go to stderr, or to `options.log_file` when set, so stdout stays
/// reserved for the protocol.
///
/// # Arguments
///
/// * `options` - MCP runtime options
///
/// # Errors
///
/// Returns an error if the runtime cannot be initialized or the server fails.
pub fn run(options: McpOptions) -> Result<(), McpServerError> {
    let _guard = init_tracing(&options)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        tracing::info!(repo = ?options.repo, "Starting preferred-id MCP server");
        let server = PreferredIdMcp::new(options);
        let service = server
            .serve(stdio())
            .await
            .map_err(|err| McpServerError::Transport(err.to_string()))?;
        service
            .waiting()
            .await
            .map_err(|err| McpServerError::Transport(err.to_string()))?;
        Ok(())
    })
}

fn init_tracing(options: &McpOptions) -> Result<Option<WorkerGuard>, McpServerError> {
    let level = parse_log_level(&options.log_level)?;

    if let Some(path) = &options.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        let subscriber = fmt()
            .with_max_level(level)
            .with_target(false)
            .json()
            .with_writer(writer)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
        return Ok(Some(guard));
    }

    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .json()
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(None)
}

fn parse_log_level(level: &str) -> Result<Level, McpServerError> {
    match level.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        other => Err(McpServerError::InvalidLogLevel(other.to_string())),
    }
}

#[derive(Clone)]
struct PreferredIdMcp {
    tool_router: ToolRouter<Self>,
    options: McpOptions,
}

impl PreferredIdMcp {
    fn new(options: McpOptions) -> Self {
        Self {
            tool_router: Self::tool_router(),
            options,
        }
    }

    fn repo_context(&self) -> Result<RepoContext, AppError> {
        RepoContext::discover(self.options.repo.as_deref())
    }

    async fn preferred_id_tool(&self, input: PreferredIdInput) -> Result<OperationResult, AppError> {
        let repo = self.repo_context()?;
        let config = repo.load_config()?;
        let service =
            IdentificationService::new(Arc::new(StorageSearchProvider::new(repo.open_store()?)));

        let mut request = OperationRequest::new(PREFERRED_ID_OPERATION.name, Method::Get)
            .with_server_base(config.server_base)
            .with_information_model(config.information_model)
            .with_resource_type(
                input
                    .resource_type
                    .unwrap_or_else(|| NAMING_SYSTEM_TYPE.to_string()),
            );
        if let Some(id) = input.id {
            request = request.with_query("id", id);
        }
        if let Some(kind) = input.kind {
            request = request.with_query("type", kind);
        }

        let mut response = OperationResponse::new();
        let outcome = service
            .handle(&mut request, &mut response)
            .await
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "${} is not served for information model {}",
                    PREFERRED_ID_OPERATION.name, config.information_model
                ))
            })??;

        Ok(OperationResult::from(&outcome))
    }

    fn naming_systems(&self) -> Result<NamingSystemList, AppError> {
        let repo = self.repo_context()?;
        let records = repo.open_store()?.load_by_type(NAMING_SYSTEM_TYPE)?;
        let naming_systems = records
            .iter()
            .map(NamingSystem::try_from)
            .collect::<preferred_id_core::Result<Vec<_>>>()?;
        Ok(NamingSystemList {
            total: naming_systems.len(),
            naming_systems,
        })
    }
}

#[tool_router(router = tool_router)]
impl PreferredIdMcp {
    /// Resolves the preferred identifier of a naming system.
    #[tool(
        name = "preferred_id",
        description = "Resolve the preferred identifier (uri, oid, or uuid) of a NamingSystem from one of its known identifiers."
    )]
    async fn preferred_id(
        &self,
        params: Parameters<PreferredIdInput>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self
            .preferred_id_tool(params.0)
            .await
            .map_err(map_app_error)?;
        let payload = serde_json::to_string(&SuccessEnvelope::new(result)).map_err(|err| {
            ErrorData::internal_error("Failed to serialize response", Some(err.to_string().into()))
        })?;
        Ok(CallToolResult::success(vec![Content::text(payload)]))
    }

    /// Lists stored naming systems.
    #[tool(name = "list_naming_systems", description = "List stored NamingSystem resources.")]
    async fn list_naming_systems(
        &self,
        _params: Parameters<EmptyInput>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self.naming_systems().map_err(map_app_error)?;
        let payload = serde_json::to_string(&SuccessEnvelope::new(result)).map_err(|err| {
            ErrorData::internal_error("Failed to serialize response", Some(err.to_string().into()))
        })?;
        Ok(CallToolResult::success(vec![Content::text(payload)]))
    }
}

#[tool_handler(router = self.tool_router)]
impl rmcp::ServerHandler for PreferredIdMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "preferred-id".to_string(),
                title: Some("Preferred-ID MCP".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let naming_systems = RawResource {
            uri: NAMING_SYSTEMS_URI.to_string(),
            name: "naming-systems".to_string(),
            title: Some("Naming systems".to_string()),
            description: Some("Stored NamingSystem resources".to_string()),
            mime_type: Some("application/json".to_string()),
            size: None,
            icons: None,
            meta: None,
        }
        .no_annotation();

        Ok(ListResourcesResult::with_all_items(vec![naming_systems]))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        self.read_resource_by_uri(request.uri.as_str())
    }
}

fn map_app_error(error: AppError) -> ErrorData {
    let envelope = ErrorEnvelope::from_error(&error);
    let data = serde_json::to_value(&envelope).ok();
    match envelope.code {
        ErrorCode::NotFound => ErrorData::resource_not_found(envelope.message, data),
        ErrorCode::ValidationError
        | ErrorCode::InvalidInput
        | ErrorCode::ConfigError
        | ErrorCode::RepoNotInitialized => ErrorData::invalid_params(envelope.message, data),
        ErrorCode::IoError | ErrorCode::JsonError | ErrorCode::SearchFailed => {
            ErrorData::internal_error(envelope.message, data)
        }
    }
}

impl PreferredIdMcp {
    fn read_resource_by_uri(&self, uri: &str) -> Result<ReadResourceResult, ErrorData> {
        if uri != NAMING_SYSTEMS_URI {
            return Err(ErrorData::resource_not_found(
                "Resource not found",
                Some(serde_json::json!({
                    "uri": uri,
                })),
            ));
        }

        let list = self.naming_systems().map_err(map_app_error)?;
        let payload = serde_json::to_string(&list).map_err(|err| {
            ErrorData::internal_error("Failed to serialize resource", Some(err.to_string().into()))
        })?;

        let contents = ResourceContents::TextResourceContents {
            uri: uri.to_string(),
            mime_type: Some("application/json".to_string()),
            text: payload,
            meta: None,
        };

        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}
