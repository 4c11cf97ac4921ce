// Rust guideline compliant 2026-10-12

//! Application services for the `$preferred-id` operation.
//!
//! This crate wires the pure core into a runnable operation: the search
//! capability and its providers, the request/response seams a host adapts to,
//! the operation descriptor, the orchestrating `IdentificationService`, and
//! repository discovery plus error envelopes shared by the MCP and CLI hosts.

pub mod context;
pub mod error;
pub mod operation;
pub mod repo;
pub mod response;
pub mod search;
pub mod service;

pub use context::{OperationRequest, OperationResponse, RequestContext, ResponseSink};
pub use error::{AppError, ErrorCode, Result};
pub use operation::{Method, OperationDescriptor, PREFERRED_ID_OPERATION};
pub use repo::RepoContext;
pub use response::{ErrorEnvelope, OperationResult, SuccessEnvelope};
pub use search::{
    Argument, ArgumentSource, ArgumentStatus, InMemorySearchProvider, Interaction, SearchOptions,
    SearchProvider, SearchQuery, StorageSearchProvider,
};
pub use service::{resolve, validate_request, IdentificationService};
