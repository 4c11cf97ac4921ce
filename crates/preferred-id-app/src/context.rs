// Rust guideline compliant 2026-10-12

//! Inbound request context and outbound response sink.
//!
//! The orchestrator only sees these two narrow traits, so any host (the MCP
//! server, the CLI, an HTTP router) can drive it by adapting its own request
//! and response types. [`OperationRequest`] and [`OperationResponse`] are the
//! concrete in-process implementations.

use crate::operation::Method;
use crate::search::{Argument, ArgumentSource, ArgumentStatus, Interaction, RESOURCE_TYPE_ARGUMENT};
use preferred_id_core::{InformationModel, Payload, Result, StatusCode};

/// Read access to an inbound request plus argument bookkeeping.
pub trait RequestContext: Send {
    /// Operation name of the request, without the leading `$`.
    fn operation(&self) -> &str;

    /// Request method.
    fn method(&self) -> Method;

    /// Returns the value of the first argument with this name.
    fn argument(&self, name: &str) -> Option<&str>;

    /// Marks every argument of the request as handled.
    fn mark_handled(&mut self);

    /// Base URL of the server the request arrived on.
    fn server_base(&self) -> &str;

    /// Interaction of the request.
    fn interaction(&self) -> Interaction;

    /// Information model of the request.
    fn information_model(&self) -> InformationModel;
}

/// Write access to the outbound response.
pub trait ResponseSink: Send {
    /// Sets the status code and body of the response.
    fn respond(&mut self, status: StatusCode, payload: Payload, information_model: InformationModel);
}

/// In-process request built from explicit arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    operation: String,
    method: Method,
    interaction: Interaction,
    information_model: InformationModel,
    server_base: String,
    arguments: Vec<Argument>,
}

impl OperationRequest {
    /// Creates a type-level FHIR R4 request with no arguments.
    ///
    /// # Arguments
    ///
    /// * `operation` - Operation name, with or without a leading `$`
    /// * `method` - Request method
    pub fn new(operation: impl Into<String>, method: Method) -> Self {
        let operation: String = operation.into();
        Self {
            operation: operation.trim_start_matches('$').to_string(),
            method,
            interaction: Interaction::TypeCustom,
            information_model: InformationModel::FhirR4,
            server_base: "http://localhost:4080/".to_string(),
            arguments: Vec::new(),
        }
    }

    /// Adds an argument.
    #[must_use]
    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Adds a query argument.
    #[must_use]
    pub fn with_query(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_argument(Argument::new(ArgumentSource::Query, name, value))
    }

    /// Adds the `_type` path argument.
    #[must_use]
    pub fn with_resource_type(self, resource_type: impl Into<String>) -> Self {
        self.with_argument(Argument::new(
            ArgumentSource::Path,
            RESOURCE_TYPE_ARGUMENT,
            resource_type,
        ))
    }

    /// Sets the server base URL.
    #[must_use]
    pub fn with_server_base(mut self, server_base: impl Into<String>) -> Self {
        self.server_base = server_base.into();
        self
    }

    /// Sets the interaction.
    #[must_use]
    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interaction = interaction;
        self
    }

    /// Sets the information model.
    #[must_use]
    pub fn with_information_model(mut self, information_model: InformationModel) -> Self {
        self.information_model = information_model;
        self
    }

    /// Returns all arguments in insertion order.
    #[must_use]
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Returns true if every argument has been handled.
    #[must_use]
    pub fn all_handled(&self) -> bool {
        self.arguments
            .iter()
            .all(|argument| argument.status == ArgumentStatus::Handled)
    }
}

impl RequestContext for OperationRequest {
    fn operation(&self) -> &str {
        &self.operation
    }

    fn method(&self) -> Method {
        self.method
    }

    fn argument(&self, name: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|argument| argument.name == name)
            .map(|argument| argument.value.as_str())
    }

    fn mark_handled(&mut self) {
        for argument in &mut self.arguments {
            argument.status = ArgumentStatus::Handled;
        }
    }

    fn server_base(&self) -> &str {
        &self.server_base
    }

    fn interaction(&self) -> Interaction {
        self.interaction
    }

    fn information_model(&self) -> InformationModel {
        self.information_model
    }
}

/// In-process response capturing what the orchestrator wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationResponse {
    status: Option<StatusCode>,
    payload: Option<Payload>,
    information_model: Option<InformationModel>,
}

impl OperationResponse {
    /// Creates an empty response.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the status code, if one was written.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Returns the payload, if one was written.
    #[must_use]
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Returns the information model the payload was tagged with.
    #[must_use]
    pub fn information_model(&self) -> Option<InformationModel> {
        self.information_model
    }

    /// Serializes the payload.
    ///
    /// # Arguments
    ///
    /// * `pretty` - Whether to indent the output
    ///
    /// # Returns
    ///
    /// The JSON body, or `None` if nothing was written.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn body(&self, pretty: bool) -> Result<Option<String>> {
        self.payload
            .as_ref()
            .map(|payload| payload.to_json(pretty))
            .transpose()
    }
}

impl ResponseSink for OperationResponse {
    fn respond(&mut self, status: StatusCode, payload: Payload, information_model: InformationModel) {
        self.status = Some(status);
        self.payload = Some(payload);
        self.information_model = Some(information_model);
    }
}
