// Rust guideline compliant 2026-10-12

//! Registration descriptor of the `$preferred-id` operation.

use crate::search::Interaction;
use preferred_id_core::InformationModel;
use std::fmt;

/// Request method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// Routing key a host uses to dispatch requests to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    /// Custom operation name, without the leading `$`.
    pub name: &'static str,
    /// Accepted request method.
    pub method: Method,
    /// Accepted interaction.
    pub interaction: Interaction,
    /// Accepted information model.
    pub information_model: InformationModel,
}

/// `GET [base]/NamingSystem/$preferred-id` in FHIR R4.
pub const PREFERRED_ID_OPERATION: OperationDescriptor = OperationDescriptor {
    name: "preferred-id",
    method: Method::Get,
    interaction: Interaction::TypeCustom,
    information_model: InformationModel::FhirR4,
};

impl OperationDescriptor {
    /// Returns true if a request with these properties is handled here.
    ///
    /// # Arguments
    ///
    /// * `name` - Operation name of the request, with or without a leading `$`
    /// * `method` - Request method
    /// * `interaction` - Request interaction
    /// * `information_model` - Request information model
    #[must_use]
    pub fn matches(
        &self,
        name: &str,
        method: Method,
        interaction: Interaction,
        information_model: InformationModel,
    ) -> bool {
        name.trim_start_matches('$') == self.name
            && method == self.method
            && interaction == self.interaction
            && information_model == self.information_model
    }
}
