// Rust guideline compliant 2026-10-12

//! Orchestration of the `$preferred-id` operation.
//!
//! A request moves through a fixed sequence: map the `type` argument, check
//! `id`, check `_type`, mark arguments handled, search once, decode, filter,
//! answer. Input checks run before any search, so rejected requests never
//! reach the provider.

use crate::context::{RequestContext, ResponseSink};
use crate::error::Result;
use crate::operation::{OperationDescriptor, PREFERRED_ID_OPERATION};
use crate::search::{
    Argument, ArgumentSource, SearchOptions, SearchProvider, SearchQuery, RESOURCE_TYPE_ARGUMENT,
};
use preferred_id_core::{
    filter_naming_systems, map_identifier_kind, BadRequestReason, FilterReport, NamingSystem,
    ResolutionOutcome, ResolutionRequest, NAMING_SYSTEM_TYPE,
};
use std::sync::Arc;

/// Validates raw request arguments.
///
/// The `id` check comes first; an absent `_type` is reported as a wrong type
/// with an empty name.
///
/// # Arguments
///
/// * `type_text` - Raw `type` argument
/// * `known_id` - Raw `id` argument
/// * `resource_type` - Raw `_type` argument
///
/// # Returns
///
/// The validated request.
///
/// # Errors
///
/// Returns the reason the request is rejected.
pub fn validate_request(
    type_text: Option<&str>,
    known_id: Option<&str>,
    resource_type: Option<&str>,
) -> std::result::Result<ResolutionRequest, BadRequestReason> {
    let requested_kind = map_identifier_kind(type_text);

    let known_id = match known_id {
        Some(id) if !id.is_empty() => id,
        _ => return Err(BadRequestReason::MissingIdentifier),
    };

    match resource_type {
        Some(NAMING_SYSTEM_TYPE) => Ok(ResolutionRequest {
            resource_type: NAMING_SYSTEM_TYPE.to_string(),
            known_id: known_id.to_string(),
            requested_kind,
        }),
        other => Err(BadRequestReason::WrongResourceType(
            other.unwrap_or_default().to_string(),
        )),
    }
}

/// Chooses the outcome for a validated request over decoded naming systems.
///
/// # Arguments
///
/// * `resources` - Naming systems returned by the search
/// * `request` - The validated request
///
/// # Returns
///
/// The outcome and the per-stage filter counts.
#[must_use]
pub fn resolve(
    resources: Vec<NamingSystem>,
    request: &ResolutionRequest,
) -> (ResolutionOutcome, FilterReport) {
    let filtered = filter_naming_systems(resources, &request.known_id, request.requested_kind);
    let outcome = ResolutionOutcome::from_survivors(
        &filtered.survivors,
        &request.known_id,
        request.requested_kind,
    );
    (outcome, filtered.report)
}

/// Handler of the `$preferred-id` operation.
#[derive(Clone)]
pub struct IdentificationService {
    search: Arc<dyn SearchProvider>,
}

impl std::fmt::Debug for IdentificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentificationService").finish_non_exhaustive()
    }
}

impl IdentificationService {
    /// Creates a service using the given search provider.
    #[must_use]
    pub fn new(search: Arc<dyn SearchProvider>) -> Self {
        Self { search }
    }

    /// Returns the routing descriptor the service registers under.
    #[must_use]
    pub fn descriptor() -> OperationDescriptor {
        PREFERRED_ID_OPERATION
    }

    /// Dispatches a request if it targets this operation.
    ///
    /// # Returns
    ///
    /// `None` if the request does not match [`PREFERRED_ID_OPERATION`], so the
    /// host can try other handlers. Otherwise the result of
    /// [`IdentificationService::preferred_id_get`].
    pub async fn handle<C, S>(&self, ctx: &mut C, sink: &mut S) -> Option<Result<ResolutionOutcome>>
    where
        C: RequestContext + ?Sized,
        S: ResponseSink + ?Sized,
    {
        let matches = PREFERRED_ID_OPERATION.matches(
            ctx.operation(),
            ctx.method(),
            ctx.interaction(),
            ctx.information_model(),
        );
        if !matches {
            return None;
        }
        Some(self.preferred_id_get(ctx, sink).await)
    }

    /// Runs `GET [base]/NamingSystem/$preferred-id`.
    ///
    /// The status code and payload are written to `sink`, tagged with the
    /// request's information model; the outcome is also returned.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Inbound request
    /// * `sink` - Outbound response
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The search provider fails
    /// - A returned record cannot be decoded as a NamingSystem
    ///
    /// Nothing is written to `sink` in that case.
    pub async fn preferred_id_get<C, S>(&self, ctx: &mut C, sink: &mut S) -> Result<ResolutionOutcome>
    where
        C: RequestContext + ?Sized,
        S: ResponseSink + ?Sized,
    {
        let validated = validate_request(
            ctx.argument("type"),
            ctx.argument("id"),
            ctx.argument(RESOURCE_TYPE_ARGUMENT),
        );

        let request = match validated {
            Ok(request) => request,
            Err(reason) => {
                match &reason {
                    BadRequestReason::MissingIdentifier => {
                        tracing::warn!("$preferred-id called without an identifier");
                    }
                    BadRequestReason::WrongResourceType(resource) => {
                        tracing::warn!(
                            resource = %resource,
                            "$preferred-id called with the wrong resource, {} expected",
                            NAMING_SYSTEM_TYPE
                        );
                    }
                }
                let outcome = ResolutionOutcome::BadRequest(reason);
                sink.respond(outcome.status(), outcome.payload(), ctx.information_model());
                return Ok(outcome);
            }
        };

        ctx.mark_handled();

        let query = SearchQuery {
            arguments: vec![Argument::new(
                ArgumentSource::Path,
                RESOURCE_TYPE_ARGUMENT,
                request.resource_type.clone(),
            )
            .handled()],
            options: SearchOptions::latest(
                ctx.server_base(),
                ctx.interaction(),
                ctx.information_model(),
            ),
        };
        tracing::debug!(?query, "Searching for naming systems");

        let records = self.search.search(&query).await?;
        let resources = records
            .iter()
            .map(NamingSystem::try_from)
            .collect::<preferred_id_core::Result<Vec<_>>>()?;

        let (outcome, report) = resolve(resources, &request);
        tracing::info!("{} results found for {}", report.total, NAMING_SYSTEM_TYPE);
        tracing::info!(
            "{} filtered results found with Id={}",
            report.with_known_id,
            request.known_id
        );
        tracing::info!(
            "{} filtered results found with Id={} and with an IdentifierType of {}",
            report.with_kind,
            request.known_id,
            request.requested_kind
        );

        match &outcome {
            ResolutionOutcome::NotFound { .. } => {
                tracing::info!("$preferred-id returned without any match");
            }
            ResolutionOutcome::Ambiguous { matches, .. } => {
                tracing::error!(
                    matches = ?matches,
                    "$preferred-id found more than one {} for Id={}",
                    NAMING_SYSTEM_TYPE,
                    request.known_id
                );
            }
            ResolutionOutcome::Found(_) | ResolutionOutcome::BadRequest(_) => {}
        }

        sink.respond(outcome.status(), outcome.payload(), ctx.information_model());
        Ok(outcome)
    }
}
