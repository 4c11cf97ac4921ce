// Rust guideline compliant 2026-10-12

//! Search capability used by the operation orchestrator.
//!
//! The orchestrator never touches storage directly. It describes what it wants
//! as a [`SearchQuery`] and hands it to an injected [`SearchProvider`]. Two
//! providers ship with the crate: [`StorageSearchProvider`] over the JSONL
//! resource store, and [`InMemorySearchProvider`] for tests and embedding.

use crate::error::{AppError, Result};
use async_trait::async_trait;
use preferred_id_core::{InformationModel, ResourceRecord, ResourceStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Name of the argument carrying the resource type.
pub const RESOURCE_TYPE_ARGUMENT: &str = "_type";

/// Where an argument was taken from in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentSource {
    /// A segment of the request path.
    Path,
    /// A query string parameter.
    Query,
}

/// Whether an argument has been consumed by a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentStatus {
    /// Not yet consumed.
    NotHandled,
    /// Consumed; the host must not report it as unsupported.
    Handled,
}

/// One named request argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Argument source.
    pub source: ArgumentSource,
    /// Argument name, e.g. `id` or `_type`.
    pub name: String,
    /// Raw argument value.
    pub value: String,
    /// Handling status.
    pub status: ArgumentStatus,
}

impl Argument {
    /// Creates an argument that has not been handled yet.
    pub fn new(source: ArgumentSource, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            source,
            name: name.into(),
            value: value.into(),
            status: ArgumentStatus::NotHandled,
        }
    }

    /// Returns the argument marked as handled.
    #[must_use]
    pub fn handled(mut self) -> Self {
        self.status = ArgumentStatus::Handled;
        self
    }
}

/// Kind of interaction a request performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Custom operation on a resource type, e.g. `GET /NamingSystem/$preferred-id`.
    TypeCustom,
    /// Custom operation on a resource instance.
    InstanceCustom,
    /// Custom operation on the whole system.
    SystemCustom,
}

impl Interaction {
    /// Returns the interaction code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Interaction::TypeCustom => "type-custom",
            Interaction::InstanceCustom => "instance-custom",
            Interaction::SystemCustom => "system-custom",
        }
    }
}

/// Options scoping a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Base URL of the server the request arrived on.
    pub server_base: String,
    /// Interaction of the originating request.
    pub interaction: Interaction,
    /// Information model to search in.
    pub information_model: InformationModel,
    /// Whether only the latest version of each resource is returned.
    pub latest_only: bool,
}

impl SearchOptions {
    /// Options for a search over the latest version of each resource.
    ///
    /// # Arguments
    ///
    /// * `server_base` - Base URL of the server
    /// * `interaction` - Interaction of the originating request
    /// * `information_model` - Information model to search in
    pub fn latest(
        server_base: impl Into<String>,
        interaction: Interaction,
        information_model: InformationModel,
    ) -> Self {
        Self {
            server_base: server_base.into(),
            interaction,
            information_model,
            latest_only: true,
        }
    }
}

/// A search request: arguments plus options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Search arguments.
    pub arguments: Vec<Argument>,
    /// Search options.
    pub options: SearchOptions,
}

impl SearchQuery {
    /// Returns the value of the `_type` argument, if any.
    #[must_use]
    pub fn resource_type(&self) -> Option<&str> {
        self.arguments
            .iter()
            .find(|argument| argument.name == RESOURCE_TYPE_ARGUMENT)
            .map(|argument| argument.value.as_str())
    }
}

/// Capability answering search queries with opaque resource records.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs a search.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing repository cannot answer the query.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ResourceRecord>>;
}

/// Search provider backed by the JSONL resource store.
///
/// Answers only `_type` queries; file reads run on the blocking thread pool.
#[derive(Debug, Clone)]
pub struct StorageSearchProvider {
    store: ResourceStore,
}

impl StorageSearchProvider {
    /// Creates a provider over a resource store.
    #[must_use]
    pub fn new(store: ResourceStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SearchProvider for StorageSearchProvider {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ResourceRecord>> {
        let resource_type = query
            .resource_type()
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "Search query requires a {} argument",
                    RESOURCE_TYPE_ARGUMENT
                ))
            })?
            .to_string();

        let store = self.store.clone();
        let records = tokio::task::spawn_blocking(move || store.load_by_type(&resource_type))
            .await
            .map_err(|e| AppError::SearchFailed(format!("Search task failed: {}", e)))??;

        tracing::debug!(
            path = %self.store.path().display(),
            count = records.len(),
            "Loaded records from store"
        );
        Ok(records)
    }
}

/// Search provider over a fixed set of records.
///
/// Counts calls so callers can assert that rejected requests never search,
/// and keeps the last query for inspection.
#[derive(Debug, Default)]
pub struct InMemorySearchProvider {
    records: Vec<ResourceRecord>,
    failure: Option<String>,
    calls: AtomicUsize,
    last_query: Mutex<Option<SearchQuery>>,
}

impl InMemorySearchProvider {
    /// Creates a provider answering from the given records.
    #[must_use]
    pub fn new(records: Vec<ResourceRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Creates a provider whose every search fails with the given message.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Returns the number of searches run so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Returns the most recent query, if any.
    #[must_use]
    pub fn last_query(&self) -> Option<SearchQuery> {
        self.last_query
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl SearchProvider for InMemorySearchProvider {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ResourceRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_query
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(query.clone());

        if let Some(message) = &self.failure {
            return Err(AppError::SearchFailed(message.clone()));
        }

        Ok(match query.resource_type() {
            Some(resource_type) => self
                .records
                .iter()
                .filter(|record| record.resource_type() == Some(resource_type))
                .cloned()
                .collect(),
            None => self.records.clone(),
        })
    }
}
