// Rust guideline compliant 2026-10-12

//! Preferred-ID Core Library
//!
//! This crate provides the pure building blocks of the `$preferred-id` operation:
//! - Data models (IdentifierKind, IdentifierEntry, NamingSystem, ResourceRecord)
//! - Type mapping from free-text `type` arguments to identifier kinds
//! - Two-stage resource filtering
//! - Outcome and payload building (Parameters, OperationOutcome, status codes)
//! - JSONL resource storage
//! - Configuration and error types

pub mod config;
pub mod error;
pub mod filter;
pub mod kind;
pub mod models;
pub mod outcome;
pub mod storage;

pub use config::{Config, InformationModel, OutputFormat};
pub use error::{Error, Result};
pub use filter::{filter_naming_systems, FilterReport, Filtered};
pub use kind::map_identifier_kind;
pub use models::{
    IdentifierEntry, IdentifierKind, NamingSystem, ResolutionRequest, ResourceRecord,
    NAMING_SYSTEM_TYPE,
};
pub use outcome::{
    BadRequestReason, Issue, IssueSeverity, OperationOutcome, Parameter, Parameters, Payload,
    ResolutionOutcome, StatusCode,
};
pub use storage::ResourceStore;
