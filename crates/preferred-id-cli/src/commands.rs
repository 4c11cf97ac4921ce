// Rust guideline compliant 2026-10-12

//! Command implementations for the `pid` CLI.

pub mod import;
pub mod init;
pub mod list;
pub mod mcp;
pub mod remove;
pub mod resolve;
pub mod show;
