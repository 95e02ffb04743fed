// CredNag - IAM credential expiration auditor and notification bot

//! CredNag audits IAM account credentials (console passwords, access
//! keys) against age-based expiration policy and nags their owners over
//! email and Slack, using templated notifications that operators can
//! override without redeploying.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod external;
pub mod notify;
pub mod policy;
pub mod report;
pub mod template;
pub mod transport;

// Re-export commonly used types
pub use crate::cli::Args;
pub use crate::config::Settings;
pub use crate::error::NagError;

/// Result type for CredNag operations
pub type Result<T> = anyhow::Result<T>;

/// Error type for CredNag operations
pub use anyhow::Error;
