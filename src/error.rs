// Error types for CredNag
//
// This module provides structured error types using thiserror alongside the
// generic anyhow::Result alias, so the template pipeline and report
// retrieval can be matched exhaustively.

use thiserror::Error;

/// Availability state of the credential report when it cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportState {
    NotPresent,
    NotReady,
    Expired,
}

impl std::fmt::Display for ReportState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportState::NotPresent => write!(f, "not present"),
            ReportState::NotReady => write!(f, "not ready"),
            ReportState::Expired => write!(f, "expired"),
        }
    }
}

/// Main error type for CredNag operations
#[derive(Debug, Error)]
pub enum NagError {
    /// The credential report cannot be consumed this run
    #[error("credential report unavailable ({state})")]
    ReportUnavailable { state: ReportState },

    /// An embedded template resource does not exist
    #[error("embedded template resource not found: [{key}] in bundle [{bundle}]")]
    ResourceNotFound { bundle: String, key: String },

    /// Object storage fetch for a template failed
    #[error("failed to fetch template object s3://{bucket}/{key}: {detail}")]
    StorageFetch {
        bucket: String,
        key: String,
        detail: String,
    },

    /// Network fetch for a template failed
    #[error("failed to fetch template from {url}: {detail}")]
    NetworkFetch { url: String, detail: String },

    /// A rendered locator is not a parseable URL
    #[error("invalid template locator [{locator}]: {source}")]
    InvalidLocator {
        locator: String,
        #[source]
        source: url::ParseError,
    },

    /// Template rendering failed (malformed or unresolved placeholders)
    #[error("template render failed: {0}")]
    TemplateRender(#[from] handlebars::RenderError),

    /// Rendered template text did not decode into the payload shape
    #[error("rendered template is not a valid payload: {0}")]
    Decode(#[from] serde_yaml::Error),

    /// Credential report CSV could not be parsed
    #[error("credential report parse error: {0}")]
    ReportParse(#[from] csv::Error),

    /// Invalid configuration or parameters
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}
