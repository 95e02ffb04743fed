// Report source - retrieval interface for the credential report

use crate::NagError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A fetched credential report, ready for parsing.
#[derive(Debug, Clone)]
pub struct CredentialReport {
    /// Report format as stated by the source (e.g. "text/csv")
    pub format: String,
    pub generated_at: Option<DateTime<Utc>>,
    /// Raw CSV content
    pub content: String,
}

/// Source of credential reports.
///
/// `fetch` fails with [`NagError::ReportUnavailable`] when the report is
/// not present, not ready or expired; all three are terminal for the run.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Request generation of a fresh report; returns the reported state.
    async fn generate(&self) -> crate::Result<String>;

    /// Fetch the most recent completed report.
    async fn fetch(&self) -> Result<CredentialReport, NagError>;
}
