// IAM integration - credential report retrieval and principal tags

use crate::error::{NagError, ReportState};
use crate::notify::TagSource;
use crate::report::{CredentialReport, ReportSource};
use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::info;

/// Credential report source backed by the IAM API.
pub struct IamReportSource {
    client: aws_sdk_iam::Client,
}

impl IamReportSource {
    pub fn new(client: aws_sdk_iam::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReportSource for IamReportSource {
    async fn generate(&self) -> Result<String> {
        let response = self
            .client
            .generate_credential_report()
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("GenerateCredentialReport failed: {}", e))?;

        let state = response
            .state()
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        info!("Credential report generation state: [{}]", state);
        Ok(state)
    }

    async fn fetch(&self) -> std::result::Result<CredentialReport, NagError> {
        let response = match self.client.get_credential_report().send().await {
            Ok(response) => response,
            Err(err) => {
                let service_err = err.into_service_error();
                let state = if service_err.is_credential_report_not_present_exception() {
                    Some(ReportState::NotPresent)
                } else if service_err.is_credential_report_not_ready_exception() {
                    Some(ReportState::NotReady)
                } else if service_err.is_credential_report_expired_exception() {
                    Some(ReportState::Expired)
                } else {
                    None
                };

                return Err(match state {
                    Some(state) => NagError::ReportUnavailable { state },
                    None => NagError::Other(format!("GetCredentialReport failed: {}", service_err)),
                });
            }
        };

        let content = response
            .content()
            .map(|blob| blob.clone().into_inner())
            .unwrap_or_default();
        let content = String::from_utf8(content)
            .map_err(|e| NagError::Other(format!("credential report is not UTF-8: {}", e)))?;

        let generated_at = response
            .generated_time()
            .and_then(|t| DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos()));
        let format = response
            .report_format()
            .map(|f| f.as_str().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        info!(
            "Retrieved credential report of format [{}] generated at [{}]",
            format,
            generated_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "unknown".to_string()),
        );

        Ok(CredentialReport {
            format,
            generated_at,
            content,
        })
    }
}

/// Principal tag source backed by the IAM ListUserTags API.
pub struct IamTagSource {
    client: aws_sdk_iam::Client,
}

impl IamTagSource {
    pub fn new(client: aws_sdk_iam::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TagSource for IamTagSource {
    async fn get_tags(&self, principal: &str) -> Result<HashMap<String, String>> {
        let mut tags = HashMap::new();
        let mut marker: Option<String> = None;

        loop {
            let mut request = self.client.list_user_tags().user_name(principal);
            if let Some(marker) = marker.as_deref() {
                request = request.marker(marker);
            }

            let response = request
                .send()
                .await
                .map_err(|e| anyhow::anyhow!("ListUserTags failed for [{}]: {}", principal, e))?;

            for tag in response.tags() {
                tags.insert(tag.key().to_string(), tag.value().to_string());
            }

            if response.is_truncated() {
                marker = response.marker().map(|m| m.to_string());
            } else {
                break;
            }
        }

        Ok(tags)
    }
}
