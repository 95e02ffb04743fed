// GenerateReportCommand - request a fresh credential report

use super::Command;
use crate::external::IamReportSource;
use crate::report::ReportSource;
use crate::{Args, Result};
use async_trait::async_trait;
use colored::Colorize;
use tracing::info;

/// Asks IAM to generate a fresh credential report. Generation is
/// asynchronous on the AWS side; a later processing run consumes it.
pub struct GenerateReportCommand {
    #[allow(dead_code)]
    args: Args,
}

impl GenerateReportCommand {
    pub fn new(args: Args) -> Self {
        Self { args }
    }
}

#[async_trait]
impl Command for GenerateReportCommand {
    async fn execute(&self) -> Result<()> {
        info!("Requesting credential report generation...");

        let aws_config = aws_config::from_env().load().await;
        let source = IamReportSource::new(aws_sdk_iam::Client::new(&aws_config));

        let state = source.generate().await?;
        println!("{} Credential report generation: {}", "✓".green(), state);

        Ok(())
    }

    fn name(&self) -> &'static str {
        "GenerateReportCommand"
    }
}
