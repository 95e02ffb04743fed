// ProcessReportCommand - the main audit-and-notify run

use super::Command;
use crate::config::Settings;
use crate::external::{IamReportSource, IamTagSource};
use crate::notify::{Dispatcher, Notifications};
use crate::policy::{evaluate_entry, AgePolicy};
use crate::report::{parse_report, ReportSource};
use crate::template::{S3Fetcher, TemplateResolver};
use crate::transport::{ChatTransport, EmailTransport, SlackChatPoster, SmtpMailer};
use crate::{Args, NagError, Result};
use async_trait::async_trait;
use chrono::Utc;
use colored::Colorize;
use tracing::{error, info};

/// Retrieves the credential report, evaluates every entry against the age
/// policy and dispatches notifications for the findings.
pub struct ProcessReportCommand {
    args: Args,
}

impl ProcessReportCommand {
    pub fn new(args: Args) -> Self {
        Self { args }
    }
}

#[async_trait]
impl Command for ProcessReportCommand {
    async fn execute(&self) -> Result<()> {
        let settings = Settings::load(self.args.config.as_deref())?;
        info!(
            "Enabled channels: [{}]",
            settings.enabled_channels().join(", ")
        );

        let aws_config = aws_config::from_env().load().await;
        let iam_client = aws_sdk_iam::Client::new(&aws_config);
        let source = IamReportSource::new(iam_client.clone());
        let tags = IamTagSource::new(iam_client);
        let templates = TemplateResolver::new()
            .with_fetcher(Box::new(S3Fetcher::new(aws_sdk_s3::Client::new(&aws_config))));

        info!("Retrieving and processing credential report...");
        let report = match source.fetch().await {
            Ok(report) => report,
            Err(NagError::ReportUnavailable { state }) => {
                // Terminal for this run, but a clean exit: a later run
                // picks the report up once it exists again.
                error!("Credential report {}; nothing to process", state);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let entries = parse_report(&report.content)?;
        info!("Found [{}] entries in credential report", entries.len());

        let policy = AgePolicy::from(&settings);
        let now = Utc::now();
        let mut notifications = Notifications::new();
        for entry in &entries {
            for finding in evaluate_entry(entry, &policy, now) {
                notifications.add(&entry.user, finding);
            }
        }

        if notifications.is_empty() {
            println!("{} All credentials within policy", "✓".green());
            return Ok(());
        }

        let mailer = settings
            .email_enabled()
            .then(|| SmtpMailer::new(settings.email.clone()));
        let poster = settings
            .slack_enabled()
            .then(|| SlackChatPoster::new(settings.slack.oauth_token.clone()));

        let mut dispatcher =
            Dispatcher::new(&settings, &templates, &tags).dry_run(self.args.dry_run);
        if let Some(mailer) = &mailer {
            dispatcher = dispatcher.with_email(mailer as &dyn EmailTransport);
        }
        if let Some(poster) = &poster {
            dispatcher = dispatcher.with_slack(poster as &dyn ChatTransport);
        }

        let summary = dispatcher.dispatch(&notifications).await;
        println!(
            "{} Notified {} principal(s) of {} with findings",
            "✓".green(),
            summary.notified,
            summary.total
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "ProcessReportCommand"
    }
}
