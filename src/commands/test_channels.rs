// TestChannelsCommand - connectivity checks for enabled channels

use super::Command;
use crate::config::Settings;
use crate::transport::{ChatTransport, EmailTransport, SlackChatPoster, SmtpMailer};
use crate::{Args, Result};
use async_trait::async_trait;
use colored::Colorize;

/// Probes each enabled notification channel and reports the outcome.
pub struct TestChannelsCommand {
    args: Args,
}

impl TestChannelsCommand {
    pub fn new(args: Args) -> Self {
        Self { args }
    }
}

#[async_trait]
impl Command for TestChannelsCommand {
    async fn execute(&self) -> Result<()> {
        let settings = Settings::load(self.args.config.as_deref())?;

        let mut results: Vec<(&str, Result<()>)> = Vec::new();

        if settings.email_enabled() {
            let mailer = SmtpMailer::new(settings.email.clone());
            results.push(("email", mailer.test().await));
        }

        if settings.slack_enabled() {
            let poster = SlackChatPoster::new(settings.slack.oauth_token.clone());
            results.push(("slack", poster.test().await));
        }

        println!("\nNotification Channel Tests:");
        println!("{}", "=".repeat(60));

        if results.is_empty() {
            println!("No notification channels configured");
        } else {
            for (channel, result) in &results {
                match result {
                    Ok(()) => println!("  {} {} - Success", "✓".green(), channel),
                    Err(e) => println!("  {} {} - Failed: {}", "✗".red(), channel, e),
                }
            }
        }
        println!();

        Ok(())
    }

    fn name(&self) -> &'static str {
        "TestChannelsCommand"
    }
}
