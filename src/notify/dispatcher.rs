// Dispatch orchestrator - turns findings into outbound messages
//
// Dispatch is strictly serial (principal, then channel, then finding) so
// the notification count limit cuts off at a deterministic point. A
// failure while rendering or sending one message never aborts the run;
// it is logged and the loop moves on.

use crate::config::Settings;
use crate::notify::destination::{resolve_destinations, TagSource};
use crate::notify::Notifications;
use crate::policy::Finding;
use crate::template::TemplateResolver;
use crate::transport::{Channel, ChatMessage, ChatTransport, EmailSendRequest, EmailTransport};
use serde_json::json;
use tracing::{debug, error, info, warn};

/// Outcome of one dispatch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Principals for which dispatch was attempted
    pub notified: usize,
    /// Principals that had findings
    pub total: usize,
}

/// Build the rendering context shared by locator and content templates.
pub fn notification_context(
    channel: Channel,
    username: &str,
    to: &str,
    email_from: &str,
    finding: &Finding,
) -> serde_json::Value {
    let mut context = json!({
        "notification_method": channel.as_str(),
        "username": username,
        "notification": finding,
    });

    match channel {
        Channel::Email => {
            context["email_to"] = json!(to);
            context["email_from"] = json!(email_from);
        }
        Channel::Slack => {
            context["slack_to"] = json!(to);
        }
    }

    context
}

/// Iterates the notification set and hands rendered payloads to the
/// transports.
pub struct Dispatcher<'a> {
    settings: &'a Settings,
    templates: &'a TemplateResolver,
    tags: &'a dyn TagSource,
    email: Option<&'a dyn EmailTransport>,
    slack: Option<&'a dyn ChatTransport>,
    dry_run: bool,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        settings: &'a Settings,
        templates: &'a TemplateResolver,
        tags: &'a dyn TagSource,
    ) -> Self {
        Self {
            settings,
            templates,
            tags,
            email: None,
            slack: None,
            dry_run: false,
        }
    }

    /// Enable the email channel
    pub fn with_email(mut self, transport: &'a dyn EmailTransport) -> Self {
        self.email = Some(transport);
        self
    }

    /// Enable the Slack channel
    pub fn with_slack(mut self, transport: &'a dyn ChatTransport) -> Self {
        self.slack = Some(transport);
        self
    }

    /// Render everything but send nothing
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Dispatch all notifications, honoring the configured count limit.
    pub async fn dispatch(&self, notifications: &Notifications) -> DispatchSummary {
        let limit = self.settings.notification_count_limit;
        let mut notified = 0;

        for (principal, findings) in notifications.iter() {
            let destinations = resolve_destinations(self.settings, self.tags, principal).await;
            info!(
                "Notifying [{}]: email = [{}], slack = [{}]",
                principal,
                destinations.email.as_deref().unwrap_or("-"),
                destinations.slack.as_deref().unwrap_or("-"),
            );

            let mut attempted = false;

            if let Some(transport) = self.email {
                match &destinations.email {
                    Some(to) => {
                        attempted = true;
                        for finding in findings {
                            if let Err(e) =
                                self.send_email(transport, principal, to, finding).await
                            {
                                error!(
                                    "Failed to send email notification to [{}]: {}",
                                    principal, e
                                );
                            }
                        }
                    }
                    None => warn!(
                        "Unable to resolve target email address for [{}]; skipping channel",
                        principal
                    ),
                }
            }

            if let Some(transport) = self.slack {
                match &destinations.slack {
                    Some(to) => {
                        attempted = true;
                        for finding in findings {
                            if let Err(e) =
                                self.send_slack(transport, principal, to, finding).await
                            {
                                error!(
                                    "Failed to send slack notification to [{}]: {}",
                                    principal, e
                                );
                            }
                        }
                    }
                    None => warn!(
                        "Unable to resolve target slack address for [{}]; skipping channel",
                        principal
                    ),
                }
            }

            if attempted {
                notified += 1;
                if limit > 0 && notified >= limit {
                    info!("Reached limit of [{}] notified principals; stopping", limit);
                    break;
                }
            }
        }

        info!(
            "Notified [{}] principal(s) of a total of [{}]",
            notified,
            notifications.len()
        );

        DispatchSummary {
            notified,
            total: notifications.len(),
        }
    }

    async fn send_email(
        &self,
        transport: &dyn EmailTransport,
        principal: &str,
        to: &str,
        finding: &Finding,
    ) -> crate::Result<()> {
        let context = notification_context(
            Channel::Email,
            principal,
            to,
            &self.settings.email.from,
            finding,
        );
        let request: EmailSendRequest = self
            .templates
            .resolve_payload(&self.settings.template_url, &context)
            .await?;
        debug!("EMAIL-REQU: {}", serde_json::to_string(&request)?);

        if self.dry_run {
            info!("[dry-run] skipping email send to [{}]", request.to);
            return Ok(());
        }

        transport.send(&request).await
    }

    async fn send_slack(
        &self,
        transport: &dyn ChatTransport,
        principal: &str,
        to: &str,
        finding: &Finding,
    ) -> crate::Result<()> {
        let context = notification_context(Channel::Slack, principal, to, "", finding);
        let message: ChatMessage = self
            .templates
            .resolve_payload(&self.settings.template_url, &context)
            .await?;
        debug!("SLACK-REQU: {}", serde_json::to_string(&message)?);

        if self.dry_run {
            info!("[dry-run] skipping slack post to [{}]", message.channel);
            return Ok(());
        }

        transport.post_message(&message).await
    }
}
