// Destination resolution - where each principal gets notified

use crate::config::Settings;
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::warn;

/// The root account appears in the credential report under this name.
/// It has no queryable tags, so it only ever gets fallback addresses.
pub const ROOT_ACCOUNT_NAME: &str = "<root_account>";

/// Tag keys principals use to carry their notification addresses.
pub const EMAIL_TAG: &str = "email";
pub const SLACK_TAG: &str = "slack";

/// Source of principal tags.
#[async_trait]
pub trait TagSource: Send + Sync {
    async fn get_tags(&self, principal: &str) -> Result<HashMap<String, String>>;
}

/// Resolved per-channel addresses for one principal. `None` means the
/// channel is skipped for this principal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDestinations {
    pub email: Option<String>,
    pub slack: Option<String>,
}

/// Resolve notification addresses for one principal.
///
/// Precedence per channel: the configured "always" address wins
/// unconditionally; otherwise the principal's own tag; otherwise the
/// configured default. Tag lookup is skipped for the root account, and a
/// failed lookup degrades to the fallback addresses.
pub async fn resolve_destinations(
    settings: &Settings,
    tags: &dyn TagSource,
    principal: &str,
) -> ResolvedDestinations {
    let principal_tags = if principal == ROOT_ACCOUNT_NAME {
        HashMap::new()
    } else {
        match tags.get_tags(principal).await {
            Ok(tags) => tags,
            Err(e) => {
                warn!("Failed to look up tags for [{}]: {}", principal, e);
                HashMap::new()
            }
        }
    };

    // Tag values cannot carry '#', so slack addresses store '+' instead
    let slack_tag = principal_tags
        .get(SLACK_TAG)
        .map(|value| value.replace('+', "#"));
    let email_tag = principal_tags.get(EMAIL_TAG).cloned();

    ResolvedDestinations {
        email: pick(&settings.email.always_to, email_tag, &settings.email.default_to),
        slack: pick(&settings.slack.always_to, slack_tag, &settings.slack.default_to),
    }
}

fn pick(always: &str, tag: Option<String>, default: &str) -> Option<String> {
    if !always.is_empty() {
        return Some(always.to_string());
    }
    if let Some(tag) = tag.filter(|t| !t.is_empty()) {
        return Some(tag);
    }
    if !default.is_empty() {
        return Some(default.to_string());
    }
    None
}
