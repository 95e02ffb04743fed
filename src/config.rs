// CredNag configuration

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable overrides applied on top of the settings file.
/// Only secrets are overridable this way so they can stay out of the file.
pub const ENV_SLACK_OAUTH_TOKEN: &str = "CREDNAG_SLACK_OAUTH_TOKEN";
pub const ENV_SMTP_USERNAME: &str = "CREDNAG_SMTP_USERNAME";
pub const ENV_SMTP_PASSWORD: &str = "CREDNAG_SMTP_PASSWORD";

/// Main settings for a CredNag run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum age of a console password, in days
    pub password_expired_in_days: i64,
    /// Maximum age of an access key, in days
    pub access_key_expired_in_days: i64,
    /// Days before expiration at which early-warning notifications start
    /// (0 disables the warning window)
    pub early_warning_in_days: i64,
    /// Maximum number of principals notified per run (0 = unlimited)
    pub notification_count_limit: usize,
    /// Locator template resolving to notification template content,
    /// keyed by channel, credential kind and category
    pub template_url: String,
    pub email: EmailSettings,
    pub slack: SlackSettings,
}

/// Email channel settings. A non-empty `from` address enables the channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    /// Sender address; leaving this empty disables email notifications
    pub from: String,
    /// Fallback recipient when a principal has no email tag
    pub default_to: String,
    /// Recipient used unconditionally, overriding any email tag
    pub always_to: String,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub use_starttls: bool,
}

/// Slack channel settings. A non-empty `oauth_token` enables the channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackSettings {
    /// Bot OAuth token; leaving this empty disables Slack notifications
    pub oauth_token: String,
    /// Fallback address when a principal has no slack tag.
    /// Can be a channel (starts with '#') or a user (starts with '@').
    pub default_to: String,
    /// Address used unconditionally, overriding any slack tag
    pub always_to: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            password_expired_in_days: 90,
            access_key_expired_in_days: 90,
            early_warning_in_days: 5,
            notification_count_limit: 0,
            template_url:
                "embedded://self/{{notification_method}}/{{notification.credential}}-{{notification.category}}.yml"
                    .to_string(),
            email: EmailSettings::default(),
            slack: SlackSettings::default(),
        }
    }
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            from: String::new(),
            default_to: String::new(),
            always_to: String::new(),
            smtp_server: String::new(),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            use_starttls: true,
        }
    }
}

impl Default for SlackSettings {
    fn default() -> Self {
        Self {
            oauth_token: String::new(),
            default_to: String::new(),
            always_to: String::new(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file (or defaults when no path is given),
    /// then apply environment overrides for secrets.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env_overrides();
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow::anyhow!("Failed to read settings file {:?}: {}", path.as_ref(), e)
        })?;

        let settings: Settings = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML settings: {}", e))?;

        Ok(settings)
    }

    /// Save settings to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize settings: {}", e))?;

        fs::write(path.as_ref(), toml_str).map_err(|e| {
            anyhow::anyhow!("Failed to write settings file {:?}: {}", path.as_ref(), e)
        })?;

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(ENV_SLACK_OAUTH_TOKEN) {
            self.slack.oauth_token = token;
        }
        if let Ok(username) = std::env::var(ENV_SMTP_USERNAME) {
            self.email.username = username;
        }
        if let Ok(password) = std::env::var(ENV_SMTP_PASSWORD) {
            self.email.password = password;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.password_expired_in_days < 0
            || self.access_key_expired_in_days < 0
            || self.early_warning_in_days < 0
        {
            return Err(crate::NagError::Config {
                message: "age thresholds must not be negative".to_string(),
            }
            .into());
        }
        if self.email_enabled() && self.email.smtp_server.is_empty() {
            return Err(crate::NagError::Config {
                message: "email.smtp_server is required when email.from is set".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Email notifications are enabled iff a sender address is configured
    pub fn email_enabled(&self) -> bool {
        !self.email.from.is_empty()
    }

    /// Slack notifications are enabled iff an OAuth token is configured
    pub fn slack_enabled(&self) -> bool {
        !self.slack.oauth_token.is_empty()
    }

    /// Get list of enabled notification channels
    pub fn enabled_channels(&self) -> Vec<String> {
        let mut channels = Vec::new();

        if self.email_enabled() {
            channels.push("email".to_string());
        }
        if self.slack_enabled() {
            channels.push("slack".to_string());
        }

        channels
    }
}
