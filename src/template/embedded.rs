// Embedded template bundle - default notification templates compiled in

/// Name under which the default bundle is registered, in addition to the
/// "self" authority alias.
pub const DEFAULT_BUNDLE_NAME: &str = "default-templates";

/// Default notification templates bundled with the binary, keyed by
/// `{channel}/{credential}-{category}.yml`.
pub fn default_templates() -> &'static [(&'static str, &'static str)] {
    &[
        (
            "email/password-warning.yml",
            include_str!("../../templates/email/password-warning.yml"),
        ),
        (
            "email/password-expired.yml",
            include_str!("../../templates/email/password-expired.yml"),
        ),
        (
            "email/accessKey-warning.yml",
            include_str!("../../templates/email/accessKey-warning.yml"),
        ),
        (
            "email/accessKey-expired.yml",
            include_str!("../../templates/email/accessKey-expired.yml"),
        ),
        (
            "slack/password-warning.yml",
            include_str!("../../templates/slack/password-warning.yml"),
        ),
        (
            "slack/password-expired.yml",
            include_str!("../../templates/slack/password-expired.yml"),
        ),
        (
            "slack/accessKey-warning.yml",
            include_str!("../../templates/slack/accessKey-warning.yml"),
        ),
        (
            "slack/accessKey-expired.yml",
            include_str!("../../templates/slack/accessKey-expired.yml"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_channel_kind_category_combination_is_bundled() {
        let templates = default_templates();

        for channel in ["email", "slack"] {
            for credential in ["password", "accessKey"] {
                for category in ["warning", "expired"] {
                    let key = format!("{}/{}-{}.yml", channel, credential, category);
                    assert!(
                        templates.iter().any(|(k, _)| *k == key),
                        "missing bundled template {}",
                        key
                    );
                }
            }
        }
    }

    #[test]
    fn test_bundled_templates_are_nonempty() {
        for (key, content) in default_templates() {
            assert!(!content.trim().is_empty(), "empty template {}", key);
        }
    }
}
