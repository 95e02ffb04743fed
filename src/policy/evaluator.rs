// Policy evaluator - maps credential ages to findings

use crate::config::Settings;
use crate::policy::Finding;
use crate::report::CredentialReportEntry;
use chrono::{DateTime, Utc};

/// Access key slot identifiers as they appear in notifications.
pub const ACCESS_KEY_1: &str = "AccessKey_1";
pub const ACCESS_KEY_2: &str = "AccessKey_2";

/// Age thresholds for one evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgePolicy {
    pub password_expired_in_days: i64,
    pub access_key_expired_in_days: i64,
    pub early_warning_in_days: i64,
}

impl From<&Settings> for AgePolicy {
    fn from(settings: &Settings) -> Self {
        Self {
            password_expired_in_days: settings.password_expired_in_days,
            access_key_expired_in_days: settings.access_key_expired_in_days,
            early_warning_in_days: settings.early_warning_in_days,
        }
    }
}

/// Evaluate one report entry against the age policy.
///
/// Pure and deterministic given `now`. Findings come out in slot order:
/// password, then access key 1, then access key 2.
pub fn evaluate_entry(
    entry: &CredentialReportEntry,
    policy: &AgePolicy,
    now: DateTime<Utc>,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    if entry.password_enabled == Some(true) {
        if let Some(verdict) = evaluate_age(
            entry.password_last_changed,
            policy.password_expired_in_days,
            policy.early_warning_in_days,
            now,
        ) {
            findings.push(match verdict {
                AgeVerdict::Expired { days_over } => Finding::PasswordExpired { days_over },
                AgeVerdict::Warning { days_left } => Finding::PasswordWarning { days_left },
            });
        }
    }

    for (key_id, active, last_rotated) in [
        (
            ACCESS_KEY_1,
            entry.access_key_1_active,
            entry.access_key_1_last_rotated,
        ),
        (
            ACCESS_KEY_2,
            entry.access_key_2_active,
            entry.access_key_2_last_rotated,
        ),
    ] {
        if active != Some(true) {
            continue;
        }
        if let Some(verdict) = evaluate_age(
            last_rotated,
            policy.access_key_expired_in_days,
            policy.early_warning_in_days,
            now,
        ) {
            findings.push(match verdict {
                AgeVerdict::Expired { days_over } => Finding::AccessKeyExpired {
                    access_key_id: key_id.to_string(),
                    days_over,
                },
                AgeVerdict::Warning { days_left } => Finding::AccessKeyWarning {
                    access_key_id: key_id.to_string(),
                    days_left,
                },
            });
        }
    }

    findings
}

enum AgeVerdict {
    Warning { days_left: i64 },
    Expired { days_over: i64 },
}

/// Core age check for one credential slot.
///
/// A credential never rotated counts as maximally aged. Age uses
/// whole-day truncation, not rounding.
fn evaluate_age(
    last_rotated: Option<DateTime<Utc>>,
    expired_after_days: i64,
    early_warning_days: i64,
    now: DateTime<Utc>,
) -> Option<AgeVerdict> {
    let rotated = last_rotated.unwrap_or(DateTime::<Utc>::MIN_UTC);
    let age_days = (now - rotated).num_days();

    if age_days + early_warning_days < expired_after_days {
        // Age is OK, nothing to do
        return None;
    }

    if age_days >= expired_after_days {
        Some(AgeVerdict::Expired {
            days_over: age_days - expired_after_days,
        })
    } else {
        Some(AgeVerdict::Warning {
            days_left: expired_after_days - age_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(user: &str) -> CredentialReportEntry {
        let header = "user,arn";
        let data = format!("{}\n{},arn:aws:iam::1:user/{}", header, user, user);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_bytes());
        reader.deserialize().next().unwrap().unwrap()
    }

    fn policy(expired: i64, warning: i64) -> AgePolicy {
        AgePolicy {
            password_expired_in_days: expired,
            access_key_expired_in_days: expired,
            early_warning_in_days: warning,
        }
    }

    fn now() -> DateTime<Utc> {
        "2024-03-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_age_within_policy_emits_nothing() {
        let mut e = entry("alice");
        e.password_enabled = Some(true);
        e.password_last_changed = Some(now() - Duration::days(10));

        assert!(evaluate_entry(&e, &policy(90, 5), now()).is_empty());
    }

    #[test]
    fn test_warning_window() {
        let mut e = entry("alice");
        e.password_enabled = Some(true);
        e.password_last_changed = Some(now() - Duration::days(87));

        let findings = evaluate_entry(&e, &policy(90, 5), now());
        assert_eq!(findings, vec![Finding::PasswordWarning { days_left: 3 }]);
    }

    #[test]
    fn test_expired() {
        let mut e = entry("alice");
        e.password_enabled = Some(true);
        e.password_last_changed = Some(now() - Duration::days(100));

        let findings = evaluate_entry(&e, &policy(90, 5), now());
        assert_eq!(findings, vec![Finding::PasswordExpired { days_over: 10 }]);
    }

    #[test]
    fn test_expiration_boundary_is_expired() {
        let mut e = entry("alice");
        e.password_enabled = Some(true);
        e.password_last_changed = Some(now() - Duration::days(90));

        let findings = evaluate_entry(&e, &policy(90, 5), now());
        assert_eq!(findings, vec![Finding::PasswordExpired { days_over: 0 }]);
    }

    #[test]
    fn test_zero_warning_window_disables_warnings() {
        let mut e = entry("alice");
        e.password_enabled = Some(true);
        e.password_last_changed = Some(now() - Duration::days(89));

        // One day short of expiry with no warning window: nothing
        assert!(evaluate_entry(&e, &policy(90, 0), now()).is_empty());

        e.password_last_changed = Some(now() - Duration::days(90));
        let findings = evaluate_entry(&e, &policy(90, 0), now());
        assert_eq!(findings, vec![Finding::PasswordExpired { days_over: 0 }]);
    }

    #[test]
    fn test_zero_expiry_expires_any_active_credential() {
        let mut e = entry("alice");
        e.password_enabled = Some(true);
        e.password_last_changed = Some(now() - Duration::days(1));

        let findings = evaluate_entry(&e, &policy(0, 0), now());
        assert_eq!(findings, vec![Finding::PasswordExpired { days_over: 1 }]);
    }

    #[test]
    fn test_inactive_or_unknown_flag_never_produces_finding() {
        let mut e = entry("alice");
        e.password_enabled = Some(false);
        e.password_last_changed = Some(now() - Duration::days(400));
        e.access_key_1_active = None;
        e.access_key_1_last_rotated = Some(now() - Duration::days(400));

        assert!(evaluate_entry(&e, &policy(90, 5), now()).is_empty());
    }

    #[test]
    fn test_missing_rotation_timestamp_is_maximally_aged() {
        let mut e = entry("alice");
        e.password_enabled = Some(true);
        e.password_last_changed = None;

        let findings = evaluate_entry(&e, &policy(90, 5), now());
        match &findings[..] {
            [Finding::PasswordExpired { days_over }] => assert!(*days_over > 365_000),
            other => panic!("expected a single expired finding, got {:?}", other),
        }
    }

    #[test]
    fn test_age_truncates_partial_days() {
        let mut e = entry("alice");
        e.password_enabled = Some(true);
        // 89 days and 23 hours old: truncates to 89, still one day left
        e.password_last_changed = Some(now() - Duration::days(89) - Duration::hours(23));

        let findings = evaluate_entry(&e, &policy(90, 5), now());
        assert_eq!(findings, vec![Finding::PasswordWarning { days_left: 1 }]);
    }

    #[test]
    fn test_slot_order_password_then_keys() {
        let mut e = entry("alice");
        e.password_enabled = Some(true);
        e.password_last_changed = Some(now() - Duration::days(100));
        e.access_key_1_active = Some(true);
        e.access_key_1_last_rotated = Some(now() - Duration::days(88));
        e.access_key_2_active = Some(true);
        e.access_key_2_last_rotated = Some(now() - Duration::days(95));

        let findings = evaluate_entry(&e, &policy(90, 5), now());
        assert_eq!(
            findings,
            vec![
                Finding::PasswordExpired { days_over: 10 },
                Finding::AccessKeyWarning {
                    access_key_id: ACCESS_KEY_1.to_string(),
                    days_left: 2,
                },
                Finding::AccessKeyExpired {
                    access_key_id: ACCESS_KEY_2.to_string(),
                    days_over: 5,
                },
            ]
        );
    }

    #[test]
    fn test_warning_expired_trichotomy_over_ranges() {
        for expired in [0, 1, 30, 90] {
            for warning in [0, 1, 5, 90] {
                for age in 0..=200 {
                    let mut e = entry("alice");
                    e.password_enabled = Some(true);
                    e.password_last_changed = Some(now() - Duration::days(age));

                    let findings = evaluate_entry(&e, &policy(expired, warning), now());
                    let expected = if age + warning < expired {
                        None
                    } else if age >= expired {
                        Some(Finding::PasswordExpired {
                            days_over: age - expired,
                        })
                    } else {
                        Some(Finding::PasswordWarning {
                            days_left: expired - age,
                        })
                    };

                    assert_eq!(
                        findings,
                        expected.into_iter().collect::<Vec<_>>(),
                        "age={} expired={} warning={}",
                        age,
                        expired,
                        warning
                    );
                }
            }
        }
    }

    #[test]
    fn test_password_threshold_governs_passwords() {
        let mut e = entry("alice");
        e.password_enabled = Some(true);
        e.password_last_changed = Some(now() - Duration::days(45));

        // Password threshold 30 expires it even though key threshold is 90
        let p = AgePolicy {
            password_expired_in_days: 30,
            access_key_expired_in_days: 90,
            early_warning_in_days: 5,
        };
        let findings = evaluate_entry(&e, &p, now());
        assert_eq!(findings, vec![Finding::PasswordExpired { days_over: 15 }]);
    }
}
