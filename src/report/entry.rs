// Credential report entry - one row per account principal

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Markers the IAM credential report uses for values it cannot provide.
/// They all deserialize to `None` so "unknown" stays distinct from a
/// known false or a real timestamp.
const NULL_MARKERS: &[&str] = &["", "N/A", "not_supported", "no_information"];

/// One row of the IAM credential report, normalized.
///
/// Activity flags are tri-state: `Some(true)` / `Some(false)` when the
/// report states them, `None` when the report cannot know (for example
/// `password_enabled` for the root account).
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialReportEntry {
    pub user: String,
    pub arn: String,

    #[serde(deserialize_with = "opt_datetime", default)]
    pub user_creation_time: Option<DateTime<Utc>>,

    #[serde(deserialize_with = "opt_bool", default)]
    pub password_enabled: Option<bool>,
    #[serde(deserialize_with = "opt_datetime", default)]
    pub password_last_used: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "opt_datetime", default)]
    pub password_last_changed: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "opt_datetime", default)]
    pub password_next_rotation: Option<DateTime<Utc>>,

    #[serde(deserialize_with = "opt_bool", default)]
    pub mfa_active: Option<bool>,

    #[serde(deserialize_with = "opt_bool", default)]
    pub access_key_1_active: Option<bool>,
    #[serde(deserialize_with = "opt_datetime", default)]
    pub access_key_1_last_rotated: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "opt_datetime", default)]
    pub access_key_1_last_used_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "opt_string", default)]
    pub access_key_1_last_used_region: Option<String>,
    #[serde(deserialize_with = "opt_string", default)]
    pub access_key_1_last_used_service: Option<String>,

    #[serde(deserialize_with = "opt_bool", default)]
    pub access_key_2_active: Option<bool>,
    #[serde(deserialize_with = "opt_datetime", default)]
    pub access_key_2_last_rotated: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "opt_datetime", default)]
    pub access_key_2_last_used_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "opt_string", default)]
    pub access_key_2_last_used_region: Option<String>,
    #[serde(deserialize_with = "opt_string", default)]
    pub access_key_2_last_used_service: Option<String>,

    #[serde(deserialize_with = "opt_bool", default)]
    pub cert_1_active: Option<bool>,
    #[serde(deserialize_with = "opt_datetime", default)]
    pub cert_1_last_rotated: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "opt_bool", default)]
    pub cert_2_active: Option<bool>,
    #[serde(deserialize_with = "opt_datetime", default)]
    pub cert_2_last_rotated: Option<DateTime<Utc>>,
}

fn is_null_marker(value: &str) -> bool {
    NULL_MARKERS.contains(&value)
}

fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|v| !is_null_marker(v)))
}

fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(v) if is_null_marker(&v) => Ok(None),
        Some(v) => match v.to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean value in credential report: [{}]",
                other
            ))),
        },
    }
}

fn opt_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(v) if is_null_marker(&v) => Ok(None),
        Some(v) => DateTime::parse_from_rfc3339(&v)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| {
                serde::de::Error::custom(format!(
                    "invalid timestamp in credential report [{}]: {}",
                    v, e
                ))
            }),
    }
}
