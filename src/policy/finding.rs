// Finding - one detected policy violation or warning for one credential

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One policy finding for a single credential on a single principal.
///
/// `credential()` and `category()` are stable keys used to select the
/// notification template; the serialized form is the flat map exposed to
/// templates as `notification`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    PasswordWarning { days_left: i64 },
    PasswordExpired { days_over: i64 },
    AccessKeyWarning { access_key_id: String, days_left: i64 },
    AccessKeyExpired { access_key_id: String, days_over: i64 },
}

impl Finding {
    /// Credential kind key: "password" or "accessKey"
    pub fn credential(&self) -> &'static str {
        match self {
            Finding::PasswordWarning { .. } | Finding::PasswordExpired { .. } => "password",
            Finding::AccessKeyWarning { .. } | Finding::AccessKeyExpired { .. } => "accessKey",
        }
    }

    /// Category key: "warning" or "expired"
    pub fn category(&self) -> &'static str {
        match self {
            Finding::PasswordWarning { .. } | Finding::AccessKeyWarning { .. } => "warning",
            Finding::PasswordExpired { .. } | Finding::AccessKeyExpired { .. } => "expired",
        }
    }
}

impl Serialize for Finding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("credential", self.credential())?;
        map.serialize_entry("category", self.category())?;

        match self {
            Finding::PasswordWarning { days_left } => {
                map.serialize_entry("days_left", days_left)?;
            }
            Finding::PasswordExpired { days_over } => {
                map.serialize_entry("days_over", days_over)?;
            }
            Finding::AccessKeyWarning {
                access_key_id,
                days_left,
            } => {
                map.serialize_entry("access_key_id", access_key_id)?;
                map.serialize_entry("days_left", days_left)?;
            }
            Finding::AccessKeyExpired {
                access_key_id,
                days_over,
            } => {
                map.serialize_entry("access_key_id", access_key_id)?;
                map.serialize_entry("days_over", days_over)?;
            }
        }

        map.end()
    }
}
