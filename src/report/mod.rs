// Credential report - row model, CSV parsing and retrieval interface

mod entry;
mod source;

pub use entry::CredentialReportEntry;
pub use source::{CredentialReport, ReportSource};

use crate::Result;

/// Parse the CSV content of an IAM credential report into entries.
pub fn parse_report(content: &str) -> Result<Vec<CredentialReportEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut entries = Vec::new();
    for record in reader.deserialize() {
        let entry: CredentialReportEntry = record.map_err(crate::NagError::ReportParse)?;
        entries.push(entry);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT_HEADER: &str = "user,arn,user_creation_time,password_enabled,password_last_used,password_last_changed,password_next_rotation,mfa_active,access_key_1_active,access_key_1_last_rotated,access_key_1_last_used_date,access_key_1_last_used_region,access_key_1_last_used_service,access_key_2_active,access_key_2_last_rotated,access_key_2_last_used_date,access_key_2_last_used_region,access_key_2_last_used_service,cert_1_active,cert_1_last_rotated,cert_2_active,cert_2_last_rotated";

    #[test]
    fn test_parse_report() {
        let content = format!(
            "{}\n{}\n{}",
            REPORT_HEADER,
            "alice,arn:aws:iam::111122223333:user/alice,2020-01-15T10:00:00+00:00,true,2024-01-02T08:00:00+00:00,2023-11-01T09:30:00+00:00,N/A,true,true,2023-10-01T00:00:00+00:00,2024-01-01T00:00:00+00:00,us-east-1,s3,false,N/A,N/A,N/A,N/A,false,N/A,false,N/A",
            "<root_account>,arn:aws:iam::111122223333:root,2019-06-01T00:00:00+00:00,not_supported,2024-01-01T12:00:00+00:00,not_supported,not_supported,true,true,2019-06-01T00:00:00+00:00,N/A,N/A,N/A,false,N/A,N/A,N/A,N/A,false,N/A,false,N/A",
        );

        let entries = parse_report(&content).unwrap();
        assert_eq!(entries.len(), 2);

        let alice = &entries[0];
        assert_eq!(alice.user, "alice");
        assert_eq!(alice.password_enabled, Some(true));
        assert_eq!(alice.access_key_2_active, Some(false));
        assert!(alice.password_last_changed.is_some());
        assert!(alice.access_key_2_last_rotated.is_none());

        let root = &entries[1];
        assert_eq!(root.user, "<root_account>");
        // "not_supported" must stay distinct from a known false
        assert_eq!(root.password_enabled, None);
        assert_eq!(root.access_key_1_active, Some(true));
    }

    #[test]
    fn test_parse_report_empty_body() {
        let entries = parse_report(&format!("{}\n", REPORT_HEADER)).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_parse_report_malformed() {
        assert!(parse_report("user,arn\n\"unterminated").is_err());
    }
}
