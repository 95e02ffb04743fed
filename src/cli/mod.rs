// CLI module - command line interface and argument parsing

use clap::Parser;
use std::path::PathBuf;

/// CredNag - IAM credential expiration auditor and notification bot
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
#[command(name = "crednag")]
#[command(about = "Audit IAM credentials against age policy and nag their owners", long_about = None)]
pub struct Args {
    /// Path to the TOML settings file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Request generation of a fresh credential report and exit
    #[arg(long)]
    pub generate_report: bool,

    /// Send a connectivity test through each enabled channel and exit
    #[arg(long)]
    pub test_channels: bool,

    /// Write an example settings file and exit
    #[arg(long, value_name = "FILE")]
    pub config_example: Option<PathBuf>,

    /// Evaluate and render notifications without sending anything
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args_select_processing() {
        let args = Args::default();
        assert!(!args.generate_report);
        assert!(!args.test_channels);
        assert!(args.config_example.is_none());
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from(["crednag", "--generate-report", "--dry-run"]);
        assert!(args.generate_report);
        assert!(args.dry_run);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_parse_config_path() {
        let args = Args::parse_from(["crednag", "--config", "/etc/crednag.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/etc/crednag.toml")));
    }
}
