// ConfigExampleCommand - write a default settings file

use super::Command;
use crate::config::Settings;
use crate::{Args, Result};
use async_trait::async_trait;
use colored::Colorize;

/// Writes a settings file populated with defaults, as a starting point
/// for operator customization.
pub struct ConfigExampleCommand {
    args: Args,
}

impl ConfigExampleCommand {
    pub fn new(args: Args) -> Self {
        Self { args }
    }
}

#[async_trait]
impl Command for ConfigExampleCommand {
    async fn execute(&self) -> Result<()> {
        let path = self
            .args
            .config_example
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("--config-example requires a file path"))?;

        Settings::default().save_to_file(path)?;
        println!(
            "{} Example settings saved to: {}",
            "✓".green(),
            path.display()
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "ConfigExampleCommand"
    }
}
