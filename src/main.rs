// CredNag - IAM credential expiration auditor and notification bot

use anyhow::Result;
use clap::Parser;
use crednag::commands::CommandRouter;
use crednag::Args;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging - respect RUST_LOG environment variable
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let args = Args::parse();

    let command = CommandRouter::route(args);
    debug!("Executing {}", command.name());
    command.execute().await
}
