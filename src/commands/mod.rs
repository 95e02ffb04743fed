// Commands module - Command Pattern implementation

mod command;
mod router;

mod config_example;
mod generate_report;
mod process_report;
mod test_channels;

pub use command::Command;
pub use router::CommandRouter;

// Re-export individual commands for testing purposes
pub use config_example::ConfigExampleCommand;
pub use generate_report::GenerateReportCommand;
pub use process_report::ProcessReportCommand;
pub use test_channels::TestChannelsCommand;
