// CommandRouter - routes CLI arguments to the appropriate Command

use super::{
    Command, ConfigExampleCommand, GenerateReportCommand, ProcessReportCommand,
    TestChannelsCommand,
};
use crate::Args;

/// Determines which Command to execute based on CLI arguments.
///
/// Routing priority:
/// 1. Settings example generation (--config-example)
/// 2. Credential report generation (--generate-report)
/// 3. Channel connectivity tests (--test-channels)
/// 4. Report processing (default)
pub struct CommandRouter;

impl CommandRouter {
    /// Route CLI arguments to the appropriate Command
    pub fn route(args: Args) -> Box<dyn Command> {
        if args.config_example.is_some() {
            return Box::new(ConfigExampleCommand::new(args));
        }

        if args.generate_report {
            return Box::new(GenerateReportCommand::new(args));
        }

        if args.test_channels {
            return Box::new(TestChannelsCommand::new(args));
        }

        Box::new(ProcessReportCommand::new(args))
    }
}
