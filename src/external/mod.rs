// External service integrations

pub mod iam;

pub use iam::{IamReportSource, IamTagSource};
