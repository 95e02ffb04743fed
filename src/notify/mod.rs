// Notify module - aggregation and dispatch of findings

mod destination;
mod dispatcher;
mod notifications;

pub use destination::{
    resolve_destinations, ResolvedDestinations, TagSource, EMAIL_TAG, ROOT_ACCOUNT_NAME, SLACK_TAG,
};
pub use dispatcher::{notification_context, DispatchSummary, Dispatcher};
pub use notifications::Notifications;
