pub mod explodes;
pub mod merge;
pub mod subparser;

pub use merge::{dedupe_nodes, merge_subscriptions, MergeResult, SourceSummary};
pub use subparser::parse_subscription;
