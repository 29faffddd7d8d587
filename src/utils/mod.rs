pub mod base64;
pub mod http;
pub mod node_manip;
pub mod string;
pub mod url;
pub mod yaml;

// Re-export common utilities
pub use http::{FetchError, HttpFetcher, SubscriptionFetcher};
pub use yaml::YamlNode;
