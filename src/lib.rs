pub mod constants;
pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;
#[cfg(feature = "web-api")]
pub mod web_handlers;

// Re-export the main proxy types for easier access
pub use models::{Proxy, ProxyType, SubconverterTarget};

// Re-export the conversion entry points
pub use interfaces::{
    convert_merged, convert_one, convert_url, preview, ConvertError, SubconverterConfig,
    SubconverterConfigBuilder,
};
pub use settings::Settings;
