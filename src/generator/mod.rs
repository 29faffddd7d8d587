pub mod config;

// Re-export format converters
pub use config::formats::{
    export, proxy_to_clash, proxy_to_clash_yaml, proxy_to_loon, proxy_to_quanx, proxy_to_singbox,
    proxy_to_single, proxy_to_surge, proxy_to_uri,
};
