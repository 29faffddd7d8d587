//! Core data models for the application
//!
//! This module contains the primary data structures used throughout the application,
//! separated from the logic that operates on them.
//!
//! # Usage
//!
//! Nodes are built by the link decoders, but the constructors are public:
//!
//! ```rust
//! use submerge::models::{Proxy, ProxyType};
//!
//! let proxy = Proxy::trojan_construct("Tokyo 01", "jp.example.com", 443, "secret", "");
//! assert_eq!(proxy.proxy_type(), ProxyType::Trojan);
//! assert_eq!(proxy.dedup_key(), (ProxyType::Trojan, "jp.example.com", 443));
//! ```
//!
//! Protocol fields live in [`ProxyDetail`]; match on it to reach them:
//!
//! ```rust
//! use submerge::models::{Proxy, ProxyDetail};
//!
//! let proxy = Proxy::ss_construct("", "127.0.0.1", 8388, "aes-256-gcm", "pw");
//! if let ProxyDetail::Shadowsocks(ss) = &proxy.detail {
//!     assert_eq!(ss.method, "aes-256-gcm");
//! }
//! assert_eq!(proxy.remark, "SS Node");
//! ```

mod builder;
pub mod extra_settings;
mod proxy;
pub mod target;

pub use extra_settings::{ExtraSettings, RenameRule, TransformSettings};
pub use proxy::*;
pub use target::SubconverterTarget;
