//! Proxy model definitions
//!
//! Contains the normalized node representation every decoder produces and
//! every encoder consumes.

use serde::Serialize;
use std::fmt;

/// Represents the type of a proxy.
/// This is the canonical enum used for proxy type identification across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyType {
    #[serde(rename = "ss")]
    Shadowsocks,
    VMess,
    Vless,
    Trojan,
    Hysteria2,
}

impl ProxyType {
    /// Short identifier, identical to the link scheme.
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyType::Shadowsocks => "ss",
            ProxyType::VMess => "vmess",
            ProxyType::Vless => "vless",
            ProxyType::Trojan => "trojan",
            ProxyType::Hysteria2 => "hysteria2",
        }
    }

    /// Remark used when a link carries no name of its own.
    pub fn default_remark(self) -> &'static str {
        match self {
            ProxyType::Shadowsocks => "SS Node",
            ProxyType::VMess => "VMess Node",
            ProxyType::Vless => "VLESS Node",
            ProxyType::Trojan => "Trojan Node",
            ProxyType::Hysteria2 => "Hysteria2 Node",
        }
    }
}

impl fmt::Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WebSocket transport settings of a VMess node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSocketOptions {
    pub path: String,
    /// Value of the `Host` header, only set when the link provided one.
    pub host: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowsocksDetail {
    pub method: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VMessDetail {
    pub uuid: String,
    pub alter_id: u32,
    pub network: String,
    pub tls: bool,
    /// Present only when `network == "ws"`.
    pub ws: Option<WebSocketOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlessDetail {
    pub uuid: String,
    pub flow: String,
    pub network: String,
    pub tls: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrojanDetail {
    pub password: String,
    pub sni: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hysteria2Detail {
    pub password: String,
    pub insecure: bool,
    pub sni: Option<String>,
}

/// Protocol specific part of a node. Only the variant matching the node's
/// kind exists, so encoders match on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyDetail {
    Shadowsocks(ShadowsocksDetail),
    VMess(VMessDetail),
    Vless(VlessDetail),
    Trojan(TrojanDetail),
    Hysteria2(Hysteria2Detail),
}

/// Represents a proxy configuration.
///
/// Values are never mutated after a decoder built them; the transform chain
/// derives new values through [`Proxy::with_remark`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proxy {
    pub remark: String,
    pub server: String,
    pub port: u16,
    pub detail: ProxyDetail,
}

impl Proxy {
    pub fn proxy_type(&self) -> ProxyType {
        match self.detail {
            ProxyDetail::Shadowsocks(_) => ProxyType::Shadowsocks,
            ProxyDetail::VMess(_) => ProxyType::VMess,
            ProxyDetail::Vless(_) => ProxyType::Vless,
            ProxyDetail::Trojan(_) => ProxyType::Trojan,
            ProxyDetail::Hysteria2(_) => ProxyType::Hysteria2,
        }
    }

    /// Key used to recognize the same endpoint across merged subscriptions.
    pub fn dedup_key(&self) -> (ProxyType, &str, u16) {
        (self.proxy_type(), self.server.as_str(), self.port)
    }

    /// Returns a copy of this node carrying a different remark.
    pub fn with_remark(&self, remark: impl Into<String>) -> Proxy {
        Proxy {
            remark: remark.into(),
            ..self.clone()
        }
    }
}

/// Default labels of the two proxy groups generated for rule-router targets.
pub const SELECT_GROUP_NAME: &str = "🚀 节点选择";
pub const AUTO_GROUP_NAME: &str = "♻️ 自动选择";
