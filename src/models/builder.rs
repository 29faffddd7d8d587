//! Constructors used by the link decoders.
//!
//! Each constructor takes already validated parts and falls back to the
//! kind's default remark when the link had none.

use super::proxy::{
    Hysteria2Detail, Proxy, ProxyDetail, ProxyType, ShadowsocksDetail, TrojanDetail,
    VMessDetail, VlessDetail, WebSocketOptions,
};

fn remark_or_default(remark: &str, proxy_type: ProxyType) -> String {
    if remark.is_empty() {
        proxy_type.default_remark().to_string()
    } else {
        remark.to_string()
    }
}

impl Proxy {
    pub fn ss_construct(remark: &str, server: &str, port: u16, method: &str, password: &str) -> Self {
        Proxy {
            remark: remark_or_default(remark, ProxyType::Shadowsocks),
            server: server.to_string(),
            port,
            detail: ProxyDetail::Shadowsocks(ShadowsocksDetail {
                method: method.to_string(),
                password: password.to_string(),
            }),
        }
    }

    /// `path` and `host` are only kept for the `ws` network.
    #[allow(clippy::too_many_arguments)]
    pub fn vmess_construct(
        remark: &str,
        server: &str,
        port: u16,
        uuid: &str,
        alter_id: u32,
        network: &str,
        tls: bool,
        path: &str,
        host: &str,
    ) -> Self {
        let network = if network.is_empty() { "tcp" } else { network };
        let ws = (network == "ws").then(|| WebSocketOptions {
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            host: (!host.is_empty()).then(|| host.to_string()),
        });

        Proxy {
            remark: remark_or_default(remark, ProxyType::VMess),
            server: server.to_string(),
            port,
            detail: ProxyDetail::VMess(VMessDetail {
                uuid: uuid.to_string(),
                alter_id,
                network: network.to_string(),
                tls,
                ws,
            }),
        }
    }

    pub fn vless_construct(
        remark: &str,
        server: &str,
        port: u16,
        uuid: &str,
        flow: &str,
        network: &str,
        tls: bool,
    ) -> Self {
        Proxy {
            remark: remark_or_default(remark, ProxyType::Vless),
            server: server.to_string(),
            port,
            detail: ProxyDetail::Vless(VlessDetail {
                uuid: uuid.to_string(),
                flow: flow.to_string(),
                network: if network.is_empty() { "tcp" } else { network }.to_string(),
                tls,
            }),
        }
    }

    /// An empty `sni` falls back to the server address.
    pub fn trojan_construct(remark: &str, server: &str, port: u16, password: &str, sni: &str) -> Self {
        Proxy {
            remark: remark_or_default(remark, ProxyType::Trojan),
            server: server.to_string(),
            port,
            detail: ProxyDetail::Trojan(TrojanDetail {
                password: password.to_string(),
                sni: if sni.is_empty() { server } else { sni }.to_string(),
            }),
        }
    }

    pub fn hysteria2_construct(
        remark: &str,
        server: &str,
        port: u16,
        password: &str,
        insecure: bool,
        sni: Option<&str>,
    ) -> Self {
        Proxy {
            remark: remark_or_default(remark, ProxyType::Hysteria2),
            server: server.to_string(),
            port,
            detail: ProxyDetail::Hysteria2(Hysteria2Detail {
                password: password.to_string(),
                insecure,
                sni: sni.filter(|s| !s.is_empty()).map(str::to_string),
            }),
        }
    }
}
