use crate::models::{Proxy, ProxyDetail};

/// Convert a proxy to one Surge `[Proxy]` line
///
/// Returns `None` for kinds Surge output does not carry (VLESS, Hysteria2).
pub fn proxy_to_surge_line(node: &Proxy) -> Option<String> {
    let prefix = |kind: &str| format!("{} = {}, {}, {}", node.remark, kind, node.server, node.port);
    match &node.detail {
        ProxyDetail::Shadowsocks(ss) => Some(format!(
            "{}, encrypt-method={}, password={}",
            prefix("ss"),
            ss.method,
            ss.password
        )),
        ProxyDetail::VMess(vmess) => Some(format!("{}, username={}", prefix("vmess"), vmess.uuid)),
        ProxyDetail::Trojan(trojan) => {
            Some(format!("{}, password={}", prefix("trojan"), trojan.password))
        }
        ProxyDetail::Vless(_) | ProxyDetail::Hysteria2(_) => None,
    }
}

/// Convert proxies to Surge format
///
/// Also used for Surfboard, which reads the same proxy line syntax.
pub fn proxy_to_surge(nodes: &[Proxy]) -> String {
    nodes
        .iter()
        .filter_map(proxy_to_surge_line)
        .collect::<Vec<_>>()
        .join("\n")
}
