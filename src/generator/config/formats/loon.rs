use crate::models::{Proxy, ProxyDetail};

/// Convert a proxy to one Loon `[Proxy]` line; credentials are quoted
pub fn proxy_to_loon_line(node: &Proxy) -> Option<String> {
    let (kind, credentials) = match &node.detail {
        ProxyDetail::Shadowsocks(ss) => ("Shadowsocks", format!("{},\"{}\"", ss.method, ss.password)),
        ProxyDetail::VMess(vmess) => ("vmess", format!("auto,\"{}\"", vmess.uuid)),
        ProxyDetail::Trojan(trojan) => ("trojan", format!("\"{}\"", trojan.password)),
        ProxyDetail::Vless(_) | ProxyDetail::Hysteria2(_) => return None,
    };
    Some(format!(
        "{} = {},{},{},{}",
        node.remark, kind, node.server, node.port, credentials
    ))
}

/// Convert proxies to Loon format
pub fn proxy_to_loon(nodes: &[Proxy]) -> String {
    nodes
        .iter()
        .filter_map(proxy_to_loon_line)
        .collect::<Vec<_>>()
        .join("\n")
}
