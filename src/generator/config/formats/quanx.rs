use crate::models::{Proxy, ProxyDetail};
use crate::utils::url::format_host;

/// Convert a proxy to one QuantumultX `[server_local]` line
pub fn proxy_to_quanx_line(node: &Proxy) -> Option<String> {
    let address = format!("{}:{}", format_host(&node.server), node.port);
    let line = match &node.detail {
        ProxyDetail::Shadowsocks(ss) => format!(
            "shadowsocks={}, method={}, password={}",
            address, ss.method, ss.password
        ),
        ProxyDetail::VMess(vmess) => {
            format!("vmess={}, method=auto, password={}", address, vmess.uuid)
        }
        ProxyDetail::Trojan(trojan) => format!("trojan={}, password={}", address, trojan.password),
        ProxyDetail::Vless(_) | ProxyDetail::Hysteria2(_) => return None,
    };
    Some(format!("{}, tag={}", line, node.remark))
}

/// Convert proxies to QuantumultX format
pub fn proxy_to_quanx(nodes: &[Proxy]) -> String {
    nodes
        .iter()
        .filter_map(proxy_to_quanx_line)
        .collect::<Vec<_>>()
        .join("\n")
}
