use log::error;

use crate::constants::{URL_TEST_INTERVAL, URL_TEST_PROBE};
use crate::models::{ExtraSettings, Proxy, ProxyDetail, AUTO_GROUP_NAME, SELECT_GROUP_NAME};
use crate::utils::yaml::YamlNode;

/// Build the `proxies` entry of one node
///
/// Every entry starts with `name`, `server` and `port` (plus `udp` when
/// enabled); protocol fields follow.
pub fn proxy_to_clash_yaml(node: &Proxy, ext: &ExtraSettings) -> YamlNode {
    let base = YamlNode::map()
        .with("name", node.remark.as_str())
        .with("server", node.server.as_str())
        .with("port", node.port)
        .with("udp", ext.udp.then_some(true));

    match &node.detail {
        ProxyDetail::Shadowsocks(ss) => base
            .with("type", "ss")
            .with("cipher", ss.method.as_str())
            .with("password", ss.password.as_str()),
        ProxyDetail::VMess(vmess) => {
            let ws_opts = vmess.ws.as_ref().map(|ws| {
                YamlNode::map().with("path", ws.path.as_str()).with(
                    "headers",
                    ws.host
                        .as_deref()
                        .map(|host| YamlNode::map().with("Host", host)),
                )
            });
            base.with("type", "vmess")
                .with("uuid", vmess.uuid.as_str())
                .with("alterId", vmess.alter_id)
                .with("cipher", "auto")
                .with("network", vmess.network.as_str())
                .with("tls", vmess.tls)
                .with("skip-cert-verify", ext.skip_cert_verify)
                .with("ws-opts", ws_opts)
        }
        ProxyDetail::Vless(vless) => base
            .with("type", "vless")
            .with("uuid", vless.uuid.as_str())
            .with("flow", vless.flow.as_str())
            .with("network", vless.network.as_str())
            .with("tls", vless.tls),
        ProxyDetail::Trojan(trojan) => base
            .with("type", "trojan")
            .with("password", trojan.password.as_str())
            .with("sni", trojan.sni.as_str()),
        ProxyDetail::Hysteria2(hy2) => base
            .with("type", "hysteria2")
            .with("password", hy2.password.as_str())
            .with("sni", hy2.sni.as_deref())
            .with("skip-cert-verify", hy2.insecure || ext.skip_cert_verify),
    }
}

/// Convert proxies to Clash format
///
/// Output is a `proxies` list followed by a select group (auto group,
/// `DIRECT`, then every node) and a url-test group over every node. The
/// same document is served to Clash, Clash.Meta and Stash.
pub fn proxy_to_clash(nodes: &[Proxy], ext: &ExtraSettings) -> String {
    let proxies: Vec<YamlNode> = nodes.iter().map(|node| proxy_to_clash_yaml(node, ext)).collect();
    let names: Vec<&str> = nodes.iter().map(|node| node.remark.as_str()).collect();

    let mut select_members = vec![AUTO_GROUP_NAME, "DIRECT"];
    select_members.extend(names.iter().copied());

    let groups = vec![
        YamlNode::map()
            .with("name", SELECT_GROUP_NAME)
            .with("type", "select")
            .with("proxies", select_members),
        YamlNode::map()
            .with("name", AUTO_GROUP_NAME)
            .with("type", "url-test")
            .with("proxies", names)
            .with("url", URL_TEST_PROBE)
            .with("interval", URL_TEST_INTERVAL),
    ];

    let config = YamlNode::map()
        .with("proxies", proxies)
        .with("proxy-groups", groups);

    let body = config.to_string().unwrap_or_else(|e| {
        error!("Failed to serialize clash config: {}", e);
        String::new()
    });
    format!("# Generated by submerge\n# Nodes: {}\n\n{}", nodes.len(), body)
}
