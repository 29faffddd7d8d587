use serde_json::{json, Value};

use crate::models::{ExtraSettings, Proxy, ProxyDetail};

/// Build the outbound object of one node
///
/// VLESS nodes keep only the tag/server/port base; sing-box rejects
/// unknown keys, so nothing is guessed for them.
fn proxy_to_singbox_outbound(node: &Proxy, ext: &ExtraSettings) -> Value {
    let mut outbound = json!({
        "tag": node.remark,
        "server": node.server,
        "server_port": node.port,
    });

    let detail = match &node.detail {
        ProxyDetail::Shadowsocks(ss) => json!({
            "type": "shadowsocks",
            "method": ss.method,
            "password": ss.password,
        }),
        ProxyDetail::VMess(vmess) => json!({
            "type": "vmess",
            "uuid": vmess.uuid,
            "alter_id": vmess.alter_id,
        }),
        ProxyDetail::Trojan(trojan) => json!({
            "type": "trojan",
            "password": trojan.password,
        }),
        ProxyDetail::Hysteria2(hy2) => {
            let mut tls = json!({
                "enabled": true,
                "insecure": hy2.insecure || ext.skip_cert_verify,
            });
            if let Some(sni) = &hy2.sni {
                tls["server_name"] = json!(sni);
            }
            json!({
                "type": "hysteria2",
                "password": hy2.password,
                "tls": tls,
            })
        }
        ProxyDetail::Vless(_) => return outbound,
    };

    if let (Value::Object(base), Value::Object(fields)) = (&mut outbound, detail) {
        base.extend(fields);
    }
    outbound
}

/// Convert proxies to SingBox format
///
/// The outbound list is a `proxy` selector over every node, one outbound
/// per node, then `direct`. Also used for NekoBox.
pub fn proxy_to_singbox(nodes: &[Proxy], ext: &ExtraSettings) -> String {
    let tags: Vec<&str> = nodes.iter().map(|node| node.remark.as_str()).collect();

    let mut outbounds = Vec::with_capacity(nodes.len() + 2);
    outbounds.push(json!({
        "tag": "proxy",
        "type": "selector",
        "outbounds": tags,
    }));
    outbounds.extend(nodes.iter().map(|node| proxy_to_singbox_outbound(node, ext)));
    outbounds.push(json!({
        "tag": "direct",
        "type": "direct",
    }));

    serde_json::to_string_pretty(&json!({ "outbounds": outbounds })).unwrap_or_default()
}
