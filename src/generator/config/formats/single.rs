use serde_json::{json, Map, Value};

use crate::models::{Proxy, ProxyDetail};
use crate::utils::base64::base64_encode;
use crate::utils::url::{format_host, url_encode};

/// Convert a proxy back to its share link
///
/// Only Shadowsocks, VMess and Trojan links are produced; other kinds
/// return `None`. Links decode back to an equal node.
pub fn proxy_to_uri(node: &Proxy) -> Option<String> {
    let host = format_host(&node.server);
    match &node.detail {
        ProxyDetail::Shadowsocks(ss) => {
            // Format: ss://BASE64(method:password)@server:port#remark
            let user_info = base64_encode(&format!("{}:{}", ss.method, ss.password));
            Some(format!(
                "ss://{}@{}:{}#{}",
                user_info,
                host,
                node.port,
                url_encode(&node.remark)
            ))
        }
        ProxyDetail::VMess(vmess) => {
            let mut data = Map::new();
            data.insert("v".to_string(), json!("2"));
            data.insert("ps".to_string(), json!(node.remark));
            data.insert("add".to_string(), json!(node.server));
            data.insert("port".to_string(), json!(node.port));
            data.insert("id".to_string(), json!(vmess.uuid));
            data.insert("aid".to_string(), json!(vmess.alter_id));
            data.insert("net".to_string(), json!(vmess.network));
            data.insert("tls".to_string(), json!(if vmess.tls { "tls" } else { "" }));
            if let Some(ws) = &vmess.ws {
                data.insert("path".to_string(), json!(ws.path));
                if let Some(ws_host) = &ws.host {
                    data.insert("host".to_string(), json!(ws_host));
                }
            }
            Some(format!(
                "vmess://{}",
                base64_encode(&Value::Object(data).to_string())
            ))
        }
        ProxyDetail::Trojan(trojan) => {
            let mut uri = format!(
                "trojan://{}@{}:{}",
                url_encode(&trojan.password),
                host,
                node.port
            );
            if trojan.sni != node.server {
                uri.push_str(&format!("?sni={}", url_encode(&trojan.sni)));
            }
            uri.push_str(&format!("#{}", url_encode(&node.remark)));
            Some(uri)
        }
        ProxyDetail::Vless(_) | ProxyDetail::Hysteria2(_) => None,
    }
}

/// Convert proxies to a base64 encoded link list
///
/// Used for Shadowrocket, V2RayN and V2RayNG.
pub fn proxy_to_single(nodes: &[Proxy]) -> String {
    let links: Vec<String> = nodes.iter().filter_map(proxy_to_uri).collect();
    base64_encode(&links.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::explodes::explode;
    use crate::utils::base64::base64_decode;

    #[test]
    fn test_links_decode_to_same_node() {
        let nodes = vec![
            Proxy::ss_construct("香港 01", "1.1.1.1", 8388, "chacha20-ietf-poly1305", "p:a/s+s="),
            Proxy::vmess_construct("JP #1", "jp.example.com", 443, "uuid-1", 2, "ws", true, "/ray", "cdn.example.com"),
            Proxy::vmess_construct("JP 2", "jp.example.com", 80, "uuid-2", 0, "tcp", false, "", ""),
            Proxy::trojan_construct("US", "us.example.com", 443, "p@ss word", "edge.example.com"),
            Proxy::trojan_construct("US 2", "2001:db8::1", 443, "pw", ""),
        ];
        for node in nodes {
            let uri = proxy_to_uri(&node).unwrap();
            assert_eq!(explode(&uri), Some(node), "{}", uri);
        }
    }

    #[test]
    fn test_unsupported_kinds_are_skipped() {
        let nodes = vec![
            Proxy::vless_construct("V", "2.2.2.2", 443, "id", "", "", false),
            Proxy::ss_construct("S", "1.1.1.1", 8388, "aes-128-gcm", "pw"),
        ];
        let decoded = base64_decode(&proxy_to_single(&nodes)).unwrap();
        assert_eq!(decoded.lines().count(), 1);
        assert!(decoded.starts_with("ss://"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(proxy_to_single(&[]), "");
    }
}
