use url::Url;

use super::common::{fragment_remark, host_port};
use crate::models::Proxy;
use crate::utils::url::url_decode;

/// Parse a Hysteria2 link into a Proxy object
///
/// Both `hysteria2://` and the short `hy2://` scheme are accepted.
pub fn explode_hysteria2(hysteria2: &str) -> Option<Proxy> {
    if !hysteria2.starts_with("hysteria2://") && !hysteria2.starts_with("hy2://") {
        return None;
    }
    let url = Url::parse(hysteria2).ok()?;
    let (server, port) = host_port(&url)?;
    let password = url_decode(url.username());

    let mut insecure = false;
    let mut sni = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "insecure" => insecure = value == "1" || value.eq_ignore_ascii_case("true"),
            "sni" => sni = Some(value.into_owned()),
            _ => {}
        }
    }

    Some(Proxy::hysteria2_construct(
        &fragment_remark(&url),
        &server,
        port,
        &password,
        insecure,
        sni.as_deref(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProxyDetail;

    #[test]
    fn test_full_link() {
        let node =
            explode_hysteria2("hysteria2://secret@hy.example.com:8443?insecure=1&sni=bing.com#HY2%20HK").unwrap();
        assert_eq!(node.remark, "HY2 HK");
        assert_eq!(node.server, "hy.example.com");
        assert_eq!(node.port, 8443);
        match node.detail {
            ProxyDetail::Hysteria2(h) => {
                assert_eq!(h.password, "secret");
                assert!(h.insecure);
                assert_eq!(h.sni.as_deref(), Some("bing.com"));
            }
            other => panic!("expected hysteria2, got {:?}", other),
        }
    }

    #[test]
    fn test_short_scheme_and_defaults() {
        let node = explode_hysteria2("hy2://secret@1.2.3.4:443?insecure=0").unwrap();
        assert_eq!(node.remark, "Hysteria2 Node");
        match node.detail {
            ProxyDetail::Hysteria2(h) => {
                assert!(!h.insecure);
                assert_eq!(h.sni, None);
            }
            other => panic!("expected hysteria2, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_missing_port() {
        assert!(explode_hysteria2("hysteria2://secret@1.2.3.4").is_none());
    }
}
