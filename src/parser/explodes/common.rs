use log::debug;
use url::Url;

use crate::models::Proxy;
use crate::utils::url::url_decode;

/// Explode a proxy link into a Proxy object
///
/// Detects the link type from its scheme and calls the matching parser.
/// Returns `None` for unknown schemes and for links the parser rejects.
pub fn explode(link: &str) -> Option<Proxy> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }

    let node = if link.starts_with("ss://") {
        super::ss::explode_ss(link)
    } else if link.starts_with("vmess://") {
        super::vmess::explode_vmess(link)
    } else if link.starts_with("vless://") {
        super::vless::explode_vless(link)
    } else if link.starts_with("trojan://") {
        super::trojan::explode_trojan(link)
    } else if link.starts_with("hysteria2://") || link.starts_with("hy2://") {
        super::hysteria2::explode_hysteria2(link)
    } else {
        debug!("Skipping link with unsupported scheme");
        return None;
    };

    if node.is_none() {
        debug!("Dropping malformed link: {}", link);
    }
    node
}

/// Host and port of a parsed link. Both are required and the port must
/// not be 0.
pub(super) fn host_port(url: &Url) -> Option<(String, u16)> {
    let host = url
        .host_str()?
        .trim_start_matches('[')
        .trim_end_matches(']');
    if host.is_empty() {
        return None;
    }
    let port = url.port().filter(|p| *p != 0)?;
    Some((host.to_string(), port))
}

/// Percent-decoded fragment, empty when the link has none
pub(super) fn fragment_remark(url: &Url) -> String {
    url.fragment().map(url_decode).unwrap_or_default()
}
