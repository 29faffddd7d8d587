use url::Url;

use super::common::{fragment_remark, host_port};
use crate::models::Proxy;
use crate::utils::url::url_decode;

/// Parse a Trojan link into a Proxy object
///
/// `trojan://password@host:port?sni=..#name`. The older `peer` parameter
/// is read when `sni` is absent; with neither, the SNI is the server.
pub fn explode_trojan(trojan: &str) -> Option<Proxy> {
    if !trojan.starts_with("trojan://") {
        return None;
    }
    let url = Url::parse(trojan).ok()?;

    let password = url_decode(url.username());
    if password.is_empty() {
        return None;
    }
    let (server, port) = host_port(&url)?;

    let mut sni = String::new();
    let mut peer = String::new();
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "sni" => sni = value.into_owned(),
            "peer" => peer = value.into_owned(),
            _ => {}
        }
    }
    if sni.is_empty() {
        sni = peer;
    }

    Some(Proxy::trojan_construct(
        &fragment_remark(&url),
        &server,
        port,
        &password,
        &sni,
    ))
}
