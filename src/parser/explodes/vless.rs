use url::Url;

use super::common::{fragment_remark, host_port};
use crate::models::Proxy;
use crate::utils::url::url_decode;

/// Parse a VLESS link into a Proxy object
///
/// `vless://uuid@host:port?flow=..&type=..&security=tls#name`
pub fn explode_vless(vless: &str) -> Option<Proxy> {
    if !vless.starts_with("vless://") {
        return None;
    }
    let url = Url::parse(vless).ok()?;
    let (server, port) = host_port(&url)?;
    let uuid = url_decode(url.username());

    let mut flow = String::new();
    let mut network = String::new();
    let mut tls = false;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "flow" => flow = value.into_owned(),
            "type" => network = value.into_owned(),
            "security" => tls = value == "tls",
            _ => {}
        }
    }

    Some(Proxy::vless_construct(
        &fragment_remark(&url),
        &server,
        port,
        &uuid,
        &flow,
        &network,
        tls,
    ))
}
