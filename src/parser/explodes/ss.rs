use crate::models::Proxy;
use crate::utils::base64::base64_decode;
use crate::utils::url::{split_host_port, url_decode};

/// Parse a Shadowsocks link into a Proxy object
///
/// Accepts SIP002 (`ss://BASE64(method:password)@host:port#name`) and the
/// legacy form that base64-encodes the whole `method:password@host:port`.
/// Query parameters such as `plugin` are ignored.
pub fn explode_ss(ss: &str) -> Option<Proxy> {
    let content = ss.strip_prefix("ss://")?;

    let (content, remark) = match content.split_once('#') {
        Some((body, fragment)) => (body, url_decode(fragment)),
        None => (content, String::new()),
    };
    let content = content
        .split_once('?')
        .map_or(content, |(body, _)| body)
        .trim_end_matches('/');

    let (method, password, server, port) = match content.rsplit_once('@') {
        Some((userinfo, server_port)) => {
            let userinfo = url_decode(userinfo);
            let secret = base64_decode(&userinfo)?;
            let (method, password) = secret.split_once(':')?;
            let (server, port) = split_host_port(server_port)?;
            (method.to_string(), password.to_string(), server, port)
        }
        None => {
            let decoded = base64_decode(&url_decode(content))?;
            let (secret, server_port) = decoded.rsplit_once('@')?;
            let (method, password) = secret.split_once(':')?;
            let (server, port) = split_host_port(server_port)?;
            (method.to_string(), password.to_string(), server, port)
        }
    };

    if method.is_empty() {
        return None;
    }

    Some(Proxy::ss_construct(&remark, &server, port, &method, &password))
}
