use serde_json::Value;

use crate::models::Proxy;
use crate::utils::base64::base64_decode;
use crate::utils::url::parse_port;

/// Reads a field that providers emit either as a JSON string or a number.
fn string_or_number(json: &Value, key: &str) -> Option<String> {
    match &json[key] {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn str_field<'a>(json: &'a Value, key: &str) -> &'a str {
    json[key].as_str().unwrap_or("")
}

/// Parse a VMess link into a Proxy object
///
/// The body after `vmess://` is base64 encoded JSON using the v2rayN
/// field names (`ps`, `add`, `port`, `id`, `aid`, `net`, `tls`, `path`,
/// `host`).
pub fn explode_vmess(vmess: &str) -> Option<Proxy> {
    let encoded = vmess.strip_prefix("vmess://")?;
    let decoded = base64_decode(encoded)?;
    let json: Value = serde_json::from_str(&decoded).ok()?;
    if !json.is_object() {
        return None;
    }

    let server = str_field(&json, "add");
    if server.is_empty() {
        return None;
    }
    let port = parse_port(&string_or_number(&json, "port")?)?;
    let alter_id = string_or_number(&json, "aid")
        .and_then(|aid| aid.trim().parse::<u32>().ok())
        .unwrap_or(0);

    Some(Proxy::vmess_construct(
        str_field(&json, "ps"),
        server,
        port,
        str_field(&json, "id"),
        alter_id,
        str_field(&json, "net"),
        str_field(&json, "tls") == "tls",
        str_field(&json, "path"),
        str_field(&json, "host"),
    ))
}
