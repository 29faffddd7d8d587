use log::debug;

use crate::models::Proxy;
use crate::parser::explodes::explode;
use crate::utils::base64::base64_decode;

/// Returns the text the link lines should be read from.
///
/// The whole body is decoded first and the result is only used when it
/// contains a scheme marker. A plain body that happens to be valid base64
/// without a `://` inside stays as it is.
fn unwrap_subscription(content: &str) -> String {
    match base64_decode(content.trim()) {
        Some(decoded) if decoded.contains("://") => {
            debug!("Subscription body is base64 encoded");
            decoded
        }
        _ => content.to_string(),
    }
}

/// Parse a subscription body into nodes
///
/// Lines are trimmed and blank lines skipped. Lines with an unknown scheme
/// or a malformed link are dropped without error; the output keeps input
/// order.
pub fn parse_subscription(content: &str) -> Vec<Proxy> {
    let content = unwrap_subscription(content);

    let mut nodes = Vec::new();
    let mut dropped = 0usize;
    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match explode(line) {
            Some(node) => nodes.push(node),
            None => dropped += 1,
        }
    }

    debug!(
        "Parsed {} nodes from subscription, {} lines skipped",
        nodes.len(),
        dropped
    );
    nodes
}
