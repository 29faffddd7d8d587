use base64::{engine::general_purpose, Engine as _};

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Reverses a URL-safe Base64 string to standard Base64 format.
pub fn url_safe_base64_reverse(input: &str) -> String {
    input.replace('-', "+").replace('_', "/")
}

/// Decodes a Base64 string to its original form.
///
/// Accepts both the standard and the URL-safe alphabet, with or without
/// padding, and ignores embedded whitespace (subscriptions are often
/// wrapped at 76 columns).
///
/// # Returns
/// The decoded text, or `None` when the input is not valid Base64 or does
/// not decode to UTF-8.
pub fn base64_decode(input: &str) -> Option<String> {
    let mut cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned = url_safe_base64_reverse(cleaned.trim_end_matches('='));
    while cleaned.len() % 4 != 0 {
        cleaned.push('=');
    }

    let bytes = general_purpose::STANDARD.decode(cleaned.as_bytes()).ok()?;
    String::from_utf8(bytes).ok()
}
