//! Region flags used to decorate node remarks.

/// Region markers in priority order. The first entry with a keyword found
/// in the remark decides the flag.
pub const REGION_EMOJIS: &[(&[&str], &str)] = &[
    (&["香港", "HK"], "🇭🇰"),
    (&["台湾", "TW"], "🇹🇼"),
    (&["日本", "JP"], "🇯🇵"),
    (&["新加坡", "SG"], "🇸🇬"),
    (&["美国", "US"], "🇺🇸"),
    (&["韩国", "KR"], "🇰🇷"),
    (&["英国", "UK"], "🇬🇧"),
    (&["德国", "DE"], "🇩🇪"),
    (&["法国", "FR"], "🇫🇷"),
    (&["俄罗斯", "RU"], "🇷🇺"),
];

/// Prepended when no region keyword matches
pub const FALLBACK_EMOJI: &str = "🌐";
