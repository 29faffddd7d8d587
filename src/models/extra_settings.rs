/// Settings for subscription export operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraSettings {
    /// Emit `udp: true` on structured formats
    pub udp: bool,
    /// Skip certificate verification where the format supports it
    pub skip_cert_verify: bool,
}

impl Default for ExtraSettings {
    fn default() -> Self {
        ExtraSettings {
            udp: true,
            skip_cert_verify: false,
        }
    }
}

/// One `from->to` line of a rename request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRule {
    pub pattern: String,
    pub replace: String,
}

impl RenameRule {
    /// Parses newline separated `from->to` rules. Lines without `->` and
    /// rules with an empty `from` are ignored.
    pub fn parse_list(input: &str) -> Vec<RenameRule> {
        input
            .lines()
            .filter_map(|line| line.split_once("->"))
            .map(|(from, to)| RenameRule {
                pattern: from.trim().to_string(),
                replace: to.trim().to_string(),
            })
            .filter(|rule| !rule.pattern.is_empty())
            .collect()
    }
}

/// Options of the filter → rename → emoji → sort chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformSettings {
    /// Keep nodes whose remark contains any of these keywords
    pub include_remarks: Vec<String>,
    /// Drop nodes whose remark contains any of these keywords
    pub exclude_remarks: Vec<String>,
    pub rename_array: Vec<RenameRule>,
    pub add_emoji: bool,
    pub sort_flag: bool,
}

/// Splits a `|` delimited keyword list, dropping empty keywords.
pub fn split_keywords(input: &str) -> Vec<String> {
    input
        .split('|')
        .filter(|kw| !kw.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rename_rules() {
        let rules = RenameRule::parse_list("香港 -> HK\nno arrow here\n->empty\nIEPL->专线\n");
        assert_eq!(
            rules,
            vec![
                RenameRule {
                    pattern: "香港".to_string(),
                    replace: "HK".to_string()
                },
                RenameRule {
                    pattern: "IEPL".to_string(),
                    replace: "专线".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_split_keywords_skips_empty() {
        assert_eq!(split_keywords("HK|JP|"), vec!["HK", "JP"]);
        assert!(split_keywords("").is_empty());
    }
}
