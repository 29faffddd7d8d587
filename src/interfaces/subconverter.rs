use std::collections::BTreeMap;

use log::info;
use serde::Serialize;

use crate::generator::config::formats::export;
use crate::interfaces::ConvertError;
use crate::models::extra_settings::split_keywords;
use crate::models::{
    ExtraSettings, Proxy, ProxyType, RenameRule, SubconverterTarget, TransformSettings,
};
use crate::parser::merge::{merge_subscriptions, SourceSummary};
use crate::parser::subparser::parse_subscription;
use crate::settings::DefaultOptions;
use crate::utils::http::SubscriptionFetcher;
use crate::utils::node_manip::preprocess_nodes;

/// Options of one conversion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubconverterConfig {
    /// Target conversion format
    pub target: SubconverterTarget,
    /// Subscription URLs, used by the fetching entry points
    pub urls: Vec<String>,
    /// Filter, rename, emoji and sort options
    pub transform: TransformSettings,
    /// Encoder options
    pub extra: ExtraSettings,
    /// Drop repeated `(kind, server, port)` nodes when merging
    pub dedupe: bool,
}

/// Builder for SubconverterConfig
#[derive(Debug, Clone)]
pub struct SubconverterConfigBuilder {
    config: SubconverterConfig,
    target_error: Option<ConvertError>,
}

impl Default for SubconverterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SubconverterConfigBuilder {
    /// Create a new builder with every option off except `udp` and
    /// `dedupe`, targeting Clash
    pub fn new() -> Self {
        SubconverterConfigBuilder {
            config: SubconverterConfig {
                target: SubconverterTarget::Clash,
                urls: Vec::new(),
                transform: TransformSettings::default(),
                extra: ExtraSettings::default(),
                dedupe: true,
            },
            target_error: None,
        }
    }

    /// Create a builder preloaded with configured defaults
    pub fn with_defaults(defaults: &DefaultOptions) -> Self {
        Self::new()
            .add_emoji(defaults.emoji)
            .udp(defaults.udp)
            .skip_cert_verify(defaults.skip_cert_verify)
            .sort(defaults.sort)
            .dedupe(defaults.dedupe)
    }

    /// Set the target format
    pub fn target(mut self, target: SubconverterTarget) -> Self {
        self.config.target = target;
        self.target_error = None;
        self
    }

    /// Set the target format from its identifier; an unknown identifier
    /// makes `build` fail
    pub fn target_from_str(mut self, target: &str) -> Self {
        match target.parse() {
            Ok(target) => {
                self.config.target = target;
                self.target_error = None;
            }
            Err(e) => self.target_error = Some(e),
        }
        self
    }

    pub fn add_url(mut self, url: &str) -> Self {
        self.config.urls.push(url.to_string());
        self
    }

    pub fn urls(mut self, urls: Vec<String>) -> Self {
        self.config.urls = urls;
        self
    }

    /// Set include keywords from a `|` delimited list
    pub fn include_remarks_from_str(mut self, include: &str) -> Self {
        self.config.transform.include_remarks = split_keywords(include);
        self
    }

    /// Set exclude keywords from a `|` delimited list
    pub fn exclude_remarks_from_str(mut self, exclude: &str) -> Self {
        self.config.transform.exclude_remarks = split_keywords(exclude);
        self
    }

    /// Set rename rules from newline separated `from->to` lines
    pub fn rename_from_str(mut self, rename: &str) -> Self {
        self.config.transform.rename_array = RenameRule::parse_list(rename);
        self
    }

    pub fn add_emoji(mut self, enable: bool) -> Self {
        self.config.transform.add_emoji = enable;
        self
    }

    pub fn sort(mut self, sort: bool) -> Self {
        self.config.transform.sort_flag = sort;
        self
    }

    pub fn udp(mut self, udp: bool) -> Self {
        self.config.extra.udp = udp;
        self
    }

    pub fn skip_cert_verify(mut self, skip: bool) -> Self {
        self.config.extra.skip_cert_verify = skip;
        self
    }

    pub fn dedupe(mut self, dedupe: bool) -> Self {
        self.config.dedupe = dedupe;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<SubconverterConfig, ConvertError> {
        match self.target_error {
            Some(err) => Err(err),
            None => Ok(self.config),
        }
    }
}

/// Encoded configuration with its content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOutput {
    pub content: String,
    pub mime_type: &'static str,
    pub extension: &'static str,
}

/// Aggregate numbers of a merge request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeSummary {
    pub total_sources: usize,
    pub successful_fetches: usize,
    pub failed_fetches: usize,
    /// Nodes in the output, after deduplication and filtering
    pub total_nodes: usize,
    /// Whether deduplication was requested
    pub deduped: bool,
    pub duplicates_removed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutput {
    pub output: ConvertOutput,
    pub summary: MergeSummary,
    pub subscriptions: Vec<SourceSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProxyType,
    pub server: String,
    pub port: u16,
}

/// Node list of a merge without transforms or encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergePreview {
    pub total: usize,
    #[serde(rename = "byType")]
    pub by_kind: BTreeMap<ProxyType, usize>,
    pub nodes: Vec<PreviewNode>,
}

fn encode(nodes: &[Proxy], config: &SubconverterConfig) -> ConvertOutput {
    let target = config.target;
    info!("Generate target: {} ({} nodes)", target, nodes.len());

    ConvertOutput {
        content: export(nodes, target, &config.extra),
        mime_type: target.mime_type(),
        extension: target.file_extension(),
    }
}

/// Run the transform chain over decoded nodes and encode them
pub fn convert_nodes(nodes: Vec<Proxy>, config: &SubconverterConfig) -> ConvertOutput {
    let nodes = preprocess_nodes(nodes, &config.transform);
    encode(&nodes, config)
}

/// Convert one subscription body
pub fn convert_one(content: &str, config: &SubconverterConfig) -> ConvertOutput {
    convert_nodes(parse_subscription(content), config)
}

/// Fetch one subscription and convert it. Unlike the merge path, a
/// failed fetch fails the request.
pub async fn convert_url<F: SubscriptionFetcher>(
    fetcher: &F,
    url: &str,
    config: &SubconverterConfig,
) -> Result<ConvertOutput, ConvertError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ConvertError::MissingUrl);
    }

    info!("Processing subscription conversion request to {}", config.target);
    let body = fetcher
        .fetch(url)
        .await
        .map_err(|source| ConvertError::Fetch {
            url: url.to_string(),
            source,
        })?;
    Ok(convert_one(&body, config))
}

/// Trimmed, non-empty source URLs
fn source_urls(urls: &[String]) -> Result<Vec<String>, ConvertError> {
    let urls: Vec<String> = urls
        .iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();
    if urls.is_empty() {
        return Err(ConvertError::MissingSources);
    }
    Ok(urls)
}

/// Fetch every subscription in `config.urls`, merge, transform and encode
pub async fn convert_merged<F: SubscriptionFetcher>(
    fetcher: &F,
    config: &SubconverterConfig,
) -> Result<MergeOutput, ConvertError> {
    let urls = source_urls(&config.urls)?;
    let merged = merge_subscriptions(fetcher, &urls, config.dedupe).await;

    let successful_fetches = merged.successful_fetches();
    let failed_fetches = merged.failed_fetches();
    let nodes = preprocess_nodes(merged.nodes, &config.transform);

    Ok(MergeOutput {
        output: encode(&nodes, config),
        summary: MergeSummary {
            total_sources: urls.len(),
            successful_fetches,
            failed_fetches,
            total_nodes: nodes.len(),
            deduped: config.dedupe,
            duplicates_removed: merged.duplicates,
        },
        subscriptions: merged.sources,
    })
}

/// Fetch, merge and optionally dedupe, then describe the nodes without
/// transforming or encoding them
pub async fn preview<F: SubscriptionFetcher>(
    fetcher: &F,
    urls: &[String],
    dedupe: bool,
) -> Result<MergePreview, ConvertError> {
    let urls = source_urls(urls)?;
    let merged = merge_subscriptions(fetcher, &urls, dedupe).await;

    let mut by_kind = BTreeMap::new();
    for node in &merged.nodes {
        *by_kind.entry(node.proxy_type()).or_insert(0) += 1;
    }

    Ok(MergePreview {
        total: merged.nodes.len(),
        by_kind,
        nodes: merged
            .nodes
            .into_iter()
            .map(|node| PreviewNode {
                kind: node.proxy_type(),
                name: node.remark,
                server: node.server,
                port: node.port,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_rejects_unknown_target() {
        let err = SubconverterConfigBuilder::new()
            .target_from_str("mellow")
            .build()
            .unwrap_err();
        assert_eq!(err, ConvertError::InvalidTarget("mellow".to_string()));
        assert_eq!(err.code(), "invalid_target");
    }

    #[test]
    fn test_builder_options() {
        let config = SubconverterConfigBuilder::with_defaults(&DefaultOptions::default())
            .target_from_str("SingBox")
            .include_remarks_from_str("HK|JP")
            .rename_from_str("HK->Hong Kong")
            .udp(false)
            .add_url("http://a/sub")
            .add_url("http://b/sub")
            .build()
            .unwrap();
        assert_eq!(config.target, SubconverterTarget::SingBox);
        assert_eq!(config.urls, vec!["http://a/sub", "http://b/sub"]);
        assert_eq!(config.transform.include_remarks, vec!["HK", "JP"]);
        assert_eq!(config.transform.rename_array.len(), 1);
        assert!(config.transform.add_emoji);
        assert!(!config.extra.udp);
        assert!(config.dedupe);
    }

    #[test]
    fn test_convert_one_sets_content_type() {
        let config = SubconverterConfigBuilder::new()
            .target(SubconverterTarget::Loon)
            .build()
            .unwrap();
        let output = convert_one("trojan://pw@1.2.3.4:443#T", &config);
        assert_eq!(output.content, "T = trojan,1.2.3.4,443,\"pw\"");
        assert_eq!(output.mime_type, "text/plain");
        assert_eq!(output.extension, "conf");
    }
}
