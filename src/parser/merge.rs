//! Fetching several subscriptions and joining their nodes.

use std::collections::HashSet;

use futures::future::join_all;
use log::{info, warn};
use serde::Serialize;

use crate::models::Proxy;
use crate::parser::subparser::parse_subscription;
use crate::utils::http::SubscriptionFetcher;
use crate::utils::string::truncate_with_ellipsis;

/// Characters of a source URL kept in its summary record
const SUMMARY_URL_LENGTH: usize = 50;

/// Outcome of fetching and parsing one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSummary {
    /// 1-based position in the request
    pub index: usize,
    pub url: String,
    pub success: bool,
    pub count: usize,
    pub error: Option<String>,
}

/// Concatenated nodes of every source plus one summary per source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    pub nodes: Vec<Proxy>,
    pub sources: Vec<SourceSummary>,
    /// Node count before deduplication
    pub fetched: usize,
    /// Number of nodes dropped as duplicates
    pub duplicates: usize,
}

impl MergeResult {
    pub fn successful_fetches(&self) -> usize {
        self.sources.iter().filter(|s| s.success).count()
    }

    pub fn failed_fetches(&self) -> usize {
        self.sources.len() - self.successful_fetches()
    }
}

/// Fetches and parses every source concurrently.
///
/// All fetches are awaited; a failure only affects its own entry. The
/// result keeps request order.
pub async fn fetch_all<F: SubscriptionFetcher>(
    fetcher: &F,
    urls: &[String],
) -> Vec<(SourceSummary, Vec<Proxy>)> {
    let fetches = urls.iter().map(|url| fetcher.fetch(url));
    let bodies = join_all(fetches).await;

    urls.iter()
        .zip(bodies)
        .enumerate()
        .map(|(i, (url, body))| {
            let mut summary = SourceSummary {
                index: i + 1,
                url: truncate_with_ellipsis(url, SUMMARY_URL_LENGTH),
                success: false,
                count: 0,
                error: None,
            };
            match body {
                Ok(body) => {
                    let nodes = parse_subscription(&body);
                    summary.success = true;
                    summary.count = nodes.len();
                    (summary, nodes)
                }
                Err(e) => {
                    warn!("Failed to fetch subscription #{} ({}): {}", i + 1, url, e);
                    summary.error = Some(e.to_string());
                    (summary, Vec::new())
                }
            }
        })
        .collect()
}

/// Keeps the first node of every `(kind, server, port)` key.
pub fn dedupe_nodes(nodes: Vec<Proxy>) -> Vec<Proxy> {
    let mut seen = HashSet::new();
    let keep: Vec<bool> = nodes.iter().map(|node| seen.insert(node.dedup_key())).collect();
    drop(seen);
    nodes
        .into_iter()
        .zip(keep)
        .filter_map(|(node, keep)| keep.then_some(node))
        .collect()
}

/// Fetches every source, concatenates the nodes in source order and
/// optionally removes duplicates.
pub async fn merge_subscriptions<F: SubscriptionFetcher>(
    fetcher: &F,
    urls: &[String],
    dedupe: bool,
) -> MergeResult {
    let results = fetch_all(fetcher, urls).await;

    let mut sources = Vec::with_capacity(results.len());
    let mut nodes = Vec::new();
    for (summary, source_nodes) in results {
        sources.push(summary);
        nodes.extend(source_nodes);
    }

    let fetched = nodes.len();
    if dedupe {
        nodes = dedupe_nodes(nodes);
    }
    let duplicates = fetched - nodes.len();

    let merged = MergeResult {
        nodes,
        sources,
        fetched,
        duplicates,
    };
    info!(
        "Merged {} sources ({} failed): {} nodes, {} duplicates removed",
        merged.sources.len(),
        merged.failed_fetches(),
        merged.nodes.len(),
        merged.duplicates
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProxyType;

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let nodes = vec![
            Proxy::ss_construct("first", "1.1.1.1", 443, "m", "p"),
            Proxy::trojan_construct("other kind", "1.1.1.1", 443, "p", ""),
            Proxy::ss_construct("second", "1.1.1.1", 443, "m2", "p2"),
            Proxy::ss_construct("other port", "1.1.1.1", 444, "m", "p"),
        ];
        let out = dedupe_nodes(nodes);
        let names: Vec<_> = out.iter().map(|n| n.remark.as_str()).collect();
        assert_eq!(names, vec!["first", "other kind", "other port"]);
        assert_eq!(out[1].proxy_type(), ProxyType::Trojan);
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let nodes = vec![
            Proxy::ss_construct("a", "h", 1, "m", "p"),
            Proxy::ss_construct("b", "h", 1, "m", "p"),
            Proxy::ss_construct("c", "h", 2, "m", "p"),
        ];
        let once = dedupe_nodes(nodes);
        assert_eq!(dedupe_nodes(once.clone()), once);
    }
}
