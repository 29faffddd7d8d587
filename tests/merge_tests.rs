use std::collections::HashMap;

use futures::executor::block_on;
use serde_json::Value;
use submerge::interfaces::{
    convert_merged, convert_url, preview, ConvertError, SubconverterConfigBuilder,
};
use submerge::models::{ProxyType, SubconverterTarget};
use submerge::parser::merge_subscriptions;
use submerge::utils::base64::base64_encode;
use submerge::utils::{FetchError, SubscriptionFetcher};

/// Serves canned bodies; unknown URLs answer 404
struct MockFetcher {
    bodies: HashMap<String, String>,
}

impl MockFetcher {
    fn new(bodies: &[(&str, String)]) -> Self {
        MockFetcher {
            bodies: bodies
                .iter()
                .map(|(url, body)| (url.to_string(), body.clone()))
                .collect(),
        }
    }
}

impl SubscriptionFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.bodies.get(url).cloned().ok_or(FetchError::Status(404))
    }
}

const SS_LINK: &str = "ss://YWVzLTI1Ni1nY206cGFzc3dvcmQ=@1.1.1.1:8388#HK SS";
const TROJAN_LINK: &str = "trojan://secret@3.3.3.3:443#JP Trojan";
const HY2_LINK: &str = "hysteria2://pass@4.4.4.4:8443?insecure=1#SG Hy2";

fn vmess_link(remark: &str) -> String {
    format!(
        "vmess://{}",
        base64_encode(&format!(
            r#"{{"v":"2","ps":"{}","add":"2.2.2.2","port":"443","id":"uuid-1","aid":"0","net":"tcp","tls":""}}"#,
            remark
        ))
    )
}

fn two_sources() -> MockFetcher {
    let sub1 = format!("{}\n{}", SS_LINK, vmess_link("US VMess"));
    let sub2 = base64_encode(&format!(
        "{}\n{}\n{}",
        vmess_link("US VMess copy"),
        TROJAN_LINK,
        HY2_LINK
    ));
    MockFetcher::new(&[("http://a/sub1", sub1), ("http://b/sub2", sub2)])
}

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|u| u.to_string()).collect()
}

#[cfg(test)]
mod merge_tests {
    use super::*;

    #[test]
    fn test_merge_without_dedupe_keeps_everything() {
        let fetcher = two_sources();
        let merged = block_on(merge_subscriptions(
            &fetcher,
            &urls(&["http://a/sub1", "http://b/sub2"]),
            false,
        ));
        assert_eq!(merged.nodes.len(), 5);
        assert_eq!(merged.fetched, 5);
        assert_eq!(merged.duplicates, 0);
        assert_eq!(merged.sources[0].count, 2);
        assert_eq!(merged.sources[1].count, 3);
    }

    #[test]
    fn test_merge_with_dedupe_keeps_first() {
        let fetcher = two_sources();
        let merged = block_on(merge_subscriptions(
            &fetcher,
            &urls(&["http://a/sub1", "http://b/sub2"]),
            true,
        ));
        assert_eq!(merged.nodes.len(), 4);
        assert_eq!(merged.duplicates, 1);
        assert_eq!(merged.fetched, merged.nodes.len() + merged.duplicates);

        let vmess: Vec<_> = merged
            .nodes
            .iter()
            .filter(|n| n.proxy_type() == ProxyType::VMess)
            .collect();
        assert_eq!(vmess.len(), 1);
        assert_eq!(vmess[0].remark, "US VMess");
    }

    #[test]
    fn test_same_endpoint_different_kind_is_kept() {
        let body = "ss://YWVzLTI1Ni1nY206cGFzc3dvcmQ=@5.5.5.5:443#A\ntrojan://pw@5.5.5.5:443#B";
        let fetcher = MockFetcher::new(&[("http://c", body.to_string())]);
        let merged = block_on(merge_subscriptions(&fetcher, &urls(&["http://c"]), true));
        assert_eq!(merged.nodes.len(), 2);
        assert_eq!(merged.duplicates, 0);
    }

    #[test]
    fn test_failed_source_is_recorded() {
        let fetcher = two_sources();
        let merged = block_on(merge_subscriptions(
            &fetcher,
            &urls(&["http://a/sub1", "http://missing/sub"]),
            true,
        ));
        assert_eq!(merged.nodes.len(), 2);
        assert_eq!(merged.successful_fetches(), 1);
        assert_eq!(merged.failed_fetches(), 1);

        let failed = &merged.sources[1];
        assert_eq!(failed.index, 2);
        assert!(!failed.success);
        assert_eq!(failed.count, 0);
        assert_eq!(failed.error.as_deref(), Some("HTTP 404"));
    }

    #[test]
    fn test_source_counts_sum_to_fetched() {
        let fetcher = two_sources();
        let merged = block_on(merge_subscriptions(
            &fetcher,
            &urls(&["http://b/sub2", "http://a/sub1", "http://nowhere"]),
            true,
        ));
        let sum: usize = merged.sources.iter().map(|s| s.count).sum();
        assert_eq!(sum, merged.fetched);
        // sub2 comes first now, so its VMess node wins
        assert!(merged.nodes.iter().any(|n| n.remark == "US VMess copy"));
    }

    #[test]
    fn test_convert_merged_summary() {
        let fetcher = two_sources();
        let config = SubconverterConfigBuilder::new()
            .target(SubconverterTarget::SingBox)
            .urls(urls(&["http://a/sub1", " ", "http://b/sub2"]))
            .exclude_remarks_from_str("Hy2")
            .build()
            .unwrap();
        let merged = block_on(convert_merged(&fetcher, &config)).unwrap();

        assert_eq!(merged.summary.total_sources, 2);
        assert_eq!(merged.summary.successful_fetches, 2);
        assert_eq!(merged.summary.failed_fetches, 0);
        assert_eq!(merged.summary.duplicates_removed, 1);
        assert_eq!(merged.summary.total_nodes, 3);
        assert!(merged.summary.deduped);

        let doc: Value = serde_json::from_str(&merged.output.content).unwrap();
        // selector + 3 nodes + direct
        assert_eq!(doc["outbounds"].as_array().unwrap().len(), 5);

        let summary = serde_json::to_value(&merged.summary).unwrap();
        assert_eq!(summary["totalSources"], 2);
        assert_eq!(summary["duplicatesRemoved"], 1);
    }

    #[test]
    fn test_convert_merged_requires_sources() {
        let fetcher = two_sources();
        let config = SubconverterConfigBuilder::new()
            .add_url("")
            .add_url("  ")
            .build()
            .unwrap();
        assert_eq!(config.urls.len(), 2);
        assert_eq!(
            block_on(convert_merged(&fetcher, &config)),
            Err(ConvertError::MissingSources)
        );
    }

    #[test]
    fn test_convert_url_fetch_failure() {
        let fetcher = two_sources();
        let config = SubconverterConfigBuilder::new().build().unwrap();
        let err = block_on(convert_url(&fetcher, "http://missing", &config)).unwrap_err();
        assert_eq!(err.code(), "fetch_failed");
        assert_eq!(
            block_on(convert_url(&fetcher, "", &config)).unwrap_err(),
            ConvertError::MissingUrl
        );
    }

    #[test]
    fn test_preview_by_type() {
        let fetcher = two_sources();
        let result = block_on(preview(
            &fetcher,
            &urls(&["http://a/sub1", "http://b/sub2"]),
            true,
        ))
        .unwrap();
        assert_eq!(result.total, 4);
        assert_eq!(result.nodes.len(), 4);
        assert_eq!(result.by_kind.get(&ProxyType::VMess), Some(&1));
        assert_eq!(result.by_kind.values().sum::<usize>(), result.total);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["byType"]["ss"], 1);
        assert_eq!(json["byType"]["hysteria2"], 1);
        assert_eq!(json["nodes"][0]["type"], "ss");
        assert_eq!(json["nodes"][0]["name"], "HK SS");
        assert_eq!(json["nodes"][0]["port"], 8388);
    }
}
