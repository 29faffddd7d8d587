use std::future::Future;
use std::time::Duration;

use log::debug;
use reqwest::{Client, Proxy};
use thiserror::Error;

use crate::settings::FetchSettings;

/// Why a subscription could not be downloaded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Source of raw subscription bodies.
///
/// Implementations must report every failure through the returned
/// `Result`; the pipeline treats an `Err` as "this source has no nodes".
pub trait SubscriptionFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>>;
}

/// How outbound requests reach the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyConfig {
    /// Honour the `HTTP(S)_PROXY` environment, reqwest's default
    System,
    /// Always connect directly
    Direct,
    /// Route through the given proxy URL
    Custom(String),
}

pub fn parse_proxy(proxy_str: &str) -> ProxyConfig {
    match proxy_str.trim() {
        "" | "SYSTEM" => ProxyConfig::System,
        "NONE" => ProxyConfig::Direct,
        other => ProxyConfig::Custom(other.to_string()),
    }
}

/// Fetches subscriptions over HTTP(S) with one shared client, so the
/// single and merged conversion paths apply the same timeout and
/// User-Agent.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let mut client_builder = Client::builder()
            .timeout(Duration::from_secs(settings.timeout))
            .user_agent(settings.user_agent.as_str());

        match parse_proxy(&settings.proxy) {
            ProxyConfig::System => {}
            ProxyConfig::Direct => client_builder = client_builder.no_proxy(),
            ProxyConfig::Custom(proxy) => {
                let proxy = Proxy::all(&proxy)
                    .map_err(|e| FetchError::Client(format!("invalid proxy: {}", e)))?;
                client_builder = client_builder.proxy(proxy);
            }
        }

        let client = client_builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(HttpFetcher { client })
    }
}

impl SubscriptionFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching subscription: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
