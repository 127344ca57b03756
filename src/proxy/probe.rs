//! Proxy probing
//!
//! A probe sends one HTTP GET through a candidate proxy and classifies
//! the outcome. Probes never fail: every transport error, timeout, and
//! unexpected status is folded into an [`ProbeOutcome::Invalid`].

use crate::proxy::models::{InvalidReason, ProbeOutcome, ProxyAddress};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, Proxy, StatusCode};
use std::time::Duration;

/// Default timeout for a single probe in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default URL requested through each candidate proxy
pub const DEFAULT_TARGET_URL: &str = "https://google.com/";

/// Regex pattern matching addresses that already carry a transport scheme
static SCHEME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?|socks[45])://").expect("Invalid scheme regex")
});

/// Configuration for a probe
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Timeout for the whole request, fixed per run
    pub timeout: Duration,
    /// URL the test request is sent to
    pub target_url: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            target_url: DEFAULT_TARGET_URL.to_string(),
        }
    }
}

impl ProbeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_target_url(mut self, url: String) -> Self {
        self.target_url = url;
        self
    }
}

/// A single test request through a proxy.
///
/// Tests substitute scripted implementations for the real HTTP prober.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, address: &ProxyAddress) -> ProbeOutcome;
}

/// Probes proxies with a throwaway reqwest client per address
pub struct HttpProber {
    config: ProbeConfig,
}

impl HttpProber {
    /// Create a new prober with default configuration
    pub fn new() -> Self {
        Self::with_config(ProbeConfig::default())
    }

    /// Create a new prober with custom configuration
    pub fn with_config(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// Proxy URL handed to reqwest.
    ///
    /// Addresses with an explicit scheme pass through verbatim; bare
    /// `host:port` addresses are bound as HTTP proxies. `Proxy::all`
    /// routes both plain and TLS traffic through the same endpoint.
    fn proxy_url(address: &ProxyAddress) -> String {
        if SCHEME_REGEX.is_match(address.as_str()) {
            address.as_str().to_string()
        } else {
            format!("http://{}", address)
        }
    }

    fn build_client(&self, address: &ProxyAddress) -> reqwest::Result<Client> {
        let proxy = Proxy::all(Self::proxy_url(address))?;
        Client::builder()
            .proxy(proxy)
            .timeout(self.config.timeout)
            .build()
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn probe(&self, address: &ProxyAddress) -> ProbeOutcome {
        let client = match self.build_client(address) {
            Ok(client) => client,
            Err(error) => {
                return ProbeOutcome::invalid(
                    address.clone(),
                    InvalidReason::RequestFailed(error.to_string()),
                )
            }
        };

        match client.get(&self.config.target_url).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                ProbeOutcome::valid(address.clone())
            }
            Ok(response) => ProbeOutcome::invalid(
                address.clone(),
                InvalidReason::UnexpectedStatus(response.status().as_u16()),
            ),
            Err(error) if error.is_timeout() => {
                ProbeOutcome::invalid(address.clone(), InvalidReason::TimedOut)
            }
            Err(error) => ProbeOutcome::invalid(
                address.clone(),
                InvalidReason::RequestFailed(error.to_string()),
            ),
        }
    }
}

impl Default for HttpProber {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_config_default() {
        let config = ProbeConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.target_url, DEFAULT_TARGET_URL);
    }

    #[test]
    fn test_probe_config_builder() {
        let config = ProbeConfig::new()
            .with_timeout(Duration::from_secs(30))
            .with_target_url("http://example.com".to_string());

        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.target_url, "http://example.com");
    }

    #[test]
    fn test_proxy_url_bare_address() {
        let url = HttpProber::proxy_url(&ProxyAddress::from("192.168.1.1:8080"));
        assert_eq!(url, "http://192.168.1.1:8080");
    }

    #[test]
    fn test_proxy_url_keeps_explicit_scheme() {
        for address in [
            "http://192.168.1.1:8080",
            "https://192.168.1.1:8080",
            "socks4://192.168.1.1:1080",
            "socks5://192.168.1.1:1080",
        ] {
            let url = HttpProber::proxy_url(&ProxyAddress::from(address));
            assert_eq!(url, address);
        }
    }

    #[tokio::test]
    async fn test_probe_unroutable_address_is_invalid() {
        let prober = HttpProber::with_config(
            ProbeConfig::new().with_timeout(Duration::from_millis(200)),
        );
        let outcome = prober.probe(&ProxyAddress::from("127.0.0.1:1")).await;
        assert!(!outcome.is_valid());
    }

    #[tokio::test]
    async fn test_probe_garbage_address_is_invalid_not_fatal() {
        let prober = HttpProber::new();
        let outcome = prober.probe(&ProxyAddress::from("not a proxy at all")).await;
        assert!(!outcome.is_valid());
    }
}
