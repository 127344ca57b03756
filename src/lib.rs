//! Proxy Vet - Concurrent Proxy List Checker
//!
//! Reads a list of candidate proxy addresses, probes each one with a
//! test HTTP request under a fixed concurrency cap, and appends the
//! proxies that answered to an output file.

use std::path::PathBuf;
use std::sync::Arc;

pub mod proxy;

pub use proxy::*;

use crate::proxy::probe::ProbeConfig;

/// Application result type
pub type Result<T> = anyhow::Result<T>;

/// Default input file with one candidate proxy per line
pub const DEFAULT_INPUT_FILE: &str = "proxies.txt";

/// Default output file working proxies are appended to
pub const DEFAULT_OUTPUT_FILE: &str = "working_proxies.txt";

/// Default cap on concurrently in-flight probes
pub const DEFAULT_MAX_CONCURRENCY: usize = 1000;

/// Configuration for one checking run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// File the candidate list is read from
    pub input: PathBuf,
    /// File validated proxies are appended to
    pub output: PathBuf,
    /// Maximum number of probes in flight at any instant
    pub max_concurrency: usize,
    /// Probe timeout and target
    pub probe: ProbeConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            probe: ProbeConfig::default(),
        }
    }
}

/// What a finished run did
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    /// Number of addresses loaded and probed
    pub total: usize,
    /// Number of distinct addresses that validated
    pub valid: usize,
}

/// Check every proxy in the configured input file and append the
/// working ones to the configured output file.
pub async fn run(config: &RunConfig) -> Result<RunSummary> {
    let prober = Arc::new(HttpProber::with_config(config.probe.clone()));
    run_with_prober(config, prober).await
}

/// Same as [`run`], with the prober supplied by the caller
pub async fn run_with_prober<P: Probe + 'static>(
    config: &RunConfig,
    prober: Arc<P>,
) -> Result<RunSummary> {
    let addresses = ProxyLoader::load_file(&config.input)?;

    let scheduler = BatchScheduler::new(prober);
    scheduler
        .run_to_file(&addresses, config.max_concurrency, &config.output)
        .await?;

    Ok(RunSummary {
        total: addresses.len(),
        valid: scheduler.collector().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::fs;
    use std::path::Path;

    /// Prober that validates a fixed address set without any network
    struct StaticProber {
        valid: HashSet<ProxyAddress>,
    }

    #[async_trait]
    impl Probe for StaticProber {
        async fn probe(&self, address: &ProxyAddress) -> ProbeOutcome {
            if self.valid.contains(address) {
                ProbeOutcome::valid(address.clone())
            } else {
                ProbeOutcome::invalid(
                    address.clone(),
                    InvalidReason::RequestFailed("static failure".to_string()),
                )
            }
        }
    }

    fn temp_file(name: &str, content: Option<&str>) -> PathBuf {
        let path = std::env::temp_dir().join(format!("proxy-vet-run-{}-{}", std::process::id(), name));
        if let Some(content) = content {
            fs::write(&path, content).unwrap();
        }
        path
    }

    fn read_sorted_lines(path: &Path) -> Vec<String> {
        let mut lines: Vec<String> = fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        lines.sort();
        lines
    }

    #[tokio::test]
    async fn test_run_end_to_end() {
        let input = temp_file(
            "e2e-in.txt",
            Some("p1:8080\np2:8080\n\n# stale entries\np3:8080\n"),
        );
        let output = temp_file("e2e-out.txt", None);
        let config = RunConfig {
            input: input.clone(),
            output: output.clone(),
            max_concurrency: 2,
            probe: ProbeConfig::default(),
        };
        let prober = Arc::new(StaticProber {
            valid: ["p1:8080", "p3:8080"]
                .into_iter()
                .map(ProxyAddress::from)
                .collect(),
        });

        let summary = run_with_prober(&config, prober).await.unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.valid, 2);
        assert_eq!(read_sorted_lines(&output), vec!["p1:8080", "p3:8080"]);

        fs::remove_file(&input).unwrap();
        fs::remove_file(&output).unwrap();
    }

    #[tokio::test]
    async fn test_run_missing_input_is_fatal() {
        let config = RunConfig {
            input: temp_file("absent.txt", None),
            output: temp_file("absent-out.txt", None),
            max_concurrency: 10,
            probe: ProbeConfig::default(),
        };
        let prober = Arc::new(StaticProber { valid: HashSet::new() });

        assert!(run_with_prober(&config, prober).await.is_err());
    }

    #[tokio::test]
    async fn test_run_empty_input_writes_nothing() {
        let input = temp_file("empty-in.txt", Some(""));
        let output = temp_file("empty-out.txt", None);
        let config = RunConfig {
            input: input.clone(),
            output: output.clone(),
            max_concurrency: 10,
            probe: ProbeConfig::default(),
        };
        let prober = Arc::new(StaticProber { valid: HashSet::new() });

        let summary = run_with_prober(&config, prober).await.unwrap();

        assert_eq!(summary.total, 0);
        assert_eq!(summary.valid, 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), "");

        fs::remove_file(&input).unwrap();
        fs::remove_file(&output).unwrap();
    }
}
