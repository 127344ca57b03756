//! Batched concurrent probe dispatch
//!
//! The scheduler partitions the candidate list into consecutive batches
//! of at most `max_concurrency` addresses, spawns one task per address,
//! and joins the whole batch before the next one starts. The barrier
//! keeps the number of in-flight probes bounded without any completion
//! bookkeeping beyond the join itself.

use crate::proxy::collector::ResultCollector;
use crate::proxy::models::{InvalidReason, ProbeOutcome, ProxyAddress};
use crate::proxy::probe::Probe;
use crate::proxy::report::ReportWriter;
use crate::Result;
use anyhow::ensure;
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;

/// Dispatches probes in concurrency-capped batches
pub struct BatchScheduler<P: Probe> {
    prober: Arc<P>,
    collector: ResultCollector,
}

impl<P: Probe + 'static> BatchScheduler<P> {
    /// Create a scheduler with a fresh collector
    pub fn new(prober: Arc<P>) -> Self {
        Self::with_collector(prober, ResultCollector::new())
    }

    /// Create a scheduler recording into an existing collector
    pub fn with_collector(prober: Arc<P>, collector: ResultCollector) -> Self {
        Self { prober, collector }
    }

    /// The collector outcomes are recorded into
    pub fn collector(&self) -> &ResultCollector {
        &self.collector
    }

    /// Probe every address, at most `max_concurrency` at a time.
    ///
    /// Batch K fully drains (every task joined, every outcome recorded)
    /// before any task of batch K+1 starts. A task that dies without an
    /// outcome is recorded as invalid at the join point; nothing aborts
    /// the batch or the run.
    ///
    /// `max_concurrency` of zero is rejected before any probe runs.
    pub async fn run(&self, addresses: &[ProxyAddress], max_concurrency: usize) -> Result<()> {
        ensure!(
            max_concurrency > 0,
            "max concurrency must be positive, got {}",
            max_concurrency
        );

        for batch in addresses.chunks(max_concurrency) {
            let mut handles = Vec::with_capacity(batch.len());
            for address in batch {
                let prober = Arc::clone(&self.prober);
                let collector = self.collector.clone();
                let address = address.clone();
                handles.push(tokio::spawn(async move {
                    let outcome = prober.probe(&address).await;
                    collector.record(&outcome);
                }));
            }

            for (joined, address) in join_all(handles).await.into_iter().zip(batch) {
                if joined.is_err() {
                    self.collector.record(&ProbeOutcome::invalid(
                        address.clone(),
                        InvalidReason::TaskFailed,
                    ));
                }
            }
        }

        Ok(())
    }

    /// Run all probes, then append the validated set to `output`
    pub async fn run_to_file<Q: AsRef<Path>>(
        &self,
        addresses: &[ProxyAddress],
        max_concurrency: usize,
        output: Q,
    ) -> Result<()> {
        self.run(addresses, max_concurrency).await?;
        ReportWriter::append(&self.collector.snapshot(), output)
    }
}
