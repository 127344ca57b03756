//! Thread-safe accumulation of probe outcomes
//!
//! Many probe tasks record into one collector concurrently. Only valid
//! proxies are kept, deduplicated by exact address string. The collector
//! also owns the per-outcome console line; the lock covers both the set
//! mutation and the print so output never interleaves.

use crate::proxy::models::{ProbeOutcome, ProxyAddress};
use colored::Colorize;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Cheaply cloneable handle to the shared set of validated proxies
#[derive(Debug, Clone, Default)]
pub struct ResultCollector {
    validated: Arc<Mutex<HashSet<ProxyAddress>>>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one probe outcome.
    ///
    /// Valid addresses are inserted into the set; invalid ones are only
    /// logged. Safe to call from any number of tasks at once.
    pub fn record(&self, outcome: &ProbeOutcome) {
        let mut validated = self.validated.lock().expect("collector mutex poisoned");
        match outcome {
            ProbeOutcome::Valid(address) => {
                println!("{}", format!("Proxy {} works.", address).green());
                validated.insert(address.clone());
            }
            ProbeOutcome::Invalid { address, reason } => {
                println!(
                    "{}",
                    format!("Proxy {} doesn't work. ({})", address, reason).red()
                );
            }
        }
    }

    /// Current contents of the validated set.
    ///
    /// Intended to be read once after all probes complete, but safe at
    /// any point during a run.
    pub fn snapshot(&self) -> HashSet<ProxyAddress> {
        self.validated
            .lock()
            .expect("collector mutex poisoned")
            .clone()
    }

    /// Number of validated proxies so far
    pub fn len(&self) -> usize {
        self.validated
            .lock()
            .expect("collector mutex poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
