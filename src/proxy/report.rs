//! Persisting validated proxies
//!
//! The output file is opened in append mode so earlier runs are never
//! truncated; within one run, set semantics upstream guarantee each
//! address is written at most once.

use crate::proxy::models::ProxyAddress;
use crate::Result;
use anyhow::Context;
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Appends validated proxies to an output file
pub struct ReportWriter;

impl ReportWriter {
    /// Append the validated set to `path`, one address per line.
    ///
    /// The file is created if absent and opened even for an empty set;
    /// write failures are fatal and propagate to the caller.
    pub fn append<P: AsRef<Path>>(results: &HashSet<ProxyAddress>, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open output file {}", path.display()))?;

        for address in results {
            writeln!(file, "{}", address)
                .with_context(|| format!("cannot write to output file {}", path.display()))?;
        }

        Ok(())
    }
}
