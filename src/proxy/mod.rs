//! Proxy validation pipeline
//!
//! This module provides functionality for:
//! - Loading candidate proxy lists from text files
//! - Probing each proxy with a test HTTP request, concurrency-capped
//! - Collecting validated proxies into a deduplicated, thread-safe set
//! - Appending the validated set to an output file

pub mod collector;
pub mod loader;
pub mod models;
pub mod probe;
pub mod report;
pub mod scheduler;

pub use collector::ResultCollector;
pub use loader::ProxyLoader;
pub use models::{InvalidReason, ProbeOutcome, ProxyAddress};
pub use probe::{HttpProber, Probe, ProbeConfig};
pub use report::ReportWriter;
pub use scheduler::BatchScheduler;
