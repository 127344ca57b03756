//! Proxy list loading
//!
//! Reads candidate proxy addresses from a text file, one per line.
//! Addresses are not parsed or validated here; whatever survives the
//! blank-line and comment filter is probed verbatim.

use crate::proxy::models::ProxyAddress;
use crate::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Loader for candidate proxy lists
pub struct ProxyLoader;

impl ProxyLoader {
    /// Load a single line as a proxy address.
    ///
    /// Returns `None` for blank lines and `#` comments.
    pub fn parse_line(line: &str) -> Option<ProxyAddress> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        Some(ProxyAddress::from(line))
    }

    /// Load addresses from a string (multiple lines)
    pub fn parse_string(content: &str) -> Vec<ProxyAddress> {
        content.lines().filter_map(Self::parse_line).collect()
    }

    /// Load addresses from a file.
    ///
    /// A missing or unreadable file is an error; probing never starts
    /// without a readable list.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<ProxyAddress>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read proxy list from {}", path.display()))?;
        Ok(Self::parse_string(&content))
    }
}
