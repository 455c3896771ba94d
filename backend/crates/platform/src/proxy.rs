//! Trusted Proxy Allow-List
//!
//! Literal address matching only: no prefixes, subnets or wildcards.
//! An empty list trusts every caller, which is how the gate is disabled.
//!
//! The list is filled during startup and then shared read-only behind an
//! `Arc`. To change it at runtime, build a new list and swap the `Arc`.

use std::collections::HashSet;

use crate::client::extract_client_address;

/// Allow-list of caller addresses
#[derive(Debug, Clone, Default)]
pub struct TrustedProxies {
    /// Entries in insertion order
    entries: Vec<String>,
    lookup: HashSet<String>,
}

impl TrustedProxies {
    /// Empty list (trusts everyone)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an address literal
    ///
    /// Duplicates are ignored. Intended for startup, before the list is shared.
    pub fn add(&mut self, address: impl Into<String>) {
        let address = address.into();
        if self.lookup.insert(address.clone()) {
            self.entries.push(address);
        }
    }

    /// Builder form of [`TrustedProxies::add`]
    pub fn with(mut self, address: impl Into<String>) -> Self {
        self.add(address);
        self
    }

    /// Parse a comma-separated list, skipping blank entries
    pub fn from_csv(csv: &str) -> Self {
        csv.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Check whether a bare address is trusted
    ///
    /// Every address (including `""`) is trusted when the list is empty.
    pub fn is_trusted(&self, ip: &str) -> bool {
        self.is_empty() || self.lookup.contains(ip)
    }

    /// Strip the port from `remote_addr` and check the result
    pub fn is_trusted_remote(&self, remote_addr: &str) -> bool {
        self.is_trusted(extract_client_address(remote_addr))
    }
}

impl<S: Into<String>> FromIterator<S> for TrustedProxies {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut proxies = Self::new();
        for address in iter {
            proxies.add(address);
        }
        proxies
    }
}
