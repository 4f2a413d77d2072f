//! # Address Checker
//!
//! The public query surface: compile an allow-list once, then ask whether
//! addresses are permitted.
//!
//! ```ignore
//! let checker = AddressChecker::new("192.168.3.0/24 localhost")?;
//! assert!(checker.check("192.168.3.17")?);
//! ```
//!
//! A checker is immutable after construction and can be shared freely between
//! threads (`Arc<AddressChecker>`) without locking.

use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

use tracing::trace;

use crate::address::AddressValue;
use crate::error::{CheckerError, Result};
use crate::pattern::Pattern;
use crate::pattern_set::{self, PatternSet};
use crate::resolver::{self, NameResolver, SystemResolver};

pub struct AddressChecker {
    patterns: PatternSet,
    resolver: Arc<dyn NameResolver>,
}

impl AddressChecker {
    /// Compiles `pattern_string` using the system resolver.
    pub fn new(pattern_string: &str) -> Result<Self> {
        Self::with_resolver(pattern_string, SystemResolver)
    }

    /// Compiles `pattern_string` using `resolver` for hostnames, both now and
    /// for every later query.
    pub fn with_resolver<R>(pattern_string: &str, resolver: R) -> Result<Self>
    where
        R: NameResolver + 'static,
    {
        Self::builder().resolver(resolver).allow(pattern_string).build()
    }

    pub fn builder() -> AddressCheckerBuilder {
        AddressCheckerBuilder::default()
    }

    /// Resolves `address` and tests it against the allow-list.
    ///
    /// A hostname that resolves to several addresses is judged by the first
    /// one the resolver returns. An address that cannot be resolved is an
    /// error, not a denial.
    pub fn check(&self, address: &str) -> Result<bool> {
        let resolution = resolver::resolve(self.resolver.as_ref(), address, address)?;
        let candidate: IpAddr = *resolution
            .addresses()
            .first()
            .ok_or_else(|| CheckerError::UnresolvableAddress(address.to_string()))?;

        let allowed = self.check_ip(candidate);
        trace!(address, %candidate, allowed, "checked address");
        Ok(allowed)
    }

    /// Tests an already resolved address. Never consults the resolver.
    pub fn check_ip(&self, ip: IpAddr) -> bool {
        self.patterns.matches(&AddressValue::from(ip))
    }

    /// Checks many addresses one after another. Results keep the input order.
    pub fn check_all<S>(&self, addresses: &[S]) -> Vec<Result<bool>>
    where
        S: AsRef<str>,
    {
        addresses
            .iter()
            .map(|address| self.check(address.as_ref()))
            .collect()
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }
}

impl fmt::Debug for AddressChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressChecker")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

/// Accumulates allow-list sources and compiles them in one step.
///
/// Nothing is resolved until [`build`](Self::build); a failure there discards
/// everything and no checker is produced.
#[derive(Default)]
pub struct AddressCheckerBuilder {
    sources: Vec<String>,
    resolver: Option<Arc<dyn NameResolver>>,
}

impl AddressCheckerBuilder {
    pub fn resolver<R>(mut self, resolver: R) -> Self
    where
        R: NameResolver + 'static,
    {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Appends a pattern string. Token order is kept across calls.
    pub fn allow(mut self, pattern_string: &str) -> Self {
        self.sources.push(pattern_string.to_string());
        self
    }

    pub fn build(self) -> Result<AddressChecker> {
        let resolver: Arc<dyn NameResolver> = self
            .resolver
            .unwrap_or_else(|| Arc::new(SystemResolver));

        let mut patterns: Vec<Pattern> = Vec::new();
        for source in &self.sources {
            pattern_set::compile_into(&mut patterns, source, resolver.as_ref())?;
        }

        Ok(AddressChecker {
            patterns: PatternSet::from_patterns(patterns)?,
            resolver,
        })
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
