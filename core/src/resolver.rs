//! # Name Resolution
//!
//! The checker never talks to DNS itself. Hostnames are handed to a
//! [`NameResolver`], which can be the system resolver, a fixed table, or any
//! closure with the right signature.
//!
//! Literal addresses are recognised here, before any resolver is consulted, so
//! `10.0.0.1` or `::1` never trigger a lookup.

use std::collections::HashMap;
use std::io;
use std::net::{IpAddr, Ipv6Addr, ToSocketAddrs};

use tracing::debug;

use crate::error::{CheckerError, Result};

/// Maps a hostname to zero or more addresses.
///
/// Implementations may block. Timeouts and retries are their own concern.
pub trait NameResolver: Send + Sync {
    fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>>;
}

impl<F> NameResolver for F
where
    F: Fn(&str) -> io::Result<Vec<IpAddr>> + Send + Sync,
{
    fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        self(host)
    }
}

/// Resolves through the operating system (`getaddrinfo`, hosts file, ...).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl NameResolver for SystemResolver {
    fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        let addrs = (host, 0u16).to_socket_addrs()?;
        Ok(addrs.map(|sock| sock.ip()).collect())
    }
}

/// A fixed hostname table. Unknown names fail with `NotFound`.
#[derive(Debug, Default, Clone)]
pub struct StaticResolver {
    hosts: HashMap<String, Vec<IpAddr>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) an entry. Lookups are case-insensitive.
    pub fn with_host<I>(mut self, name: &str, addrs: I) -> Self
    where
        I: IntoIterator<Item = IpAddr>,
    {
        self.hosts
            .insert(name.to_ascii_lowercase(), addrs.into_iter().collect());
        self
    }
}

impl NameResolver for StaticResolver {
    fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        self.hosts
            .get(&host.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("unknown host {host}")))
    }
}

/// Outcome of resolving the host part of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The text was itself an address.
    Literal(IpAddr),
    /// The text was a hostname; addresses are in resolver order, deduplicated.
    Hostname(Vec<IpAddr>),
}

impl Resolution {
    pub fn addresses(&self) -> &[IpAddr] {
        match self {
            Resolution::Literal(ip) => std::slice::from_ref(ip),
            Resolution::Hostname(ips) => ips,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Resolution::Literal(_))
    }
}

/// Parses `host` as a literal address.
///
/// Accepts bracketed IPv6 (`[::1]`), drops an IPv6 zone index
/// (`fe80::1%eth0`) and folds IPv4-mapped IPv6 (`::ffff:10.0.0.1`) into
/// plain IPv4.
pub fn parse_literal(host: &str) -> Option<IpAddr> {
    let unbracketed = host
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(host);

    // The zone only selects an interface; the address bits are unchanged.
    let ip: IpAddr = match unbracketed.split_once('%') {
        Some((addr, zone)) if !zone.is_empty() => IpAddr::V6(addr.parse::<Ipv6Addr>().ok()?),
        Some(_) => return None,
        None => unbracketed.parse().ok()?,
    };

    match ip {
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => Some(IpAddr::V4(v4)),
            None => Some(ip),
        },
        IpAddr::V4(_) => Some(ip),
    }
}

/// Resolves `host`, failing with [`CheckerError::UnresolvableAddress`] if
/// nothing comes back. `subject` is the text reported in that error.
pub fn resolve(resolver: &dyn NameResolver, host: &str, subject: &str) -> Result<Resolution> {
    if let Some(ip) = parse_literal(host) {
        return Ok(Resolution::Literal(ip));
    }

    if host.is_empty() {
        return Err(CheckerError::UnresolvableAddress(subject.to_string()));
    }

    let found: Vec<IpAddr> = resolver.lookup(host).map_err(|e| {
        debug!(host, error = %e, "hostname lookup failed");
        CheckerError::UnresolvableAddress(subject.to_string())
    })?;

    let mut addrs: Vec<IpAddr> = Vec::with_capacity(found.len());
    for ip in found {
        let ip = match ip {
            IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
            IpAddr::V4(_) => ip,
        };
        if !addrs.contains(&ip) {
            addrs.push(ip);
        }
    }

    if addrs.is_empty() {
        debug!(host, "hostname resolved to no addresses");
        return Err(CheckerError::UnresolvableAddress(subject.to_string()));
    }

    Ok(Resolution::Hostname(addrs))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
