//! # Pattern Set
//!
//! Compiles an allow-list string into an ordered, immutable list of
//! [`Pattern`]s.
//!
//! The string is a whitespace separated list of tokens, each of the form
//! `host-or-address[/prefix]`:
//! * `192.168.3.0/24`, `192:168:3::/112`: literal address with a prefix.
//! * `10.0.0.7`, `::1`: literal address, exact match.
//! * `localhost`: hostname, one exact pattern per resolved address.

use tracing::{debug, trace};

use crate::address::AddressValue;
use crate::error::{CheckerError, Result};
use crate::pattern::Pattern;
use crate::resolver::{self, NameResolver, Resolution};

/// The compiled allow-list. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Compiles `pattern_string`, resolving hostnames through `resolver`.
    ///
    /// The first invalid token (left to right) aborts compilation.
    pub fn compile(pattern_string: &str, resolver: &dyn NameResolver) -> Result<Self> {
        let mut patterns: Vec<Pattern> = Vec::new();
        compile_into(&mut patterns, pattern_string, resolver)?;
        Self::from_patterns(patterns)
    }

    /// Wraps already compiled patterns. Fails on an empty list, which has no
    /// token to blame, so the error names the empty string.
    pub(crate) fn from_patterns(patterns: Vec<Pattern>) -> Result<Self> {
        if patterns.is_empty() {
            return Err(CheckerError::UnresolvableAddress(String::new()));
        }
        Ok(Self { patterns })
    }

    /// True if any pattern matches `candidate`.
    pub fn matches(&self, candidate: &AddressValue) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(candidate))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn as_slice(&self) -> &[Pattern] {
        &self.patterns
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

/// Compiles every token of `pattern_string` and appends the results to `out`.
///
/// A blank string has no tokens and is reported as an unresolvable empty host.
pub(crate) fn compile_into(
    out: &mut Vec<Pattern>,
    pattern_string: &str,
    resolver: &dyn NameResolver,
) -> Result<()> {
    let mut tokens = pattern_string.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return Err(CheckerError::UnresolvableAddress(pattern_string.trim().to_string()));
    }

    for token in tokens {
        let compiled: Vec<Pattern> = compile_token(token, resolver)?;
        debug!(token, patterns = compiled.len(), "compiled allow-list entry");
        out.extend(compiled);
    }
    Ok(())
}

/// Compiles a single `host-or-address[/prefix]` token.
pub fn compile_token(token: &str, resolver: &dyn NameResolver) -> Result<Vec<Pattern>> {
    let (host, prefix_str) = match token.split_once('/') {
        Some((host, prefix)) => (host, Some(prefix)),
        None => (token, None),
    };

    let resolution: Resolution = resolver::resolve(resolver, host, token)?;
    let prefix: Option<u32> = prefix_str.map(|p| parse_prefix(p, token)).transpose()?;

    let mut patterns: Vec<Pattern> = Vec::with_capacity(resolution.addresses().len());
    for ip in resolution.addresses() {
        let reference = AddressValue::from(*ip);

        let pattern = match prefix {
            None => Pattern::exact(reference),
            Some(_) if !resolution.is_literal() => {
                return Err(CheckerError::PrefixWithHostname(token.to_string()));
            }
            Some(prefix_len) => {
                Pattern::new(reference, prefix_len).ok_or_else(|| CheckerError::PrefixTooLarge {
                    token: token.to_string(),
                    address: ip.to_string(),
                    prefix: prefix_len,
                    max: reference.family().bit_width(),
                })?
            }
        };

        trace!(token, %pattern, "pattern");
        patterns.push(pattern);
    }

    Ok(patterns)
}

/// Parses the text after `/` as a non-negative decimal integer.
fn parse_prefix(prefix_str: &str, token: &str) -> Result<u32> {
    let value: i32 = prefix_str
        .parse::<i32>()
        .map_err(|e| CheckerError::InvalidPrefixFormat {
            token: token.to_string(),
            reason: e.to_string(),
        })?;

    u32::try_from(value).map_err(|_| CheckerError::InvalidPrefixFormat {
        token: token.to_string(),
        reason: "network prefix cannot be negative".to_string(),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
