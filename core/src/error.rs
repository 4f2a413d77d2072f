use thiserror::Error;

/// Failures raised while compiling an allow-list or resolving a query.
///
/// Every variant names the offending token (or query address) so a bad
/// configuration entry can be found without a debugger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckerError {
    /// The host part of a token, or a query address, did not resolve to anything.
    #[error("Invalid address: {0}")]
    UnresolvableAddress(String),

    /// The `/prefix` suffix is not a non-negative integer.
    #[error("Invalid network prefix: {token} ({reason})")]
    InvalidPrefixFormat { token: String, reason: String },

    /// The prefix is wider than the address family allows.
    #[error("Prefix length {prefix} cannot be greater than {max} for address {address} in {token}")]
    PrefixTooLarge {
        token: String,
        address: String,
        prefix: u32,
        max: u8,
    },

    /// A `/prefix` suffix was attached to a hostname.
    #[error("Cannot specify network prefix with a hostname: {0}")]
    PrefixWithHostname(String),
}

pub type Result<T> = std::result::Result<T, CheckerError>;
