//! # gatecheck-core
//!
//! Address allow-lists for servers that need to reject peers before doing any
//! real work.
//!
//! * **[`address`]**: fixed-width numeric IPv4/IPv6 values.
//! * **[`pattern`]**: a single reference address plus prefix mask.
//! * **[`pattern_set`]**: compiles an allow-list string into patterns.
//! * **[`resolver`]**: the hostname lookup seam.
//! * **[`checker`]**: the query surface, [`AddressChecker`].

pub mod address;
pub mod checker;
pub mod error;
pub mod pattern;
pub mod pattern_set;
pub mod resolver;

pub use address::{AddressFamily, AddressValue};
pub use checker::{AddressChecker, AddressCheckerBuilder};
pub use error::{CheckerError, Result};
pub use pattern::Pattern;
pub use pattern_set::PatternSet;
pub use resolver::{NameResolver, StaticResolver, SystemResolver};
