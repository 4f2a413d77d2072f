//! # Pattern
//!
//! A single compiled allow-list rule: a reference address and a prefix mask.

use std::fmt;

use crate::address::{AddressFamily, AddressValue};

/// One compiled rule.
///
/// The mask always has the same family as the reference address and exactly
/// `prefix_len` leading one bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern {
    reference: AddressValue,
    prefix_len: u8,
    mask: AddressValue,
}

impl Pattern {
    /// Builds a pattern matching the top `prefix_len` bits of `reference`.
    ///
    /// Returns `None` if `prefix_len` exceeds the family's bit width.
    pub fn new(reference: AddressValue, prefix_len: u32) -> Option<Self> {
        let family: AddressFamily = reference.family();
        if prefix_len > u32::from(family.bit_width()) {
            return None;
        }
        let prefix_len = prefix_len as u8;

        Some(Self {
            reference,
            prefix_len,
            mask: prefix_mask(family, prefix_len),
        })
    }

    /// Builds a full-width (exact match) pattern.
    pub fn exact(reference: AddressValue) -> Self {
        let family: AddressFamily = reference.family();
        Self {
            reference,
            prefix_len: family.bit_width(),
            mask: prefix_mask(family, family.bit_width()),
        }
    }

    pub fn reference(&self) -> AddressValue {
        self.reference
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn mask(&self) -> AddressValue {
        self.mask
    }

    pub fn family(&self) -> AddressFamily {
        self.reference.family()
    }

    /// True if `candidate` agrees with the reference on every masked bit.
    ///
    /// Addresses from another family never match.
    pub fn matches(&self, candidate: &AddressValue) -> bool {
        match (candidate.masked(&self.mask), self.reference.masked(&self.mask)) {
            (Some(masked_candidate), Some(masked_reference)) => {
                masked_candidate == masked_reference
            }
            _ => false,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.reference, self.prefix_len)
    }
}

/// Mask with the `prefix_len` most significant bits set.
fn prefix_mask(family: AddressFamily, prefix_len: u8) -> AddressValue {
    match family {
        AddressFamily::V4 => {
            let mask = if prefix_len == 0 {
                0
            } else {
                u32::MAX << (32 - u32::from(prefix_len))
            };
            AddressValue::V4(mask)
        }
        AddressFamily::V6 => {
            let mask = if prefix_len == 0 {
                0
            } else {
                u128::MAX << (128 - u32::from(prefix_len))
            };
            AddressValue::V6(mask)
        }
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
