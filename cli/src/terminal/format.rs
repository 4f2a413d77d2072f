use colored::*;
use gatecheck_core::{AddressFamily, Pattern};

use crate::terminal::colors;

type Detail = (String, ColoredString);

/// `address/prefix`, coloured by family.
pub fn pattern(pattern: &Pattern) -> ColoredString {
    let (addr_color, prefix_color) = match pattern.family() {
        AddressFamily::V4 => (colors::IPV4_ADDR, colors::IPV4_PREFIX),
        AddressFamily::V6 => (colors::IPV6_ADDR, colors::IPV6_PREFIX),
    };
    let address: ColoredString = pattern.reference().to_string().color(addr_color);
    let prefix: ColoredString = pattern.prefix_len().to_string().color(prefix_color);
    format!("{address}{}{prefix}", "/".color(colors::SEPARATOR)).normal()
}

pub fn pattern_to_details(pattern: &Pattern) -> Vec<Detail> {
    let family: AddressFamily = pattern.family();
    let scope: &str = if pattern.prefix_len() == family.bit_width() {
        "exact"
    } else {
        "network"
    };

    vec![
        ("Family".to_string(), family.to_string().color(colors::TEXT_DEFAULT)),
        ("Match".to_string(), scope.color(colors::ACCENT)),
        ("Prefix".to_string(), pattern.prefix_len().to_string().color(colors::PRIMARY)),
        ("Mask".to_string(), pattern.mask().to_string().color(colors::TEXT_DEFAULT)),
    ]
}

pub fn verdict(allowed: bool) -> ColoredString {
    if allowed {
        "allowed".color(colors::ALLOWED).bold()
    } else {
        "denied".color(colors::DENIED).bold()
    }
}
