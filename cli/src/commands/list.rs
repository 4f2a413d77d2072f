use gatecheck_common::config::Config;
use gatecheck_core::AddressChecker;

use crate::gprint;
use crate::terminal::{format, print};

/// Prints every compiled pattern in allow-list order.
pub fn list(checker: &AddressChecker, cfg: &Config) {
    let patterns = checker.patterns();

    if cfg.quiet > 1 {
        for pattern in patterns {
            print::print(&pattern.to_string());
        }
        return;
    }

    for (idx, pattern) in patterns.iter().enumerate() {
        print::tree_head(idx, &format::pattern(pattern).to_string());
        print::as_tree_one_level(format::pattern_to_details(pattern));
        if idx + 1 != patterns.len() {
            gprint!();
        }
    }
}
