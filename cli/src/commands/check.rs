use std::time::Instant;

use colored::*;
use gatecheck_common::config::Config;
use gatecheck_core::{AddressChecker, CheckerError};
use rayon::prelude::*;
use tracing::warn;

use crate::terminal::{colors, format, print};

/// Checks every address and prints one verdict per line.
///
/// Returns true only if every address was resolved and allowed.
pub fn check(checker: &AddressChecker, addresses: &[String], cfg: &Config) -> bool {
    let start_time: Instant = Instant::now();
    let results: Vec<Result<bool, CheckerError>> = check_parallel(checker, addresses);

    print::set_key_width(addresses.iter().map(String::as_str));

    let mut allowed: usize = 0;
    let mut denied: usize = 0;
    let mut failed: usize = 0;

    for (address, result) in addresses.iter().zip(results) {
        match result {
            Ok(verdict) => {
                if verdict {
                    allowed += 1;
                } else {
                    denied += 1;
                }
                print_verdict(address, format::verdict(verdict), cfg);
            }
            Err(e) => {
                failed += 1;
                if cfg.quiet > 1 {
                    print::print(&format!("{address} unresolvable"));
                } else {
                    warn!("{e}");
                }
            }
        }
    }

    if cfg.quiet == 0 {
        print_summary(allowed, denied, failed, start_time);
    }

    denied == 0 && failed == 0
}

/// Fans queries out over the rayon pool. Results keep the input order.
fn check_parallel(
    checker: &AddressChecker,
    addresses: &[String],
) -> Vec<Result<bool, CheckerError>> {
    addresses
        .par_iter()
        .map(|address| checker.check(address))
        .collect()
}

fn print_verdict(address: &str, verdict: ColoredString, cfg: &Config) {
    match cfg.quiet {
        0 | 1 => print::aligned_line(address, verdict),
        _ => print::print(&format!("{address} {verdict}")),
    }
}

fn print_summary(allowed: usize, denied: usize, failed: usize, start_time: Instant) {
    let allowed: ColoredString = format!("{allowed} allowed").color(colors::ALLOWED).bold();
    let denied: ColoredString = format!("{denied} denied").color(colors::DENIED).bold();
    let elapsed: ColoredString = format!("{:.2}ms", start_time.elapsed().as_secs_f64() * 1000.0)
        .bold()
        .yellow();

    let mut output: String = format!("{allowed}, {denied}");
    if failed > 0 {
        output.push_str(&format!(", {}", format!("{failed} unresolvable").yellow().bold()));
    }
    output.push_str(&format!(" in {elapsed}"));

    print::fat_separator();
    print::centerln(&output);
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use gatecheck_core::StaticResolver;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_check_parallel_keeps_input_order() {
        let table = StaticResolver::new()
            .with_host("localhost", [IpAddr::V4(Ipv4Addr::LOCALHOST)]);
        let checker = AddressChecker::with_resolver("192.168.3.0/24 localhost", table).unwrap();

        let addresses: Vec<String> = (0..64u8)
            .map(|i| match i % 4 {
                0 => format!("192.168.3.{i}"),
                1 => "test.invalid".to_string(),
                2 => format!("10.0.0.{i}"),
                _ => "localhost".to_string(),
            })
            .collect();

        let results = check_parallel(&checker, &addresses);
        assert_eq!(results.len(), addresses.len());
        for (i, result) in results.iter().enumerate() {
            match i % 4 {
                0 | 3 => assert_eq!(result, &Ok(true), "{}", addresses[i]),
                1 => assert!(matches!(result, Err(CheckerError::UnresolvableAddress(_)))),
                _ => assert_eq!(result, &Ok(false), "{}", addresses[i]),
            }
        }
        assert_eq!(results, checker.check_all(&addresses));
    }
}
