use gatecheck_core::{AddressChecker, CheckerError, StaticResolver};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

/// Literal-only allow-lists never touch DNS, so the system resolver is safe here.
#[test]
fn system_resolver_literal_ipv4() -> anyhow::Result<()> {
    let checker = AddressChecker::new(" 192.168.3.0/24 190.168.3.0/28 ")?;

    assert!(checker.check("192.168.3.255")?);
    assert!(checker.check("190.168.3.15")?);
    assert!(!checker.check("192.168.4.19")?);
    assert!(!checker.check("190.168.3.16")?);
    Ok(())
}

#[test]
fn system_resolver_literal_ipv6() -> anyhow::Result<()> {
    let checker = AddressChecker::new("192:168:3:0:0:0:0:0/112")?;

    assert!(checker.check("192:168:3:0:0:0:0:0")?);
    assert!(checker.check("192:168:3:0:0:0:0:FFFF")?);
    assert!(!checker.check("192:168:3:0:0:0:1:0")?);
    Ok(())
}

/// `.invalid` is reserved and never resolves.
#[test]
fn system_resolver_rejects_reserved_invalid_tld() {
    let result = AddressChecker::new("test.invalid");
    assert!(matches!(result, Err(CheckerError::UnresolvableAddress(ref s)) if s == "test.invalid"));

    let checker = AddressChecker::new("10.0.0.0/8").unwrap();
    assert!(matches!(
        checker.check("test.invalid"),
        Err(CheckerError::UnresolvableAddress(_))
    ));
}

#[test]
fn invalid_prefixes_are_rejected_without_dns() {
    for (pattern, expect_too_large) in [
        ("10.0.0.0/", false),
        ("10.0.0.0/-1", false),
        ("10.0.0.0/x", false),
        ("10.0.0.0/33", true),
        ("::1/129", true),
    ] {
        let err = AddressChecker::new(pattern).unwrap_err();
        if expect_too_large {
            assert!(matches!(err, CheckerError::PrefixTooLarge { .. }), "{pattern}: {err}");
        } else {
            assert!(matches!(err, CheckerError::InvalidPrefixFormat { .. }), "{pattern}: {err}");
        }
    }

    assert!(matches!(AddressChecker::new("/"), Err(CheckerError::UnresolvableAddress(_))));
    assert!(matches!(AddressChecker::new("/32"), Err(CheckerError::UnresolvableAddress(_))));
}

#[test]
fn hostname_patterns_with_stub_resolver() -> anyhow::Result<()> {
    let resolver = StaticResolver::new().with_host(
        "localhost",
        [
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(Ipv6Addr::LOCALHOST),
        ],
    );
    let checker = AddressChecker::with_resolver("localhost", resolver.clone())?;

    assert!(checker.check("127.0.0.1")?);
    assert!(!checker.check("127.0.0.0")?);
    assert!(!checker.check("255.0.0.1")?);
    assert!(checker.check("::1")?);
    assert!(!checker.check("::0")?);
    assert!(!checker.check("8000::1")?);

    assert_eq!(
        AddressChecker::with_resolver("localhost/32", resolver).unwrap_err(),
        CheckerError::PrefixWithHostname("localhost/32".to_string())
    );
    Ok(())
}

#[test]
fn shared_checker_answers_concurrent_queries() -> anyhow::Result<()> {
    let checker = Arc::new(AddressChecker::new("10.0.0.0/8 2001:db8::/32")?);

    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let checker = Arc::clone(&checker);
            std::thread::spawn(move || {
                let v4 = checker.check(&format!("10.{i}.0.1")).unwrap();
                let v6 = checker.check(&format!("2001:db8::{i}")).unwrap();
                let outside = checker.check(&format!("11.{i}.0.1")).unwrap();
                (v4, v6, outside)
            })
        })
        .collect();

    for handle in handles {
        let (v4, v6, outside) = handle.join().expect("query thread panicked");
        assert!(v4 && v6 && !outside);
    }
    Ok(())
}
