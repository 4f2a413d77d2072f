use std::io::Write;

use gatecheck_common::config::ALLOW_PROPERTY;
use gatecheck_common::properties::{CheckedProperties, PropertyError};
use gatecheck_core::{AddressChecker, CheckerError};

fn write_properties(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn allow_list_from_properties_file() -> anyhow::Result<()> {
    let file = write_properties(
        "# service access\n\
         ip = 192.168.3.0/24 \\\n\
              190.168.3.0/28\n\
         port = 8080\n",
    );

    let props = CheckedProperties::load_from_file(file.path())?;
    let checker = AddressChecker::new(props.get_string(ALLOW_PROPERTY)?)?;

    assert_eq!(checker.patterns().len(), 2);
    assert!(checker.check("192.168.3.1")?);
    assert!(checker.check("190.168.3.15")?);
    assert!(!checker.check("190.168.3.16")?);
    assert_eq!(props.get_positive_int("port")?, 8080);
    Ok(())
}

#[test]
fn missing_allow_property_is_reported_by_name() {
    let file = write_properties("port = 8080\n");
    let props = CheckedProperties::load_from_file(file.path()).unwrap();

    let err = props.get_string(ALLOW_PROPERTY).unwrap_err();
    assert!(matches!(err, PropertyError::Missing { ref name, .. } if name == ALLOW_PROPERTY));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn bad_allow_list_in_file_surfaces_checker_error() {
    let file = write_properties("ip = 10.0.0.0/8 10.0.0.0/x\n");
    let props = CheckedProperties::load_from_file(file.path()).unwrap();

    let err = AddressChecker::new(props.get_string(ALLOW_PROPERTY).unwrap()).unwrap_err();
    assert!(matches!(err, CheckerError::InvalidPrefixFormat { ref token, .. } if token == "10.0.0.0/x"));
}

#[test]
fn blank_allow_list_is_a_config_error() {
    let file = write_properties("ip =   \n");
    let props = CheckedProperties::load_from_file(file.path()).unwrap();

    let err = props.get_string(ALLOW_PROPERTY).unwrap_err();
    assert!(matches!(err, PropertyError::Empty { ref name, .. } if name == ALLOW_PROPERTY));
    assert_eq!(
        err.to_string(),
        format!("ip may not be empty in {}", file.path().display())
    );
}

#[test]
fn blank_pattern_string_is_still_rejected_by_checker() {
    let result = AddressChecker::new("   ");
    assert!(matches!(result, Err(CheckerError::UnresolvableAddress(_))));
}
