use portsweep::error::PortSpecError;
use portsweep::ports::parse_port_spec;

#[test]
fn parse_mixed_list_sorted_and_deduplicated() {
    let ports = parse_port_spec("443, 22,80-82,81,22").expect("parse ok");
    assert_eq!(ports, vec![22, 80, 81, 82, 443]);
}

#[test]
fn malformed_specs_are_rejected_with_a_description() {
    let reversed = parse_port_spec("20-10").unwrap_err();
    assert!(matches!(reversed, PortSpecError::ReversedRange { start: 20, end: 10 }));
    assert_eq!(reversed.to_string(), "invalid port range: 20-10 (start > end)");

    let text = parse_port_spec("abc").unwrap_err();
    assert_eq!(text.to_string(), "invalid port: abc");

    assert!(parse_port_spec("1-70000").is_err());
}
