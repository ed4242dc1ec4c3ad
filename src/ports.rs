use crate::error::PortSpecError;
use std::collections::BTreeSet;

/// Ports scanned when the user gives no `--ports`.
pub const DEFAULT_PORT_SPEC: &str = "0-1023";

/// Parse a port specification into a deduplicated, ascending list of ports (0..=65535).
///
/// Supported formats, comma separated:
/// - single port number: `80`
/// - inclusive range: `8000-8010`
/// - whitespace around items is ignored
pub fn parse_port_spec(spec: &str) -> Result<Vec<u16>, PortSpecError> {
    if spec.trim().is_empty() {
        return Err(PortSpecError::Empty);
    }

    let mut ports = BTreeSet::new();
    for raw in spec.split(',') {
        let item = raw.trim();
        if item.is_empty() {
            return Err(PortSpecError::EmptyItem(spec.to_string()));
        }

        // Range `start-end`
        if let Some((a, b)) = item.split_once('-') {
            let invalid = |_| PortSpecError::InvalidRange(item.to_string());
            let start = parse_port_str(a.trim()).map_err(invalid)?;
            let end = parse_port_str(b.trim()).map_err(invalid)?;
            if start > end {
                return Err(PortSpecError::ReversedRange { start, end });
            }
            ports.extend(start..=end);
            continue;
        }

        ports.insert(parse_port_str(item)?);
    }

    Ok(ports.into_iter().collect())
}

fn parse_port_str(s: &str) -> Result<u16, PortSpecError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PortSpecError::InvalidPort(s.to_string()));
    }
    s.parse::<u16>()
        .map_err(|_| PortSpecError::OutOfRange(s.to_string()))
}
