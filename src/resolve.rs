use crate::error::ResolveError;
use std::net::IpAddr;
use tokio::net::lookup_host;
use tracing::debug;

/// Resolve `host` to a single address to scan.
///
/// Literal addresses are returned unchanged. Names go through the system
/// resolver; the first IPv4 answer wins, with IPv6 as a fallback.
pub async fn resolve_target(host: &str) -> Result<IpAddr, ResolveError> {
    let host = host.trim();
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    let addrs: Vec<IpAddr> = lookup_host((host, 0))
        .await
        .map_err(|source| ResolveError::Lookup {
            host: host.to_string(),
            source,
        })?
        .map(|sa| sa.ip())
        .collect();
    debug!(host, ?addrs, "resolved target");

    addrs
        .iter()
        .copied()
        .find(IpAddr::is_ipv4)
        .or_else(|| addrs.first().copied())
        .ok_or_else(|| ResolveError::NoAddress(host.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[tokio::test]
    async fn literal_addresses_pass_through() {
        assert_eq!(
            resolve_target("192.168.69.128").await.unwrap(),
            IpAddr::V4(Ipv4Addr::new(192, 168, 69, 128))
        );
        assert_eq!(
            resolve_target(" ::1 ").await.unwrap(),
            IpAddr::V6(Ipv6Addr::LOCALHOST)
        );
    }

    #[tokio::test]
    async fn localhost_resolves_to_loopback() {
        let ip = resolve_target("localhost").await.unwrap();
        assert!(ip.is_loopback());
    }

    #[tokio::test]
    async fn unknown_host_is_an_error() {
        assert!(resolve_target("no-such-host.invalid").await.is_err());
    }
}
