use crate::types::ProbeOutcome;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time;
use tracing::trace;

/// Connect timeout used when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Attempt one TCP connect to `addr:port`, bounded by `timeout`.
///
/// Refusal, timeout, unreachable networks and every other connect error all
/// map to `Closed`; nothing is returned as an error. The stream, if any, is
/// dropped before returning so the socket is released on every path.
pub async fn probe(addr: IpAddr, port: u16, timeout: Duration) -> ProbeOutcome {
    let sock = SocketAddr::new(addr, port);
    match time::timeout(timeout, TcpStream::connect(sock)).await {
        Ok(Ok(stream)) => {
            drop(stream);
            ProbeOutcome::open(port)
        }
        Ok(Err(e)) => {
            trace!(%sock, error = %e, "connect failed");
            ProbeOutcome::closed(port)
        }
        Err(_) => {
            trace!(%sock, ?timeout, "connect timed out");
            ProbeOutcome::closed(port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use tokio::net::TcpListener;

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    #[tokio::test]
    async fn listener_is_open() {
        let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let out = probe(LOCALHOST, port, DEFAULT_TIMEOUT).await;
        assert_eq!(out, ProbeOutcome::open(port));
    }

    #[tokio::test]
    async fn released_port_is_closed() {
        let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let out = probe(LOCALHOST, port, DEFAULT_TIMEOUT).await;
        assert!(!out.is_open());
    }

    #[tokio::test]
    async fn port_zero_is_closed_not_an_error() {
        let out = probe(LOCALHOST, 0, DEFAULT_TIMEOUT).await;
        assert_eq!(out, ProbeOutcome::closed(0));
    }
}
