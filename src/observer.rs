use crate::types::ScanResult;
use std::net::IpAddr;
use tracing::{error, info, warn};

/// Receives progress and summary events from a running scan.
///
/// The engine decides what to surface (open results always, closed ones only
/// when verbose); observers only decide how to present it.
pub trait ScanObserver: Send + Sync {
    fn scan_started(&self, _target: IpAddr, _ports: usize, _workers: usize) {}
    fn port_result(&self, _result: &ScanResult) {}
    fn task_failed(&self, _port: Option<u16>, _message: &str) {}
    fn interrupted(&self) {}
    fn summary(&self, _open: usize, _scanned: usize) {}
}

/// Forwards scan events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn scan_started(&self, target: IpAddr, ports: usize, workers: usize) {
        info!("Scanning {ports} ports on {target} with {workers} workers");
    }

    fn port_result(&self, result: &ScanResult) {
        info!("{}", result.display_text);
    }

    fn task_failed(&self, port: Option<u16>, message: &str) {
        match port {
            Some(p) => error!(port = p, "error scanning port: {message}"),
            None => error!("error scanning port: {message}"),
        }
    }

    fn interrupted(&self) {
        warn!("Scan interrupted by user");
    }

    fn summary(&self, open: usize, scanned: usize) {
        info!("Found {open} open port(s) out of {scanned} scanned");
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ScanObserver for NullObserver {}
