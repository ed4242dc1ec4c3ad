use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// One unit of work: probe `port` on `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortTask {
    pub target: IpAddr,
    pub port: u16,
}

/// Reachability of a single port.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum PortStatus {
    Open,
    Closed,
}

impl PortStatus {
    pub fn is_open(self) -> bool {
        matches!(self, PortStatus::Open)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PortStatus::Open => "OPEN",
            PortStatus::Closed => "CLOSED",
        }
    }
}

impl From<bool> for PortStatus {
    fn from(open: bool) -> Self {
        if open {
            PortStatus::Open
        } else {
            PortStatus::Closed
        }
    }
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single connect attempt observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub port: u16,
    pub status: PortStatus,
}

impl ProbeOutcome {
    pub fn open(port: u16) -> Self {
        Self { port, status: PortStatus::Open }
    }

    pub fn closed(port: u16) -> Self {
        Self { port, status: PortStatus::Closed }
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// One recorded result, carrying the line shown to the user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub port: u16,
    pub is_open: bool,
    pub display_text: String,
}

impl ScanResult {
    /// Build a result from a probe outcome, formatting `<target> : <port> : OPEN|CLOSED`.
    pub fn from_outcome(target: IpAddr, outcome: ProbeOutcome) -> Self {
        Self {
            port: outcome.port,
            is_open: outcome.is_open(),
            display_text: format!("{} : {} : {}", target, outcome.port, outcome.status),
        }
    }
}

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text)
    }
}

/// Everything a finished (or interrupted) scan hands back to its caller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub target: String,
    pub started_at: String,
    pub ports_requested: usize,
    pub open_count: usize,
    pub interrupted: bool,
    pub results: Vec<ScanResult>,
}

impl ScanReport {
    /// Display lines in ascending port order.
    pub fn lines(&self) -> Vec<String> {
        self.results.iter().map(|r| r.display_text.clone()).collect()
    }

    pub fn open_ports(&self) -> Vec<u16> {
        self.results
            .iter()
            .filter(|r| r.is_open)
            .map(|r| r.port)
            .collect()
    }
}
