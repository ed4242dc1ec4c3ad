use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::ScanError;
use crate::ports::{self, DEFAULT_PORT_SPEC};
use crate::resolve;
use crate::scanner::ScanConfig;

/// portsweep — concurrent TCP connect scanner.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "portsweep",
    version,
    about = "Concurrent TCP connect scanner with port-ordered results.",
    long_about = None
)]
pub struct Cli {
    /// Target IP address or hostname.
    pub target: String,

    /// Comma-separated list of ports or ranges, e.g. 22,80,8000-8100.
    #[arg(short, long, default_value = DEFAULT_PORT_SPEC)]
    pub ports: String,

    /// Max concurrent TCP connect attempts.
    #[arg(
        short = 't',
        long = "threads",
        visible_alias = "workers",
        default_value_t = 50,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub threads: u32,

    /// Socket connect timeout in milliseconds.
    #[arg(
        long = "timeout-ms",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_ms: u64,

    /// Write results to this path, one line per port.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the output file as a JSON report instead of plain lines.
    #[arg(long, requires = "output")]
    pub json: bool,

    /// Report closed ports too, and enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::default()
            .with_workers(self.threads as usize)
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_verbose(self.verbose)
    }

    /// Resolve the target and parse `--ports`; either failure stops the run before any probe.
    pub async fn scan_inputs(&self) -> Result<(IpAddr, Vec<u16>), ScanError> {
        let target = resolve::resolve_target(&self.target).await?;
        let ports = ports::parse_port_spec(&self.ports)?;
        Ok((target, ports))
    }
}
