use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use portsweep::cli::Cli;
use portsweep::scanner::{self, ScanEngine};
use portsweep::{logging, output};

/// Conventional exit status for a run stopped by SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let (target, port_list) = cli
        .scan_inputs()
        .await
        .with_context(|| format!("cannot scan {}", cli.target))?;

    let cancel = CancellationToken::new();
    let ctrl_c = scanner::cancel_on_ctrl_c(cancel.clone());

    let engine = ScanEngine::new(cli.scan_config());
    let report = engine.scan_with_cancel(target, port_list, cancel).await;
    ctrl_c.abort();

    if report.interrupted {
        info!("no results kept; nothing written");
        return Ok(ExitCode::from(EXIT_INTERRUPTED));
    }

    if let Some(path) = cli.output.as_deref() {
        match output::save(path, &report, cli.json) {
            Ok(()) => info!("Results saved to {}", path.display()),
            Err(e) => error!("{e}"),
        }
    }

    Ok(ExitCode::SUCCESS)
}
