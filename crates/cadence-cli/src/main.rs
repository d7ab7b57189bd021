use anyhow::Result;
use cadence_cli::{init_tracing, run_report, Cli, RunConfig};
use cadence_core::ReportZone;
use chrono::Utc;
use clap::Parser;

// Failures are reported once, by the `Error:` line `main` prints on return.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = RunConfig::from_cli(cli, ReportZone::host())?;
    let mut stdout = std::io::stdout();
    run_report(&config, Utc::now(), &mut stdout).await
}
