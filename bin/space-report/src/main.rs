//! Operator tool for region space-use reports.

mod cli;
mod logging;
mod snapshot_file;

use clap::Parser;

fn main() -> eyre::Result<()> {
    let cli = cli::SpaceReportCli::parse();
    logging::init_logging(&cli.logs)?;
    cli::run(cli.command)
}
