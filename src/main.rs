//! End-to-end test driver for the Hello OpenFin demo application

use clap::Parser;
use openfin_e2e::commands::Commands;
use openfin_e2e::{cli, common};

#[derive(Parser)]
#[command(name = "openfin-e2e", about = "WebDriver test driver for the Hello OpenFin app")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let verbose = matches!(&cli.command, Commands::Run { verbose: true, .. });
    common::logging::init_cli(verbose);

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
