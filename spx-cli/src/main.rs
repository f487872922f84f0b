//! SPX CLI - Command line tool for comparing S&P 500 performance year by year.

use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(
    name = "spx-cli",
    version,
    about = "S&P 500 year-by-year comparison data from FRED"
)]
struct Cli {
    #[command(flatten)]
    source: spx_cmd::source::SourceArgs,

    #[command(subcommand)]
    command: spx_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("series {} from {}", cli.source.series, cli.source.base_url);
    spx_cmd::run(&cli.source, cli.command).await
}
