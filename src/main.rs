use anyhow::Result;
use clap::Parser;
use payout_calculator::cli::{handle_command, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    handle_command(cli).await
}
