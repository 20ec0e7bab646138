//! Noughts - tic-tac-toe in the terminal.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use noughts_tui::{Cli, GameConfig, init_logging, run_tui};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = GameConfig::load_or_default(&cli.config)?.with_overrides(cli.overrides());
    init_logging(config.log_file())?;

    info!(
        config = %cli.config.display(),
        player_x = %config.player_x().name(),
        player_o = %config.player_o().name(),
        "Configuration resolved"
    );

    run_tui(config).await
}
