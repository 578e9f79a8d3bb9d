use clap::Parser;
use color_eyre::eyre::WrapErr;
use tracing::Level;

use quest_board::cli::{self, Cli};
use quest_board::config::BoardConfig;
use quest_board::util::log::init_logger;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = BoardConfig::load(cli.config.as_deref()).wrap_err("Failed to load configuration")?;

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        config.log_level.parse().unwrap_or(Level::INFO)
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    init_logger(&config.log_dir)
        .wrap_err_with(|| format!("Failed to open log directory {}", config.log_dir.display()))?;

    cli::run(cli, config).await
}
