use anyhow::Result;
use clap::Parser;
use tracing::debug;

use daybook_cli::cli::{Cli, Commands};
use daybook_cli::context::{load_config, AppContext};
use daybook_cli::{commands, logging};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config commands must work even when the config file is broken
    if let Commands::Config(cmd) = &cli.command {
        logging::init(logging::resolve_level(cli.log_level, cli.verbose, "warn"));
        return commands::config::execute(&cli, cmd);
    }

    let config = load_config(&cli)?;
    logging::init(logging::resolve_level(
        cli.log_level,
        cli.verbose,
        &config.logging.level,
    ));
    debug!("Snapshot path: {}", config.storage.snapshot_path.display());

    let mut ctx = AppContext::open(config, cli.json)?;
    commands::execute(&mut ctx, cli.command)
}
