use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use daybook_config::ConfigLoader;

use crate::cli::{Cli, ConfigCommands};
use crate::context::load_config;

/// Execute config subcommand
pub fn execute(cli: &Cli, cmd: &ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Init { path, force } => init(cli, path.clone(), *force),
        ConfigCommands::Show => show(cli),
    }
}

/// Write the commented example file
fn init(cli: &Cli, path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = match path.or_else(|| cli.config.clone()) {
        Some(path) => path,
        None => ConfigLoader::new()
            .resolve_path()
            .context("Could not determine config file path")?,
    };

    if config_path.exists() && !force {
        println!(
            "{} Config file already exists at: {}",
            "Error:".red().bold(),
            config_path.display()
        );
        println!("Use {} to overwrite", "--force".yellow());
        return Ok(());
    }

    ConfigLoader::write_example(&config_path)?;
    println!(
        "{} Created config file at: {}",
        "Success:".green().bold(),
        config_path.display()
    );
    Ok(())
}

/// Print the effective configuration (file, env and flags applied)
fn show(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", config.to_toml_string()?);
    }
    Ok(())
}
