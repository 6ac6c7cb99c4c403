//! Per-invocation state: effective config plus the opened workspace

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

use daybook_config::{Config, ConfigLoader};
use daybook_core::{parser_from_config, Environment, JsonFileStore, Workspace};

use crate::cli::Cli;

/// Load the config file named by `--config` (or the env/default path)
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_path(path);
    }
    let mut config = loader.load().context("Failed to load configuration")?;
    if let Some(snapshot) = &cli.snapshot {
        config.storage.snapshot_path = snapshot.clone();
    }
    Ok(config)
}

pub struct AppContext {
    pub config: Config,
    pub workspace: Workspace<JsonFileStore>,
    pub json: bool,
}

impl AppContext {
    pub fn open(config: Config, json: bool) -> Result<Self> {
        let parser = parser_from_config(&config.parser).context("Invalid [parser] configuration")?;
        let path: PathBuf = config.storage.snapshot_path.clone();
        debug!("Using snapshot {}", path.display());
        let workspace = Workspace::open(JsonFileStore::new(path), Environment::system(), parser);
        Ok(Self {
            config,
            workspace,
            json,
        })
    }

    pub fn snippet_width(&self) -> usize {
        self.config.display.snippet_width
    }
}
